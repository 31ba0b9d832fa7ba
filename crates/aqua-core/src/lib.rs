pub mod error;
pub mod marketplace;
pub mod scan;
pub mod session;
pub mod tank;
pub mod user;

// Re-export common error type
pub use error::AquaError;
pub use session::{KeyValueStore, SessionManager};
