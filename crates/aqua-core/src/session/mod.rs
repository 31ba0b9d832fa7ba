//! Session state: authentication token and active-tank selection.

pub mod manager;
pub mod store;

pub use manager::{ACTIVE_TANK_KEY, AUTH_TOKEN_KEY, SessionManager};
pub use store::KeyValueStore;
