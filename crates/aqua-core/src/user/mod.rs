//! User domain: credentials and profile payloads.

pub mod model;

pub use model::{Credentials, ProfileUpdate};
