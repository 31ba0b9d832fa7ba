//! Typed HTTP client for the aqua backend API.
//!
//! All business logic (health scoring, species compatibility, marketplace
//! rules) lives in the remote backend; this crate only shapes requests and
//! decodes responses.

pub mod auth;
pub mod client;
pub mod config;
pub mod inference;
pub mod marketplace;
pub mod tanks;

pub use crate::auth::TokenResponse;
pub use crate::client::ApiClient;
pub use crate::config::ApiConfig;
pub use crate::marketplace::ListingDraft;
