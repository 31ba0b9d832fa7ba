//! Application layer for the aqua client.
//!
//! This crate provides use case implementations that coordinate between
//! the session state manager and the backend API client.

pub mod auth_usecase;
pub mod tank_usecase;

pub use auth_usecase::AuthUseCase;
pub use tank_usecase::TankUseCase;
