//! Species-scan domain: inference predictions and species metadata.

pub mod model;

pub use model::{Prediction, SpeciesMetadata};
