//! Tank domain: tanks, stocked species, and water-test readings.

pub mod model;

pub use model::{SpeciesDraft, Tank, TankDraft, TankSpecies, TankType, WaterParameters};
