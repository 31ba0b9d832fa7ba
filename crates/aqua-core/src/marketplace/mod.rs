//! Marketplace domain: listings and bids.

pub mod model;

pub use model::{Bid, BidStatus, Listing};
