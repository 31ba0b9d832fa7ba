//! Marketplace domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A marketplace listing.
///
/// `base_price` is a decimal string on the wire, matching the backend's
/// serialization of money values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub base_price: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Lifecycle of a bid on a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

/// A bid placed on a listing.
///
/// `amount` is sent and returned as a string, matching the original client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bid {
    pub id: i64,
    pub amount: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: BidStatus,
    #[serde(default)]
    pub bidder: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bid_status_defaults_to_pending() {
        let json = r#"{"id": 1, "amount": "25.00"}"#;
        let bid: Bid = serde_json::from_str(json).unwrap();
        assert_eq!(bid.status, BidStatus::Pending);
    }

    #[test]
    fn test_bid_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&BidStatus::Accepted).unwrap(),
            "\"accepted\""
        );
        let parsed: BidStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(parsed, BidStatus::Rejected);
    }

    #[test]
    fn test_listing_tolerates_sparse_payload() {
        let json = r#"{"id": 9, "title": "Java fern", "base_price": "4.50"}"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.title, "Java fern");
        assert!(listing.thumbnail.is_none());
    }
}
