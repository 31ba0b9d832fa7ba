//! Marketplace endpoints: listings and bids.

use std::path::PathBuf;

use aqua_core::error::{AquaError, Result};
use aqua_core::marketplace::{Bid, Listing};
use reqwest::multipart::{Form, Part};
use serde::Serialize;

use crate::client::{ApiClient, Envelope};

/// Payload for creating a marketplace listing.
///
/// The thumbnail, when present, is uploaded as a multipart file part.
#[derive(Debug, Clone)]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub base_price: f64,
    pub category: String,
    pub location: String,
    pub thumbnail: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct BidRequest {
    /// Sent as a string, matching the backend's decimal handling.
    amount: String,
    message: String,
}

impl ApiClient {
    /// Fetches all active listings.
    pub async fn fetch_listings(&self, token: &str) -> Result<Vec<Listing>> {
        let envelope: Envelope<Vec<Listing>> = self
            .send_json(self.get("/marketplace/listings/").bearer_auth(token))
            .await?;
        Ok(envelope.data)
    }

    /// Fetches one listing with full details.
    pub async fn fetch_listing_details(&self, token: &str, listing_id: i64) -> Result<Listing> {
        let envelope: Envelope<Listing> = self
            .send_json(
                self.get(&format!("/marketplace/listings/{}/", listing_id))
                    .bearer_auth(token),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Fetches the authenticated user's own listings.
    pub async fn my_listings(&self, token: &str) -> Result<Vec<Listing>> {
        // The backend exposes this route under a doubled prefix.
        let envelope: Envelope<Vec<Listing>> = self
            .send_json(
                self.get("/marketplace/marketplace/listings/mine/")
                    .bearer_auth(token),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Creates a listing, uploading the thumbnail when one is provided.
    pub async fn create_listing(&self, token: &str, draft: &ListingDraft) -> Result<()> {
        let mut form = Form::new()
            .text("title", draft.title.clone())
            .text("description", draft.description.clone())
            .text("base_price", draft.base_price.to_string())
            .text("category", draft.category.clone())
            .text("location", draft.location.clone());

        if let Some(path) = &draft.thumbnail {
            form = form.part("thumbnail", file_part(path).await?);
        }

        self.send_unit(
            self.post("/marketplace/listings/create/")
                .bearer_auth(token)
                .multipart(form),
        )
        .await
    }

    /// Places a bid on a listing.
    pub async fn place_bid(
        &self,
        token: &str,
        listing_id: i64,
        amount: f64,
        message: &str,
    ) -> Result<()> {
        let body = BidRequest {
            amount: amount.to_string(),
            message: message.to_string(),
        };
        self.send_unit(
            self.post(&format!("/marketplace/listings/{}/bid/", listing_id))
                .bearer_auth(token)
                .json(&body),
        )
        .await
    }

    /// Fetches the bids on a listing.
    pub async fn fetch_bids(&self, token: &str, listing_id: i64) -> Result<Vec<Bid>> {
        let envelope: Envelope<Vec<Bid>> = self
            .send_json(
                self.get(&format!("/marketplace/listings/{}/bids/", listing_id))
                    .bearer_auth(token),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Accepts a bid (seller only).
    pub async fn accept_bid(&self, token: &str, bid_id: i64) -> Result<()> {
        self.send_unit(
            self.post(&format!("/marketplace/bids/{}/accept/", bid_id))
                .bearer_auth(token),
        )
        .await
    }

    /// Rejects a bid (seller only).
    pub async fn reject_bid(&self, token: &str, bid_id: i64) -> Result<()> {
        self.send_unit(
            self.post(&format!("/marketplace/bids/{}/reject/", bid_id))
                .bearer_auth(token),
        )
        .await
    }
}

/// Builds a multipart file part from a local path.
pub(crate) async fn file_part(path: &PathBuf) -> Result<Part> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime.essence_str())
        .map_err(|e| AquaError::internal(format!("Invalid mime type: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bid_request_sends_amount_as_string() {
        let body = BidRequest {
            amount: 25.5.to_string(),
            message: "interested".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["amount"], "25.5");
        assert_eq!(json["message"], "interested");
    }

    #[tokio::test]
    async fn test_file_part_from_temp_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("thumbnail.jpg");
        std::fs::write(&path, b"jpegdata").unwrap();

        // Just verify the part builds; reqwest keeps its contents opaque.
        file_part(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_file_part_missing_file_errors() {
        let path = PathBuf::from("/nonexistent/thumbnail.jpg");
        assert!(file_part(&path).await.is_err());
    }
}
