use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use crate::listing::errors::SubmissionError;
use crate::listing::traits::ListingService;
use crate::listing::types::{CreateListingRequest, StoredListing};
use crate::models::ListingId;
use crate::storage::{KeyValueStore, KeyValueStoreExt, StoreError};

const LISTINGS_KEY: &str = "listings";

/// Mock backend that keeps created listings in the key-value store
pub struct LocalListingService {
    store: Arc<dyn KeyValueStore>,
    latency: Duration,
}

impl LocalListingService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            latency: Duration::ZERO,
        }
    }

    /// Simulated round-trip delay before a listing is stored
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Listings created so far, oldest first
    pub fn listings(&self) -> Result<Vec<StoredListing>, StoreError> {
        Ok(self.store.get_json(LISTINGS_KEY)?.unwrap_or_default())
    }

    pub fn get(&self, id: &str) -> Result<Option<StoredListing>, StoreError> {
        Ok(self.listings()?.into_iter().find(|l| l.id == id))
    }

    /// Merge new field values into a stored listing.
    /// Id, creation time, status and view count are kept.
    pub fn update(&self, id: &str, request: &CreateListingRequest) -> Result<StoredListing, SubmissionError> {
        let mut listings = self.listings()?;
        let Some(listing) = listings.iter_mut().find(|l| l.id == id) else {
            return Err(SubmissionError::Rejected(format!("Listing {} not found", id)));
        };

        let mut merged = request.clone();
        if merged.owner_id.is_none() {
            merged.owner_id = listing.listing.owner_id.take();
        }
        listing.listing = merged;
        let updated = listing.clone();

        self.store.set_json(LISTINGS_KEY, &listings)?;
        debug!("Listing {} updated locally", id);
        Ok(updated)
    }

    async fn round_trip(&self, token: &str) -> Result<(), SubmissionError> {
        if token.is_empty() {
            return Err(SubmissionError::Unauthenticated);
        }
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(())
    }
}

#[async_trait]
impl ListingService for LocalListingService {
    async fn create_listing(
        &self,
        request: &CreateListingRequest,
        token: &str,
    ) -> Result<ListingId, SubmissionError> {
        self.round_trip(token).await?;

        let mut listings = self.listings()?;
        let now = Utc::now();
        let mut id = now.timestamp_millis().to_string();
        if listings.iter().any(|l| l.id == id) {
            id = format!("{}-{}", id, listings.len());
        }

        listings.push(StoredListing {
            id: id.clone(),
            listing: request.clone(),
            created_at: now,
            status: "Active".to_string(),
            views: 0,
        });
        self.store.set_json(LISTINGS_KEY, &listings)?;
        debug!("{} listing(s) stored locally", listings.len());

        info!("✅ Listing {} saved by {}", id, self.service_name());
        Ok(ListingId(id))
    }

    async fn update_listing(
        &self,
        id: &ListingId,
        request: &CreateListingRequest,
        token: &str,
    ) -> Result<ListingId, SubmissionError> {
        self.round_trip(token).await?;
        self.update(&id.0, request)?;
        info!("✅ Listing {} updated by {}", id, self.service_name());
        Ok(id.clone())
    }

    fn service_name(&self) -> &'static str {
        "local mock backend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ListingKind, Location};
    use crate::storage::MemoryStore;

    fn request(title: &str) -> CreateListingRequest {
        CreateListingRequest {
            kind: ListingKind::House,
            title: title.to_string(),
            description: "Elegant family home".to_string(),
            location: Location {
                address: "7 Aguiyi Ironsi".to_string(),
                city: "Wuse".to_string(),
                state: "Abuja".to_string(),
            },
            price: 3200.0,
            rooms: Some(4),
            bathrooms: Some(3),
            features: vec!["Garden".to_string()],
            amenities: vec![],
            images: vec![],
            terms: String::new(),
            owner_id: None,
        }
    }

    #[tokio::test]
    async fn created_listings_are_active_with_no_views() {
        let service = LocalListingService::new(Arc::new(MemoryStore::new()));
        let first = service.create_listing(&request("Pelican Heights"), "t").await.unwrap();
        let second = service.create_listing(&request("Amber Suites"), "t").await.unwrap();
        assert_ne!(first, second);

        let stored = service.listings().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].id, first.0);
        assert_eq!(stored[0].status, "Active");
        assert_eq!(stored[0].views, 0);
        assert_eq!(stored[1].listing.title, "Amber Suites");
    }

    #[tokio::test]
    async fn missing_token_is_refused() {
        let service = LocalListingService::new(Arc::new(MemoryStore::new()));
        let err = service.create_listing(&request("x"), "").await.unwrap_err();
        assert_eq!(err, SubmissionError::Unauthenticated);
        assert!(service.listings().unwrap().is_empty());
    }

    #[tokio::test]
    async fn listings_are_found_by_id() {
        let service = LocalListingService::new(Arc::new(MemoryStore::new()));
        let id = service.create_listing(&request("Pelican Heights"), "t").await.unwrap();

        let found = service.get(&id.0).unwrap().unwrap();
        assert_eq!(found.listing.title, "Pelican Heights");
        assert!(service.get("missing").unwrap().is_none());
    }

    #[tokio::test]
    async fn update_merges_fields_and_keeps_bookkeeping() {
        let service = LocalListingService::new(Arc::new(MemoryStore::new()));
        let mut original = request("Pelican Heights");
        original.owner_id = Some("u1".to_string());
        let id = service.create_listing(&original, "t").await.unwrap();
        let created = service.get(&id.0).unwrap().unwrap();

        let mut changes = request("Pelican Heights (renovated)");
        changes.price = 3500.0;
        let returned = service.update_listing(&id, &changes, "t").await.unwrap();
        assert_eq!(returned, id);

        let stored = service.get(&id.0).unwrap().unwrap();
        assert_eq!(stored.listing.title, "Pelican Heights (renovated)");
        assert_eq!(stored.listing.price, 3500.0);
        assert_eq!(stored.listing.owner_id.as_deref(), Some("u1"));
        assert_eq!(stored.created_at, created.created_at);
        assert_eq!(stored.status, "Active");
        assert_eq!(service.listings().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn updating_unknown_listing_is_rejected() {
        let service = LocalListingService::new(Arc::new(MemoryStore::new()));
        let err = service
            .update_listing(&ListingId("404".to_string()), &request("x"), "t")
            .await
            .unwrap_err();
        assert!(matches!(err, SubmissionError::Rejected(_)));
        assert!(!err.is_retryable());
    }
}
