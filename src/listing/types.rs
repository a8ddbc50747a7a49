use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::listing::validation::{self, FieldErrors};
use crate::models::{ListingDraft, ListingField, ListingKind, Location};

/// Reference to an attached image, in upload order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub file_name: String,
    pub size: u64,
    pub preview: String,
}

/// Body of the create-listing call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingRequest {
    #[serde(rename = "type")]
    pub kind: ListingKind,
    pub title: String,
    pub description: String,
    pub location: Location,
    pub price: f64,
    pub rooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub features: Vec<String>,
    pub amenities: Vec<String>,
    pub images: Vec<ImageRef>,
    pub terms: String,
    pub owner_id: Option<String>,
}

impl CreateListingRequest {
    /// Build the request from a draft, failing with the same errors the
    /// validators would report
    pub fn from_draft(draft: &ListingDraft, owner_id: Option<String>) -> Result<Self, FieldErrors> {
        let errors = validation::validate_all(draft);
        if !errors.is_empty() {
            return Err(errors);
        }

        let price = validation::parse_price(&draft.price)
            .ok()
            .flatten()
            .ok_or_else(|| {
                FieldErrors::from([(ListingField::Price, validation::REQUIRED.to_string())])
            })?;

        Ok(Self {
            kind: draft.kind,
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            location: draft.location.clone(),
            price,
            rooms: validation::parse_count(&draft.rooms).ok().flatten(),
            bathrooms: validation::parse_count(&draft.bathrooms).ok().flatten(),
            features: draft.features.iter().cloned().collect(),
            amenities: draft.amenities.iter().cloned().collect(),
            images: draft
                .images
                .iter()
                .map(|image| ImageRef {
                    file_name: image.file.name.clone(),
                    size: image.file.size,
                    preview: image.preview.0.clone(),
                })
                .collect(),
            terms: draft.terms.clone(),
            owner_id,
        })
    }
}

/// Listing as kept by the local mock backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredListing {
    pub id: String,
    #[serde(flatten)]
    pub listing: CreateListingRequest,
    pub created_at: DateTime<Utc>,
    pub status: String,
    pub views: u64,
}

impl StoredListing {
    /// Editable draft holding this listing's values.
    ///
    /// Uploaded images have no file behind them any more, so they are not
    /// part of the draft; the edit flow keeps them as [`ImageRef`]s.
    pub fn to_draft(&self) -> ListingDraft {
        let listing = &self.listing;
        ListingDraft {
            title: listing.title.clone(),
            description: listing.description.clone(),
            kind: listing.kind,
            location: listing.location.clone(),
            price: listing.price.to_string(),
            rooms: listing.rooms.map(|n| n.to_string()).unwrap_or_default(),
            bathrooms: listing.bathrooms.map(|n| n.to_string()).unwrap_or_default(),
            features: listing.features.iter().cloned().collect(),
            amenities: listing.amenities.iter().cloned().collect(),
            images: Vec::new(),
            terms: listing.terms.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileHandle, ImageAttachment, PreviewHandle};

    #[test]
    fn request_keeps_image_order_and_parses_numbers() {
        let mut draft = ListingDraft::default();
        draft.title = " Amber Suites ".to_string();
        draft.description = "City views".to_string();
        draft.location.address = "4 Oba Akran".to_string();
        draft.location.city = "Ikeja".to_string();
        draft.location.state = "Lagos".to_string();
        draft.price = "2800".to_string();
        draft.rooms = "2".to_string();
        for name in ["b.jpg", "a.jpg"] {
            draft.images.push(ImageAttachment {
                file: FileHandle::new(name, vec![0xFF, 0xD8, 0xFF]),
                preview: PreviewHandle(format!("blob:{}", name)),
            });
        }

        let request = CreateListingRequest::from_draft(&draft, Some("u1".to_string())).unwrap();
        assert_eq!(request.title, "Amber Suites");
        assert_eq!(request.price, 2800.0);
        assert_eq!(request.rooms, Some(2));
        assert_eq!(request.bathrooms, None);
        let order: Vec<_> = request.images.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(order, vec!["b.jpg", "a.jpg"]);
    }

    #[test]
    fn invalid_draft_yields_field_errors() {
        let errors = CreateListingRequest::from_draft(&ListingDraft::default(), None).unwrap_err();
        assert!(errors.contains_key(&ListingField::Title));
        assert!(errors.contains_key(&ListingField::Price));
    }

    #[test]
    fn stored_listing_reopens_as_valid_draft() {
        let stored = StoredListing {
            id: "17".to_string(),
            listing: CreateListingRequest {
                kind: ListingKind::House,
                title: "Pelican Heights".to_string(),
                description: "Family home".to_string(),
                location: Location {
                    address: "7 Aguiyi Ironsi".to_string(),
                    city: "Wuse".to_string(),
                    state: "Abuja".to_string(),
                },
                price: 3200.0,
                rooms: Some(4),
                bathrooms: None,
                features: vec!["Garden".to_string()],
                amenities: vec![],
                images: vec![],
                terms: "No pets".to_string(),
                owner_id: None,
            },
            created_at: Utc::now(),
            status: "Active".to_string(),
            views: 12,
        };

        let draft = stored.to_draft();
        assert_eq!(draft.price, "3200");
        assert_eq!(draft.rooms, "4");
        assert_eq!(draft.bathrooms, "");
        assert!(draft.features.contains("Garden"));
        assert!(validation::validate_all(&draft).is_empty());
    }

    #[test]
    fn kind_serialises_as_type() {
        let mut draft = ListingDraft::default();
        draft.title = "Cleaning".to_string();
        draft.description = "Weekly".to_string();
        draft.location.address = "1 Main".to_string();
        draft.location.city = "Wuse".to_string();
        draft.location.state = "Abuja".to_string();
        draft.price = "50".to_string();
        draft.kind = ListingKind::Service;

        let request = CreateListingRequest::from_draft(&draft, None).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "service");
        assert_eq!(json["location"]["city"], "Wuse");
    }
}
