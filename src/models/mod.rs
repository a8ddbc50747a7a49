use std::collections::BTreeSet;
use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of listing being offered
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    #[default]
    Apartment,
    House,
    Studio,
    Hostel,
    Service,
}

/// Where a listed property sits
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub address: String,
    pub city: String,
    pub state: String,
}

/// Raw file as handed over by the file picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub size: u64,
    pub bytes: Bytes,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            bytes,
        }
    }
}

/// Session-scoped reference used to render an attached file before upload
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreviewHandle(pub String);

impl fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file attached to a draft together with its preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file: FileHandle,
    pub preview: PreviewHandle,
}

/// In-progress listing data held by the wizard.
///
/// Numeric fields keep the raw text the user typed; they are only parsed
/// when the draft is validated or turned into a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub kind: ListingKind,
    pub location: Location,
    pub price: String,
    pub rooms: String,
    pub bathrooms: String,
    pub features: BTreeSet<String>,
    pub amenities: BTreeSet<String>,
    pub images: Vec<ImageAttachment>,
    pub terms: String,
}

/// Draft fields addressable by validators and text edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingField {
    Title,
    Description,
    Address,
    City,
    State,
    Rooms,
    Bathrooms,
    Price,
    Terms,
}

impl ListingField {
    pub fn name(self) -> &'static str {
        match self {
            ListingField::Title => "title",
            ListingField::Description => "description",
            ListingField::Address => "address",
            ListingField::City => "city",
            ListingField::State => "state",
            ListingField::Rooms => "rooms",
            ListingField::Bathrooms => "bathrooms",
            ListingField::Price => "price",
            ListingField::Terms => "terms",
        }
    }
}

impl fmt::Display for ListingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifier handed back by the listing service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub String);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Category of a dashboard notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Listing,
    Review,
    Message,
    System,
}

/// Dashboard alert
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
    pub link: Option<String>,
}

/// Account role chosen at sign-up
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    Explorer,
    #[serde(rename = "Service Provider")]
    ServiceProvider,
    #[serde(rename = "Accommodation Provider")]
    AccommodationProvider,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProfileVisibility {
    #[default]
    Public,
    Private,
}

/// Per-user preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub marketing_emails: bool,
    pub profile_visibility: ProfileVisibility,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            push_notifications: true,
            marketing_emails: false,
            profile_visibility: ProfileVisibility::Public,
        }
    }
}

/// Signed-in user as seen by the rest of the application (no password)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_of_specialization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub settings: UserSettings,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Agent attached to a catalogue property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub image: String,
}

/// Property shown in the browsing catalogue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub image: String,
    pub name: String,
    pub location: String,
    /// Display price, e.g. "$2,500/mo"
    pub price: String,
    pub features: Vec<String>,
    pub description: Option<String>,
    pub area: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub year_built: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub agent: Option<Agent>,
}

impl Property {
    /// Numeric price from the display string ("$2,500/mo" -> 2500)
    pub fn price_value(&self) -> Option<u64> {
        let digits: String = self.price.chars().filter(|c| c.is_ascii_digit()).collect();
        digits.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_handle_size_follows_bytes() {
        let file = FileHandle::new("a.jpg", vec![1u8, 2, 3]);
        assert_eq!(file.size, 3);
        assert_eq!(file.name, "a.jpg");
    }

    #[test]
    fn property_price_value_strips_formatting() {
        let property = Property {
            id: "1".to_string(),
            image: String::new(),
            name: "Paradise Residence".to_string(),
            location: "Ile-Ife, Osun State".to_string(),
            price: "$2,500/mo".to_string(),
            features: vec![],
            description: None,
            area: None,
            property_type: None,
            year_built: None,
            amenities: vec![],
            agent: None,
        };
        assert_eq!(property.price_value(), Some(2500));
    }

    #[test]
    fn role_uses_display_names_on_the_wire() {
        let json = serde_json::to_string(&Role::AccommodationProvider).unwrap();
        assert_eq!(json, "\"Accommodation Provider\"");
    }
}
