use std::collections::BTreeSet;

use crate::models::{ListingDraft, ListingField};

impl ListingDraft {
    pub fn field(&self, field: ListingField) -> &str {
        match field {
            ListingField::Title => &self.title,
            ListingField::Description => &self.description,
            ListingField::Address => &self.location.address,
            ListingField::City => &self.location.city,
            ListingField::State => &self.location.state,
            ListingField::Rooms => &self.rooms,
            ListingField::Bathrooms => &self.bathrooms,
            ListingField::Price => &self.price,
            ListingField::Terms => &self.terms,
        }
    }

    fn field_mut(&mut self, field: ListingField) -> &mut String {
        match field {
            ListingField::Title => &mut self.title,
            ListingField::Description => &mut self.description,
            ListingField::Address => &mut self.location.address,
            ListingField::City => &mut self.location.city,
            ListingField::State => &mut self.location.state,
            ListingField::Rooms => &mut self.rooms,
            ListingField::Bathrooms => &mut self.bathrooms,
            ListingField::Price => &mut self.price,
            ListingField::Terms => &mut self.terms,
        }
    }

    /// Store the raw input for a text field
    pub fn set_field(&mut self, field: ListingField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    /// Add the feature if absent, remove it otherwise. Returns whether it is now set.
    pub fn toggle_feature(&mut self, feature: &str) -> bool {
        toggle(&mut self.features, feature)
    }

    /// Add the amenity if absent, remove it otherwise. Returns whether it is now set.
    pub fn toggle_amenity(&mut self, amenity: &str) -> bool {
        toggle(&mut self.amenities, amenity)
    }
}

fn toggle(tags: &mut BTreeSet<String>, tag: &str) -> bool {
    if tags.remove(tag) {
        false
    } else {
        tags.insert(tag.to_string())
    }
}
