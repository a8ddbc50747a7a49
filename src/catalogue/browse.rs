use std::sync::Arc;

use tracing::{debug, info};

use crate::catalogue::types::PropertyFilters;
use crate::models::Property;
use crate::storage::{KeyValueStore, KeyValueStoreExt, StoreError};

const FAVORITES_KEY: &str = "propertyFavorites";

/// Browsable property list with favorites that persist across reloads
pub struct Catalogue {
    properties: Vec<Property>,
    favorites: Vec<String>,
    store: Arc<dyn KeyValueStore>,
}

impl Catalogue {
    pub fn new(properties: Vec<Property>, store: Arc<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let favorites: Vec<String> = store.get_json(FAVORITES_KEY)?.unwrap_or_default();
        debug!("Catalogue opened with {} favorite(s)", favorites.len());
        Ok(Self {
            properties,
            favorites,
            store,
        })
    }

    /// Case-insensitive match on name, location or description
    pub fn search(&self, query: &str) -> Vec<&Property> {
        let query = query.to_lowercase();
        self.properties
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query)
                    || p.location.to_lowercase().contains(&query)
                    || p
                        .description
                        .as_deref()
                        .map(|d| d.to_lowercase().contains(&query))
                        .unwrap_or(false)
            })
            .collect()
    }

    pub fn filter(&self, filters: &PropertyFilters) -> Vec<&Property> {
        self.properties
            .iter()
            .filter(|p| matches_filters(p, filters))
            .collect()
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|f| f == id)
    }

    pub fn add_favorite(&mut self, id: &str) -> Result<(), StoreError> {
        if self.is_favorite(id) {
            return Ok(());
        }
        self.favorites.push(id.to_string());
        self.persist()?;
        info!("Added property {} to favorites", id);
        Ok(())
    }

    pub fn remove_favorite(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.favorites.len();
        self.favorites.retain(|f| f != id);
        if self.favorites.len() != before {
            self.persist()?;
            info!("Removed property {} from favorites", id);
        }
        Ok(())
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.store.set_json(FAVORITES_KEY, &self.favorites)
    }
}

fn matches_filters(property: &Property, filters: &PropertyFilters) -> bool {
    if let Some(location) = &filters.location {
        if !property
            .location
            .to_lowercase()
            .contains(&location.to_lowercase())
        {
            return false;
        }
    }

    if let Some(kind) = &filters.property_type {
        if property.property_type.as_deref() != Some(kind.as_str()) {
            return false;
        }
    }

    let has_all_features = filters
        .features
        .iter()
        .all(|f| property.features.contains(f) || property.amenities.contains(f));
    if !has_all_features {
        return false;
    }

    if let Some(range) = filters.price_range {
        match property.price_value() {
            Some(price) if price >= range.min && price <= range.max => {}
            _ => return false,
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::sample::sample_properties;
    use crate::catalogue::types::PriceRange;
    use crate::storage::MemoryStore;

    fn catalogue() -> Catalogue {
        Catalogue::new(sample_properties(), Arc::new(MemoryStore::new())).unwrap()
    }

    fn names(properties: Vec<&Property>) -> Vec<&str> {
        properties.into_iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn search_covers_location_and_description() {
        let catalogue = catalogue();
        assert_eq!(names(catalogue.search("LAGOS")), vec!["Amber Suites"]);
        assert_eq!(names(catalogue.search("family home")), vec!["Pelican Heights"]);
        assert!(catalogue.search("castle").is_empty());
    }

    #[test]
    fn filters_combine() {
        let catalogue = catalogue();
        let filters = PropertyFilters {
            property_type: Some("Apartment".to_string()),
            features: vec!["Gym".to_string()],
            price_range: Some(PriceRange { min: 2600, max: 3000 }),
            ..Default::default()
        };
        assert_eq!(names(catalogue.filter(&filters)), vec!["Amber Suites"]);
    }

    #[test]
    fn features_match_amenities_too() {
        let catalogue = catalogue();
        let filters = PropertyFilters {
            features: vec!["Parking".to_string()],
            ..Default::default()
        };
        assert_eq!(catalogue.filter(&filters).len(), 3);
    }

    #[test]
    fn favorites_persist_without_duplicates() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut catalogue = Catalogue::new(sample_properties(), store.clone()).unwrap();
        catalogue.add_favorite("2").unwrap();
        catalogue.add_favorite("2").unwrap();
        catalogue.add_favorite("3").unwrap();
        catalogue.remove_favorite("3").unwrap();

        let reopened = Catalogue::new(sample_properties(), store).unwrap();
        assert_eq!(reopened.favorites(), ["2".to_string()]);
        assert!(reopened.is_favorite("2"));
    }
}
