use serde::{Deserialize, Serialize};

/// Inclusive price bounds, in the currency units of the display price
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

/// Filter criteria for catalogue browsing. Unset criteria match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilters {
    pub price_range: Option<PriceRange>,
    /// Every listed feature must appear among the property's features or amenities
    #[serde(default)]
    pub features: Vec<String>,
    pub location: Option<String>,
    pub property_type: Option<String>,
}
