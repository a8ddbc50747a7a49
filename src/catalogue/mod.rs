pub mod browse;
pub mod sample;
pub mod types;

pub use browse::Catalogue;
pub use types::{PriceRange, PropertyFilters};
