mod geo_cache;
mod geo_provider;

pub use geo_cache::GeoCache;
pub use geo_provider::{GeoProvider, LookupRecord, ProviderError};
