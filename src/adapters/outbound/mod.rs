mod dashmap_geo_cache;
mod ip_api_provider;

pub use dashmap_geo_cache::DashMapGeoCache;
pub use ip_api_provider::{IpApiProvider, DEFAULT_BASE_URL};
