//! DashMap Geo Cache
//!
//! Implements GeoCache using DashMap for lock-free concurrent access.

use crate::domain::entities::GeoLocation;
use crate::domain::ports::GeoCache;
use dashmap::DashMap;

/// DashMap-backed location cache.
///
/// Memory-resident only: starts empty and never evicts.
/// IP → location is treated as static for the process lifetime.
pub struct DashMapGeoCache {
    entries: DashMap<String, GeoLocation>,
}

impl DashMapGeoCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl Default for DashMapGeoCache {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoCache for DashMapGeoCache {
    fn get(&self, ip: &str) -> Option<GeoLocation> {
        self.entries.get(ip).map(|e| e.value().clone())
    }

    fn put(&self, ip: String, location: GeoLocation) {
        self.entries.insert(ip, location);
    }

    fn clear(&self) {
        let dropped = self.entries.len();
        self.entries.clear();
        tracing::debug!("geo cache cleared ({} entries dropped)", dropped);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
