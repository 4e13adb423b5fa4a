//! Geo Cache Port
//!
//! Defines the interface for the in-process IP → location cache.

use crate::domain::entities::GeoLocation;

/// Cache of resolved locations keyed by bare IP.
///
/// Writers may race on the same key with equal values, so `put` must tolerate overwrite.
pub trait GeoCache: Send + Sync {
    /// Get the cached location for an IP, if any.
    fn get(&self, ip: &str) -> Option<GeoLocation>;

    /// Insert or overwrite the location for an IP.
    fn put(&self, ip: String, location: GeoLocation);

    /// Drop every entry.
    fn clear(&self);

    /// Number of cached IPs.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
