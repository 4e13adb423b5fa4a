//! node-geo Library
//!
//! Resolves storage node addresses to geolocation records through a
//! cached, batched, timeout-bounded provider, and exposes the bounded
//! concurrency executor it runs on.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use adapters::outbound::{DashMapGeoCache, IpApiProvider};
pub use application::{ConfigError, GeoResolver, ResolverConfig};
pub use config::{load_config, Config};
pub use domain::entities::{Coordinates, GeoLocation};
pub use domain::ports::{GeoCache, GeoProvider, LookupRecord, ProviderError};
pub use domain::value_objects::{bare_ip, NodeAddress};
pub use infrastructure::{map_with_concurrency, BoundedExecutor};
