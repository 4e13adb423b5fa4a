//! Application Layer
//!
//! Use cases built on top of the domain ports.

pub mod geo_resolver;

pub use geo_resolver::{ConfigError, GeoResolver, ResolverConfig, MAX_BATCH_SIZE};
