//! Infrastructure Layer
//!
//! Cross-cutting concerns and infrastructure components.

pub mod bounded_executor;

pub use bounded_executor::{map_with_concurrency, BoundedExecutor, DEFAULT_CONCURRENCY};
