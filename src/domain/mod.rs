//! Domain Layer
//!
//! Geolocation records, address parsing and the outbound ports.

pub mod entities;
pub mod ports;
pub mod value_objects;

pub use entities::{Coordinates, GeoLocation, UNKNOWN};
pub use value_objects::{bare_ip, NodeAddress};
