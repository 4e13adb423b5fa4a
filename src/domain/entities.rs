//! Domain Entities - Core business objects
//!
//! These entities represent the geographic metadata attached to storage nodes.
//! They have no external dependencies beyond serde and contain only value logic.

use serde::{Deserialize, Serialize};

/// Placeholder used for any textual field the provider leaves out.
pub const UNKNOWN: &str = "Unknown";

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Geographic information resolved from an IP address.
///
/// Every field is always populated: text fields fall back to `"Unknown"`
/// and coordinates to `(0, 0)` when the upstream omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Country name as reported by the provider
    pub country: String,
    /// Region / state name
    pub region: String,
    /// City name
    pub city: String,
    /// Position of the city
    pub coordinates: Coordinates,
    /// IANA timezone (e.g. "Europe/Berlin")
    pub timezone: String,
}

impl GeoLocation {
    /// Build a location from possibly-missing upstream fields.
    ///
    /// Empty strings are treated the same as missing ones.
    pub fn from_parts(
        country: Option<String>,
        region: Option<String>,
        city: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
        timezone: Option<String>,
    ) -> Self {
        Self {
            country: or_unknown(country),
            region: or_unknown(region),
            city: or_unknown(city),
            coordinates: Coordinates::new(latitude.unwrap_or(0.0), longitude.unwrap_or(0.0)),
            timezone: or_unknown(timezone),
        }
    }
}

impl Default for GeoLocation {
    fn default() -> Self {
        Self::from_parts(None, None, None, None, None, None)
    }
}

fn or_unknown(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => UNKNOWN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_location_is_unknown() {
        let geo = GeoLocation::default();

        assert_eq!(geo.country, "Unknown");
        assert_eq!(geo.region, "Unknown");
        assert_eq!(geo.city, "Unknown");
        assert_eq!(geo.timezone, "Unknown");
        assert_eq!(geo.coordinates, Coordinates::new(0.0, 0.0));
    }

    #[test]
    fn test_from_parts_keeps_present_fields() {
        let geo = GeoLocation::from_parts(
            Some("Germany".to_string()),
            Some("Hesse".to_string()),
            Some("Frankfurt am Main".to_string()),
            Some(50.1109),
            Some(8.6821),
            Some("Europe/Berlin".to_string()),
        );

        assert_eq!(geo.country, "Germany");
        assert_eq!(geo.region, "Hesse");
        assert_eq!(geo.city, "Frankfurt am Main");
        assert_eq!(geo.coordinates.latitude, 50.1109);
        assert_eq!(geo.coordinates.longitude, 8.6821);
        assert_eq!(geo.timezone, "Europe/Berlin");
    }

    #[test]
    fn test_from_parts_fills_gaps() {
        let geo = GeoLocation::from_parts(
            Some("Japan".to_string()),
            None,
            Some(String::new()),
            Some(35.68),
            None,
            None,
        );

        assert_eq!(geo.country, "Japan");
        assert_eq!(geo.region, UNKNOWN);
        assert_eq!(geo.city, UNKNOWN);
        assert_eq!(geo.coordinates, Coordinates::new(35.68, 0.0));
        assert_eq!(geo.timezone, UNKNOWN);
    }

    #[test]
    fn test_json_shape() {
        let geo = GeoLocation::from_parts(
            Some("Brazil".to_string()),
            Some("Sao Paulo".to_string()),
            Some("Sao Paulo".to_string()),
            Some(-23.55),
            Some(-46.63),
            Some("America/Sao_Paulo".to_string()),
        );

        let json = serde_json::to_value(&geo).unwrap();
        assert_eq!(json["country"], "Brazil");
        assert_eq!(json["coordinates"]["latitude"], -23.55);
        assert_eq!(json["coordinates"]["longitude"], -46.63);
        assert_eq!(json["timezone"], "America/Sao_Paulo");
    }
}
