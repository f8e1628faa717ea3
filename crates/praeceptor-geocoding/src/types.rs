use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
///
/// Both coordinates always travel together; an address either has a whole
/// point or none at all (`Option<GeoPoint>`), so a half-written coordinate
/// is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both coordinates are finite and within the WGS84 domain
    /// (latitude in [-90, 90], longitude in [-180, 180]).
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= 90.0
            && self.longitude.abs() <= 180.0
    }
}

/// Structured address fields as returned by a postal lookup.
///
/// Field values come back exactly as the upstream reports them; `country`
/// is always the fixed literal [`crate::DEFAULT_COUNTRY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredAddress {
    pub street: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub region: Option<String>,
    pub country: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_within_domain_is_valid() {
        assert!(GeoPoint::new(-22.9068, -43.1729).is_valid());
        assert!(GeoPoint::new(90.0, 180.0).is_valid());
        assert!(GeoPoint::new(-90.0, -180.0).is_valid());
    }

    #[test]
    fn point_outside_domain_is_invalid() {
        assert!(!GeoPoint::new(90.1, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, -180.5).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, f64::INFINITY).is_valid());
    }
}
