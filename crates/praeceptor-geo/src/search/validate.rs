use praeceptor_geocoding::GeoPoint;
use thiserror::Error;

/// Radius applied when the request omits `radius_km`.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// A rejected search parameter, attributed to the field that caused it.
///
/// This is the one error class that must reach the serving layer precisely,
/// so a client can correct its input; everything geocoding-related is
/// absorbed long before this point.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field}: {value:?} is not a valid decimal number")]
    InvalidFormat { field: &'static str, value: String },
    #[error("{field}: {value} is outside the valid range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("radius_km: must be a positive number, got {value}")]
    NonPositiveRadius { value: f64 },
}

impl ValidationError {
    /// The query-string field the rejection refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidFormat { field, .. } | Self::OutOfRange { field, .. } => field,
            Self::NonPositiveRadius { .. } => "radius_km",
        }
    }
}

/// Raw, untrusted query parameters exactly as the serving layer received
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSearchParams {
    pub lat: String,
    pub lon: String,
    /// Omitted means [`DEFAULT_RADIUS_KM`].
    pub radius_km: Option<String>,
}

impl RawSearchParams {
    pub fn new(lat: impl Into<String>, lon: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            lon: lon.into(),
            radius_km: None,
        }
    }

    #[must_use]
    pub fn with_radius_km(mut self, radius_km: impl Into<String>) -> Self {
        self.radius_km = Some(radius_km.into());
        self
    }

    /// Validate and convert into an executable [`SearchQuery`].
    ///
    /// Decimal commas are normalized to dots first (locale input), then each
    /// field is parsed and range-checked. The first offending field aborts
    /// the pipeline.
    pub fn parse(&self) -> Result<SearchQuery, ValidationError> {
        let latitude = parse_coordinate("lat", &self.lat, 90.0)?;
        let longitude = parse_coordinate("lon", &self.lon, 180.0)?;
        let radius_km = match self.radius_km.as_deref() {
            None => DEFAULT_RADIUS_KM,
            Some(raw) => parse_radius(raw)?,
        };

        Ok(SearchQuery {
            origin: GeoPoint::new(latitude, longitude),
            radius_km,
        })
    }
}

/// A validated, ephemeral proximity query. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchQuery {
    pub origin: GeoPoint,
    pub radius_km: f64,
}

impl SearchQuery {
    pub const fn new(origin: GeoPoint, radius_km: f64) -> Self {
        Self { origin, radius_km }
    }
}

fn normalize_decimal(raw: &str) -> String {
    raw.trim().replace(',', ".")
}

fn parse_coordinate(field: &'static str, raw: &str, bound: f64) -> Result<f64, ValidationError> {
    let value: f64 =
        normalize_decimal(raw)
            .parse()
            .map_err(|_| ValidationError::InvalidFormat {
                field,
                value: raw.to_string(),
            })?;

    if !value.is_finite() || value.abs() > bound {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min: -bound,
            max: bound,
        });
    }
    Ok(value)
}

fn parse_radius(raw: &str) -> Result<f64, ValidationError> {
    let value: f64 =
        normalize_decimal(raw)
            .parse()
            .map_err(|_| ValidationError::InvalidFormat {
                field: "radius_km",
                value: raw.to_string(),
            })?;

    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::NonPositiveRadius { value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_decimal_input() {
        let query = RawSearchParams::new("-22.9068", "-43.1729").parse().unwrap();
        assert!((query.origin.latitude - -22.9068).abs() < 1e-12);
        assert!((query.origin.longitude - -43.1729).abs() < 1e-12);
        assert_eq!(query.radius_km, DEFAULT_RADIUS_KM);
    }

    #[test]
    fn normalizes_decimal_commas() {
        let query = RawSearchParams::new("-22,90", "-43,17").parse().unwrap();
        assert!((query.origin.latitude - -22.90).abs() < 1e-12);
        assert!((query.origin.longitude - -43.17).abs() < 1e-12);
    }

    #[test]
    fn latitude_out_of_range_names_the_field() {
        let err = RawSearchParams::new("95", "0").parse().unwrap_err();
        assert_eq!(err.field(), "lat");
        assert!(matches!(
            err,
            ValidationError::OutOfRange {
                min, max, ..
            } if min == -90.0 && max == 90.0
        ));
    }

    #[test]
    fn longitude_out_of_range_names_the_field() {
        let err = RawSearchParams::new("0", "-180.01").parse().unwrap_err();
        assert_eq!(err.field(), "lon");
    }

    #[test]
    fn unparseable_input_is_invalid_format() {
        let err = RawSearchParams::new("abc", "0").parse().unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidFormat {
                field: "lat",
                value: "abc".to_string()
            }
        );
    }

    #[test]
    fn explicit_radius_is_parsed_and_comma_normalized() {
        let query = RawSearchParams::new("0", "0")
            .with_radius_km("7,5")
            .parse()
            .unwrap();
        assert!((query.radius_km - 7.5).abs() < 1e-12);
    }

    #[test]
    fn zero_and_negative_radius_are_rejected() {
        for raw in ["0", "-3"] {
            let err = RawSearchParams::new("0", "0")
                .with_radius_km(raw)
                .parse()
                .unwrap_err();
            assert_eq!(err.field(), "radius_km");
            assert!(matches!(err, ValidationError::NonPositiveRadius { .. }));
        }
    }

    #[test]
    fn garbage_radius_is_invalid_format() {
        let err = RawSearchParams::new("0", "0")
            .with_radius_km("ten")
            .parse()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn boundary_coordinates_are_accepted() {
        assert!(RawSearchParams::new("90", "180").parse().is_ok());
        assert!(RawSearchParams::new("-90", "-180").parse().is_ok());
    }

    #[test]
    fn non_finite_latitude_is_rejected() {
        let err = RawSearchParams::new("NaN", "0").parse().unwrap_err();
        assert_eq!(err.field(), "lat");
    }
}
