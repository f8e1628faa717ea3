use std::time::Duration;

use praeceptor_geocoding::{DEFAULT_NOMINATIM_ENDPOINT, DEFAULT_TIMEOUT, DEFAULT_VIACEP_ENDPOINT};

use crate::{error::GeoError, search::EARTH_RADIUS_KM};

/// Runtime configuration for geocoding and proximity search.
///
/// Defaults target the public upstream instances and the mean Earth radius;
/// deployments override via [`GeoConfig::builder`] or environment variables
/// (see [`GeoConfig::from_env`]).
#[derive(Debug, Clone, PartialEq)]
pub struct GeoConfig {
    /// Base URL of the forward-geocoding service.
    pub nominatim_endpoint: String,
    /// Base URL of the postal-lookup service.
    pub viacep_endpoint: String,
    /// Sphere radius used by the exact distance phase, in kilometers.
    pub earth_radius_km: f64,
    /// Bound on each outbound geocoding call.
    pub request_timeout: Duration,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            nominatim_endpoint: DEFAULT_NOMINATIM_ENDPOINT.to_string(),
            viacep_endpoint: DEFAULT_VIACEP_ENDPOINT.to_string(),
            earth_radius_km: EARTH_RADIUS_KM,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GeoConfig {
    #[must_use]
    pub fn builder() -> GeoConfigBuilder {
        GeoConfigBuilder::new()
    }

    /// Build a configuration from the environment, falling back to defaults
    /// for anything unset.
    ///
    /// Honored variables: `NOMINATIM_ENDPOINT`, `VIACEP_ENDPOINT`,
    /// `EARTH_RADIUS_KM`, `REQUEST_TIMEOUT_SECONDS`. A present-but-invalid
    /// numeric value is a configuration error, not a silent fallback.
    pub fn from_env() -> Result<Self, GeoError> {
        let mut config = Self::default();

        if let Ok(endpoint) = std::env::var("NOMINATIM_ENDPOINT") {
            config.nominatim_endpoint = endpoint;
        }
        if let Ok(endpoint) = std::env::var("VIACEP_ENDPOINT") {
            config.viacep_endpoint = endpoint;
        }
        if let Ok(raw) = std::env::var("EARTH_RADIUS_KM") {
            let radius: f64 = raw.parse().map_err(|_| {
                GeoError::Config(format!("EARTH_RADIUS_KM is not a number: {raw:?}"))
            })?;
            if !radius.is_finite() || radius <= 0.0 {
                return Err(GeoError::Config(format!(
                    "EARTH_RADIUS_KM must be positive, got {radius}"
                )));
            }
            config.earth_radius_km = radius;
        }
        if let Ok(raw) = std::env::var("REQUEST_TIMEOUT_SECONDS") {
            let seconds: u64 = raw.parse().map_err(|_| {
                GeoError::Config(format!(
                    "REQUEST_TIMEOUT_SECONDS is not a whole number: {raw:?}"
                ))
            })?;
            config.request_timeout = Duration::from_secs(seconds);
        }

        Ok(config)
    }
}

/// Builder for creating configurations with ergonomic defaults.
#[derive(Debug, Clone, Default)]
pub struct GeoConfigBuilder {
    config: GeoConfig,
}

impl GeoConfigBuilder {
    /// Create a new builder seeded with the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: GeoConfig::default(),
        }
    }

    /// Set the base URL of the forward-geocoding service.
    #[must_use]
    pub fn nominatim_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.nominatim_endpoint = endpoint.into();
        self
    }

    /// Set the base URL of the postal-lookup service.
    #[must_use]
    pub fn viacep_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.viacep_endpoint = endpoint.into();
        self
    }

    /// Set the sphere radius used by the exact distance phase.
    #[must_use]
    pub fn earth_radius_km(mut self, radius_km: f64) -> Self {
        self.config.earth_radius_km = radius_km;
        self
    }

    /// Set the bound on each outbound geocoding call.
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Build the final configuration.
    #[must_use]
    pub fn build(self) -> GeoConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_public_services() {
        let config = GeoConfig::default();
        assert_eq!(
            config.nominatim_endpoint,
            "https://nominatim.openstreetmap.org"
        );
        assert_eq!(config.viacep_endpoint, "https://viacep.com.br/ws");
        assert_eq!(config.earth_radius_km, 6371.0088);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn builder_overrides_individual_fields() {
        let config = GeoConfig::builder()
            .nominatim_endpoint("http://localhost:8080")
            .earth_radius_km(6378.0)
            .request_timeout(Duration::from_secs(2))
            .build();

        assert_eq!(config.nominatim_endpoint, "http://localhost:8080");
        assert_eq!(config.earth_radius_km, 6378.0);
        assert_eq!(config.request_timeout, Duration::from_secs(2));
        // Untouched fields keep their defaults.
        assert_eq!(config.viacep_endpoint, "https://viacep.com.br/ws");
    }

    #[test]
    fn builder_method_order_does_not_matter() {
        let a = GeoConfig::builder()
            .earth_radius_km(6378.0)
            .viacep_endpoint("http://localhost:9090")
            .build();
        let b = GeoConfig::builder()
            .viacep_endpoint("http://localhost:9090")
            .earth_radius_km(6378.0)
            .build();
        assert_eq!(a, b);
    }
}
