//! Praeceptor Geo - Geocoding Ingestion and Proximity Instructor Search
//!
//! This library is the geo core of the Praeceptor tutoring marketplace. It
//! covers two flows and nothing else:
//!
//! - **Write time**: best-effort enrichment of an address record from two
//!   public geocoding services (Nominatim for coordinates, ViaCEP for the
//!   structured address), tolerating upstream flakiness without ever
//!   blocking or corrupting the write.
//! - **Read time**: validated proximity search over instructor profiles, a
//!   bounding-box pre-filter cheap enough to push down to storage followed
//!   by an exact haversine distance check.
//!
//! Persistence, serialization surfaces, routing, and authentication are the
//! surrounding application's business; this crate only needs a sequence of
//! candidate profiles and hands back matches.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use praeceptor_geo::{GeoConfig, InstructorLocator, RawSearchParams};
//!
//! let locator = InstructorLocator::new(GeoConfig::default())?;
//!
//! // Write time: fill in whatever the upstreams can provide.
//! let mut address = praeceptor_geo::AddressRecord::new("20040-020");
//! let report = locator.enrich_address(&mut address);
//! println!("enriched: {}", report.fully_enriched());
//!
//! // Read time: validate untrusted input and search.
//! let params = RawSearchParams::new("-22.9068", "-43.1729").with_radius_km("10");
//! let candidates = Vec::new(); // from the storage collaborator
//! for m in locator.search(&params, candidates)? {
//!     println!("{} at {:.2} km", m.profile.full_name(), m.distance_km);
//! }
//! # Ok::<(), praeceptor_geo::error::GeoError>(())
//! ```

use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod config;
mod core;
mod enrich;
pub mod error;
mod model;
mod search;
pub mod test_data;

pub use core::InstructorLocator;

pub use config::{GeoConfig, GeoConfigBuilder};
pub use enrich::{EnrichmentReport, FieldOutcome, enrich_address};
pub use model::{AddressRecord, ProfileRecord, ProfileRole};
// Re-export the geocoding subcrate's surface so most callers need only one
// dependency.
pub use praeceptor_geocoding as geocoding;
pub use praeceptor_geocoding::{
    DEFAULT_COUNTRY, GeoPoint, GeocodeClient, GeocodeFailure, Geocoder, NominatimClient,
    StructuredAddress, ViaCepClient,
};
pub use search::{
    BoundingBox, DEFAULT_RADIUS_KM, EARTH_RADIUS_KM, ProximityMatch, RawSearchParams, SearchQuery,
    ValidationError, find_nearby, find_nearby_on_sphere, find_nearby_sorted,
    find_nearby_sorted_on_sphere, haversine_km, haversine_km_with_radius,
};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the library.
///
/// Sets up structured logging with configurable levels and filtering. Call
/// once at application start to get detailed output from enrichment and
/// search operations.
///
/// # Arguments
///
/// * `level` - The minimum log level to display
///
/// # Examples
///
/// ```rust
/// use praeceptor_geo::init_logging;
/// use tracing::Level;
///
/// init_logging(Level::INFO)?;
/// # Ok::<(), praeceptor_geo::error::GeoError>(())
/// ```
pub fn init_logging(level: impl Into<LevelFilter>) -> Result<&'static (), error::GeoError> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?
            .add_directive("hyper_util=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .init();
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_data::{RIO_DE_JANEIRO, SampleProfilesConfig, create_sample_profiles};

    fn setup_test_env() {
        let _ = init_logging(tracing::Level::WARN);
    }

    #[test]
    fn test_locator_with_injected_geocoder() {
        setup_test_env();

        struct NoopGeocoder;
        impl Geocoder for NoopGeocoder {
            fn forward_geocode(&self, _query: &str) -> geocoding::Result<GeoPoint> {
                Err(GeocodeFailure::NotFound)
            }
            fn postal_lookup(&self, _postal_code: &str) -> geocoding::Result<StructuredAddress> {
                Err(GeocodeFailure::NotFound)
            }
        }

        let locator = InstructorLocator::with_geocoder(NoopGeocoder, GeoConfig::default());
        let profiles = create_sample_profiles(&SampleProfilesConfig::minimal());
        let params = RawSearchParams::new("-22.9068", "-43.1729").with_radius_km("50");

        let matches = locator.search(&params, profiles).expect("search should work");
        assert!(matches.iter().all(|m| m.profile.is_instructor()));
    }

    #[test]
    fn test_free_function_search_surface() {
        setup_test_env();

        let profiles = create_sample_profiles(&SampleProfilesConfig::default());
        let matches: Vec<_> = find_nearby(RIO_DE_JANEIRO, 50.0, profiles).collect();
        assert!(!matches.is_empty(), "sample data should have instructors near Rio");
    }

    #[test]
    fn test_validation_is_reachable_from_the_root() {
        setup_test_env();

        let err = RawSearchParams::new("95", "0").parse().unwrap_err();
        assert_eq!(err.field(), "lat");
    }
}
