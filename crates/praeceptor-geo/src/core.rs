//! The main entry point tying enrichment, validation, and proximity search
//! together.
//!
//! [`InstructorLocator`] owns a geocoder and a [`GeoConfig`] and exposes the
//! two flows the serving layer needs: best-effort address enrichment at
//! write time, and validated proximity search at read time. The storage
//! collaborator supplies candidate profiles (ideally already narrowed with
//! the [`BoundingBox`] this type hands out) and consumes the results.

use praeceptor_geocoding::{GeocodeClient, Geocoder};
use tracing::{info, instrument};

use crate::{
    config::GeoConfig,
    enrich::{EnrichmentReport, enrich_address},
    error::GeoError,
    model::{AddressRecord, ProfileRecord},
    search::{
        BoundingBox, ProximityMatch, RawSearchParams, SearchQuery, find_nearby_on_sphere,
        find_nearby_sorted_on_sphere,
    },
};

/// Proximity search and enrichment facade over a geocoder and a config.
///
/// # Examples
///
/// ```rust,no_run
/// use praeceptor_geo::{GeoConfig, InstructorLocator, RawSearchParams};
///
/// let locator = InstructorLocator::new(GeoConfig::default())?;
///
/// let params = RawSearchParams::new("-22,9068", "-43,1729");
/// let candidates = Vec::new(); // supplied by the storage collaborator
/// let matches = locator.search(&params, candidates)?;
/// println!("{} instructors nearby", matches.len());
/// # Ok::<(), praeceptor_geo::error::GeoError>(())
/// ```
#[derive(Debug)]
pub struct InstructorLocator<G = GeocodeClient> {
    geocoder: G,
    config: GeoConfig,
}

impl InstructorLocator<GeocodeClient> {
    /// Build a locator backed by real HTTP clients for the configured
    /// endpoints.
    pub fn new(config: GeoConfig) -> Result<Self, GeoError> {
        let geocoder = GeocodeClient::new(
            config.nominatim_endpoint.clone(),
            config.viacep_endpoint.clone(),
            config.request_timeout,
        )?;
        info!(
            nominatim = %config.nominatim_endpoint,
            viacep = %config.viacep_endpoint,
            "instructor locator ready"
        );
        Ok(Self { geocoder, config })
    }

    /// Build a locator from the environment (see [`GeoConfig::from_env`]).
    pub fn from_env() -> Result<Self, GeoError> {
        Self::new(GeoConfig::from_env()?)
    }
}

impl<G: Geocoder> InstructorLocator<G> {
    /// Build a locator around an injected geocoder, e.g. a test double.
    pub fn with_geocoder(geocoder: G, config: GeoConfig) -> Self {
        Self { geocoder, config }
    }

    #[must_use]
    pub fn config(&self) -> &GeoConfig {
        &self.config
    }

    /// Access the underlying geocoder for advanced use.
    #[must_use]
    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Best-effort enrichment of an address immediately before it is
    /// persisted; see [`enrich_address`]. Never fails.
    pub fn enrich_address(&self, address: &mut AddressRecord) -> EnrichmentReport {
        enrich_address(&self.geocoder, address)
    }

    /// The range window for a query, for pushing the pre-filter down to the
    /// storage collaborator as an indexed range query.
    #[must_use]
    pub fn bounding_box(&self, query: &SearchQuery) -> BoundingBox {
        BoundingBox::around(query.origin, query.radius_km)
    }

    /// Lazy two-phase proximity filter over candidate profiles, preserving
    /// candidate order; see [`crate::search::find_nearby`].
    pub fn find_nearby(
        &self,
        query: &SearchQuery,
        candidates: impl IntoIterator<Item = ProfileRecord>,
    ) -> impl Iterator<Item = ProximityMatch> {
        find_nearby_on_sphere(
            query.origin,
            query.radius_km,
            self.config.earth_radius_km,
            candidates,
        )
    }

    /// Validate raw request input and run the proximity search, returning
    /// matches in ascending distance order (stable across identical
    /// queries, so pagination is reproducible).
    ///
    /// An empty result is a successful search that matched nothing; the
    /// serving layer decides how to render it. Only invalid input is an
    /// error here.
    #[instrument(name = "Instructor search", level = "debug", skip(self, candidates))]
    pub fn search(
        &self,
        params: &RawSearchParams,
        candidates: impl IntoIterator<Item = ProfileRecord>,
    ) -> Result<Vec<ProximityMatch>, GeoError> {
        let query = params.parse()?;
        Ok(self.find_nearby_sorted(&query, candidates))
    }

    /// Eager, distance-ascending variant of [`Self::find_nearby`].
    pub fn find_nearby_sorted(
        &self,
        query: &SearchQuery,
        candidates: impl IntoIterator<Item = ProfileRecord>,
    ) -> Vec<ProximityMatch> {
        find_nearby_sorted_on_sphere(
            query.origin,
            query.radius_km,
            self.config.earth_radius_km,
            candidates,
        )
    }
}
