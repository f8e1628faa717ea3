//! Best-effort address enrichment at write time.
//!
//! Immediately before an address record is persisted, this module fills in
//! whatever the two geocoding upstreams can provide: coordinates from a
//! forward geocode of the postal code, structured fields from a postal
//! lookup. Both calls are independent and both are strictly best-effort.
//! A flaky third party must never block or corrupt a primary-entity write,
//! so every failure is logged, reported, and absorbed. Nothing is retried
//! inline, and no field is ever partially written: coordinates land as a
//! whole [`praeceptor_geocoding::GeoPoint`] or not at all, structured fields
//! land as a whole set or not at all.

use praeceptor_geocoding::{DEFAULT_COUNTRY, GeocodeFailure, Geocoder};
use tracing::{debug, instrument, warn};

use crate::model::AddressRecord;

/// What happened to one enrichable field group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// The data was already there; no outbound call was made.
    AlreadyPresent,
    /// The upstream answered and the fields were written.
    Filled,
    /// The upstream failed; the fields were left exactly as they were.
    Unavailable(GeocodeFailure),
}

impl FieldOutcome {
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::AlreadyPresent | Self::Filled)
    }
}

/// Observable result of an enrichment pass. The pass itself never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentReport {
    pub coordinates: FieldOutcome,
    pub postal_fields: FieldOutcome,
}

impl EnrichmentReport {
    /// Whether both field groups are populated after the pass.
    #[must_use]
    pub const fn fully_enriched(&self) -> bool {
        self.coordinates.is_present() && self.postal_fields.is_present()
    }
}

/// Fill missing coordinate and structured-address fields in place.
///
/// Idempotent: a fully populated address performs zero outbound calls.
/// Safe under abandonment: mutations happen only after a complete upstream
/// response has been decoded, so there is no partially-written state to
/// observe.
#[instrument(
    name = "Enrich address",
    level = "debug",
    skip_all,
    fields(postal_code = %address.postal_code)
)]
pub fn enrich_address(geocoder: &impl Geocoder, address: &mut AddressRecord) -> EnrichmentReport {
    let coordinates = fill_coordinates(geocoder, address);
    let postal_fields = fill_postal_fields(geocoder, address);
    EnrichmentReport {
        coordinates,
        postal_fields,
    }
}

fn fill_coordinates(geocoder: &impl Geocoder, address: &mut AddressRecord) -> FieldOutcome {
    if address.has_point() {
        return FieldOutcome::AlreadyPresent;
    }

    let query = format!("{}, {}", address.postal_code, DEFAULT_COUNTRY);
    match geocoder.forward_geocode(&query) {
        Ok(point) => {
            address.point = Some(point);
            debug!(
                latitude = point.latitude,
                longitude = point.longitude,
                "coordinates filled from forward geocode"
            );
            FieldOutcome::Filled
        }
        Err(failure) => {
            warn!(%failure, "forward geocode unavailable, leaving coordinates unset");
            FieldOutcome::Unavailable(failure)
        }
    }
}

fn fill_postal_fields(geocoder: &impl Geocoder, address: &mut AddressRecord) -> FieldOutcome {
    if address.has_complete_postal_fields() {
        return FieldOutcome::AlreadyPresent;
    }

    match geocoder.postal_lookup(&address.postal_code) {
        Ok(structured) => {
            address.apply_structured(structured);
            debug!("structured fields filled from postal lookup");
            FieldOutcome::Filled
        }
        Err(failure) => {
            warn!(%failure, "postal lookup unavailable, leaving structured fields unset");
            FieldOutcome::Unavailable(failure)
        }
    }
}
