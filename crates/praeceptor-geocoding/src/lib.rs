//! Outbound geocoding for the Praeceptor proximity core.
//!
//! Two independent, unauthenticated, rate-limited public services back this
//! crate: Nominatim for forward geocoding (free-text query to coordinates)
//! and ViaCEP for postal lookup (CEP to structured address). Each service
//! gets a dedicated client so its outcome mapping lives in one place, and
//! every failure mode (transport, timeout, upstream rejection, malformed
//! body) is normalized into a [`GeocodeFailure`] variant. Nothing in this
//! crate panics or surfaces a raw transport error across its boundary.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use praeceptor_geocoding::{GeocodeClient, Geocoder};
//!
//! let client = GeocodeClient::with_defaults()?;
//!
//! match client.forward_geocode("20040-020, Brasil") {
//!     Ok(point) => println!("({}, {})", point.latitude, point.longitude),
//!     Err(failure) => println!("geocoding unavailable: {failure}"),
//! }
//! # Ok::<(), praeceptor_geocoding::GeocodeFailure>(())
//! ```

use std::time::Duration;

mod client;
mod nominatim;
mod types;
mod viacep;

pub use client::{GeocodeClient, USER_AGENT};
pub use nominatim::NominatimClient;
pub use types::{GeoPoint, StructuredAddress};
pub use viacep::ViaCepClient;

/// Country literal appended to forward-geocode queries and stamped on every
/// postal-lookup result. ViaCEP is Brazil-only and never returns a country
/// field of its own.
pub const DEFAULT_COUNTRY: &str = "Brasil";

/// Public Nominatim instance used when no endpoint override is configured.
pub const DEFAULT_NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org";

/// Public ViaCEP instance used when no endpoint override is configured.
pub const DEFAULT_VIACEP_ENDPOINT: &str = "https://viacep.com.br/ws";

/// Bound on every outbound call so a stalled upstream cannot hang a caller.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

mod error {
    use thiserror::Error;

    /// Typed outcome for a failed geocoding call.
    ///
    /// This is the only error type that crosses the crate boundary. Callers
    /// that treat geocoding as best-effort can absorb any variant without
    /// inspecting it; callers that care (rate-limit accounting, alerting)
    /// get the full taxonomy.
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum GeocodeFailure {
        #[error("upstream found no match for the query")]
        NotFound,
        #[error("upstream rejected the request (403 Forbidden)")]
        Forbidden,
        #[error("upstream rate limit exceeded (429 Too Many Requests)")]
        RateLimited,
        #[error("upstream internal error (500)")]
        ServerError,
        #[error("unexpected upstream status {0}")]
        UnexpectedStatus(u16),
        #[error("request timed out")]
        Timeout,
        #[error("transport error: {0}")]
        Transport(String),
        #[error("malformed upstream response: {0}")]
        MalformedResponse(String),
    }

    impl From<reqwest::Error> for GeocodeFailure {
        fn from(err: reqwest::Error) -> Self {
            if err.is_timeout() {
                Self::Timeout
            } else {
                Self::Transport(err.to_string())
            }
        }
    }

    pub type Result<T> = std::result::Result<T, GeocodeFailure>;
}

pub use error::{GeocodeFailure, Result};

/// Blocking geocoding contract the enrichment pipeline is written against.
///
/// Production code uses [`GeocodeClient`]; tests substitute a scripted
/// double. Both operations are synchronous-call contracts with a bounded
/// internal timeout, and neither ever panics across this boundary.
pub trait Geocoder {
    /// Resolve a free-text query (typically `"{postal_code}, Brasil"`) to a
    /// coordinate pair.
    fn forward_geocode(&self, query: &str) -> Result<GeoPoint>;

    /// Resolve a postal code to a structured address.
    fn postal_lookup(&self, postal_code: &str) -> Result<StructuredAddress>;
}
