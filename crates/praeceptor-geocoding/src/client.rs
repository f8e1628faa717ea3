use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT as USER_AGENT_HEADER};
use tracing::instrument;

use crate::{
    DEFAULT_NOMINATIM_ENDPOINT, DEFAULT_TIMEOUT, DEFAULT_VIACEP_ENDPOINT, GeoPoint, Geocoder,
    NominatimClient, Result, StructuredAddress, ViaCepClient, error::GeocodeFailure,
};

/// Identifies this product to the public upstream services, per their usage
/// policies.
pub const USER_AGENT: &str = "Praeceptor/1.0 (praeceptor@praeceptor.com)";

pub(crate) fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT_HEADER, HeaderValue::from_static(USER_AGENT));

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .map_err(GeocodeFailure::from)
}

/// Map a non-200 upstream status onto the outcome taxonomy.
pub(crate) fn classify_status(status: StatusCode) -> GeocodeFailure {
    match status {
        StatusCode::NOT_FOUND => GeocodeFailure::NotFound,
        StatusCode::FORBIDDEN => GeocodeFailure::Forbidden,
        StatusCode::TOO_MANY_REQUESTS => GeocodeFailure::RateLimited,
        StatusCode::INTERNAL_SERVER_ERROR => GeocodeFailure::ServerError,
        other => GeocodeFailure::UnexpectedStatus(other.as_u16()),
    }
}

/// Blocking facade over both upstream services.
///
/// Owns a private single-threaded tokio runtime and drives the async service
/// clients to completion, so callers get the synchronous [`Geocoder`]
/// contract without bringing their own executor. Each call is bounded by the
/// client-level timeout; nothing is written anywhere until a response has
/// been fully decoded, so an abandoned call has no side effects.
#[derive(Debug)]
pub struct GeocodeClient {
    nominatim: NominatimClient,
    viacep: ViaCepClient,
    runtime: tokio::runtime::Runtime,
}

impl GeocodeClient {
    /// Build a client against explicit endpoints with a shared timeout.
    pub fn new(
        nominatim_endpoint: impl Into<String>,
        viacep_endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| GeocodeFailure::Transport(err.to_string()))?;

        Ok(Self {
            nominatim: NominatimClient::new(nominatim_endpoint, timeout)?,
            viacep: ViaCepClient::new(viacep_endpoint, timeout)?,
            runtime,
        })
    }

    /// Build a client against the public Nominatim and ViaCEP instances.
    pub fn with_defaults() -> Result<Self> {
        Self::new(
            DEFAULT_NOMINATIM_ENDPOINT,
            DEFAULT_VIACEP_ENDPOINT,
            DEFAULT_TIMEOUT,
        )
    }
}

impl Geocoder for GeocodeClient {
    #[instrument(name = "Forward geocode", level = "debug", skip(self))]
    fn forward_geocode(&self, query: &str) -> Result<GeoPoint> {
        self.runtime.block_on(self.nominatim.search(query))
    }

    #[instrument(name = "Postal lookup", level = "debug", skip(self))]
    fn postal_lookup(&self, postal_code: &str) -> Result<StructuredAddress> {
        self.runtime.block_on(self.viacep.lookup(postal_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_matches_upstream_contract() {
        assert_eq!(
            classify_status(StatusCode::NOT_FOUND),
            GeocodeFailure::NotFound
        );
        assert_eq!(
            classify_status(StatusCode::FORBIDDEN),
            GeocodeFailure::Forbidden
        );
        assert_eq!(
            classify_status(StatusCode::TOO_MANY_REQUESTS),
            GeocodeFailure::RateLimited
        );
        assert_eq!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            GeocodeFailure::ServerError
        );
    }

    #[test]
    fn other_statuses_carry_the_raw_code() {
        assert_eq!(
            classify_status(StatusCode::BAD_GATEWAY),
            GeocodeFailure::UnexpectedStatus(502)
        );
        assert_eq!(
            classify_status(StatusCode::SERVICE_UNAVAILABLE),
            GeocodeFailure::UnexpectedStatus(503)
        );
    }
}
