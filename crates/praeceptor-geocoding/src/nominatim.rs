use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    GeoPoint, Result,
    client::{build_http_client, classify_status},
    error::GeocodeFailure,
};

/// Forward-geocoding client: free-text query to coordinates.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    endpoint: String,
    http: reqwest::Client,
}

impl NominatimClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            endpoint: endpoint.into(),
            http: build_http_client(timeout)?,
        })
    }

    /// Geocode a free-text query, returning the first match's coordinates.
    ///
    /// Sends `GET {endpoint}/search?q=<query>&format=json&addressdetails=1&limit=1`
    /// and parses the first element of the JSON array response. Every failure
    /// path maps to a [`GeocodeFailure`] variant; this never panics.
    #[instrument(name = "Nominatim search", level = "debug", skip(self))]
    pub async fn search(&self, query: &str) -> Result<GeoPoint> {
        let url = format!("{}/search", self.endpoint);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("addressdetails", "1"),
                ("limit", "1"),
            ])
            .send()
            .await
            .map_err(GeocodeFailure::from)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(classify_status(status));
        }

        let body = response.text().await.map_err(GeocodeFailure::from)?;
        let point = parse_search_response(&body)?;
        debug!(
            latitude = point.latitude,
            longitude = point.longitude,
            "forward geocode hit"
        );
        Ok(point)
    }
}

/// Nominatim serializes coordinates as JSON strings, not numbers.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

fn parse_search_response(body: &str) -> Result<GeoPoint> {
    let hits: Vec<SearchHit> = serde_json::from_str(body)
        .map_err(|err| GeocodeFailure::MalformedResponse(err.to_string()))?;

    // An empty array is a well-formed "no match", not a decoding problem.
    let Some(hit) = hits.first() else {
        return Err(GeocodeFailure::NotFound);
    };

    let latitude: f64 = hit
        .lat
        .parse()
        .map_err(|_| GeocodeFailure::MalformedResponse(format!("unparseable lat {:?}", hit.lat)))?;
    let longitude: f64 = hit
        .lon
        .parse()
        .map_err(|_| GeocodeFailure::MalformedResponse(format!("unparseable lon {:?}", hit.lon)))?;

    let point = GeoPoint::new(latitude, longitude);
    if !point.is_valid() {
        return Err(GeocodeFailure::MalformedResponse(format!(
            "coordinates out of range: ({latitude}, {longitude})"
        )));
    }
    Ok(point)
}
