use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    DEFAULT_COUNTRY, Result, StructuredAddress,
    client::{build_http_client, classify_status},
    error::GeocodeFailure,
};

/// Postal-lookup client: CEP to structured address.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    endpoint: String,
    http: reqwest::Client,
}

impl ViaCepClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            endpoint: endpoint.into(),
            http: build_http_client(timeout)?,
        })
    }

    /// Look up the structured address for a postal code.
    ///
    /// Sends `GET {endpoint}/{postal_code}/json/` and maps the upstream
    /// fields `logradouro, bairro, localidade, uf, regiao` onto
    /// [`StructuredAddress`]. Every failure path maps to a
    /// [`GeocodeFailure`] variant; this never panics.
    #[instrument(name = "ViaCEP lookup", level = "debug", skip(self))]
    pub async fn lookup(&self, postal_code: &str) -> Result<StructuredAddress> {
        let url = format!("{}/{}/json/", self.endpoint, postal_code);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(GeocodeFailure::from)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(classify_status(status));
        }

        let body = response.text().await.map_err(GeocodeFailure::from)?;
        let address = parse_lookup_response(&body)?;
        debug!(city = ?address.city, state = ?address.state, "postal lookup hit");
        Ok(address)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LookupBody {
    // ViaCEP reports an unknown CEP as HTTP 200 with an `erro` marker whose
    // JSON type has varied across service versions.
    erro: Option<serde_json::Value>,
    logradouro: Option<String>,
    bairro: Option<String>,
    localidade: Option<String>,
    uf: Option<String>,
    regiao: Option<String>,
}

fn parse_lookup_response(body: &str) -> Result<StructuredAddress> {
    let body: LookupBody = serde_json::from_str(body)
        .map_err(|err| GeocodeFailure::MalformedResponse(err.to_string()))?;

    if body.erro.is_some() {
        return Err(GeocodeFailure::NotFound);
    }

    Ok(StructuredAddress {
        street: body.logradouro,
        neighborhood: body.bairro,
        city: body.localidade,
        state: body.uf,
        region: body.regiao,
        country: DEFAULT_COUNTRY.to_string(),
    })
}
