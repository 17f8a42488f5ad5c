use crate::{
    Config,
    error::UpstreamError,
    model::{Forecast, GeocodeResult, GridReference, Observation},
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, redirect};
use serde::de::DeserializeOwned;
use std::fmt::Debug;

pub mod nominatim;
pub mod nws;

pub use nominatim::NominatimGeocoder;
pub use nws::NwsClient;

/// Free-text place name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn geocode(&self, name: &str) -> Result<GeocodeResult, UpstreamError>;
}

/// The three NWS lookups a gateway flow performs.
#[async_trait]
pub trait WeatherService: Send + Sync + Debug {
    /// Map coordinates to the forecast grid cell covering them.
    async fn resolve_point(&self, lat: f64, lon: f64) -> Result<GridReference, UpstreamError>;

    async fn fetch_forecast(&self, grid: &GridReference) -> Result<Forecast, UpstreamError>;

    /// Latest observation from the station nearest to the coordinates.
    async fn fetch_observation(&self, lat: f64, lon: f64) -> Result<Observation, UpstreamError>;
}

/// Build the HTTP client shared by all upstream calls.
pub fn http_client(config: &Config) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.as_str())
        .redirect(redirect::Policy::limited(10))
        .build()
        .context("Failed to build upstream HTTP client")
}

/// Construct the production geocoder and NWS client from config.
pub fn providers_from_config(config: &Config) -> anyhow::Result<(NominatimGeocoder, NwsClient)> {
    let http = http_client(config)?;
    Ok((
        NominatimGeocoder::new(config.geocoder_url.clone(), http.clone()),
        NwsClient::new(config.nws_base_url.clone(), http),
    ))
}

/// Single GET attempt returning a decoded JSON body. Redirects are followed by the client.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    http: &Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T, UpstreamError> {
    tracing::debug!(%url, "Upstream GET");

    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|source| UpstreamError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = res.status();
    if !status.is_success() {
        return Err(UpstreamError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = res
        .text()
        .await
        .map_err(|source| UpstreamError::Transport {
            url: url.to_string(),
            source,
        })?;

    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(e) => Err(UpstreamError::Decode {
            url: url.to_string(),
            reason: format!("{e} (body: {})", truncate_body(&body)),
        }),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let cut = truncate_body(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);

        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn providers_from_default_config() {
        let (geocoder, nws) = providers_from_config(&Config::default()).unwrap();
        assert!(format!("{geocoder:?}").contains("nominatim"));
        assert!(format!("{nws:?}").contains("api.weather.gov"));
    }
}
