use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::UpstreamError,
    model::{Forecast, GridReference, Observation, coordinate_text},
};

use super::{WeatherService, fetch_json};

/// Client for the api.weather.gov endpoints the gateway needs.
#[derive(Debug, Clone)]
pub struct NwsClient {
    base_url: String,
    http: Client,
}

impl NwsClient {
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    fn points_url(&self, lat: f64, lon: f64) -> String {
        let (lat, lon) = (coordinate_text(lat), coordinate_text(lon));
        format!("{}/points/{lat},{lon}", self.base_url)
    }

    fn forecast_url(&self, grid: &GridReference) -> String {
        format!(
            "{}/gridpoints/{}/{},{}/forecast",
            self.base_url, grid.grid_id, grid.grid_x, grid.grid_y
        )
    }

    fn observation_url(&self, lat: f64, lon: f64) -> String {
        format!("{}/observations/latest", self.points_url(lat, lon))
    }
}

/// NWS wraps every payload of interest in a GeoJSON feature's `properties`.
#[derive(Debug, Deserialize)]
struct Feature<T> {
    properties: T,
}

#[async_trait]
impl WeatherService for NwsClient {
    async fn resolve_point(&self, lat: f64, lon: f64) -> Result<GridReference, UpstreamError> {
        let url = self.points_url(lat, lon);
        let point: Feature<GridReference> = fetch_json(&self.http, &url, &[]).await?;
        tracing::debug!(grid = ?point.properties, "Resolved {lat},{lon} to grid");
        Ok(point.properties)
    }

    async fn fetch_forecast(&self, grid: &GridReference) -> Result<Forecast, UpstreamError> {
        let url = self.forecast_url(grid);
        let forecast: Feature<Forecast> = fetch_json(&self.http, &url, &[]).await?;
        Ok(forecast.properties)
    }

    async fn fetch_observation(&self, lat: f64, lon: f64) -> Result<Observation, UpstreamError> {
        let url = self.observation_url(lat, lon);
        let observation: Feature<Observation> = fetch_json(&self.http, &url, &[]).await?;
        Ok(observation.properties)
    }
}
