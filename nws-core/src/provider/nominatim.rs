use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{error::UpstreamError, model::GeocodeResult};

use super::{Geocoder, fetch_json};

/// Forward geocoder backed by a Nominatim search endpoint, restricted to US results.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    search_url: String,
    http: Client,
}

impl NominatimGeocoder {
    pub fn new(search_url: impl Into<String>, http: Client) -> Self {
        Self {
            search_url: search_url.into(),
            http,
        }
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    address: NominatimAddress,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    hamlet: Option<String>,
    municipality: Option<String>,
    county: Option<String>,
    state: Option<String>,
    state_code: Option<String>,
}

impl NominatimAddress {
    fn city(&self) -> String {
        [
            &self.city,
            &self.town,
            &self.village,
            &self.hamlet,
            &self.municipality,
            &self.county,
        ]
        .into_iter()
        .find_map(non_empty)
        .unwrap_or_default()
    }

    fn state(&self) -> String {
        non_empty(&self.state)
            .or_else(|| non_empty(&self.state_code))
            .unwrap_or_default()
    }
}

fn non_empty(field: &Option<String>) -> Option<String> {
    field.as_ref().filter(|s| !s.is_empty()).cloned()
}

fn parse_coordinate(url: &str, raw: &str) -> Result<f64, UpstreamError> {
    raw.parse().map_err(|_| UpstreamError::Decode {
        url: url.to_string(),
        reason: format!("invalid coordinate {raw:?}"),
    })
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, name: &str) -> Result<GeocodeResult, UpstreamError> {
        let places: Vec<NominatimPlace> = fetch_json(
            &self.http,
            &self.search_url,
            &[
                ("q", name),
                ("format", "json"),
                ("addressdetails", "1"),
                ("limit", "1"),
                ("countrycodes", "us"),
            ],
        )
        .await?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::NoResults(name.to_string()))?;

        let result = GeocodeResult {
            lat: parse_coordinate(&self.search_url, &place.lat)?,
            lon: parse_coordinate(&self.search_url, &place.lon)?,
            city: place.address.city(),
            state: place.address.state(),
        };

        tracing::info!(?result, "Geocoded {name:?}");
        Ok(result)
    }
}
