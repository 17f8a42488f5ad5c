//! Arguments handed over by a chat orchestrator that decided to call the gateway.

use serde::{Deserialize, Serialize};

use crate::{
    gateway::Gateway,
    model::{LocationQuery, ResolvedPlace, WeatherEnvelope, WeatherQuery},
};

pub const MISSING_LOCATION: &str = "Must provide location name or lat/lon.";

/// `{location}` or `{lat, lon}`, plus an optional `date`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl ToolArgs {
    /// Build from loose `key=value` pairs. Unknown keys are ignored, and
    /// coordinates that do not parse as numbers count as absent.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut args = Self::default();
        for (key, value) in pairs {
            match key {
                "location" => args.location = Some(value.to_string()),
                "lat" => args.lat = value.parse().ok(),
                "lon" => args.lon = value.parse().ok(),
                "date" => args.date = Some(value.to_string()),
                other => tracing::debug!("Ignoring unknown tool argument {other:?}"),
            }
        }
        args
    }

    /// A non-empty location name wins over coordinates.
    pub fn to_query(&self) -> Option<WeatherQuery> {
        let location = match (self.location.as_deref(), self.lat, self.lon) {
            (Some(name), _, _) if !name.trim().is_empty() => LocationQuery::Name(name.to_string()),
            (_, Some(lat), Some(lon)) => LocationQuery::Coordinates { lat, lon },
            _ => return None,
        };

        Some(WeatherQuery {
            location,
            date: self.date.clone(),
        })
    }
}

impl Gateway {
    /// Entry point for the conversational layer.
    pub async fn call_tool(&self, args: &ToolArgs) -> WeatherEnvelope {
        match args.to_query() {
            Some(query) => self.lookup(&query).await,
            None => WeatherEnvelope::error(ResolvedPlace::unresolved(""), MISSING_LOCATION),
        }
    }
}
