//! Request flows: resolve a location, fetch NWS data, filter by day and
//! assemble the envelope.
//!
//! Every flow ends in a [`WeatherEnvelope`]; upstream and input failures are
//! reported through its `status`/`message` and never returned as `Err`.

use chrono::{Local, NaiveDateTime};
use std::{fmt, sync::Arc};

use crate::{
    Config,
    dates::select_periods,
    model::{Forecast, LocationQuery, Observation, ResolvedPlace, WeatherEnvelope, WeatherQuery},
    provider::{Geocoder, WeatherService, providers_from_config},
};

pub const GEOCODE_FAILED: &str = "Could not geocode location name.";
pub const LOCATION_NOT_FOUND: &str = "Location not found in NWS API.";

/// Source of "now" for resolving relative date expressions.
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

#[derive(Clone)]
pub struct Gateway {
    geocoder: Arc<dyn Geocoder>,
    weather: Arc<dyn WeatherService>,
    clock: Clock,
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("geocoder", &self.geocoder)
            .field("weather", &self.weather)
            .finish_non_exhaustive()
    }
}

impl Gateway {
    pub fn new(geocoder: impl Geocoder + 'static, weather: impl WeatherService + 'static) -> Self {
        Self::from_shared(Arc::new(geocoder), Arc::new(weather))
    }

    pub fn from_shared(geocoder: Arc<dyn Geocoder>, weather: Arc<dyn WeatherService>) -> Self {
        Self {
            geocoder,
            weather,
            clock: Arc::new(|| Local::now().naive_local()),
        }
    }

    /// Gateway talking to the upstreams named in `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let (geocoder, nws) = providers_from_config(config)?;
        Ok(Self::new(geocoder, nws))
    }

    /// Replace the wall clock, e.g. to pin "today" in tests.
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub async fn lookup(&self, query: &WeatherQuery) -> WeatherEnvelope {
        let date = query.date.as_deref();
        match &query.location {
            LocationQuery::Coordinates { lat, lon } => self.by_coordinates(*lat, *lon, date).await,
            LocationQuery::Name(name) => self.by_name(name, date).await,
        }
    }

    pub async fn by_coordinates(&self, lat: f64, lon: f64, date: Option<&str>) -> WeatherEnvelope {
        let place = ResolvedPlace::from_coordinates(lat, lon);
        self.weather_for(place, date).await
    }

    pub async fn by_name(&self, name: &str, date: Option<&str>) -> WeatherEnvelope {
        let geo = match self.geocoder.geocode(name).await {
            Ok(geo) => geo.rounded(),
            Err(e) => {
                tracing::warn!("Geocoding {name:?} failed: {e}");
                return WeatherEnvelope::error(ResolvedPlace::unresolved(name), GEOCODE_FAILED);
            }
        };

        let place = ResolvedPlace::from_geocode(name, geo);
        self.weather_for(place, date).await
    }

    async fn weather_for(&self, place: ResolvedPlace, date: Option<&str>) -> WeatherEnvelope {
        let grid = match self.weather.resolve_point(place.lat, place.lon).await {
            Ok(grid) => grid,
            Err(e) => {
                tracing::warn!("Grid lookup for {},{} failed: {e}", place.lat, place.lon);
                return WeatherEnvelope::error(place, LOCATION_NOT_FOUND);
            }
        };

        let (forecast, current) = tokio::join!(
            self.weather.fetch_forecast(&grid),
            self.weather.fetch_observation(place.lat, place.lon),
        );

        let mut forecast = forecast.unwrap_or_else(|e| {
            tracing::warn!("Forecast unavailable, returning empty: {e}");
            Forecast::default()
        });
        let current = current.unwrap_or_else(|e| {
            tracing::warn!("Observation unavailable, returning empty: {e}");
            Observation::new()
        });

        if let Some(expr) = date.filter(|d| !d.trim().is_empty()) {
            let periods = forecast.periods.take().unwrap_or_default();
            match select_periods(periods, Some(expr), (self.clock)()) {
                Ok(selected) => forecast.periods = Some(selected),
                Err(e) => {
                    tracing::info!("Date filter {expr:?} rejected: {e}");
                    let envelope = WeatherEnvelope::error(place, e.to_string());
                    return envelope.with_current(current);
                }
            }
        }

        WeatherEnvelope::ok(place, current, forecast)
    }
}
