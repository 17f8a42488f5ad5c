use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Latest-observation `properties` object, passed through untouched.
pub type Observation = Map<String, Value>;

/// Where the caller wants weather for.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    Coordinates { lat: f64, lon: f64 },
    Name(String),
}

/// One request to the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherQuery {
    pub location: LocationQuery,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub lat: f64,
    pub lon: f64,
    pub city: String,
    pub state: String,
}

impl GeocodeResult {
    /// Round coordinates to 4 decimal places, the precision NWS serves
    /// without redirecting.
    pub fn rounded(self) -> Self {
        Self {
            lat: round_coordinate(self.lat),
            lon: round_coordinate(self.lon),
            ..self
        }
    }
}

pub fn round_coordinate(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Coordinate as it appears in location text and NWS paths. Whole numbers
/// keep their decimal point: `40.0`, not `40`.
pub fn coordinate_text(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Key into the NWS forecast grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridReference {
    #[serde(rename = "gridId")]
    pub grid_id: String,
    #[serde(rename = "gridX")]
    pub grid_x: i64,
    #[serde(rename = "gridY")]
    pub grid_y: i64,
}

/// A single forecast period. Only `startTime` is interpreted; every other
/// field is kept as the upstream sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPeriod {
    #[serde(rename = "startTime")]
    pub start_time: String,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Gridpoint forecast `properties` object.
///
/// An empty forecast (failed fetch, or an error envelope) serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periods: Option<Vec<ForecastPeriod>>,

    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Forecast {
    pub fn is_empty(&self) -> bool {
        self.periods.is_none() && self.properties.is_empty()
    }
}

/// Units of the NWS payloads. Constant for every response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Units {
    pub temperature: String,
    pub wind_speed: String,
    pub precipitation: String,
    pub distance: String,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            temperature: "F".to_string(),
            wind_speed: "mph".to_string(),
            precipitation: "%".to_string(),
            distance: "mi".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

/// What is known about the requested place at a given point of a flow.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlace {
    pub location: String,
    pub city: String,
    pub state: String,
    pub lat: f64,
    pub lon: f64,
}

impl ResolvedPlace {
    pub fn from_coordinates(lat: f64, lon: f64) -> Self {
        Self {
            location: format!("{},{}", coordinate_text(lat), coordinate_text(lon)),
            city: String::new(),
            state: String::new(),
            lat,
            lon,
        }
    }

    /// Place for a name the geocoder could not resolve.
    pub fn unresolved(name: &str) -> Self {
        Self {
            location: name.to_string(),
            city: String::new(),
            state: String::new(),
            lat: 0.0,
            lon: 0.0,
        }
    }

    pub fn from_geocode(name: &str, geo: GeocodeResult) -> Self {
        let (lat, lon) = (coordinate_text(geo.lat), coordinate_text(geo.lon));
        Self {
            location: format!("{name} ({lat},{lon})"),
            city: geo.city,
            state: geo.state,
            lat: geo.lat,
            lon: geo.lon,
        }
    }
}

/// The response contract shared by every endpoint, success or failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherEnvelope {
    pub location: String,
    pub resolved_city: String,
    pub resolved_state: String,
    pub lat: f64,
    pub lon: f64,
    pub units: Units,
    pub current: Observation,
    pub forecast: Forecast,
    pub status: Status,
    pub message: String,
}

impl WeatherEnvelope {
    pub fn ok(place: ResolvedPlace, current: Observation, forecast: Forecast) -> Self {
        Self {
            location: place.location,
            resolved_city: place.city,
            resolved_state: place.state,
            lat: place.lat,
            lon: place.lon,
            units: Units::default(),
            current,
            forecast,
            status: Status::Ok,
            message: String::new(),
        }
    }

    pub fn error(place: ResolvedPlace, message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            ..Self::ok(place, Observation::new(), Forecast::default())
        }
    }

    /// Attach an observation fetched before the flow failed.
    pub fn with_current(mut self, current: Observation) -> Self {
        self.current = current;
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}
