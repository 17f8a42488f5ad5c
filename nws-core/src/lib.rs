//! Core library for the NWS weather gateway.
//!
//! This crate defines:
//! - Configuration handling
//! - Upstream clients (Nominatim geocoding, api.weather.gov) behind traits
//! - The date selector and the request flows that build a [`WeatherEnvelope`]
//! - The HTTP surface serving those flows
//!
//! It is used by `nws-cli`, but can also be embedded by other services, e.g.
//! a chat orchestrator calling [`Gateway::call_tool`].

pub mod config;
pub mod dates;
pub mod error;
pub mod gateway;
pub mod model;
pub mod provider;
pub mod resources;
pub mod server;
pub mod tool;

pub use config::Config;
pub use error::{DateError, UpstreamError};
pub use gateway::Gateway;
pub use model::{
    Forecast, ForecastPeriod, GeocodeResult, GridReference, LocationQuery, Observation, Status,
    Units, WeatherEnvelope, WeatherQuery,
};
pub use provider::{Geocoder, NominatimGeocoder, NwsClient, WeatherService};
pub use tool::ToolArgs;
