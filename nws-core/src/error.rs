use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single upstream call (geocoder or NWS).
///
/// The gateway never surfaces these to its callers; they are logged and
/// collapsed into either an error envelope or an empty field.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status { url: String, status: StatusCode },

    #[error("failed to decode response from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("no results for {0:?}")]
    NoResults(String),
}

/// Rejection produced by the date selector.
///
/// The display text is exactly what ends up in the envelope's `message`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error(
        "Invalid date parameter. Use ISO date, 'today', 'tomorrow', or weekday name."
    )]
    Invalid,

    #[error("No forecast available for date: {0}")]
    NoForecast(String),
}
