//! HTTP surface of the gateway.
//!
//! Domain failures are always answered with `200 OK` and an error envelope;
//! only missing or malformed query parameters are rejected (by axum's `Query`
//! extractor, with a 400).

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::{
    gateway::Gateway,
    model::WeatherEnvelope,
    resources::{ResourceList, resource_list},
};

#[derive(Debug, Deserialize)]
pub struct CoordinatesParams {
    pub lat: f64,
    pub lon: f64,
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NameParams {
    pub location: String,
    pub date: Option<String>,
}

pub fn router(gateway: Gateway) -> Router {
    Router::new()
        .route("/resources", get(list_resources))
        .route("/resources/nws-weather", get(weather_by_coordinates))
        .route("/resources/nws-weather-by-name", get(weather_by_name))
        .with_state(Arc::new(gateway))
}

async fn list_resources() -> Json<ResourceList> {
    Json(resource_list())
}

async fn weather_by_coordinates(
    State(gateway): State<Arc<Gateway>>,
    Query(params): Query<CoordinatesParams>,
) -> Json<WeatherEnvelope> {
    tracing::info!(?params, "GET /resources/nws-weather");
    let date = params.date.as_deref();
    Json(gateway.by_coordinates(params.lat, params.lon, date).await)
}

async fn weather_by_name(
    State(gateway): State<Arc<Gateway>>,
    Query(params): Query<NameParams>,
) -> Json<WeatherEnvelope> {
    tracing::info!(?params, "GET /resources/nws-weather-by-name");
    let date = params.date.as_deref();
    Json(gateway.by_name(&params.location, date).await)
}

/// Serve the gateway on an already bound listener until the process is stopped.
pub async fn serve_on(listener: TcpListener, gateway: Gateway) -> anyhow::Result<()> {
    let addr = listener
        .local_addr()
        .context("Listener has no local address")?;
    tracing::info!("NWS gateway listening on http://{addr}");

    axum::serve(listener, router(gateway))
        .await
        .context("HTTP server terminated unexpectedly")
}

pub async fn serve(bind: &str, gateway: Gateway) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;
    serve_on(listener, gateway).await
}
