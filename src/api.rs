//! HTTP API for the Shipping Engine.
//!
//! This module exposes a minimal REST API around the rate engine
//! using the [`axum`](https://crates.io/crates/axum) framework.  The
//! API allows clients to request a quote for a single service level,
//! compare all service levels over a corridor, and read the loaded
//! country and service configuration.  The engine itself stays pure;
//! translating a [`QuoteError`] into a transport status and logging
//! the outcome happen here.

use crate::engine::{compare_services, compute_quote};
use crate::error::QuoteError;
use crate::models::{Country, CountryRole, QuoteRequest, ServiceType};
use crate::snapshot::{load_snapshot_from_file, RateSnapshot};
use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Application state shared across requests: the configuration
/// snapshot loaded at startup.  Requests only ever read it.
pub struct AppState {
    pub snapshot: Arc<RateSnapshot>,
}

/// Build the API router and load the configuration snapshot from the
/// given file.  Returns the router and a handle to the state.
pub fn build_router(snapshot_path: PathBuf) -> Result<(Router, Arc<AppState>)> {
    let snapshot = load_snapshot_from_file(&snapshot_path)?;
    info!(
        countries = snapshot.countries.len(),
        zones = snapshot.zones.len(),
        tiers = snapshot.tiers.len(),
        charges = snapshot.charges.len(),
        "configuration snapshot loaded"
    );
    let state = Arc::new(AppState {
        snapshot: Arc::new(snapshot),
    });
    let router = Router::new()
        .route("/api/quote", post(quote_handler))
        .route("/api/compare", post(compare_handler))
        .route("/api/countries", get(countries_handler))
        .route("/api/service-types", get(service_types_handler))
        .with_state(state.clone());
    Ok((router, state))
}

/// Handler for POST /api/quote
async fn quote_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<QuoteRequest>,
) -> impl IntoResponse {
    match compute_quote(&request, &app_state.snapshot) {
        Ok(quote) => (StatusCode::OK, Json(quote)).into_response(),
        Err(err) => error_response(&err),
    }
}

/// Handler for POST /api/compare
async fn compare_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<QuoteRequest>,
) -> impl IntoResponse {
    let quotes = compare_services(&request, &app_state.snapshot);
    (StatusCode::OK, Json(quotes)).into_response()
}

#[derive(Debug, Deserialize)]
struct CountriesQuery {
    /// Optional role filter: `DEPARTURE` or `DESTINATION`.
    role: Option<CountryRole>,
}

/// Handler for GET /api/countries
async fn countries_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<CountriesQuery>,
) -> Json<Vec<Country>> {
    let countries = app_state
        .snapshot
        .countries
        .iter()
        .filter(|c| c.active)
        .filter(|c| query.role.map_or(true, |role| c.has_role(role)))
        .cloned()
        .collect();
    Json(countries)
}

/// Handler for GET /api/service-types
async fn service_types_handler(State(app_state): State<Arc<AppState>>) -> Json<Vec<ServiceType>> {
    let services = app_state
        .snapshot
        .service_types
        .iter()
        .filter(|s| s.active)
        .cloned()
        .collect();
    Json(services)
}

/// Maps an engine error to a transport status and JSON body.  Request
/// mistakes are the caller's fault; ambiguous configuration is the
/// operator's, and comes back as a server error.
fn error_response(err: &QuoteError) -> axum::response::Response {
    let status = if err.is_configuration_defect() {
        warn!(code = err.code(), error = %err, "quote hit a configuration defect");
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::BAD_REQUEST
    };
    let body = Json(serde_json::json!({
        "error": err.code(),
        "message": err.to_string(),
    }));
    (status, body).into_response()
}

/// Launch the API server.  This function builds the router from the
/// given snapshot file and binds to the supplied address.  It blocks
/// until the server terminates (e.g. when interrupted).
pub async fn serve(addr: &str, snapshot_path: PathBuf) -> Result<()> {
    let (router, _state) = build_router(snapshot_path)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "server listening");
    axum::serve(listener, router).await.map_err(|e| e.into())
}
