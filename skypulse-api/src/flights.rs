use axum::{extract::State, routing::post, Json, Router};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use skypulse_core::SearchRequest;
use skypulse_offer::{FlightOffer, PriceForecastDay, QuoteContext, SearchInsights};

use crate::{error::AppError, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub flights: Vec<FlightOffer>,
    pub insights: Option<SearchInsights>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightsRequest {
    pub flights: Vec<FlightOffer>,
    /// Day 0 for rebuilt forecasts; defaults to the server's local date
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightsResponse {
    pub flights: Vec<FlightOffer>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    pub base_price: u32,
    pub flight_id: String,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/flights/search", post(search_flights))
        .route("/v1/flights/refresh", post(refresh_flights))
        .route("/v1/flights/tick", post(tick_flights))
        .route("/v1/forecast", post(forecast))
        .route("/v1/insights", post(insights))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/flights/search
async fn search_flights(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let context = QuoteContext::now();
    let flights = state.with_rng(|rng| state.generator.generate_flights(&req, &context, rng))?;
    tracing::info!(
        "Quoted {} flights {} -> {}",
        flights.len(),
        req.origin,
        req.destination
    );

    let insights = SearchInsights::analyze(&flights);
    Ok(Json(SearchResponse { flights, insights }))
}

/// POST /v1/flights/refresh
/// Rebuild forecasts at current prices
async fn refresh_flights(
    State(state): State<AppState>,
    Json(req): Json<FlightsRequest>,
) -> Json<FlightsResponse> {
    let today = req.today.unwrap_or_else(|| Local::now().date_naive());
    let flights = state.with_rng(|rng| state.market.refresh_forecasts(&req.flights, today, rng));
    Json(FlightsResponse { flights })
}

/// POST /v1/flights/tick
/// Random-walk headline prices
async fn tick_flights(
    State(state): State<AppState>,
    Json(req): Json<FlightsRequest>,
) -> Json<FlightsResponse> {
    let flights = state.with_rng(|rng| state.market.simulate_price_changes(&req.flights, rng));
    Json(FlightsResponse { flights })
}

/// POST /v1/forecast
async fn forecast(
    State(state): State<AppState>,
    Json(req): Json<ForecastRequest>,
) -> Json<Vec<PriceForecastDay>> {
    let today = req.today.unwrap_or_else(|| Local::now().date_naive());
    let days = state.with_rng(|rng| {
        state
            .generator
            .forecaster()
            .generate(req.base_price, &req.flight_id, today, rng)
    });
    Json(days)
}

/// POST /v1/insights
async fn insights(Json(req): Json<FlightsRequest>) -> Json<Option<SearchInsights>> {
    Json(SearchInsights::analyze(&req.flights))
}
