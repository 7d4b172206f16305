use anyhow::{Context, Result};
use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::price_provider::{FetchError, SpotPriceProvider};

pub const SERVICE_NAME: &str = "Crypto Price Oracle";
pub const PROVIDER_LABEL: &str = "HighStation Demo Oracle";

/// Response envelope for a successful price lookup.
#[derive(Debug, Serialize)]
pub struct PriceQuote {
    pub symbol: String,
    pub price: String,
    pub currency: &'static str,
    pub timestamp: String,
    pub provider: &'static str,
}

impl PriceQuote {
    fn new(symbol: &str, price: String) -> Self {
        PriceQuote {
            symbol: symbol.to_uppercase(),
            price,
            currency: "USD",
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            provider: PROVIDER_LABEL,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PriceRequest {
    #[serde(default)]
    symbol: Option<String>,
}

#[derive(Debug, Error)]
enum ApiError {
    #[error("Missing required field: symbol")]
    MissingSymbol,
    #[error(transparent)]
    Lookup(#[from] FetchError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::MissingSymbol => StatusCode::BAD_REQUEST,
            ApiError::Lookup(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn router(provider: Arc<dyn SpotPriceProvider>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/price/{symbol}", get(price_by_path))
        .route("/api/v1/price", post(price_by_body))
        .route("/health", get(health))
        .route("/", get(index))
        .with_state(provider)
        .layer(cors)
}

pub async fn serve(port: u16, provider: Arc<dyn SpotPriceProvider>) -> Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("{SERVICE_NAME} listening on {addr}");

    axum::serve(listener, router(provider))
        .await
        .context("Server error")?;
    Ok(())
}

async fn price_by_path(
    State(provider): State<Arc<dyn SpotPriceProvider>>,
    Path(symbol): Path<String>,
) -> Result<Json<PriceQuote>, ApiError> {
    info!(%symbol, "Price request");
    lookup(provider.as_ref(), &symbol).await.map(Json)
}

async fn price_by_body(
    State(provider): State<Arc<dyn SpotPriceProvider>>,
    Json(request): Json<PriceRequest>,
) -> Result<Json<PriceQuote>, ApiError> {
    // An empty string counts as missing.
    let symbol = match request.symbol.as_deref() {
        Some(symbol) if !symbol.is_empty() => symbol.to_string(),
        _ => return Err(ApiError::MissingSymbol),
    };

    info!(%symbol, "Price request (POST)");
    lookup(provider.as_ref(), &symbol).await.map(Json)
}

async fn lookup(provider: &dyn SpotPriceProvider, symbol: &str) -> Result<PriceQuote, ApiError> {
    match provider.fetch_spot(symbol).await {
        Ok(price) => Ok(PriceQuote::new(symbol, price)),
        Err(err) => {
            error!(symbol = %err.symbol, error = %err.source, "Spot price lookup failed");
            Err(err.into())
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "active",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn index() -> impl IntoResponse {
    Json(json!({
        "service": SERVICE_NAME,
        "status": "online",
        "endpoints": [
            "GET /api/v1/price/:symbol",
            "POST /api/v1/price (body: {\"symbol\": \"BTC\"})",
            "GET /health",
        ],
    }))
}
