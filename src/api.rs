// 🌐 REST API with Axum
//
//   POST /receipts/process      → {"id": "..."}
//   GET  /receipts/:id/points   → {"points": n}

use crate::error::{ReceiptError, ValidationError};
use crate::points::PointsEngine;
use crate::receipt::{RawReceipt, Receipt};
use crate::store::{ReceiptId, ReceiptStore};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    pub store: ReceiptStore,
    pub engine: PointsEngine,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Response Bodies
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub id: ReceiptId,
}

#[derive(Debug, Serialize)]
pub struct PointsResponse {
    pub points: u64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ValidationError>,
}

impl ReceiptError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ReceiptError::Validation(_) => StatusCode::BAD_REQUEST,
            ReceiptError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ReceiptError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ReceiptError::Validation(details) => {
                warn!(errors = details.len(), "Rejected invalid receipt");
                ErrorResponse {
                    error: "The receipt is invalid.",
                    id: None,
                    details,
                }
            }
            ReceiptError::NotFound(id) => {
                warn!(receipt_id = %id, "Points requested for unknown receipt");
                ErrorResponse {
                    error: "No receipt found for that ID.",
                    id: Some(id),
                    details: Vec::new(),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// POST /receipts/process - Validate and store a receipt
async fn process_receipt(
    State(state): State<AppState>,
    payload: Result<Json<RawReceipt>, JsonRejection>,
) -> Result<Json<ProcessResponse>, ReceiptError> {
    let Json(raw) =
        payload.map_err(|rejection| ReceiptError::invalid("body", rejection.body_text()))?;
    let receipt = Receipt::try_from(raw)?;

    let id = state.store.put(receipt);
    info!(receipt_id = %id, "Processed receipt");

    Ok(Json(ProcessResponse { id }))
}

/// GET /receipts/:id/points - Score a stored receipt
async fn get_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PointsResponse>, ReceiptError> {
    let receipt = state.store.get(&id)?;
    let points = state.engine.compute(&receipt);
    info!(receipt_id = %id, points, "Retrieved points");

    Ok(Json(PointsResponse { points }))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/:id/points", get(get_points))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// TESTS
// ============================================================================
