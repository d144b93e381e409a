//! # REST API for Ledger Projections
//!
//! Aggregate totals and the per-category expense report, recomputed from
//! the full transaction snapshot on every request.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::{error_response, UserId};
use crate::backend::AppState;
use shared::CategorySummaryResponse;

/// Total income, total expense and net balance for the caller
pub async fn get_summary(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> impl IntoResponse {
    info!("GET /api/summary");

    match state.transaction_service.ledger_snapshot(&user_id).await {
        Ok(transactions) => {
            let summary = state.ledger_service.summarize(&transactions);
            (StatusCode::OK, Json(summary)).into_response()
        }
        Err(e) => error_response("computing summary", e),
    }
}

/// Expenses grouped by category, largest first
pub async fn get_category_report(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> impl IntoResponse {
    info!("GET /api/reports/categories");

    match state.transaction_service.ledger_snapshot(&user_id).await {
        Ok(transactions) => {
            let categories = state.ledger_service.expense_by_category(&transactions);
            (StatusCode::OK, Json(CategorySummaryResponse { categories })).into_response()
        }
        Err(e) => error_response("computing category report", e),
    }
}
