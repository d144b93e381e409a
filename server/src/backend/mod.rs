//! # Backend Module
//!
//! Contains all non-UI logic for the Rupaya finance tracker.
//!
//! This module serves as the orchestration layer that brings together:
//! - **Domain**: Business logic for transactions, accounts and balances
//! - **Storage**: The record store (per-user document collections)
//! - **IO**: The REST interface exposed to UI clients
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! UI clients (external)
//!     ↓
//! IO Layer (REST API, SSE change feed)
//!     ↓
//! Domain Layer (reconciliation, projections, services)
//!     ↓
//! Storage Layer (record store, CSV collections)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::backend::config::ServerConfig;
use crate::backend::domain::{
    AccountCardService, AccountService, LedgerService, ReconciliationService, TransactionService,
};
use crate::backend::storage::CsvConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub transaction_service: TransactionService<CsvConnection>,
    pub account_service: AccountService<CsvConnection>,
    pub ledger_service: LedgerService,
    pub account_card_service: AccountCardService,
    /// Kept for the SSE change feed
    pub connection: CsvConnection,
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &ServerConfig) -> Result<AppState> {
    info!("Setting up record store at {}", config.data_dir.display());
    let connection = CsvConnection::new(&config.data_dir)?;
    Ok(build_app_state(connection))
}

fn build_app_state(connection: CsvConnection) -> AppState {
    let shared_connection = Arc::new(connection.clone());
    let reconciliation_service = ReconciliationService::new(shared_connection.clone());
    let transaction_service =
        TransactionService::new(shared_connection.clone(), reconciliation_service.clone());
    let account_service = AccountService::new(shared_connection, reconciliation_service);

    AppState {
        transaction_service,
        account_service,
        ledger_service: LedgerService::new(),
        account_card_service: AccountCardService::new(),
        connection,
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow a browser frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/transactions",
            get(io::list_transactions).post(io::create_transaction),
        )
        .route("/transactions/:id", delete(io::delete_transaction))
        .route("/summary", get(io::get_summary))
        .route("/reports/categories", get(io::get_category_report))
        .route("/accounts", get(io::list_accounts).post(io::link_account))
        .route("/accounts/:id", delete(io::delete_account))
        .route("/accounts/:id/adjust", post(io::adjust_balance))
        .route("/events", get(io::stream_events));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use tempfile::TempDir;

    /// An AppState over a throwaway store. Keep the returned guard alive
    /// for the duration of the test.
    pub fn test_app_state() -> (AppState, TempDir) {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let connection = CsvConnection::new(temp_dir.path()).expect("failed to open csv store");
        (build_app_state(connection), temp_dir)
    }
}
