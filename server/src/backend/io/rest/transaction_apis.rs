//! # REST API for Transactions
//!
//! Endpoints for listing, creating and deleting transactions.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::info;

use super::mappers::transaction_mapper::TransactionMapper;
use super::{error_response, UserId};
use crate::backend::domain::commands::transactions::{
    CreateTransactionCommand, DeleteTransactionCommand, TransactionListQuery,
};
use crate::backend::AppState;
use shared::{
    CreateTransactionRequest, DeleteTransactionResponse, PaginationInfo,
    TransactionListResponse, TransactionType,
};

/// Query parameters for the transaction listing API
#[derive(Debug, Deserialize)]
pub struct TransactionListParams {
    pub after: Option<String>,
    pub limit: Option<u32>,
    /// "income" or "expense"; omit for both
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub search: Option<String>,
}

/// List transactions with optional filtering and pagination
pub async fn list_transactions(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Query(params): Query<TransactionListParams>,
) -> impl IntoResponse {
    info!("GET /api/transactions - params: {:?}", params);

    let query = TransactionListQuery {
        after: params.after,
        limit: params.limit,
        transaction_type: params.transaction_type.map(TransactionMapper::to_domain_type),
        search: params.search,
    };

    match state.transaction_service.list_transactions(&user_id, query).await {
        Ok(result) => {
            let response = TransactionListResponse {
                transactions: result
                    .transactions
                    .into_iter()
                    .map(TransactionMapper::to_dto)
                    .collect(),
                pagination: PaginationInfo {
                    has_more: result.pagination.has_more,
                    next_cursor: result.pagination.next_cursor,
                },
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("listing transactions", e),
    }
}

/// Create a new transaction, reconciling the linked account balance
pub async fn create_transaction(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(request): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    info!("POST /api/transactions - request: {:?}", request);

    let command = CreateTransactionCommand {
        amount: request.amount,
        description: request.description,
        transaction_type: TransactionMapper::to_domain_type(request.transaction_type),
        category: request.category,
        payment_method: TransactionMapper::to_domain_method(request.payment_method),
        bank_account_id: request.bank_account_id,
        date: request.date,
    };

    match state.transaction_service.create_transaction(&user_id, command).await {
        Ok(transaction) => {
            (StatusCode::CREATED, Json(TransactionMapper::to_dto(transaction))).into_response()
        }
        Err(e) => error_response("creating transaction", e),
    }
}

/// Delete a transaction, compensating the linked account balance first
pub async fn delete_transaction(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(transaction_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/transactions/{}", transaction_id);

    let command = DeleteTransactionCommand { transaction_id };
    match state.transaction_service.delete_transaction(&user_id, command).await {
        Ok(result) => {
            let response = DeleteTransactionResponse {
                transaction_id: result.transaction_id,
                new_balance: result.new_balance,
                success_message: result.success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("deleting transaction", e),
    }
}
