//! # REST API for Bank Accounts
//!
//! Endpoints for the account dashboard: linking, listing cards, manual
//! deposit/withdraw adjustments, and removal.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::mappers::account_mapper::AccountMapper;
use super::mappers::transaction_mapper::TransactionMapper;
use super::{error_response, UserId};
use crate::backend::domain::commands::accounts::{
    AdjustBalanceCommand, AdjustDirection as DomainAdjustDirection, DeleteAccountCommand,
    LinkAccountCommand,
};
use crate::backend::AppState;
use shared::{
    AccountListResponse, AdjustBalanceRequest, AdjustBalanceResponse, AdjustDirection,
    DeleteAccountResponse, LinkAccountRequest, LinkAccountResponse,
};

/// List the caller's accounts as dashboard cards
pub async fn list_accounts(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> impl IntoResponse {
    info!("GET /api/accounts");

    match state.account_service.list_accounts(&user_id).await {
        Ok(accounts) => {
            let cards = state.account_card_service.project_cards(&accounts);
            (StatusCode::OK, Json(AccountListResponse { accounts: cards })).into_response()
        }
        Err(e) => error_response("listing accounts", e),
    }
}

/// Link a new bank account
pub async fn link_account(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(request): Json<LinkAccountRequest>,
) -> impl IntoResponse {
    info!("POST /api/accounts - bank: {}", request.bank_id);

    let command = LinkAccountCommand {
        bank_id: request.bank_id,
        account_number: request.account_number,
        opening_balance: request.opening_balance,
    };

    match state.account_service.link_account(&user_id, command).await {
        Ok(account) => {
            let response = LinkAccountResponse {
                account: AccountMapper::to_dto(account),
                success_message: "Bank account linked".to_string(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response("linking account", e),
    }
}

/// Manual deposit/withdraw directly on an account
pub async fn adjust_balance(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(account_id): Path<String>,
    Json(request): Json<AdjustBalanceRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/accounts/{}/adjust - {:?} {}",
        account_id, request.direction, request.amount
    );

    let command = AdjustBalanceCommand {
        account_id,
        direction: match request.direction {
            AdjustDirection::Deposit => DomainAdjustDirection::Deposit,
            AdjustDirection::Withdraw => DomainAdjustDirection::Withdraw,
        },
        amount: request.amount,
    };

    match state.account_service.adjust_balance(&user_id, command).await {
        Ok(result) => {
            let response = AdjustBalanceResponse {
                account: AccountMapper::to_dto(result.account),
                transaction: TransactionMapper::to_dto(result.transaction),
                success_message: result.success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("adjusting balance", e),
    }
}

/// Remove an account card; transaction history is preserved
pub async fn delete_account(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(account_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/accounts/{}", account_id);

    let command = DeleteAccountCommand { account_id };
    match state.account_service.delete_account(&user_id, command).await {
        Ok(result) => {
            let response = DeleteAccountResponse {
                account_id: result.account_id,
                success_message: result.success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("deleting account", e),
    }
}
