//! # REST API Interface Layer
//!
//! Provides HTTP REST endpoints for the Rupaya backend. This layer handles:
//! - HTTP request/response serialization and deserialization
//! - Caller identity (the `X-User-Id` header set by the upstream auth proxy)
//! - Error translation from domain errors to HTTP status codes
//! - Request logging
//!
//! It is a pure translation layer: no business logic lives here.

pub mod account_apis;
pub mod event_apis;
pub mod mappers;
pub mod summary_apis;
pub mod transaction_apis;

pub use account_apis::*;
pub use event_apis::*;
pub use summary_apis::*;
pub use transaction_apis::*;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::backend::domain::errors::DomainError;

/// Identity of the caller, established by the upstream identity provider
/// and forwarded as the `X-User-Id` header. The backend trusts this header
/// and scopes every store operation to it; requests without it are
/// rejected before any handler runs.
pub struct UserId(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| UserId(value.to_string()))
            .ok_or((StatusCode::UNAUTHORIZED, "Missing X-User-Id header"))
    }
}

/// Map a failed domain operation onto an HTTP response. Typed domain errors
/// get their proper status; anything else is an opaque 500.
pub(crate) fn error_response(operation: &str, err: anyhow::Error) -> Response {
    match err.downcast_ref::<DomainError>() {
        Some(domain_err) => {
            let status = match domain_err {
                DomainError::Validation(_) => StatusCode::BAD_REQUEST,
                DomainError::InsufficientFunds { .. } => StatusCode::CONFLICT,
                DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            warn!("{} failed: {}", operation, domain_err);
            (status, domain_err.to_string()).into_response()
        }
        None => {
            error!("{} failed: {:#}", operation, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error during {}", operation),
            )
                .into_response()
        }
    }
}
