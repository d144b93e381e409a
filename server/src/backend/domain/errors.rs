//! Error taxonomy shared by all domain services.
//!
//! Services propagate these through `anyhow::Result`; the REST layer
//! downcasts to map each variant onto an HTTP status code. Every error is
//! surfaced to the caller - nothing is silently swallowed, and nothing
//! triggers retries or compensating writes beyond the bounded
//! conditional-balance-write loop in the reconciliation service.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Missing or invalid input. No write is attempted.
    #[error("{0}")]
    Validation(String),

    /// A withdrawal or expense would drive the account balance negative at
    /// the time of the check. No write is attempted.
    #[error("Insufficient funds: balance is {balance:.2}, requested {requested:.2}")]
    InsufficientFunds { balance: f64, requested: f64 },

    /// A referenced document vanished between read and write (e.g. deleted
    /// by another session). The operation aborts without compensation.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The record store failed, or the conditional balance write exhausted
    /// its retries. If this happens after the first write of a paired
    /// sequence, the two documents are left inconsistent (documented gap).
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        DomainError::NotFound {
            entity,
            id: id.into(),
        }
    }
}
