//! Balance reconciliation for the Rupaya ledger.
//!
//! Every mutation that touches a bank account funnels its balance write
//! through this service: creating a bank transaction, compensating a
//! deleted one, and manual deposit/withdraw adjustments. The write is
//! conditional on the account `version` read at the start of the attempt
//! and is retried on conflict, so two concurrent deltas on the same account
//! both land instead of the second silently overwriting the first.
//!
//! The paired write itself (ledger entry + balance) is still two separate
//! store calls with no shared transaction. A failure between them leaves
//! the documents inconsistent; callers surface the error and nothing here
//! retries or rolls the pair back.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use crate::backend::domain::errors::DomainError;
use crate::backend::domain::models::bank_account::BankAccount;
use crate::backend::domain::models::transaction::{Transaction, TransactionType};
use crate::backend::storage::traits::{BalanceUpdate, BankAccountStore, Connection};

/// Attempts per balance write before giving up. Conflicts require another
/// writer landing between our read and write, so contention this deep means
/// something is wrong with the store.
const MAX_BALANCE_RETRIES: u32 = 5;

#[derive(Clone)]
pub struct ReconciliationService<C: Connection> {
    account_repository: C::BankAccountRepository,
}

impl<C: Connection> ReconciliationService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            account_repository: connection.create_account_repository(),
        }
    }

    /// The signed effect of a transaction on its account: income adds,
    /// expense subtracts.
    pub fn signed_delta(transaction_type: TransactionType, amount: f64) -> f64 {
        match transaction_type {
            TransactionType::Income => amount,
            TransactionType::Expense => -amount,
        }
    }

    /// Apply `delta` to an account balance. Fails with `NotFound` if the
    /// account is gone. With `enforce_funds`, a delta that would drive the
    /// balance negative is rejected against the freshest read, before any
    /// write.
    pub async fn apply_delta(
        &self,
        user_id: &str,
        account_id: &str,
        delta: f64,
        enforce_funds: bool,
    ) -> Result<BankAccount> {
        match self
            .apply_delta_if_present(user_id, account_id, delta, enforce_funds)
            .await?
        {
            Some(account) => Ok(account),
            None => Err(DomainError::not_found("Bank account", account_id).into()),
        }
    }

    /// Like [`apply_delta`](Self::apply_delta), but a missing account skips
    /// the write and returns `None`. Used when compensating a deleted
    /// transaction whose account may have been removed - history is not
    /// blocked by a dangling reference.
    pub async fn apply_delta_if_present(
        &self,
        user_id: &str,
        account_id: &str,
        delta: f64,
        enforce_funds: bool,
    ) -> Result<Option<BankAccount>> {
        for attempt in 1..=MAX_BALANCE_RETRIES {
            let Some(account) = self.account_repository.get_account(user_id, account_id).await?
            else {
                return Ok(None);
            };

            let new_balance = account.balance + delta;
            if enforce_funds && new_balance < 0.0 {
                return Err(DomainError::InsufficientFunds {
                    balance: account.balance,
                    requested: delta.abs(),
                }
                .into());
            }

            match self
                .account_repository
                .update_balance_if(user_id, account_id, account.version, new_balance)
                .await?
            {
                BalanceUpdate::Applied(updated) => {
                    info!(
                        account_id,
                        delta, new_balance = updated.balance, "balance reconciled"
                    );
                    return Ok(Some(updated));
                }
                BalanceUpdate::Conflict => {
                    warn!(account_id, attempt, "balance write conflict, retrying");
                    continue;
                }
                BalanceUpdate::Missing => return Ok(None),
            }
        }

        Err(DomainError::StoreUnavailable(format!(
            "balance update for {} kept conflicting after {} attempts",
            account_id, MAX_BALANCE_RETRIES
        ))
        .into())
    }

    /// Undo a transaction's effect on its account before the ledger entry
    /// is deleted. Returns the updated account, or `None` when the
    /// transaction was cash-only or its account no longer exists.
    pub async fn reverse_transaction(
        &self,
        user_id: &str,
        transaction: &Transaction,
    ) -> Result<Option<BankAccount>> {
        let Some(account_id) = transaction.bank_account_id.as_deref() else {
            return Ok(None);
        };
        let delta = -Self::signed_delta(transaction.transaction_type, transaction.amount);
        self.apply_delta_if_present(user_id, account_id, delta, false)
            .await
    }
}
