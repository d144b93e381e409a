//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.
//!
//! There is deliberately no multi-document transaction primitive here: a
//! paired write (ledger entry + balance) is two independent calls, issued
//! in program order and each awaited before the next. The only concurrency
//! guard the store offers is the version-keyed conditional balance write.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::backend::domain::models::bank_account::BankAccount;
use crate::backend::domain::models::transaction::Transaction;

pub const TRANSACTIONS_COLLECTION: &str = "transactions";
pub const BANK_ACCOUNTS_COLLECTION: &str = "bank_accounts";

/// Pushed after every successful mutation. Carries no payload; consumers
/// re-read the snapshot they care about.
#[derive(Debug, Clone)]
pub struct StoreEvent {
    pub collection: &'static str,
    pub user_id: String,
}

/// Outcome of a conditional balance write.
#[derive(Debug, Clone)]
pub enum BalanceUpdate {
    /// The expected version matched; returns the updated account
    Applied(BankAccount),
    /// Another writer got there first; re-read and retry
    Conflict,
    /// The account does not exist (or belongs to another user)
    Missing,
}

/// Trait defining the interface for transaction storage operations
///
/// All operations are scoped to one user; transactions owned by another
/// user behave as absent.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Store a new transaction
    async fn store_transaction(&self, transaction: &Transaction) -> Result<()>;

    /// Retrieve a specific transaction by ID
    async fn get_transaction(&self, user_id: &str, transaction_id: &str)
        -> Result<Option<Transaction>>;

    /// Full snapshot of a user's transactions, in storage order
    async fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>>;

    /// Delete a single transaction
    /// Returns true if the transaction was found and deleted, false otherwise
    /// (deleting an absent id is not an error)
    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<bool>;
}

/// Trait defining the interface for bank account storage operations
#[async_trait]
pub trait BankAccountStore: Send + Sync {
    /// Store a newly linked account
    async fn store_account(&self, account: &BankAccount) -> Result<()>;

    /// Retrieve a specific account by ID
    async fn get_account(&self, user_id: &str, account_id: &str) -> Result<Option<BankAccount>>;

    /// Full snapshot of a user's accounts, in storage order
    async fn list_accounts(&self, user_id: &str) -> Result<Vec<BankAccount>>;

    /// Conditionally write a new balance, keyed on the version the caller
    /// read. Bumps the version on success.
    async fn update_balance_if(
        &self,
        user_id: &str,
        account_id: &str,
        expected_version: u64,
        new_balance: f64,
    ) -> Result<BalanceUpdate>;

    /// Delete an account card
    /// Returns true if the account was found and deleted, false otherwise
    async fn delete_account(&self, user_id: &str, account_id: &str) -> Result<bool>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type and provides
/// factory methods for creating repositories, so the domain layer can work
/// with any storage backend without knowing the implementation details.
pub trait Connection: Send + Sync + Clone {
    /// The type of TransactionStore this connection creates
    type TransactionRepository: TransactionStore + Clone;

    /// The type of BankAccountStore this connection creates
    type BankAccountRepository: BankAccountStore + Clone;

    /// Create a new transaction repository for this connection
    fn create_transaction_repository(&self) -> Self::TransactionRepository;

    /// Create a new bank account repository for this connection
    fn create_account_repository(&self) -> Self::BankAccountRepository;

    /// Subscribe to the change-notification feed
    fn subscribe(&self) -> broadcast::Receiver<StoreEvent>;
}
