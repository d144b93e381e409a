//! Test utilities for the CSV store: a tempdir-backed store with automatic
//! cleanup, plus sample document constructors.

use tempfile::TempDir;
use tokio::sync::broadcast;

use super::connection::CsvConnection;
use super::{BankAccountRepository, TransactionRepository};
use crate::backend::domain::models::bank_account::{AccountStatus, BankAccount};
use crate::backend::domain::models::transaction::{PaymentMethod, Transaction, TransactionType};
use crate::backend::storage::traits::{Connection, StoreEvent};

/// A CSV store rooted in a temporary directory. The directory lives as long
/// as this struct and is removed on drop, even if a test panics.
pub struct TestStore {
    _temp_dir: TempDir,
    pub connection: CsvConnection,
}

impl TestStore {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let connection = CsvConnection::new(temp_dir.path()).expect("failed to open csv store");
        Self {
            _temp_dir: temp_dir,
            connection,
        }
    }

    pub fn transaction_repository(&self) -> TransactionRepository {
        self.connection.create_transaction_repository()
    }

    pub fn account_repository(&self) -> BankAccountRepository {
        self.connection.create_account_repository()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.connection.subscribe()
    }
}

/// A cash income transaction with fresh id, owned by `user_id`.
pub fn sample_transaction(user_id: &str, amount: f64) -> Transaction {
    Transaction {
        id: Transaction::generate_id(),
        user_id: user_id.to_string(),
        amount,
        date: chrono::NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
        description: "Sample transaction".to_string(),
        transaction_type: TransactionType::Income,
        category: "Other Income".to_string(),
        payment_method: PaymentMethod::Cash,
        bank_account_id: None,
        bank_name: String::new(),
        created_at: 1_750_000_000_000,
    }
}

/// An active HDFC account with fresh id, owned by `user_id`.
pub fn sample_account(user_id: &str, balance: f64) -> BankAccount {
    BankAccount {
        id: BankAccount::generate_id(),
        user_id: user_id.to_string(),
        bank_id: "hdfc".to_string(),
        bank_name: "HDFC Bank".to_string(),
        account_number_masked: "**** **** **** 8888".to_string(),
        balance,
        status: AccountStatus::Active,
        created_at: 1_750_000_000_000,
        version: 0,
    }
}
