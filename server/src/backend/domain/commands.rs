//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping
//! the public DTOs defined in the `shared` crate to these internal types.

pub mod transactions {
    use crate::backend::domain::models::transaction::{
        PaymentMethod, Transaction as DomainTransaction, TransactionType,
    };

    /// Input for creating a new transaction.
    #[derive(Debug, Clone)]
    pub struct CreateTransactionCommand {
        pub amount: f64,
        pub description: String,
        pub transaction_type: TransactionType,
        pub category: String,
        pub payment_method: PaymentMethod,
        pub bank_account_id: Option<String>,
        /// YYYY-MM-DD; today when not provided
        pub date: Option<String>,
    }

    /// Query parameters for listing transactions.
    #[derive(Debug, Clone, Default)]
    pub struct TransactionListQuery {
        /// Cursor for pagination - transaction ID to start after
        pub after: Option<String>,
        pub limit: Option<u32>,
        /// Restrict to one side of the ledger
        pub transaction_type: Option<TransactionType>,
        /// Case-insensitive match against description, category and bank name
        pub search: Option<String>,
    }

    /// Command for deleting a single transaction.
    #[derive(Debug, Clone)]
    pub struct DeleteTransactionCommand {
        pub transaction_id: String,
    }

    /// Generic pagination info returned by list queries.
    #[derive(Debug, Clone)]
    pub struct PaginationInfo {
        pub has_more: bool,
        pub next_cursor: Option<String>,
    }

    /// Result of listing transactions.
    #[derive(Debug, Clone)]
    pub struct TransactionListResult {
        pub transactions: Vec<DomainTransaction>,
        pub pagination: PaginationInfo,
    }

    /// Result of deleting a transaction.
    #[derive(Debug, Clone)]
    pub struct DeleteTransactionResult {
        pub transaction_id: String,
        /// New balance of the reconciled account, when one was touched
        pub new_balance: Option<f64>,
        pub success_message: String,
    }
}

pub mod accounts {
    use crate::backend::domain::models::bank_account::BankAccount;
    use crate::backend::domain::models::transaction::Transaction as DomainTransaction;

    /// Input for linking a new bank account.
    #[derive(Debug, Clone)]
    pub struct LinkAccountCommand {
        pub bank_id: String,
        pub account_number: String,
        pub opening_balance: Option<f64>,
    }

    /// Direction of a manual balance adjustment.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum AdjustDirection {
        Deposit,
        Withdraw,
    }

    /// Input for a manual deposit/withdraw directly on an account.
    #[derive(Debug, Clone)]
    pub struct AdjustBalanceCommand {
        pub account_id: String,
        pub direction: AdjustDirection,
        pub amount: f64,
    }

    /// Result of a manual balance adjustment.
    #[derive(Debug, Clone)]
    pub struct AdjustBalanceResult {
        pub account: BankAccount,
        /// The synthetic "Adjustment" ledger entry mirroring the adjustment
        pub transaction: DomainTransaction,
        pub success_message: String,
    }

    /// Command for removing an account card.
    #[derive(Debug, Clone)]
    pub struct DeleteAccountCommand {
        pub account_id: String,
    }

    /// Result of removing an account card.
    #[derive(Debug, Clone)]
    pub struct DeleteAccountResult {
        pub account_id: String,
        pub success_message: String,
    }
}
