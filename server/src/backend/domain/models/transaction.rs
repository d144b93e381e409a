//! Domain model for a ledger transaction.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!("Invalid transaction type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Bank,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Bank => write!(f, "bank"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "bank" => Ok(PaymentMethod::Bank),
            other => Err(format!("Invalid payment method: {}", other)),
        }
    }
}

/// A single immutable ledger entry. There is no edit path; the only
/// lifecycle transitions are creation and deletion, and a deletion must be
/// paired with a compensating balance write on the referenced account.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    /// Always positive; direction comes from `transaction_type`
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub transaction_type: TransactionType,
    pub category: String,
    pub payment_method: PaymentMethod,
    /// Present iff `payment_method` is `Bank`. May dangle once the account
    /// is deleted; lookups must tolerate a missing referent.
    pub bank_account_id: Option<String>,
    /// Snapshot of the account's display name at write time, empty for cash
    pub bank_name: String,
    /// Epoch milliseconds at write time, the display sort key
    pub created_at: u64,
}

impl Transaction {
    /// Generate a unique transaction ID.
    /// Format: transaction::<uuid-v4>
    pub fn generate_id() -> String {
        format!("transaction::{}", Uuid::new_v4())
    }
}
