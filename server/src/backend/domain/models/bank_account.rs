//! Domain model for a linked bank account.

use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Active,
    Frozen,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountStatus::Active => write!(f, "active"),
            AccountStatus::Frozen => write!(f, "frozen"),
        }
    }
}

impl FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AccountStatus::Active),
            "frozen" => Ok(AccountStatus::Frozen),
            other => Err(format!("Invalid account status: {}", other)),
        }
    }
}

/// A linked bank account. `balance` is the authoritative current balance;
/// it must equal the opening balance plus the signed sum of all non-deleted
/// transactions referencing the account plus manual adjustments. Every
/// balance write is conditional on `version` so that concurrent writers
/// cannot silently overwrite each other's deltas.
#[derive(Debug, Clone, PartialEq)]
pub struct BankAccount {
    pub id: String,
    pub user_id: String,
    /// Reference into the static bank catalog
    pub bank_id: String,
    pub bank_name: String,
    pub account_number_masked: String,
    pub balance: f64,
    pub status: AccountStatus,
    /// Epoch milliseconds at link time
    pub created_at: u64,
    /// Optimistic-concurrency sequence, bumped on every balance write
    pub version: u64,
}

impl BankAccount {
    /// Generate a unique account ID.
    /// Format: account::<uuid-v4>
    pub fn generate_id() -> String {
        format!("account::{}", Uuid::new_v4())
    }

    /// Mask an account number down to its last 4 digits.
    /// The caller must pass at least 4 digits.
    pub fn mask_account_number(digits: &str) -> String {
        let last_four = &digits[digits.len().saturating_sub(4)..];
        format!("**** **** **** {}", last_four)
    }
}
