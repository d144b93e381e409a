//! Public DTOs exchanged between the Rupaya backend and its UI clients.
//!
//! These types are the wire format of the REST API. The backend maps them to
//! its internal domain models at the IO boundary; clients should treat them
//! as plain data.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction ID in format: "transaction::<uuid>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// ID of the user this transaction belongs to
    pub user_id: String,
    /// Amount of money moved, always positive; direction comes from `transaction_type`
    pub amount: f64,
    /// Calendar date of the transaction (YYYY-MM-DD, user-entered)
    pub date: String,
    /// Description of the transaction (max 256 characters)
    pub description: String,
    pub transaction_type: TransactionType,
    /// Free-form category, usually drawn from the suggestion sets below
    pub category: String,
    pub payment_method: PaymentMethod,
    /// Linked bank account, present iff `payment_method` is `bank`.
    /// May dangle after the account is deleted; history is preserved.
    pub bank_account_id: Option<String>,
    /// Display name of the linked bank, copied at write time (non-authoritative)
    pub bank_name: String,
    /// Write timestamp in epoch milliseconds, used for sort order
    pub created_at: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
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

/// Bank account ID in format: "account::<uuid>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: String,
    /// ID of the user this account belongs to
    pub user_id: String,
    /// Reference into the static bank catalog ([`SUPPORTED_BANKS`])
    pub bank_id: String,
    pub bank_name: String,
    /// Only the last 4 digits are retained ("**** **** **** 1234")
    pub account_number_masked: String,
    /// Authoritative current balance
    pub balance: f64,
    pub status: AccountStatus,
    /// Write timestamp in epoch milliseconds
    pub created_at: u64,
    /// Optimistic-concurrency sequence, bumped on every balance write
    pub version: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
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

/// Request for creating a new transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateTransactionRequest {
    pub amount: f64,
    pub description: String,
    pub transaction_type: TransactionType,
    pub category: String,
    pub payment_method: PaymentMethod,
    /// Required when `payment_method` is `bank`
    pub bank_account_id: Option<String>,
    /// Optional date override (YYYY-MM-DD) - uses today if not provided
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<Transaction>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

/// Response after deleting a transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeleteTransactionResponse {
    pub transaction_id: String,
    /// New balance of the reconciled account, if the transaction referenced one
    /// that still exists
    pub new_balance: Option<f64>,
    pub success_message: String,
}

/// Request for linking a new bank account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkAccountRequest {
    /// Must reference an entry in [`SUPPORTED_BANKS`]
    pub bank_id: String,
    /// Digits only; everything but the last 4 is discarded at write time
    pub account_number: String,
    /// Opening balance, defaults to 0
    pub opening_balance: Option<f64>,
}

/// Response after linking a bank account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkAccountResponse {
    pub account: BankAccount,
    pub success_message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustDirection {
    Deposit,
    Withdraw,
}

/// Request for a manual deposit/withdraw directly on an account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdjustBalanceRequest {
    pub direction: AdjustDirection,
    pub amount: f64,
}

/// Response after a manual balance adjustment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdjustBalanceResponse {
    pub account: BankAccount,
    /// The synthetic "Adjustment" ledger entry mirroring the adjustment
    pub transaction: Transaction,
    pub success_message: String,
}

/// Response after deleting a bank account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeleteAccountResponse {
    pub account_id: String,
    pub success_message: String,
}

/// Response containing the per-account dashboard cards
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountListResponse {
    pub accounts: Vec<AccountCard>,
}

/// A bank account formatted for dashboard display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountCard {
    pub id: String,
    pub bank_id: String,
    pub bank_name: String,
    pub account_number_masked: String,
    pub formatted_balance: String,
    pub raw_balance: f64,
    pub status: AccountStatus,
    /// Brand skin from the bank catalog (hex colors)
    pub brand_color: String,
    pub text_color: String,
}

/// Aggregate figures derived from the full transaction set of one user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub total_balance: f64,
}

/// Summed expenses for a single category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Response for the per-category expense report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySummaryResponse {
    pub categories: Vec<CategoryTotal>,
}

/// Static metadata for a supported partner bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankMetadata {
    pub id: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub text_color: &'static str,
}

/// The fixed catalog of banks the linking flow offers. Cards referencing an
/// unknown `bank_id` (stale data) fall back to the first entry's skin.
pub const SUPPORTED_BANKS: &[BankMetadata] = &[
    BankMetadata { id: "hdfc", name: "HDFC Bank", color: "#004c8f", text_color: "#ffffff" },
    BankMetadata { id: "sbi", name: "State Bank of India", color: "#29aae1", text_color: "#ffffff" },
    BankMetadata { id: "icici", name: "ICICI Bank", color: "#f37021", text_color: "#ffffff" },
    BankMetadata { id: "axis", name: "Axis Bank", color: "#97144d", text_color: "#ffffff" },
    BankMetadata { id: "kotak", name: "Kotak Mahindra", color: "#ed1c24", text_color: "#ffffff" },
    BankMetadata { id: "bob", name: "Bank of Baroda", color: "#fe5100", text_color: "#ffffff" },
    BankMetadata { id: "pnb", name: "Punjab National Bank", color: "#a2192e", text_color: "#ffffff" },
    BankMetadata { id: "canara", name: "Canara Bank", color: "#0091d3", text_color: "#ffffff" },
    BankMetadata { id: "union", name: "Union Bank", color: "#e21e26", text_color: "#ffffff" },
    BankMetadata { id: "indusind", name: "IndusInd Bank", color: "#91282c", text_color: "#ffffff" },
];

/// Look up a bank in the catalog by id.
pub fn bank_metadata(bank_id: &str) -> Option<&'static BankMetadata> {
    SUPPORTED_BANKS.iter().find(|bank| bank.id == bank_id)
}

/// Category used by synthetic ledger entries created from manual
/// deposit/withdraw adjustments.
pub const ADJUSTMENT_CATEGORY: &str = "Adjustment";

pub const INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Freelance",
    "Investment",
    "Gift",
    "Bonus",
    "Other Income",
    ADJUSTMENT_CATEGORY,
];

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Rent",
    "Bills",
    "Transport",
    "Shopping",
    "Healthcare",
    "Education",
    "Entertainment",
    "Travel",
    "Other Expense",
    ADJUSTMENT_CATEGORY,
];
