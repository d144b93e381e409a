//! # Domain Module
//!
//! Contains all business logic for the Rupaya finance tracker.
//!
//! This module encapsulates the core business rules, entities, and services
//! that define how transactions, bank accounts, and balances are modeled and
//! kept consistent. It operates independently of any specific UI framework
//! or storage mechanism.
//!
//! ## Module Organization
//!
//! - **transaction_service**: Transaction create/list/delete and the paired
//!   writes that keep account balances consistent with the ledger
//! - **account_service**: Account linking, manual deposit/withdraw, removal
//! - **reconciliation_service**: Balance-delta math and the conditional
//!   balance write shared by every mutation that touches an account
//! - **ledger_service**: Aggregate totals and category breakdowns derived
//!   from a transaction snapshot
//! - **account_card**: Read-side card formatting for the dashboard
//!
//! ## Core Concepts
//!
//! - **Ledger**: the full set of a user's transaction records
//! - **Reconciliation**: keeping an account's stored balance consistent
//!   with the transactions and adjustments that affect it
//! - **Paired write**: two causally linked document mutations (ledger entry
//!   + balance) that are ordered but not atomic
//! - **Synthetic adjustment transaction**: the ledger entry auto-created for
//!   a manual deposit/withdraw, so the ledger and the account view never
//!   diverge in what they count

pub mod account_card;
pub mod account_service;
pub mod commands;
pub mod errors;
pub mod ledger_service;
pub mod models;
pub mod reconciliation_service;
pub mod transaction_service;

pub use account_card::*;
pub use account_service::*;
pub use errors::*;
pub use ledger_service::*;
pub use reconciliation_service::*;
pub use transaction_service::*;
