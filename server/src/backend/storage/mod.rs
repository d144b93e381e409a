//! # Storage Module
//!
//! The Record Store: durable, per-user document collections for
//! transactions and bank accounts.
//!
//! This module abstracts away the specific storage implementation details
//! and provides a consistent interface for persisting and retrieving data.
//! The implementation can be swapped out without affecting the domain logic
//! or the IO layer.
//!
//! ## Key Responsibilities
//!
//! - **Data Persistence**: Saving transactions and bank accounts to disk
//! - **Ownership Enforcement**: Every operation is scoped by user; a
//!   document owned by someone else behaves as absent
//! - **Conditional Balance Writes**: The version-keyed update that prevents
//!   two concurrent reconciliations from silently losing a delta
//! - **Change Notification**: A broadcast feed pushed after every mutation
//!   so live consumers can re-read their snapshots
//!
//! ## Current Implementation
//!
//! Per-user CSV files with atomic temp-file/rename writes.

pub mod csv;
pub mod traits;

pub use csv::CsvConnection;
pub use traits::{
    BalanceUpdate, BankAccountStore, Connection, StoreEvent, TransactionStore,
    BANK_ACCOUNTS_COLLECTION, TRANSACTIONS_COLLECTION,
};
