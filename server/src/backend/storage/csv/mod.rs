//! CSV-backed Record Store.
//!
//! Each user gets a directory under the data root with one CSV file per
//! collection. Files are rewritten whole on every mutation through a
//! temp-file-and-rename sequence, so a crash mid-write never corrupts the
//! previous snapshot. Read-modify-write cycles are serialized per
//! connection; cross-writer balance races are handled above this layer by
//! the version-keyed conditional write.

pub mod account_repository;
pub mod connection;
pub mod transaction_repository;

#[cfg(test)]
pub mod test_utils;

pub use account_repository::BankAccountRepository;
pub use connection::CsvConnection;
pub use transaction_repository::TransactionRepository;
