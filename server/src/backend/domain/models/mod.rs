pub mod bank_account;
pub mod transaction;
