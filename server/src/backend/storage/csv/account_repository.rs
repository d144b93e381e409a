use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use csv::{Reader, StringRecord, Writer};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::connection::CsvConnection;
use crate::backend::domain::models::bank_account::BankAccount;
use crate::backend::storage::traits::{BalanceUpdate, BankAccountStore, BANK_ACCOUNTS_COLLECTION};

const HEADER: &[&str] = &[
    "id",
    "user_id",
    "bank_id",
    "bank_name",
    "account_number_masked",
    "balance",
    "status",
    "created_at",
    "version",
];

/// CSV-based bank account repository
#[derive(Clone)]
pub struct BankAccountRepository {
    connection: CsvConnection,
}

impl BankAccountRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_accounts(&self, user_id: &str) -> Result<Vec<BankAccount>> {
        let file_path = self.connection.accounts_file(user_id);
        self.connection.ensure_file_exists(&file_path, HEADER)?;

        let file = File::open(&file_path)
            .with_context(|| format!("opening {}", file_path.display()))?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut accounts = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            accounts.push(parse_record(&record)?);
        }
        Ok(accounts)
    }

    fn write_accounts(&self, user_id: &str, accounts: &[BankAccount]) -> Result<()> {
        let file_path = self.connection.accounts_file(user_id);
        self.connection.ensure_file_exists(&file_path, HEADER)?;
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let mut csv_writer = Writer::from_writer(BufWriter::new(file));

            csv_writer.write_record(HEADER)?;
            for account in accounts {
                csv_writer.write_record(&[
                    account.id.as_str(),
                    account.user_id.as_str(),
                    account.bank_id.as_str(),
                    account.bank_name.as_str(),
                    account.account_number_masked.as_str(),
                    &account.balance.to_string(),
                    &account.status.to_string(),
                    &account.created_at.to_string(),
                    &account.version.to_string(),
                ])?;
            }
            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}

fn field<'a>(record: &'a StringRecord, index: usize, name: &str) -> Result<&'a str> {
    record
        .get(index)
        .ok_or_else(|| anyhow!("Missing column '{}' in accounts file", name))
}

fn parse_record(record: &StringRecord) -> Result<BankAccount> {
    Ok(BankAccount {
        id: field(record, 0, "id")?.to_string(),
        user_id: field(record, 1, "user_id")?.to_string(),
        bank_id: field(record, 2, "bank_id")?.to_string(),
        bank_name: field(record, 3, "bank_name")?.to_string(),
        account_number_masked: field(record, 4, "account_number_masked")?.to_string(),
        balance: field(record, 5, "balance")?.parse::<f64>().context("bad balance")?,
        status: field(record, 6, "status")?.parse().map_err(anyhow::Error::msg)?,
        created_at: field(record, 7, "created_at")?
            .parse::<u64>()
            .context("bad created_at")?,
        version: field(record, 8, "version")?.parse::<u64>().context("bad version")?,
    })
}

#[async_trait]
impl BankAccountStore for BankAccountRepository {
    async fn store_account(&self, account: &BankAccount) -> Result<()> {
        let user_id = account.user_id.clone();
        {
            let _guard = self.connection.lock_writes();
            let mut accounts = self.read_accounts(&user_id)?;
            accounts.push(account.clone());
            self.write_accounts(&user_id, &accounts)?;
        }
        self.connection.notify(BANK_ACCOUNTS_COLLECTION, &user_id);
        Ok(())
    }

    async fn get_account(&self, user_id: &str, account_id: &str) -> Result<Option<BankAccount>> {
        let accounts = self.read_accounts(user_id)?;
        Ok(accounts.into_iter().find(|a| a.id == account_id))
    }

    async fn list_accounts(&self, user_id: &str) -> Result<Vec<BankAccount>> {
        self.read_accounts(user_id)
    }

    async fn update_balance_if(
        &self,
        user_id: &str,
        account_id: &str,
        expected_version: u64,
        new_balance: f64,
    ) -> Result<BalanceUpdate> {
        let outcome = {
            let _guard = self.connection.lock_writes();
            let mut accounts = self.read_accounts(user_id)?;
            match accounts.iter().position(|a| a.id == account_id) {
                None => BalanceUpdate::Missing,
                Some(index) if accounts[index].version != expected_version => {
                    BalanceUpdate::Conflict
                }
                Some(index) => {
                    accounts[index].balance = new_balance;
                    accounts[index].version += 1;
                    let updated = accounts[index].clone();
                    self.write_accounts(user_id, &accounts)?;
                    BalanceUpdate::Applied(updated)
                }
            }
        };
        if matches!(outcome, BalanceUpdate::Applied(_)) {
            self.connection.notify(BANK_ACCOUNTS_COLLECTION, user_id);
        }
        Ok(outcome)
    }

    async fn delete_account(&self, user_id: &str, account_id: &str) -> Result<bool> {
        let deleted = {
            let _guard = self.connection.lock_writes();
            let mut accounts = self.read_accounts(user_id)?;
            let before = accounts.len();
            accounts.retain(|a| a.id != account_id);
            if accounts.len() == before {
                false
            } else {
                self.write_accounts(user_id, &accounts)?;
                true
            }
        };
        if deleted {
            self.connection.notify(BANK_ACCOUNTS_COLLECTION, user_id);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::csv::test_utils::{sample_account, TestStore};

    #[tokio::test]
    async fn store_and_get_round_trip() {
        let store = TestStore::new();
        let repo = store.account_repository();
        let account = sample_account("user-1", 1000.0);

        repo.store_account(&account).await.unwrap();
        let loaded = repo
            .get_account("user-1", &account.id)
            .await
            .unwrap()
            .expect("account should exist");
        assert_eq!(loaded, account);
    }

    #[tokio::test]
    async fn conditional_write_applies_on_matching_version() {
        let store = TestStore::new();
        let repo = store.account_repository();
        let account = sample_account("user-1", 1000.0);
        repo.store_account(&account).await.unwrap();

        let outcome = repo
            .update_balance_if("user-1", &account.id, account.version, 1200.0)
            .await
            .unwrap();
        match outcome {
            BalanceUpdate::Applied(updated) => {
                assert_eq!(updated.balance, 1200.0);
                assert_eq!(updated.version, account.version + 1);
            }
            other => panic!("expected Applied, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn conditional_write_conflicts_on_stale_version() {
        let store = TestStore::new();
        let repo = store.account_repository();
        let account = sample_account("user-1", 1000.0);
        repo.store_account(&account).await.unwrap();

        // First writer wins
        repo.update_balance_if("user-1", &account.id, account.version, 1200.0)
            .await
            .unwrap();
        // Second writer still holds the old version
        let outcome = repo
            .update_balance_if("user-1", &account.id, account.version, 900.0)
            .await
            .unwrap();
        assert!(matches!(outcome, BalanceUpdate::Conflict));

        // The first write was not overwritten
        let loaded = repo.get_account("user-1", &account.id).await.unwrap().unwrap();
        assert_eq!(loaded.balance, 1200.0);
    }

    #[tokio::test]
    async fn conditional_write_reports_missing_account() {
        let store = TestStore::new();
        let repo = store.account_repository();
        let outcome = repo
            .update_balance_if("user-1", "account::missing", 0, 100.0)
            .await
            .unwrap();
        assert!(matches!(outcome, BalanceUpdate::Missing));
    }

    #[tokio::test]
    async fn foreign_accounts_behave_as_absent() {
        let store = TestStore::new();
        let repo = store.account_repository();
        let account = sample_account("alice", 500.0);
        repo.store_account(&account).await.unwrap();

        assert!(repo.get_account("bob", &account.id).await.unwrap().is_none());
        let outcome = repo
            .update_balance_if("bob", &account.id, account.version, 0.0)
            .await
            .unwrap();
        assert!(matches!(outcome, BalanceUpdate::Missing));
        assert!(!repo.delete_account("bob", &account.id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_is_idempotent_to_absence() {
        let store = TestStore::new();
        let repo = store.account_repository();
        assert!(!repo.delete_account("user-1", "account::missing").await.unwrap());

        let account = sample_account("user-1", 100.0);
        repo.store_account(&account).await.unwrap();
        assert!(repo.delete_account("user-1", &account.id).await.unwrap());
        assert!(!repo.delete_account("user-1", &account.id).await.unwrap());
    }
}
