use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use csv::{Reader, StringRecord, Writer};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::connection::CsvConnection;
use crate::backend::domain::models::transaction::Transaction;
use crate::backend::storage::traits::{TransactionStore, TRANSACTIONS_COLLECTION};

const HEADER: &[&str] = &[
    "id",
    "user_id",
    "date",
    "description",
    "amount",
    "type",
    "category",
    "payment_method",
    "bank_account_id",
    "bank_name",
    "created_at",
];

/// CSV-based transaction repository
#[derive(Clone)]
pub struct TransactionRepository {
    connection: CsvConnection,
}

impl TransactionRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read all transactions for a user from their CSV file
    fn read_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let file_path = self.connection.transactions_file(user_id);
        self.connection.ensure_file_exists(&file_path, HEADER)?;

        let file = File::open(&file_path)
            .with_context(|| format!("opening {}", file_path.display()))?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut transactions = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            transactions.push(parse_record(&record)?);
        }
        Ok(transactions)
    }

    /// Write all transactions for a user to their CSV file atomically
    fn write_transactions(&self, user_id: &str, transactions: &[Transaction]) -> Result<()> {
        let file_path = self.connection.transactions_file(user_id);
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
            for transaction in transactions {
                write_record(&mut csv_writer, transaction)?;
            }
            csv_writer.flush()?;
        }

        // Atomic move from temp to final file
        std::fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}

fn field<'a>(record: &'a StringRecord, index: usize, name: &str) -> Result<&'a str> {
    record
        .get(index)
        .ok_or_else(|| anyhow!("Missing column '{}' in transactions file", name))
}

fn parse_record(record: &StringRecord) -> Result<Transaction> {
    let id = field(record, 0, "id")?.to_string();
    let date = NaiveDate::parse_from_str(field(record, 2, "date")?, "%Y-%m-%d")
        .with_context(|| format!("bad date in transaction {}", id))?;
    let bank_account_id = match field(record, 8, "bank_account_id")? {
        "" => None,
        account_id => Some(account_id.to_string()),
    };

    Ok(Transaction {
        id,
        user_id: field(record, 1, "user_id")?.to_string(),
        date,
        description: field(record, 3, "description")?.to_string(),
        amount: field(record, 4, "amount")?.parse::<f64>().context("bad amount")?,
        transaction_type: field(record, 5, "type")?.parse().map_err(anyhow::Error::msg)?,
        category: field(record, 6, "category")?.to_string(),
        payment_method: field(record, 7, "payment_method")?
            .parse()
            .map_err(anyhow::Error::msg)?,
        bank_account_id,
        bank_name: field(record, 9, "bank_name")?.to_string(),
        created_at: field(record, 10, "created_at")?
            .parse::<u64>()
            .context("bad created_at")?,
    })
}

fn write_record<W: std::io::Write>(writer: &mut Writer<W>, transaction: &Transaction) -> Result<()> {
    writer.write_record(&[
        transaction.id.as_str(),
        transaction.user_id.as_str(),
        &transaction.date.format("%Y-%m-%d").to_string(),
        transaction.description.as_str(),
        &transaction.amount.to_string(),
        &transaction.transaction_type.to_string(),
        transaction.category.as_str(),
        &transaction.payment_method.to_string(),
        transaction.bank_account_id.as_deref().unwrap_or(""),
        transaction.bank_name.as_str(),
        &transaction.created_at.to_string(),
    ])?;
    Ok(())
}

#[async_trait]
impl TransactionStore for TransactionRepository {
    async fn store_transaction(&self, transaction: &Transaction) -> Result<()> {
        let user_id = transaction.user_id.clone();
        {
            let _guard = self.connection.lock_writes();
            let mut transactions = self.read_transactions(&user_id)?;
            transactions.push(transaction.clone());
            self.write_transactions(&user_id, &transactions)?;
        }
        self.connection.notify(TRANSACTIONS_COLLECTION, &user_id);
        Ok(())
    }

    async fn get_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Option<Transaction>> {
        let transactions = self.read_transactions(user_id)?;
        Ok(transactions.into_iter().find(|t| t.id == transaction_id))
    }

    async fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.read_transactions(user_id)
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<bool> {
        let deleted = {
            let _guard = self.connection.lock_writes();
            let mut transactions = self.read_transactions(user_id)?;
            let before = transactions.len();
            transactions.retain(|t| t.id != transaction_id);
            if transactions.len() == before {
                false
            } else {
                self.write_transactions(user_id, &transactions)?;
                true
            }
        };
        if deleted {
            self.connection.notify(TRANSACTIONS_COLLECTION, user_id);
        }
        Ok(deleted)
    }
}
