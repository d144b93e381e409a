use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tracing::debug;

use crate::backend::storage::csv::{BankAccountRepository, TransactionRepository};
use crate::backend::storage::traits::{Connection, StoreEvent};

/// CsvConnection manages file paths, write serialization and the
/// change-notification feed for the CSV store.
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
    /// Serializes read-modify-write cycles across repositories sharing
    /// this connection. Held only across synchronous file IO.
    write_lock: Arc<Mutex<()>>,
    events: broadcast::Sender<StoreEvent>,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        let (events, _) = broadcast::channel(64);
        Ok(Self {
            base_directory: base_path,
            write_lock: Arc::new(Mutex::new(())),
            events,
        })
    }

    /// Directory holding one user's collections, created on demand.
    pub fn user_directory(&self, user_id: &str) -> PathBuf {
        self.base_directory
            .join("users")
            .join(Self::safe_directory_name(user_id))
    }

    pub fn transactions_file(&self, user_id: &str) -> PathBuf {
        self.user_directory(user_id).join("transactions.csv")
    }

    pub fn accounts_file(&self, user_id: &str) -> PathBuf {
        self.user_directory(user_id).join("bank_accounts.csv")
    }

    /// Turn an opaque user id into a filesystem-safe directory name.
    fn safe_directory_name(user_id: &str) -> String {
        user_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect()
    }

    /// Ensure a collection file exists with the given header row.
    pub(super) fn ensure_file_exists(&self, path: &Path, header: &[&str]) -> Result<()> {
        if path.exists() {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(header)?;
        writer.flush()?;
        Ok(())
    }

    pub(super) fn lock_writes(&self) -> std::sync::MutexGuard<'_, ()> {
        // A poisoned lock means a writer panicked between read and rename;
        // the on-disk snapshot is still the last complete write.
        match self.write_lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub(super) fn notify(&self, collection: &'static str, user_id: &str) {
        // No receivers is fine; the feed is best-effort by design.
        let _ = self.events.send(StoreEvent {
            collection,
            user_id: user_id.to_string(),
        });
        debug!(collection, user_id, "store change notification");
    }
}

impl Connection for CsvConnection {
    type TransactionRepository = TransactionRepository;
    type BankAccountRepository = BankAccountRepository;

    fn create_transaction_repository(&self) -> TransactionRepository {
        TransactionRepository::new(self.clone())
    }

    fn create_account_repository(&self) -> BankAccountRepository {
        BankAccountRepository::new(self.clone())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_directories_are_isolated_and_sanitized() {
        let temp_dir = tempfile::tempdir().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();

        let alice = connection.user_directory("alice");
        let bob = connection.user_directory("bob");
        assert_ne!(alice, bob);

        let odd = connection.user_directory("user/../../etc");
        let name = odd.file_name().unwrap().to_str().unwrap();
        assert!(!name.contains('/') && !name.contains('.'));
    }
}
