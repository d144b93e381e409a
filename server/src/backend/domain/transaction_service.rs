//! Transaction service: the write and read paths of the ledger.
//!
//! Creating or deleting a transaction that references a bank account is a
//! paired write: the ledger entry and the account balance are mutated in a
//! fixed order (entry first on create, balance first on delete) so that an
//! aborted pair never counts money twice. The two writes are not atomic;
//! see the reconciliation service for what is and is not guaranteed.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

use crate::backend::domain::commands::transactions::{
    CreateTransactionCommand, DeleteTransactionCommand, DeleteTransactionResult, PaginationInfo,
    TransactionListQuery, TransactionListResult,
};
use crate::backend::domain::errors::DomainError;
use crate::backend::domain::models::bank_account::BankAccount;
use crate::backend::domain::models::transaction::{PaymentMethod, Transaction, TransactionType};
use crate::backend::domain::reconciliation_service::ReconciliationService;
use crate::backend::storage::traits::{BankAccountStore, Connection, TransactionStore};

const MAX_DESCRIPTION_LENGTH: usize = 256;
const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Clone)]
pub struct TransactionService<C: Connection> {
    transaction_repository: C::TransactionRepository,
    account_repository: C::BankAccountRepository,
    reconciliation_service: ReconciliationService<C>,
}

impl<C: Connection> TransactionService<C> {
    pub fn new(connection: Arc<C>, reconciliation_service: ReconciliationService<C>) -> Self {
        Self {
            transaction_repository: connection.create_transaction_repository(),
            account_repository: connection.create_account_repository(),
            reconciliation_service,
        }
    }

    pub async fn create_transaction(
        &self,
        user_id: &str,
        command: CreateTransactionCommand,
    ) -> Result<Transaction> {
        if !command.amount.is_finite() || command.amount <= 0.0 {
            return Err(DomainError::Validation(
                "Amount must be a positive number".to_string(),
            )
            .into());
        }

        let description = command.description.trim().to_string();
        if description.is_empty() || description.len() > MAX_DESCRIPTION_LENGTH {
            return Err(DomainError::Validation(
                "Description must be between 1 and 256 characters".to_string(),
            )
            .into());
        }

        let category = command.category.trim().to_string();
        if category.is_empty() {
            return Err(DomainError::Validation("Category is required".to_string()).into());
        }

        let date = parse_transaction_date(command.date.as_deref())?;

        // Resolve the linked account up front: validation failures and the
        // insufficient-funds check must happen before any write.
        let linked_account = match command.payment_method {
            PaymentMethod::Cash => None,
            PaymentMethod::Bank => {
                let account_id = command.bank_account_id.as_deref().ok_or_else(|| {
                    DomainError::Validation("No linked bank account selected".to_string())
                })?;
                let account = self
                    .account_repository
                    .get_account(user_id, account_id)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Bank account", account_id))?;
                if command.transaction_type == TransactionType::Expense
                    && command.amount > account.balance
                {
                    return Err(DomainError::InsufficientFunds {
                        balance: account.balance,
                        requested: command.amount,
                    }
                    .into());
                }
                Some(account)
            }
        };

        let transaction = Transaction {
            id: Transaction::generate_id(),
            user_id: user_id.to_string(),
            amount: command.amount,
            date,
            description,
            transaction_type: command.transaction_type,
            category,
            payment_method: command.payment_method,
            bank_account_id: linked_account.as_ref().map(|a| a.id.clone()),
            bank_name: linked_account
                .as_ref()
                .map(|a| a.bank_name.clone())
                .unwrap_or_default(),
            created_at: now_millis()?,
        };

        // Ledger entry first: if the balance write below fails, the entry
        // still exists for auditing.
        self.transaction_repository
            .store_transaction(&transaction)
            .await?;

        if let Some(account) = &linked_account {
            let delta = ReconciliationService::<C>::signed_delta(
                transaction.transaction_type,
                transaction.amount,
            );
            self.reconciliation_service
                .apply_delta(user_id, &account.id, delta, false)
                .await?;
        }

        info!(
            transaction_id = %transaction.id,
            amount = transaction.amount,
            transaction_type = %transaction.transaction_type,
            "transaction created"
        );
        Ok(transaction)
    }

    pub async fn list_transactions(
        &self,
        user_id: &str,
        query: TransactionListQuery,
    ) -> Result<TransactionListResult> {
        let mut transactions = self.transaction_repository.list_transactions(user_id).await?;

        if let Some(wanted) = query.transaction_type {
            transactions.retain(|t| t.transaction_type == wanted);
        }
        if let Some(search) = query.search.as_deref() {
            let needle = search.to_lowercase();
            transactions.retain(|t| {
                t.description.to_lowercase().contains(&needle)
                    || t.category.to_lowercase().contains(&needle)
                    || t.bank_name.to_lowercase().contains(&needle)
            });
        }

        // Most recent first; id breaks ties so the cursor is stable
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        if let Some(after) = query.after.as_deref() {
            if let Some(position) = transactions.iter().position(|t| t.id == after) {
                transactions.drain(..=position);
            }
        }

        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE) as usize;
        let has_more = transactions.len() > limit;
        if has_more {
            transactions.truncate(limit);
        }
        let next_cursor = if has_more {
            transactions.last().map(|t| t.id.clone())
        } else {
            None
        };

        Ok(TransactionListResult {
            transactions,
            pagination: PaginationInfo {
                has_more,
                next_cursor,
            },
        })
    }

    /// Full unfiltered snapshot for the ledger projection.
    pub async fn ledger_snapshot(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.transaction_repository.list_transactions(user_id).await
    }

    pub async fn delete_transaction(
        &self,
        user_id: &str,
        command: DeleteTransactionCommand,
    ) -> Result<DeleteTransactionResult> {
        let transaction = self
            .transaction_repository
            .get_transaction(user_id, &command.transaction_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Transaction", &command.transaction_id))?;

        // Compensate the balance before removing the entry; if the write
        // fails the ledger still shows why the balance moved. A dangling
        // account reference skips this step - history wins over symmetry.
        let reconciled = self
            .reconciliation_service
            .reverse_transaction(user_id, &transaction)
            .await?;

        self.transaction_repository
            .delete_transaction(user_id, &command.transaction_id)
            .await?;

        let success_message = match &reconciled {
            Some(account) => format!(
                "Transaction deleted, {} balance reconciled",
                account.bank_name
            ),
            None => "Transaction deleted".to_string(),
        };
        info!(transaction_id = %command.transaction_id, "transaction deleted");

        Ok(DeleteTransactionResult {
            transaction_id: command.transaction_id,
            new_balance: reconciled.map(|a: BankAccount| a.balance),
            success_message,
        })
    }
}

fn parse_transaction_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        None => Ok(Local::now().date_naive()),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            DomainError::Validation(format!("Date must be in YYYY-MM-DD format: {}", raw)).into()
        }),
    }
}

fn now_millis() -> Result<u64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::csv::test_utils::{sample_account, TestStore};
    use crate::backend::storage::csv::CsvConnection;

    fn create_test_service(store: &TestStore) -> TransactionService<CsvConnection> {
        let connection = Arc::new(store.connection.clone());
        let reconciliation_service = ReconciliationService::new(connection.clone());
        TransactionService::new(connection, reconciliation_service)
    }

    fn create_command(
        amount: f64,
        transaction_type: TransactionType,
        payment_method: PaymentMethod,
        bank_account_id: Option<String>,
    ) -> CreateTransactionCommand {
        CreateTransactionCommand {
            amount,
            description: "Test transaction".to_string(),
            transaction_type,
            category: "Other Expense".to_string(),
            payment_method,
            bank_account_id,
            date: Some("2025-06-14".to_string()),
        }
    }

    async fn account_balance(store: &TestStore, user_id: &str, account_id: &str) -> f64 {
        store
            .account_repository()
            .get_account(user_id, account_id)
            .await
            .unwrap()
            .unwrap()
            .balance
    }

    #[tokio::test]
    async fn cash_transaction_touches_no_account() {
        let store = TestStore::new();
        let service = create_test_service(&store);
        let account = sample_account("user-1", 1000.0);
        store.account_repository().store_account(&account).await.unwrap();

        let transaction = service
            .create_transaction(
                "user-1",
                create_command(50.0, TransactionType::Expense, PaymentMethod::Cash, None),
            )
            .await
            .unwrap();

        assert_eq!(transaction.bank_account_id, None);
        assert_eq!(transaction.bank_name, "");
        assert_eq!(account_balance(&store, "user-1", &account.id).await, 1000.0);
    }

    #[tokio::test]
    async fn bank_income_adds_to_the_balance() {
        let store = TestStore::new();
        let service = create_test_service(&store);
        let account = sample_account("user-1", 1000.0);
        store.account_repository().store_account(&account).await.unwrap();

        let transaction = service
            .create_transaction(
                "user-1",
                create_command(
                    500.0,
                    TransactionType::Income,
                    PaymentMethod::Bank,
                    Some(account.id.clone()),
                ),
            )
            .await
            .unwrap();

        assert_eq!(transaction.bank_name, "HDFC Bank");
        assert_eq!(account_balance(&store, "user-1", &account.id).await, 1500.0);
    }

    #[tokio::test]
    async fn bank_expense_subtracts_from_the_balance() {
        let store = TestStore::new();
        let service = create_test_service(&store);
        let account = sample_account("user-1", 1000.0);
        store.account_repository().store_account(&account).await.unwrap();

        service
            .create_transaction(
                "user-1",
                create_command(
                    300.0,
                    TransactionType::Expense,
                    PaymentMethod::Bank,
                    Some(account.id.clone()),
                ),
            )
            .await
            .unwrap();

        assert_eq!(account_balance(&store, "user-1", &account.id).await, 700.0);
    }

    #[tokio::test]
    async fn over_balance_expense_is_rejected_without_writes() {
        let store = TestStore::new();
        let service = create_test_service(&store);
        let account = sample_account("user-1", 100.0);
        store.account_repository().store_account(&account).await.unwrap();

        let err = service
            .create_transaction(
                "user-1",
                create_command(
                    250.0,
                    TransactionType::Expense,
                    PaymentMethod::Bank,
                    Some(account.id.clone()),
                ),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::InsufficientFunds { .. })
        ));

        // Neither document was touched
        assert_eq!(account_balance(&store, "user-1", &account.id).await, 100.0);
        assert!(store
            .transaction_repository()
            .list_transactions("user-1")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn bank_transaction_without_account_selection_is_rejected() {
        let store = TestStore::new();
        let service = create_test_service(&store);

        let err = service
            .create_transaction(
                "user-1",
                create_command(50.0, TransactionType::Expense, PaymentMethod::Bank, None),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn invalid_inputs_are_rejected() {
        let store = TestStore::new();
        let service = create_test_service(&store);

        let mut command = create_command(0.0, TransactionType::Income, PaymentMethod::Cash, None);
        assert!(service.create_transaction("user-1", command.clone()).await.is_err());

        command.amount = f64::NAN;
        assert!(service.create_transaction("user-1", command.clone()).await.is_err());

        command.amount = 10.0;
        command.description = "   ".to_string();
        assert!(service.create_transaction("user-1", command.clone()).await.is_err());

        command.description = "ok".to_string();
        command.date = Some("14-06-2025".to_string());
        assert!(service.create_transaction("user-1", command).await.is_err());
    }

    #[tokio::test]
    async fn delete_restores_the_balance() {
        let store = TestStore::new();
        let service = create_test_service(&store);
        let account = sample_account("user-1", 1000.0);
        store.account_repository().store_account(&account).await.unwrap();

        let transaction = service
            .create_transaction(
                "user-1",
                create_command(
                    300.0,
                    TransactionType::Expense,
                    PaymentMethod::Bank,
                    Some(account.id.clone()),
                ),
            )
            .await
            .unwrap();
        assert_eq!(account_balance(&store, "user-1", &account.id).await, 700.0);

        let result = service
            .delete_transaction(
                "user-1",
                DeleteTransactionCommand {
                    transaction_id: transaction.id.clone(),
                },
            )
            .await
            .unwrap();

        assert_eq!(result.new_balance, Some(1000.0));
        assert_eq!(account_balance(&store, "user-1", &account.id).await, 1000.0);
        assert!(store
            .transaction_repository()
            .get_transaction("user-1", &transaction.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn delete_then_identical_readd_round_trips_the_balance() {
        let store = TestStore::new();
        let service = create_test_service(&store);
        let account = sample_account("user-1", 1000.0);
        store.account_repository().store_account(&account).await.unwrap();

        let command = create_command(
            450.0,
            TransactionType::Income,
            PaymentMethod::Bank,
            Some(account.id.clone()),
        );
        let transaction = service
            .create_transaction("user-1", command.clone())
            .await
            .unwrap();
        assert_eq!(account_balance(&store, "user-1", &account.id).await, 1450.0);

        service
            .delete_transaction(
                "user-1",
                DeleteTransactionCommand {
                    transaction_id: transaction.id,
                },
            )
            .await
            .unwrap();
        assert_eq!(account_balance(&store, "user-1", &account.id).await, 1000.0);

        service.create_transaction("user-1", command).await.unwrap();
        assert_eq!(account_balance(&store, "user-1", &account.id).await, 1450.0);
    }

    #[tokio::test]
    async fn delete_with_dangling_account_still_removes_the_entry() {
        let store = TestStore::new();
        let service = create_test_service(&store);
        let account = sample_account("user-1", 1000.0);
        store.account_repository().store_account(&account).await.unwrap();

        let transaction = service
            .create_transaction(
                "user-1",
                create_command(
                    200.0,
                    TransactionType::Expense,
                    PaymentMethod::Bank,
                    Some(account.id.clone()),
                ),
            )
            .await
            .unwrap();

        store
            .account_repository()
            .delete_account("user-1", &account.id)
            .await
            .unwrap();

        let result = service
            .delete_transaction(
                "user-1",
                DeleteTransactionCommand {
                    transaction_id: transaction.id.clone(),
                },
            )
            .await
            .unwrap();

        assert_eq!(result.new_balance, None);
        assert!(store
            .transaction_repository()
            .get_transaction("user-1", &transaction.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn deleting_a_missing_transaction_is_not_found() {
        let store = TestStore::new();
        let service = create_test_service(&store);

        let err = service
            .delete_transaction(
                "user-1",
                DeleteTransactionCommand {
                    transaction_id: "transaction::missing".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn listing_filters_searches_and_paginates() {
        let store = TestStore::new();
        let service = create_test_service(&store);
        let account = sample_account("user-1", 10_000.0);
        store.account_repository().store_account(&account).await.unwrap();

        let mut command = create_command(
            100.0,
            TransactionType::Expense,
            PaymentMethod::Bank,
            Some(account.id.clone()),
        );
        command.description = "Groceries".to_string();
        command.category = "Food".to_string();
        service.create_transaction("user-1", command).await.unwrap();

        // Ensure a distinct created_at millisecond for a stable sort order
        tokio::time::sleep(tokio::time::Duration::from_millis(2)).await;

        let mut command = create_command(2000.0, TransactionType::Income, PaymentMethod::Cash, None);
        command.description = "Monthly salary".to_string();
        command.category = "Salary".to_string();
        service.create_transaction("user-1", command).await.unwrap();

        let all = service
            .list_transactions("user-1", TransactionListQuery::default())
            .await
            .unwrap();
        assert_eq!(all.transactions.len(), 2);
        assert!(!all.pagination.has_more);
        // Most recent first
        assert_eq!(all.transactions[0].description, "Monthly salary");

        let income_only = service
            .list_transactions(
                "user-1",
                TransactionListQuery {
                    transaction_type: Some(TransactionType::Income),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(income_only.transactions.len(), 1);

        let by_bank_name = service
            .list_transactions(
                "user-1",
                TransactionListQuery {
                    search: Some("hdfc".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(by_bank_name.transactions.len(), 1);
        assert_eq!(by_bank_name.transactions[0].description, "Groceries");

        let first_page = service
            .list_transactions(
                "user-1",
                TransactionListQuery {
                    limit: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(first_page.pagination.has_more);
        let cursor = first_page.pagination.next_cursor.clone().unwrap();

        let second_page = service
            .list_transactions(
                "user-1",
                TransactionListQuery {
                    after: Some(cursor),
                    limit: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(second_page.transactions.len(), 1);
        assert!(!second_page.pagination.has_more);
        assert_ne!(
            first_page.transactions[0].id,
            second_page.transactions[0].id
        );
    }
}
