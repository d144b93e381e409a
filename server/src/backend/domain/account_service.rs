//! Bank account service: linking, manual adjustments and removal.
//!
//! A manual deposit/withdraw is the mirror image of a bank transaction's
//! paired write: the balance moves first, then a synthetic "Adjustment"
//! ledger entry is recorded so the ledger projection never disagrees with
//! the account view about what was counted.

use anyhow::Result;
use chrono::Local;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

use crate::backend::domain::commands::accounts::{
    AdjustBalanceCommand, AdjustBalanceResult, AdjustDirection, DeleteAccountCommand,
    DeleteAccountResult, LinkAccountCommand,
};
use crate::backend::domain::errors::DomainError;
use crate::backend::domain::models::bank_account::{AccountStatus, BankAccount};
use crate::backend::domain::models::transaction::{PaymentMethod, Transaction, TransactionType};
use crate::backend::domain::reconciliation_service::ReconciliationService;
use crate::backend::storage::traits::{BankAccountStore, Connection, TransactionStore};

#[derive(Clone)]
pub struct AccountService<C: Connection> {
    account_repository: C::BankAccountRepository,
    transaction_repository: C::TransactionRepository,
    reconciliation_service: ReconciliationService<C>,
}

impl<C: Connection> AccountService<C> {
    pub fn new(connection: Arc<C>, reconciliation_service: ReconciliationService<C>) -> Self {
        Self {
            account_repository: connection.create_account_repository(),
            transaction_repository: connection.create_transaction_repository(),
            reconciliation_service,
        }
    }

    pub async fn link_account(
        &self,
        user_id: &str,
        command: LinkAccountCommand,
    ) -> Result<BankAccount> {
        let bank = shared::bank_metadata(&command.bank_id).ok_or_else(|| {
            DomainError::Validation(format!("Unknown bank: {}", command.bank_id))
        })?;

        let digits = command.account_number.trim();
        if digits.len() < 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::Validation(
                "Account number must be at least 4 digits".to_string(),
            )
            .into());
        }

        let opening_balance = command.opening_balance.unwrap_or(0.0);
        if !opening_balance.is_finite() || opening_balance < 0.0 {
            return Err(DomainError::Validation(
                "Opening balance must be zero or a positive number".to_string(),
            )
            .into());
        }

        let account = BankAccount {
            id: BankAccount::generate_id(),
            user_id: user_id.to_string(),
            bank_id: bank.id.to_string(),
            bank_name: bank.name.to_string(),
            account_number_masked: BankAccount::mask_account_number(digits),
            balance: opening_balance,
            status: AccountStatus::Active,
            created_at: now_millis()?,
            version: 0,
        };
        self.account_repository.store_account(&account).await?;

        info!(account_id = %account.id, bank = bank.id, "bank account linked");
        Ok(account)
    }

    pub async fn list_accounts(&self, user_id: &str) -> Result<Vec<BankAccount>> {
        let mut accounts = self.account_repository.list_accounts(user_id).await?;
        accounts.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(accounts)
    }

    pub async fn adjust_balance(
        &self,
        user_id: &str,
        command: AdjustBalanceCommand,
    ) -> Result<AdjustBalanceResult> {
        if !command.amount.is_finite() || command.amount <= 0.0 {
            return Err(DomainError::Validation(
                "Amount must be a positive number".to_string(),
            )
            .into());
        }

        let (delta, transaction_type, description) = match command.direction {
            AdjustDirection::Deposit => (
                command.amount,
                TransactionType::Income,
                "Manual Bank Deposit",
            ),
            AdjustDirection::Withdraw => (
                -command.amount,
                TransactionType::Expense,
                "Manual Bank Withdrawal",
            ),
        };

        // Balance first; only a withdrawal is checked against the funds.
        let account = self
            .reconciliation_service
            .apply_delta(
                user_id,
                &command.account_id,
                delta,
                command.direction == AdjustDirection::Withdraw,
            )
            .await?;

        // Mirror the adjustment into the ledger so the projections agree
        // with the account view.
        let transaction = Transaction {
            id: Transaction::generate_id(),
            user_id: user_id.to_string(),
            amount: command.amount,
            date: Local::now().date_naive(),
            description: description.to_string(),
            transaction_type,
            category: shared::ADJUSTMENT_CATEGORY.to_string(),
            payment_method: PaymentMethod::Bank,
            bank_account_id: Some(account.id.clone()),
            bank_name: account.bank_name.clone(),
            created_at: now_millis()?,
        };
        self.transaction_repository
            .store_transaction(&transaction)
            .await?;

        let success_message = format!(
            "{} of {:.2} applied to {}",
            description, command.amount, account.bank_name
        );
        info!(account_id = %account.id, delta, "manual adjustment applied");

        Ok(AdjustBalanceResult {
            account,
            transaction,
            success_message,
        })
    }

    /// Removes the account card only. Transactions referencing the account
    /// keep their `bank_account_id` as a dangling reference - the ledger
    /// history is preserved, not cascaded.
    pub async fn delete_account(
        &self,
        user_id: &str,
        command: DeleteAccountCommand,
    ) -> Result<DeleteAccountResult> {
        let deleted = self
            .account_repository
            .delete_account(user_id, &command.account_id)
            .await?;
        if !deleted {
            return Err(DomainError::not_found("Bank account", &command.account_id).into());
        }

        info!(account_id = %command.account_id, "bank account removed");
        Ok(DeleteAccountResult {
            account_id: command.account_id,
            success_message: "Account card removed, transaction history preserved".to_string(),
        })
    }
}

fn now_millis() -> Result<u64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64)
}
