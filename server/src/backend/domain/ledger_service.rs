//! Ledger projection: aggregate figures derived from a transaction
//! snapshot.
//!
//! Pure functions of the full, unfiltered snapshot for one user. No
//! incremental state is carried between snapshots; every change
//! notification means a fresh recompute. Simplicity over performance,
//! acceptable at this scale.

use shared::{CategoryTotal, LedgerSummary};

use crate::backend::domain::models::transaction::{Transaction, TransactionType};

#[derive(Clone, Default)]
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Total income, total expense and their difference over a snapshot.
    /// Empty input yields all-zero output.
    pub fn summarize(&self, transactions: &[Transaction]) -> LedgerSummary {
        let mut total_income = 0.0;
        let mut total_expense = 0.0;
        for transaction in transactions {
            match transaction.transaction_type {
                TransactionType::Income => total_income += transaction.amount,
                TransactionType::Expense => total_expense += transaction.amount,
            }
        }
        LedgerSummary {
            total_income,
            total_expense,
            total_balance: total_income - total_expense,
        }
    }

    /// Expenses grouped by category, largest first. Ties break on the
    /// category name so the output is stable.
    pub fn expense_by_category(&self, transactions: &[Transaction]) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for transaction in transactions {
            if transaction.transaction_type != TransactionType::Expense {
                continue;
            }
            match totals.iter().position(|t| t.category == transaction.category) {
                Some(index) => totals[index].total += transaction.amount,
                None => totals.push(CategoryTotal {
                    category: transaction.category.clone(),
                    total: transaction.amount,
                }),
            }
        }
        totals.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        });
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::csv::test_utils::sample_transaction;

    fn transaction(amount: f64, transaction_type: TransactionType, category: &str) -> Transaction {
        let mut t = sample_transaction("user-1", amount);
        t.transaction_type = transaction_type;
        t.category = category.to_string();
        t
    }

    #[test]
    fn empty_snapshot_yields_zeros() {
        let summary = LedgerService::new().summarize(&[]);
        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_expense, 0.0);
        assert_eq!(summary.total_balance, 0.0);
    }

    #[test]
    fn income_and_expense_are_summed_separately() {
        let transactions = vec![
            transaction(500.0, TransactionType::Income, "Salary"),
            transaction(200.0, TransactionType::Expense, "Food"),
        ];
        let summary = LedgerService::new().summarize(&transactions);
        assert_eq!(summary.total_income, 500.0);
        assert_eq!(summary.total_expense, 200.0);
        assert_eq!(summary.total_balance, 300.0);
    }

    #[test]
    fn balance_can_go_negative_when_spending_exceeds_income() {
        let transactions = vec![
            transaction(100.0, TransactionType::Income, "Gift"),
            transaction(250.0, TransactionType::Expense, "Rent"),
        ];
        let summary = LedgerService::new().summarize(&transactions);
        assert_eq!(summary.total_balance, -150.0);
    }

    #[test]
    fn categories_aggregate_expenses_only_and_sort_descending() {
        let transactions = vec![
            transaction(100.0, TransactionType::Expense, "Food"),
            transaction(60.0, TransactionType::Expense, "Transport"),
            transaction(40.0, TransactionType::Expense, "Food"),
            transaction(9999.0, TransactionType::Income, "Salary"),
        ];
        let categories = LedgerService::new().expense_by_category(&transactions);
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].category, "Food");
        assert_eq!(categories[0].total, 140.0);
        assert_eq!(categories[1].category, "Transport");
    }
}
