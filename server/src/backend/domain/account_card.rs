//! Account card projection: read-side formatting of bank accounts for the
//! dashboard. No mutation capability - purely derived from the current
//! account snapshot.

use shared::{AccountCard, SUPPORTED_BANKS};

use crate::backend::domain::models::bank_account::BankAccount;
use crate::backend::io::rest::mappers::account_mapper::AccountMapper;

#[derive(Clone, Default)]
pub struct AccountCardService;

impl AccountCardService {
    pub fn new() -> Self {
        Self
    }

    pub fn project_cards(&self, accounts: &[BankAccount]) -> Vec<AccountCard> {
        accounts.iter().map(|account| self.project_card(account)).collect()
    }

    /// A card tolerates a stale `bank_id` (the catalog changed, or old
    /// data): it falls back to the first catalog entry's skin rather than
    /// failing the whole dashboard.
    pub fn project_card(&self, account: &BankAccount) -> AccountCard {
        let bank = shared::bank_metadata(&account.bank_id).unwrap_or(&SUPPORTED_BANKS[0]);
        AccountCard {
            id: account.id.clone(),
            bank_id: account.bank_id.clone(),
            bank_name: account.bank_name.clone(),
            account_number_masked: account.account_number_masked.clone(),
            formatted_balance: format_inr(account.balance),
            raw_balance: account.balance,
            status: AccountMapper::to_dto_status(account.status),
            brand_color: bank.color.to_string(),
            text_color: bank.text_color.to_string(),
        }
    }
}

/// Format a rupee amount with Indian digit grouping: the last three digits
/// form one group, every group above that has two ("₹12,34,567.89").
/// Rounding to two decimals happens here, for presentation only.
pub fn format_inr(value: f64) -> String {
    let negative = value < 0.0;
    let paise_total = (value.abs() * 100.0).round() as u64;
    let rupees = paise_total / 100;
    let paise = paise_total % 100;

    let digits = rupees.to_string();
    let mut grouped = String::new();
    if digits.len() <= 3 {
        grouped.push_str(&digits);
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let head_bytes = head.as_bytes();
        let mut groups = Vec::new();
        let mut index = head_bytes.len();
        while index > 2 {
            groups.push(&head[index - 2..index]);
            index -= 2;
        }
        groups.push(&head[..index]);
        for group in groups.iter().rev() {
            grouped.push_str(group);
            grouped.push(',');
        }
        grouped.push_str(tail);
    }

    format!(
        "{}₹{}.{:02}",
        if negative { "-" } else { "" },
        grouped,
        paise
    )
}
