use crate::backend::domain::models::bank_account::{
    AccountStatus as DomainAccountStatus, BankAccount as DomainBankAccount,
};
use shared::{AccountStatus as SharedAccountStatus, BankAccount as SharedBankAccount};

pub struct AccountMapper;

impl AccountMapper {
    pub fn to_dto(domain: DomainBankAccount) -> SharedBankAccount {
        SharedBankAccount {
            id: domain.id,
            user_id: domain.user_id,
            bank_id: domain.bank_id,
            bank_name: domain.bank_name,
            account_number_masked: domain.account_number_masked,
            balance: domain.balance,
            status: Self::to_dto_status(domain.status),
            created_at: domain.created_at,
            version: domain.version,
        }
    }

    pub fn to_dto_status(domain_status: DomainAccountStatus) -> SharedAccountStatus {
        match domain_status {
            DomainAccountStatus::Active => SharedAccountStatus::Active,
            DomainAccountStatus::Frozen => SharedAccountStatus::Frozen,
        }
    }
}
