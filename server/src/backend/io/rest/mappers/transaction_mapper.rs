use crate::backend::domain::models::transaction::{
    PaymentMethod as DomainPaymentMethod, Transaction as DomainTransaction,
    TransactionType as DomainTransactionType,
};
use shared::{
    PaymentMethod as SharedPaymentMethod, Transaction as SharedTransaction,
    TransactionType as SharedTransactionType,
};

pub struct TransactionMapper;

impl TransactionMapper {
    pub fn to_dto(domain: DomainTransaction) -> SharedTransaction {
        SharedTransaction {
            id: domain.id,
            user_id: domain.user_id,
            amount: domain.amount,
            date: domain.date.format("%Y-%m-%d").to_string(),
            description: domain.description,
            transaction_type: Self::to_dto_type(domain.transaction_type),
            category: domain.category,
            payment_method: Self::to_dto_method(domain.payment_method),
            bank_account_id: domain.bank_account_id,
            bank_name: domain.bank_name,
            created_at: domain.created_at,
        }
    }

    pub fn to_dto_type(domain_type: DomainTransactionType) -> SharedTransactionType {
        match domain_type {
            DomainTransactionType::Income => SharedTransactionType::Income,
            DomainTransactionType::Expense => SharedTransactionType::Expense,
        }
    }

    pub fn to_domain_type(dto_type: SharedTransactionType) -> DomainTransactionType {
        match dto_type {
            SharedTransactionType::Income => DomainTransactionType::Income,
            SharedTransactionType::Expense => DomainTransactionType::Expense,
        }
    }

    pub fn to_dto_method(domain_method: DomainPaymentMethod) -> SharedPaymentMethod {
        match domain_method {
            DomainPaymentMethod::Cash => SharedPaymentMethod::Cash,
            DomainPaymentMethod::Bank => SharedPaymentMethod::Bank,
        }
    }

    pub fn to_domain_method(dto_method: SharedPaymentMethod) -> DomainPaymentMethod {
        match dto_method {
            SharedPaymentMethod::Cash => DomainPaymentMethod::Cash,
            SharedPaymentMethod::Bank => DomainPaymentMethod::Bank,
        }
    }
}
