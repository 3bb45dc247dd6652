//! `SeaORM` active enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use ledgerbank_core::ledger::TransactionType as LedgerTransactionType;

/// Stored transaction kind (`SMALLINT` code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i16", db_type = "SmallInteger")]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money paid in.
    #[sea_orm(num_value = 1)]
    Deposit,
    /// Money taken out.
    #[sea_orm(num_value = 2)]
    Withdrawal,
    /// Money moved between accounts.
    #[sea_orm(num_value = 3)]
    Transfer,
    /// Interest credited.
    #[sea_orm(num_value = 4)]
    Interest,
}

impl From<LedgerTransactionType> for TransactionType {
    fn from(kind: LedgerTransactionType) -> Self {
        match kind {
            LedgerTransactionType::Deposit => Self::Deposit,
            LedgerTransactionType::Withdrawal => Self::Withdrawal,
            LedgerTransactionType::Transfer => Self::Transfer,
            LedgerTransactionType::Interest => Self::Interest,
        }
    }
}

impl From<TransactionType> for LedgerTransactionType {
    fn from(kind: TransactionType) -> Self {
        match kind {
            TransactionType::Deposit => Self::Deposit,
            TransactionType::Withdrawal => Self::Withdrawal,
            TransactionType::Transfer => Self::Transfer,
            TransactionType::Interest => Self::Interest,
        }
    }
}
