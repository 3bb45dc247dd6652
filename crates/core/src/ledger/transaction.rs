//! Immutable transaction records.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::LedgerAccount;

/// Kind of balance-affecting event.
///
/// The discriminants are the codes stored in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum TransactionType {
    /// Money paid in.
    Deposit = 1,
    /// Money taken out.
    Withdrawal = 2,
    /// Money moved between two accounts.
    Transfer = 3,
    /// Interest credited by the bank.
    Interest = 4,
}

impl TransactionType {
    /// Stored code of this type.
    #[must_use]
    pub const fn code(self) -> i16 {
        self as i16
    }

    /// Looks a type up by its stored code.
    #[must_use]
    pub const fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(Self::Deposit),
            2 => Some(Self::Withdrawal),
            3 => Some(Self::Transfer),
            4 => Some(Self::Interest),
            _ => None,
        }
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Withdrawal => "Withdrawal",
            Self::Transfer => "Transfer",
            Self::Interest => "Interest",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A transaction record ready to be appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTransaction {
    /// Account the record belongs to.
    pub account_id: Uuid,
    /// Positive magnitude of the movement.
    pub amount: Decimal,
    /// Kind of movement.
    pub transaction_type: TransactionType,
    /// Balance of the account right after the movement.
    pub balance_after_transaction: Decimal,
    /// Other side of a transfer.
    pub counterparty_account_no: Option<i64>,
    /// When the movement happened.
    pub timestamp: DateTime<Utc>,
}

impl NewTransaction {
    /// Captures a record from an account whose balance was already mutated.
    #[must_use]
    pub fn record(
        account: &LedgerAccount,
        amount: Decimal,
        transaction_type: TransactionType,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            account_id: account.id,
            amount,
            transaction_type,
            balance_after_transaction: account.balance,
            counterparty_account_no: None,
            timestamp,
        }
    }

    /// Sets the counterparty account number.
    #[must_use]
    pub fn with_counterparty(mut self, account_no: i64) -> Self {
        self.counterparty_account_no = Some(account_no);
        self
    }
}
