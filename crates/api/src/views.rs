//! Typed response bodies.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ledgerbank_core::ledger::TransactionType;
use ledgerbank_db::entities::{accounts, transactions};
use ledgerbank_shared::types::at_money_scale;

/// Amount as sent by clients: `"12.50"` or `12.5`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// Decimal string.
    Text(String),
    /// JSON number, read back through its textual form.
    Number(serde_json::Number),
}

impl AmountInput {
    /// Textual form handed to the amount parser.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(number) => number.to_string(),
        }
    }
}

/// One line of the account's transaction history.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionView {
    /// Record ID.
    pub id: Uuid,
    /// `deposit`, `withdrawal`, `transfer` or `interest`.
    pub transaction_type: TransactionType,
    /// Human label.
    pub label: &'static str,
    /// Amount moved.
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// Balance right after this record.
    #[serde(with = "rust_decimal::serde::str")]
    pub balance_after_transaction: Decimal,
    /// Other side of a transfer.
    pub counterparty_account_no: Option<i64>,
    /// When the operation committed.
    pub timestamp: DateTime<Utc>,
}

impl From<&transactions::Model> for TransactionView {
    fn from(model: &transactions::Model) -> Self {
        let kind = TransactionType::from(model.transaction_type);
        Self {
            id: model.id,
            transaction_type: kind,
            label: kind.label(),
            amount: at_money_scale(model.amount),
            balance_after_transaction: at_money_scale(model.balance_after_transaction),
            counterparty_account_no: model.counterparty_account_no,
            timestamp: model.timestamp.with_timezone(&Utc),
        }
    }
}

/// Result of a deposit, withdrawal or transfer.
#[derive(Debug, Clone, Serialize)]
pub struct OperationReceipt {
    /// Confirmation shown to the account holder.
    pub message: String,
    /// Account number the operation ran on.
    pub account_no: i64,
    /// Balance after the operation.
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
    /// The caller's record of the operation.
    pub transaction: TransactionView,
}

impl OperationReceipt {
    /// Builds a receipt for `account` after `transaction` was appended.
    #[must_use]
    pub fn new(
        message: String,
        account: &accounts::Model,
        transaction: &transactions::Model,
    ) -> Self {
        Self {
            message,
            account_no: account.account_no,
            balance: at_money_scale(account.balance),
            transaction: TransactionView::from(transaction),
        }
    }
}

/// Transaction history response.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionList {
    /// Records, newest first.
    pub transactions: Vec<TransactionView>,
    /// Number of records.
    pub count: usize,
}
