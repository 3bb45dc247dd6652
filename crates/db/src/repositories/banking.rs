//! Banking repository: deposits, withdrawals and transfers.
//!
//! Every operation is one database transaction:
//! `begin` → lock account row(s) → validate and mutate through
//! `LedgerService` → write changed columns → append record(s) → `commit`.
//! Returning early drops the transaction, which rolls everything back.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, Set, TransactionTrait,
};
use tracing::{error, info};
use uuid::Uuid;

use ledgerbank_core::ledger::{
    LedgerAccount, LedgerError, LedgerService, NewTransaction, OperationLimits, Posting,
};

use super::account::{AccountError, find_transfer_target, lock_account, to_ledger_account};
use crate::entities::{accounts, transactions};

/// Error types for banking operations.
#[derive(Debug, thiserror::Error)]
pub enum BankingError {
    /// The operation was refused by a ledger rule.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The caller's account does not exist.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AccountError> for BankingError {
    fn from(e: AccountError) -> Self {
        match e {
            AccountError::Ledger(e) => Self::Ledger(e),
            AccountError::Database(e) => Self::Database(e),
        }
    }
}

/// Result of a deposit or withdrawal.
#[derive(Debug, Clone)]
pub struct OperationOutcome {
    /// Account after the operation.
    pub account: accounts::Model,
    /// Appended record.
    pub transaction: transactions::Model,
}

/// Result of a transfer.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    /// Source account after the operation.
    pub source: accounts::Model,
    /// Destination account after the operation.
    pub destination: accounts::Model,
    /// Record appended to the source.
    pub debit: transactions::Model,
    /// Record appended to the destination.
    pub credit: transactions::Model,
}

/// Banking repository for money movement.
#[derive(Debug, Clone)]
pub struct BankingRepository {
    db: DatabaseConnection,
}

impl BankingRepository {
    /// Creates a new banking repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Deposits `amount` into the account.
    ///
    /// # Errors
    ///
    /// Returns `BankingError::Ledger` when a rule refuses the deposit,
    /// `BankingError::AccountNotFound`, or a database error (rolled back).
    pub async fn deposit(
        &self,
        account_id: Uuid,
        amount: Decimal,
        limits: &OperationLimits,
    ) -> Result<OperationOutcome, BankingError> {
        let result = self
            .single_account_operation(account_id, |account, now| {
                LedgerService::deposit(account, amount, limits, now)
            })
            .await;
        log_outcome("deposit", account_id, amount, &result);
        result
    }

    /// Withdraws `amount` from the account.
    ///
    /// # Errors
    ///
    /// Same as [`Self::deposit`].
    pub async fn withdraw(
        &self,
        account_id: Uuid,
        amount: Decimal,
        limits: &OperationLimits,
    ) -> Result<OperationOutcome, BankingError> {
        let result = self
            .single_account_operation(account_id, |account, now| {
                LedgerService::withdraw(account, amount, limits, now)
            })
            .await;
        log_outcome("withdraw", account_id, amount, &result);
        result
    }

    /// Transfers `amount` to the customer account numbered `target_account_no`.
    ///
    /// # Errors
    ///
    /// Returns `BankingError::Ledger` for an unknown, ambiguous or own
    /// target and for refused amounts, or a database error (rolled back).
    pub async fn transfer(
        &self,
        account_id: Uuid,
        target_account_no: i64,
        amount: Decimal,
    ) -> Result<TransferOutcome, BankingError> {
        let result = self.transfer_in_txn(account_id, target_account_no, amount).await;
        match &result {
            Ok(outcome) => info!(
                account_id = %account_id,
                target_account_no,
                amount = %amount,
                balance = %outcome.source.balance,
                "Transfer committed"
            ),
            Err(BankingError::Database(e)) => error!(
                account_id = %account_id,
                target_account_no,
                error = %e,
                "Transfer rolled back"
            ),
            Err(e) => info!(
                account_id = %account_id,
                target_account_no,
                reason = %e,
                "Transfer refused"
            ),
        }
        result
    }

    async fn single_account_operation<F>(
        &self,
        account_id: Uuid,
        operation: F,
    ) -> Result<OperationOutcome, BankingError>
    where
        F: FnOnce(&mut LedgerAccount, DateTime<Utc>) -> Result<Posting, LedgerError>,
    {
        let txn = self.db.begin().await?;

        let (model, account_type) = lock_account(&txn, account_id)
            .await?
            .ok_or(BankingError::AccountNotFound(account_id))?;
        let mut ledger = to_ledger_account(&model, &account_type);

        let now = Utc::now();
        let posting = operation(&mut ledger, now)?;
        let (account, transaction) = write_posting(&txn, model, &posting, now).await?;

        txn.commit().await?;
        Ok(OperationOutcome {
            account,
            transaction,
        })
    }

    async fn transfer_in_txn(
        &self,
        account_id: Uuid,
        target_account_no: i64,
        amount: Decimal,
    ) -> Result<TransferOutcome, BankingError> {
        let txn = self.db.begin().await?;

        let target = find_transfer_target(&txn, target_account_no).await?;
        if target.id == account_id {
            return Err(LedgerError::SelfTransfer.into());
        }

        // Lock in ascending id order so concurrent opposite transfers cannot deadlock.
        let (first, second) = if account_id < target.id {
            (account_id, target.id)
        } else {
            (target.id, account_id)
        };
        let first = lock_account(&txn, first).await?;
        let second = lock_account(&txn, second).await?;
        let (source, destination) = if first.as_ref().is_some_and(|(a, _)| a.id == account_id) {
            (first, second)
        } else {
            (second, first)
        };
        let (source_model, source_type) =
            source.ok_or(BankingError::AccountNotFound(account_id))?;
        let (destination_model, destination_type) =
            destination.ok_or(LedgerError::AccountNotFound(target_account_no))?;

        let mut source_ledger = to_ledger_account(&source_model, &source_type);
        let mut destination_ledger = to_ledger_account(&destination_model, &destination_type);

        let now = Utc::now();
        let posting =
            LedgerService::transfer(&mut source_ledger, &mut destination_ledger, amount, now)?;

        let (source, debit) = write_posting(&txn, source_model, &posting.debit, now).await?;
        let (destination, credit) =
            write_posting(&txn, destination_model, &posting.credit, now).await?;

        txn.commit().await?;
        Ok(TransferOutcome {
            source,
            destination,
            debit,
            credit,
        })
    }
}

fn log_outcome(
    operation: &'static str,
    account_id: Uuid,
    amount: Decimal,
    result: &Result<OperationOutcome, BankingError>,
) {
    match result {
        Ok(outcome) => info!(
            account_id = %account_id,
            operation,
            amount = %amount,
            balance = %outcome.account.balance,
            "Banking operation committed"
        ),
        Err(BankingError::Database(e)) => error!(
            account_id = %account_id,
            operation,
            error = %e,
            "Banking operation rolled back"
        ),
        Err(e) => info!(
            account_id = %account_id,
            operation,
            reason = %e,
            "Banking operation refused"
        ),
    }
}

/// Writes the changed account columns and appends the record.
async fn write_posting(
    txn: &DatabaseTransaction,
    model: accounts::Model,
    posting: &Posting,
    now: DateTime<Utc>,
) -> Result<(accounts::Model, transactions::Model), DbErr> {
    let mut account: accounts::ActiveModel = model.into();
    if let Some(balance) = posting.changes.balance {
        account.balance = Set(balance);
    }
    if let Some(date) = posting.changes.initial_deposit_date {
        account.initial_deposit_date = Set(Some(date.into()));
    }
    if let Some(date) = posting.changes.interest_start_date {
        account.interest_start_date = Set(Some(date.into()));
    }
    account.updated_at = Set(now.into());
    let account = account.update(txn).await?;

    let transaction = insert_record(txn, &posting.record).await?;
    Ok((account, transaction))
}

/// Appends a transaction record.
pub(crate) async fn insert_record(
    txn: &DatabaseTransaction,
    record: &NewTransaction,
) -> Result<transactions::Model, DbErr> {
    transactions::ActiveModel {
        id: Set(Uuid::now_v7()),
        account_id: Set(record.account_id),
        amount: Set(record.amount),
        transaction_type: Set(record.transaction_type.into()),
        balance_after_transaction: Set(record.balance_after_transaction),
        counterparty_account_no: Set(record.counterparty_account_no),
        timestamp: Set(record.timestamp.into()),
    }
    .insert(txn)
    .await
}
