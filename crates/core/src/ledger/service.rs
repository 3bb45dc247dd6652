//! Ledger service for money movement.
//!
//! This module provides the core business logic for applying deposits,
//! withdrawals and transfers to accounts that the caller has already
//! loaded (and locked). It returns what must be persisted; it never
//! touches storage itself.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::account::{AccountChanges, LedgerAccount};
use super::error::LedgerError;
use super::transaction::{NewTransaction, TransactionType};
use super::validation::{OperationLimits, validate_deposit, validate_transfer, validate_withdrawal};

/// Result of an operation on one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    /// Account that changed.
    pub account_id: Uuid,
    /// Columns to write back.
    pub changes: AccountChanges,
    /// Record to append.
    pub record: NewTransaction,
}

/// Result of a transfer: one posting per side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPosting {
    /// Source side.
    pub debit: Posting,
    /// Destination side.
    pub credit: Posting,
}

/// Ledger service for money movement.
///
/// This service contains pure business logic with no database dependencies.
/// Every operation validates first and mutates only when all rules pass, so
/// a rejected operation leaves the accounts untouched.
pub struct LedgerService;

impl LedgerService {
    /// Deposits `amount` into `account`.
    ///
    /// The first deposit also starts the interest schedule.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if validation fails.
    pub fn deposit(
        account: &mut LedgerAccount,
        amount: Decimal,
        limits: &OperationLimits,
        now: DateTime<Utc>,
    ) -> Result<Posting, LedgerError> {
        let amount = validate_deposit(amount, limits)?;
        let schedule = account.pending_schedule(now)?;

        let balance = account.apply_delta(amount)?;
        let mut changes = AccountChanges::balance(balance);
        if let Some(schedule) = schedule {
            account.start_schedule(schedule);
            changes = changes.with_schedule(schedule);
        }

        Ok(Posting {
            account_id: account.id,
            changes,
            record: NewTransaction::record(account, amount, TransactionType::Deposit, now),
        })
    }

    /// Withdraws `amount` from `account`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if validation fails.
    pub fn withdraw(
        account: &mut LedgerAccount,
        amount: Decimal,
        limits: &OperationLimits,
        now: DateTime<Utc>,
    ) -> Result<Posting, LedgerError> {
        let amount = validate_withdrawal(amount, account.balance, &account.account_type, limits)?;
        let balance = account.apply_delta(-amount)?;

        Ok(Posting {
            account_id: account.id,
            changes: AccountChanges::balance(balance),
            record: NewTransaction::record(account, amount, TransactionType::Withdrawal, now),
        })
    }

    /// Moves `amount` from `source` to `destination`.
    ///
    /// Both sides get a `Transfer` record naming the other account. The
    /// destination's interest schedule is not started by a transfer.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::SelfTransfer` when both sides are the same
    /// account, otherwise the failing transfer rule.
    pub fn transfer(
        source: &mut LedgerAccount,
        destination: &mut LedgerAccount,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<TransferPosting, LedgerError> {
        if source.id == destination.id || source.account_no == destination.account_no {
            return Err(LedgerError::SelfTransfer);
        }
        let amount = validate_transfer(amount, source.balance)?;

        // Check the credit before touching the debit side.
        destination
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow)?;

        let source_balance = source.apply_delta(-amount)?;
        let destination_balance = destination.apply_delta(amount)?;

        Ok(TransferPosting {
            debit: Posting {
                account_id: source.id,
                changes: AccountChanges::balance(source_balance),
                record: NewTransaction::record(source, amount, TransactionType::Transfer, now)
                    .with_counterparty(destination.account_no),
            },
            credit: Posting {
                account_id: destination.id,
                changes: AccountChanges::balance(destination_balance),
                record: NewTransaction::record(destination, amount, TransactionType::Transfer, now)
                    .with_counterparty(source.account_no),
            },
        })
    }
}
