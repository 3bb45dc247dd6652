//! Account state as seen by the ledger.
//!
//! `LedgerAccount` is the in-memory image of a locked account row. All
//! balance movement goes through [`LedgerAccount::apply_delta`], and the
//! interest schedule is fixed by the first deposit only.

use chrono::{DateTime, Months, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::LedgerError;

/// Reference data describing a kind of account (e.g. Savings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountType {
    /// Account type ID.
    pub id: i32,
    /// Display name, unique.
    pub name: String,
    /// Largest amount a single withdrawal may take.
    pub maximum_withdrawal_amount: Decimal,
    /// How many times per year interest is computed (1..=12).
    pub interest_calculation_per_year: i16,
}

impl AccountType {
    /// Months between two interest computations (`12 / frequency`, truncated).
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidInterestFrequency` when the frequency is
    /// outside `1..=12`.
    pub fn interest_interval_months(&self) -> Result<u32, LedgerError> {
        match u32::try_from(self.interest_calculation_per_year) {
            Ok(frequency @ 1..=12) => Ok(12 / frequency),
            _ => Err(LedgerError::InvalidInterestFrequency(
                self.interest_calculation_per_year,
            )),
        }
    }
}

/// Dates set by the first deposit into an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterestSchedule {
    /// When the first deposit happened.
    pub initial_deposit_date: DateTime<Utc>,
    /// When interest starts to be computed.
    pub interest_start_date: DateTime<Utc>,
}

impl InterestSchedule {
    /// Computes the schedule for a first deposit made at `now`.
    ///
    /// Month arithmetic is calendar based and clamps to the last day of a
    /// shorter month (Jan 31 + 1 month = Feb 28/29).
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidInterestFrequency` for a bad frequency.
    pub fn starting_at(account_type: &AccountType, now: DateTime<Utc>) -> Result<Self, LedgerError> {
        let months = account_type.interest_interval_months()?;
        let interest_start_date = now
            .checked_add_months(Months::new(months))
            .ok_or(LedgerError::BalanceOverflow)?;

        Ok(Self {
            initial_deposit_date: now,
            interest_start_date,
        })
    }
}

/// A bank account loaded for a ledger operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerAccount {
    /// Account ID.
    pub id: Uuid,
    /// Public account number.
    pub account_no: i64,
    /// Current balance.
    pub balance: Decimal,
    /// Account type with its limits.
    pub account_type: AccountType,
    /// Set once, by the first deposit.
    pub initial_deposit_date: Option<DateTime<Utc>>,
    /// Derived from the first deposit and the interest frequency.
    pub interest_start_date: Option<DateTime<Utc>>,
}

impl LedgerAccount {
    /// Adds a signed amount to the balance and returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::BalanceOverflow` if the sum is not representable;
    /// the balance is left untouched in that case.
    pub fn apply_delta(&mut self, delta: Decimal) -> Result<Decimal, LedgerError> {
        let updated = self
            .balance
            .checked_add(delta)
            .ok_or(LedgerError::BalanceOverflow)?;
        self.balance = updated;
        Ok(updated)
    }

    /// Returns true once a deposit has been made.
    #[must_use]
    pub const fn has_deposited(&self) -> bool {
        self.initial_deposit_date.is_some()
    }

    /// Schedule to apply if a deposit at `now` would be the first one.
    ///
    /// # Errors
    ///
    /// Propagates schedule computation errors.
    pub fn pending_schedule(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Option<InterestSchedule>, LedgerError> {
        if self.has_deposited() {
            return Ok(None);
        }
        InterestSchedule::starting_at(&self.account_type, now).map(Some)
    }

    pub(crate) fn start_schedule(&mut self, schedule: InterestSchedule) {
        self.initial_deposit_date = Some(schedule.initial_deposit_date);
        self.interest_start_date = Some(schedule.interest_start_date);
    }
}

/// Columns of an account row changed by an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountChanges {
    /// New balance.
    pub balance: Option<Decimal>,
    /// Newly set initial deposit date.
    pub initial_deposit_date: Option<DateTime<Utc>>,
    /// Newly set interest start date.
    pub interest_start_date: Option<DateTime<Utc>>,
}

impl AccountChanges {
    /// Changes that only move the balance.
    #[must_use]
    pub const fn balance(balance: Decimal) -> Self {
        Self {
            balance: Some(balance),
            initial_deposit_date: None,
            interest_start_date: None,
        }
    }

    /// Adds the interest schedule to the change set.
    #[must_use]
    pub fn with_schedule(mut self, schedule: InterestSchedule) -> Self {
        self.initial_deposit_date = Some(schedule.initial_deposit_date);
        self.interest_start_date = Some(schedule.interest_start_date);
        self
    }
}
