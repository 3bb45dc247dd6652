//! Business rules for deposits, withdrawals and transfers.
//!
//! Each validator returns the accepted amount or the first rule that
//! failed. Nothing here mutates state.

use rust_decimal::Decimal;

use ledgerbank_shared::BankingConfig;

use super::account::AccountType;
use super::error::LedgerError;

/// Configured floors for money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationLimits {
    /// Smallest accepted deposit.
    pub minimum_deposit_amount: Decimal,
    /// Smallest accepted withdrawal.
    pub minimum_withdrawal_amount: Decimal,
}

impl Default for OperationLimits {
    fn default() -> Self {
        Self::from(&BankingConfig::default())
    }
}

impl From<&BankingConfig> for OperationLimits {
    fn from(config: &BankingConfig) -> Self {
        Self {
            minimum_deposit_amount: config.minimum_deposit_amount,
            minimum_withdrawal_amount: config.minimum_withdrawal_amount,
        }
    }
}

/// Validates a deposit amount.
///
/// # Errors
///
/// Returns `LedgerError::BelowMinimumDeposit` below the floor.
pub fn validate_deposit(amount: Decimal, limits: &OperationLimits) -> Result<Decimal, LedgerError> {
    if amount < limits.minimum_deposit_amount {
        return Err(LedgerError::BelowMinimumDeposit {
            minimum: limits.minimum_deposit_amount,
        });
    }
    Ok(amount)
}

/// Validates a withdrawal amount.
///
/// Rules are checked in order: floor, account type cap, balance.
///
/// # Errors
///
/// Returns the first failing rule.
pub fn validate_withdrawal(
    amount: Decimal,
    balance: Decimal,
    account_type: &AccountType,
    limits: &OperationLimits,
) -> Result<Decimal, LedgerError> {
    if amount < limits.minimum_withdrawal_amount {
        return Err(LedgerError::BelowMinimumWithdrawal {
            minimum: limits.minimum_withdrawal_amount,
        });
    }
    if amount > account_type.maximum_withdrawal_amount {
        return Err(LedgerError::AboveMaximumWithdrawal {
            maximum: account_type.maximum_withdrawal_amount,
        });
    }
    if amount > balance {
        return Err(LedgerError::InsufficientFundsForWithdrawal { balance });
    }
    Ok(amount)
}

/// Validates a transfer amount. There is no minimum; zero is accepted.
///
/// # Errors
///
/// Returns `LedgerError::NegativeTransferAmount` or
/// `LedgerError::InsufficientFundsForTransfer`.
pub fn validate_transfer(amount: Decimal, balance: Decimal) -> Result<Decimal, LedgerError> {
    if amount < Decimal::ZERO {
        return Err(LedgerError::NegativeTransferAmount);
    }
    if amount > balance {
        return Err(LedgerError::InsufficientFundsForTransfer { balance });
    }
    Ok(amount)
}
