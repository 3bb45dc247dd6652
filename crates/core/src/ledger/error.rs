//! Ledger error types.
//!
//! Rejections carry the offending bound or balance and their `Display`
//! text is the message shown to the account holder unchanged.

use rust_decimal::Decimal;
use thiserror::Error;

use ledgerbank_shared::types::MoneyError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Input Errors ==========
    /// The amount could not be read.
    #[error("Enter a valid amount with at most 2 decimal places")]
    InvalidAmount(#[from] MoneyError),

    // ========== Deposit Rules ==========
    /// Deposit below the configured floor.
    #[error("You need to deposit at least {minimum} $")]
    BelowMinimumDeposit {
        /// Configured minimum deposit.
        minimum: Decimal,
    },

    // ========== Withdrawal Rules ==========
    /// Withdrawal below the configured floor.
    #[error("You can withdraw at least {minimum} $")]
    BelowMinimumWithdrawal {
        /// Configured minimum withdrawal.
        minimum: Decimal,
    },

    /// Withdrawal above the account type's single-withdrawal cap.
    #[error("You can withdraw at most {maximum} $")]
    AboveMaximumWithdrawal {
        /// Cap of the account type.
        maximum: Decimal,
    },

    /// Withdrawal larger than the balance.
    #[error(
        "You have {balance} $ in your account. You can not withdraw more than your account balance"
    )]
    InsufficientFundsForWithdrawal {
        /// Current balance.
        balance: Decimal,
    },

    // ========== Transfer Rules ==========
    /// Negative transfer amount.
    #[error("Transfer amount cannot be negative.")]
    NegativeTransferAmount,

    /// Transfer larger than the balance.
    #[error(
        "You have {balance} $ in your account. You can not transfer more than your account balance"
    )]
    InsufficientFundsForTransfer {
        /// Current balance.
        balance: Decimal,
    },

    /// Source and destination are the same account.
    #[error("You can not transfer money to your own account")]
    SelfTransfer,

    // ========== Resolution Errors ==========
    /// No account carries the requested number.
    #[error("No account found with account number {0}")]
    AccountNotFound(i64),

    /// More than one account carries the requested number.
    #[error("Account number {0} matches more than one account")]
    AmbiguousAccountNumber(i64),

    // ========== Reference Data / Arithmetic ==========
    /// Account type frequency cannot produce an interest interval.
    #[error("Interest must be calculated between 1 and 12 times per year, got {0}")]
    InvalidInterestFrequency(i16),

    /// Decimal arithmetic left the representable range.
    #[error("Balance arithmetic overflowed")]
    BalanceOverflow,
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "invalid_amount",
            Self::BelowMinimumDeposit { .. } => "below_minimum_deposit",
            Self::BelowMinimumWithdrawal { .. } => "below_minimum_withdrawal",
            Self::AboveMaximumWithdrawal { .. } => "above_maximum_withdrawal",
            Self::InsufficientFundsForWithdrawal { .. }
            | Self::InsufficientFundsForTransfer { .. } => "insufficient_funds",
            Self::NegativeTransferAmount => "negative_transfer_amount",
            Self::SelfTransfer => "self_transfer",
            Self::AccountNotFound(_) => "account_not_found",
            Self::AmbiguousAccountNumber(_) => "ambiguous_account_number",
            Self::InvalidInterestFrequency(_) => "invalid_interest_frequency",
            Self::BalanceOverflow => "balance_overflow",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - the operation was refused before any mutation
            Self::InvalidAmount(_)
            | Self::BelowMinimumDeposit { .. }
            | Self::BelowMinimumWithdrawal { .. }
            | Self::AboveMaximumWithdrawal { .. }
            | Self::InsufficientFundsForWithdrawal { .. }
            | Self::NegativeTransferAmount
            | Self::InsufficientFundsForTransfer { .. }
            | Self::SelfTransfer => 400,

            // 404 Not Found
            Self::AccountNotFound(_) => 404,

            // 409 Conflict - data violates the uniqueness the lookup relies on
            Self::AmbiguousAccountNumber(_) => 409,

            // 500 Internal Server Error
            Self::InvalidInterestFrequency(_) | Self::BalanceOverflow => 500,
        }
    }
}
