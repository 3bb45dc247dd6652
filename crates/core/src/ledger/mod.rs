//! Single-currency balance ledger.
//!
//! This module implements the money-movement core:
//! - Account state, limits and the first-deposit interest schedule
//! - Immutable transaction records
//! - Deposit, withdrawal and transfer rules
//! - Transfer target resolution
//! - Ledger service combining the above

pub mod account;
pub mod error;
pub mod resolver;
pub mod service;
pub mod transaction;
pub mod validation;

#[cfg(test)]
mod ledger_props;

pub use account::{AccountChanges, AccountType, InterestSchedule, LedgerAccount};
pub use error::LedgerError;
pub use resolver::{RESOLVE_FETCH_LIMIT, resolve_unique};
pub use service::{LedgerService, Posting, TransferPosting};
pub use transaction::{NewTransaction, TransactionType};
pub use validation::{OperationLimits, validate_deposit, validate_transfer, validate_withdrawal};
