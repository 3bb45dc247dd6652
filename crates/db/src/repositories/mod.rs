//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod banking;
pub mod otp;
pub mod session;
pub mod transaction;
pub mod user;

pub use account::{AccountError, AccountRepository};
pub use banking::{BankingError, BankingRepository, OperationOutcome, TransferOutcome};
pub use otp::{OtpRepository, OtpStoreError};
pub use session::SessionRepository;
pub use transaction::TransactionRepository;
pub use user::{RegisterError, Registered, UserRepository};
