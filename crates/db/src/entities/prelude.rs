//! Entity re-exports.

pub use super::account_types::Entity as AccountTypes;
pub use super::accounts::Entity as Accounts;
pub use super::addresses::Entity as Addresses;
pub use super::otp_challenges::Entity as OtpChallenges;
pub use super::sessions::Entity as Sessions;
pub use super::transactions::Entity as Transactions;
pub use super::users::Entity as Users;
