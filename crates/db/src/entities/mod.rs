//! `SeaORM` entity definitions.

pub mod prelude;

pub mod account_types;
pub mod accounts;
pub mod addresses;
pub mod otp_challenges;
pub mod sea_orm_active_enums;
pub mod sessions;
pub mod transactions;
pub mod users;
