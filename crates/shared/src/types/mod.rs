//! Common types used across the application.

pub mod money;

pub use money::{MONEY_SCALE, MoneyError, at_money_scale, format_amount, parse_amount};
