//! Read models shown to the account holder.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Biological sex recorded on the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
}

impl Gender {
    /// Parses `male` or `female`, ignoring case.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }

    /// Stored form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Postal address parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Street line.
    pub street_address: String,
    /// City.
    pub city: String,
    /// Country.
    pub country: String,
}

impl Address {
    /// One-line form: `street, city, country`.
    #[must_use]
    pub fn one_line(&self) -> String {
        format!("{}, {}, {}", self.street_address, self.city, self.country)
    }
}

/// Profile revealed after a successful OTP verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    /// Login email.
    pub email: String,
    /// Recorded gender.
    pub gender: String,
    /// Account number.
    pub account_no: i64,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Current balance.
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
    /// Formatted address, empty when none is on file.
    pub address: String,
}

/// Overview of the caller's account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    /// Account number.
    pub account_no: i64,
    /// Account type name.
    pub account_type: String,
    /// Current balance.
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
    /// First deposit date.
    pub initial_deposit_date: Option<DateTime<Utc>>,
    /// Interest start date.
    pub interest_start_date: Option<DateTime<Utc>>,
}
