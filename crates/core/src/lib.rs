//! Core business logic for Ledgerbank.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Balance mutation, operation rules and transaction records
//! - `otp` - One-time code challenges guarding the profile
//! - `auth` - Password hashing and registration rules
//! - `report` - Transaction report date ranges
//! - `profile` - Read models shown to the account holder

pub mod auth;
pub mod ledger;
pub mod otp;
pub mod profile;
pub mod report;
