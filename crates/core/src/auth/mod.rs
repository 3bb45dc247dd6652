//! Authentication and registration rules.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Registration input validation
//! - Account number allocation

mod password;
mod registration;

pub use password::{MIN_PASSWORD_LENGTH, PasswordError, hash_password, verify_password};
pub use registration::{
    NewAddress, NewCustomer, RegistrationError, next_account_number, registration_message,
    validate_registration,
};
