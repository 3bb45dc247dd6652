//! One-time code step-up authentication.
//!
//! This module provides:
//! - Four-digit code generation, parsing and hashing
//! - The per-account challenge state machine
//! - Error types for verification

mod challenge;
mod code;
mod error;

#[cfg(test)]
mod otp_props;

pub use challenge::{IssuedChallenge, MAX_ATTEMPTS, OtpChallenge, OtpService, Verification};
pub use code::{OTP_LENGTH, OtpCode};
pub use error::OtpError;
