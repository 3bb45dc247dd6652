//! Four-digit one-time codes.

use std::fmt;

use rand::Rng;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::error::OtpError;

/// Number of digits in a code.
pub const OTP_LENGTH: usize = 4;

/// A well-formed one-time code (exactly four ASCII digits).
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Parses a submitted code.
    ///
    /// # Errors
    ///
    /// Returns `OtpError::Malformed` unless the input is four ASCII digits.
    pub fn parse(input: &str) -> Result<Self, OtpError> {
        let input = input.trim();
        if input.len() != OTP_LENGTH || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OtpError::Malformed);
        }
        Ok(Self(input.to_string()))
    }

    /// Draws a fresh code from the thread-local generator.
    #[must_use]
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::rng())
    }

    /// Draws a fresh code from `rng`; leading zeros are kept.
    #[must_use]
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let value: u16 = rng.random_range(0..10_000);
        Self(format!("{value:04}"))
    }

    /// The digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex SHA-256 of the code bound to its owner; the form that is stored.
    #[must_use]
    pub fn digest(&self, owner: Uuid) -> String {
        let mut hasher = Sha256::new();
        hasher.update(owner.as_bytes());
        hasher.update(self.0.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

// Never print the digits through Debug.
impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode(****)")
    }
}
