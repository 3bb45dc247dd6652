//! One-time code error types.

use thiserror::Error;

/// Errors that can occur while verifying a one-time code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OtpError {
    /// Submitted code is not exactly four ASCII digits.
    #[error("OTP must be exactly 4 digits")]
    Malformed,

    /// No active challenge for the account.
    #[error("No active OTP for this account. Request a new one")]
    NotIssued,

    /// The challenge expired; it has been cleared.
    #[error("OTP has expired. Request a new one")]
    Expired,

    /// Wrong code.
    #[error("Invalid OTP, {attempts_left} attempt(s) left")]
    Mismatch {
        /// Attempts remaining before the challenge is burnt.
        attempts_left: i16,
    },

    /// The last attempt was spent on a wrong code.
    #[error("Too many invalid attempts. Request a new OTP")]
    AttemptsExhausted,
}

impl OtpError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Malformed => "invalid_otp_format",
            Self::NotIssued => "otp_not_issued",
            Self::Expired => "otp_expired",
            Self::Mismatch { .. } => "otp_mismatch",
            Self::AttemptsExhausted => "otp_attempts_exhausted",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::Malformed | Self::NotIssued => 400,
            Self::Expired | Self::Mismatch { .. } => 401,
            Self::AttemptsExhausted => 403,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_statuses() {
        assert_eq!(OtpError::Malformed.http_status_code(), 400);
        assert_eq!(OtpError::NotIssued.error_code(), "otp_not_issued");
        assert_eq!(OtpError::Expired.http_status_code(), 401);
        assert_eq!(
            OtpError::Mismatch { attempts_left: 2 }.to_string(),
            "Invalid OTP, 2 attempt(s) left"
        );
        assert_eq!(OtpError::AttemptsExhausted.http_status_code(), 403);
    }
}
