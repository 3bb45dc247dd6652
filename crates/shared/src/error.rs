//! Edge failures that are not banking rules: mail, tokens, configuration.

use thiserror::Error;

use crate::email::EmailError;
use crate::jwt::JwtError;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Infrastructure and credential errors raised around the banking core.
///
/// Ledger, OTP and registration refusals have their own enums in
/// `ledgerbank-core`; this one covers what sits outside them.
#[derive(Debug, Error)]
pub enum AppError {
    /// The mail relay could not deliver a message.
    #[error("Notification failed: {0}")]
    Notification(#[from] EmailError),

    /// A token was rejected, or could not be minted.
    #[error("Token rejected: {0}")]
    Token(#[from] JwtError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Notification(_) => 502,
            Self::Token(JwtError::EncodingError(_)) | Self::Config(_) | Self::Internal(_) => 500,
            Self::Token(_) => 401,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Notification(_) => "external_service_error",
            Self::Token(JwtError::Expired) => "token_expired",
            Self::Token(JwtError::EncodingError(_)) | Self::Internal(_) => "internal_error",
            Self::Token(_) => "invalid_token",
            Self::Config(_) => "configuration_error",
        }
    }

    /// Returns true when the message is safe to show to the caller.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mail_failure_is_bad_gateway() {
        let err = AppError::from(EmailError::SendError("relay down".into()));
        assert_eq!(err.status_code(), 502);
        assert_eq!(err.error_code(), "external_service_error");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_rejected_tokens_are_unauthorized() {
        let expired = AppError::from(JwtError::Expired);
        assert_eq!(expired.status_code(), 401);
        assert_eq!(expired.error_code(), "token_expired");

        let wrong = AppError::from(JwtError::WrongKind);
        assert_eq!(wrong.error_code(), "invalid_token");
        assert!(wrong.is_client_error());
    }

    #[test]
    fn test_minting_failure_is_internal() {
        let err = AppError::from(JwtError::EncodingError("bad key".into()));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "internal_error");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::from(JwtError::Expired).to_string(),
            "Token rejected: token has expired"
        );
        assert_eq!(
            AppError::Internal("msg".into()).to_string(),
            "Internal error: msg"
        );
    }
}
