//! Outgoing notifications.
//!
//! `Notifier` is the seam the OTP flow talks to. `EmailService` delivers
//! over SMTP with `lettre`; `LogNotifier` writes the message to the log
//! for local development when no relay is configured.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor, message::header::ContentType,
    transport::smtp::authentication::Credentials,
};
use thiserror::Error;
use tracing::info;

use crate::config::EmailConfig;

/// Subject line of one-time code messages.
pub const OTP_SUBJECT: &str = "OTP";

/// Body of a one-time code message.
#[must_use]
pub fn otp_body(code: &str) -> String {
    format!("Your OTP is {code}")
}

/// Email service errors.
#[derive(Debug, Error)]
pub enum EmailError {
    /// Failed to build email message.
    #[error("Failed to build email: {0}")]
    BuildError(String),
    /// Failed to send email.
    #[error("Failed to send email: {0}")]
    SendError(String),
    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// Sends a short message to a destination address.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers `body` under `subject` to `destination`.
    async fn send(&self, destination: &str, subject: &str, body: &str) -> Result<(), EmailError>;
}

/// SMTP-backed notifier.
#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    /// Creates a new email service.
    #[must_use]
    pub const fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn create_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
        let creds = Credentials::new(
            self.config.smtp_username.clone(),
            self.config.smtp_password.clone(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)
            .map_err(|e| EmailError::SendError(e.to_string()))?
            .port(self.config.smtp_port)
            .credentials(creds)
            .build();
        Ok(transport)
    }

    /// Builds the message without sending it.
    fn build_message(&self, to_email: &str, subject: &str, body: &str) -> Result<Message, EmailError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        Message::builder()
            .from(
                from.parse()
                    .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| EmailError::BuildError(e.to_string()))
    }
}

#[async_trait]
impl Notifier for EmailService {
    async fn send(&self, destination: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        let email = self.build_message(destination, subject, body)?;
        let transport = self.create_transport()?;
        transport
            .send(email)
            .await
            .map_err(|e| EmailError::SendError(e.to_string()))?;

        info!(to = %destination, subject = %subject, "Email dispatched");
        Ok(())
    }
}

/// Notifier that only logs; used when SMTP is disabled.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, destination: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        info!(to = %destination, subject = %subject, body = %body, "Email delivery disabled, message logged");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_body() {
        assert_eq!(otp_body("0427"), "Your OTP is 0427");
    }

    #[test]
    fn test_build_message_accepts_valid_addresses() {
        let service = EmailService::new(EmailConfig::default());
        let message = service.build_message("ada@example.com", OTP_SUBJECT, &otp_body("1234"));
        assert!(message.is_ok());
    }

    #[test]
    fn test_build_message_rejects_bad_recipient() {
        let service = EmailService::new(EmailConfig::default());
        let message = service.build_message("not-an-address", OTP_SUBJECT, "x");
        assert!(matches!(message, Err(EmailError::InvalidAddress(_))));
    }

    #[tokio::test]
    async fn test_log_notifier_always_succeeds() {
        let notifier = LogNotifier;
        assert!(notifier.send("ada@example.com", OTP_SUBJECT, "hi").await.is_ok());
    }
}
