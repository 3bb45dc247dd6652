//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::AppResult;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Outgoing mail configuration.
    #[serde(default)]
    pub email: EmailConfig,
    /// Banking limits and OTP settings.
    #[serde(default)]
    pub banking: BankingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT settings as they appear in configuration files.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
    /// Refresh token expiration in seconds.
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

fn default_refresh_token_expiry() -> u64 {
    604_800 // 7 days
}

/// SMTP configuration for the mail notifier.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// When false, one-time codes are written to the log instead of mailed.
    #[serde(default)]
    pub enabled: bool,
    /// SMTP relay host.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// SMTP relay port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default)]
    pub smtp_username: String,
    /// SMTP password.
    #[serde(default)]
    pub smtp_password: String,
    /// Sender address.
    #[serde(default = "default_from_email")]
    pub from_email: String,
    /// Sender display name.
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    1025
}

fn default_from_email() -> String {
    "no-reply@ledgerbank.dev".to_string()
}

fn default_from_name() -> String {
    "Ledgerbank".to_string()
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: default_from_email(),
            from_name: default_from_name(),
        }
    }
}

/// Banking rules that are configured rather than stored per account type.
#[derive(Debug, Clone, Deserialize)]
pub struct BankingConfig {
    /// Smallest accepted deposit.
    #[serde(default = "default_minimum_deposit")]
    pub minimum_deposit_amount: Decimal,
    /// Smallest accepted withdrawal.
    #[serde(default = "default_minimum_withdrawal")]
    pub minimum_withdrawal_amount: Decimal,
    /// First account number handed out at registration.
    #[serde(default = "default_account_number_start")]
    pub account_number_start: i64,
    /// Lifetime of an issued one-time code, in seconds.
    #[serde(default = "default_otp_ttl")]
    pub otp_ttl_secs: i64,
}

fn default_minimum_deposit() -> Decimal {
    Decimal::TEN
}

fn default_minimum_withdrawal() -> Decimal {
    Decimal::TEN
}

fn default_account_number_start() -> i64 {
    10_000_000
}

fn default_otp_ttl() -> i64 {
    300
}

impl Default for BankingConfig {
    fn default() -> Self {
        Self {
            minimum_deposit_amount: default_minimum_deposit(),
            minimum_withdrawal_amount: default_minimum_withdrawal(),
            account_number_start: default_account_number_start(),
            otp_ttl_secs: default_otp_ttl(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a source is unreadable or a required
    /// key is missing.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LEDGERBANK").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_banking_defaults() {
        let banking = BankingConfig::default();
        assert_eq!(banking.minimum_deposit_amount, dec!(10));
        assert_eq!(banking.minimum_withdrawal_amount, dec!(10));
        assert_eq!(banking.account_number_start, 10_000_000);
        assert_eq!(banking.otp_ttl_secs, 300);
    }

    #[test]
    fn test_email_defaults_log_only() {
        let email = EmailConfig::default();
        assert!(!email.enabled);
        assert_eq!(email.smtp_host, "localhost");
        assert_eq!(email.smtp_port, 1025);
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("LEDGERBANK__DATABASE__URL", Some("sqlite::memory:")),
                ("LEDGERBANK__JWT__SECRET", Some("env-secret")),
                ("LEDGERBANK__SERVER__PORT", Some("9090")),
                ("LEDGERBANK__BANKING__MINIMUM_DEPOSIT_AMOUNT", Some("25.50")),
                ("RUN_MODE", Some("config-test-nonexistent")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "sqlite::memory:");
                assert_eq!(config.jwt.secret, "env-secret");
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.banking.minimum_deposit_amount, dec!(25.50));
                assert_eq!(config.banking.minimum_withdrawal_amount, dec!(10));
                assert_eq!(config.jwt.access_token_expiry_secs, 900);
            },
        );
    }
}
