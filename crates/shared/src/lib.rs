//! Shared types, errors, and configuration for Ledgerbank.
//!
//! This crate provides common pieces used across all other crates:
//! - Money parsing and display helpers (fixed-point, two decimals)
//! - Application-wide error types
//! - Configuration management
//! - JWT handling and auth request/response types
//! - The `Notifier` seam and its SMTP implementation

pub mod auth;
pub mod config;
pub mod email;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::{Claims, TokenKind};
pub use config::{AppConfig, BankingConfig, EmailConfig};
pub use email::{EmailError, EmailService, LogNotifier, Notifier, OTP_SUBJECT, otp_body};
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
