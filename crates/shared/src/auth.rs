//! Authentication types for JWT and tokens.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Distinguishes short-lived access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Grants access to protected routes.
    Access,
    /// Can only be exchanged for a new access token.
    Refresh,
}

/// JWT claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Bank account owned by the subject.
    pub acct: Uuid,
    /// Token kind.
    pub typ: TokenKind,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
    /// Unique token id, so two tokens minted in the same second differ.
    pub jti: Uuid,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, account_id: Uuid, typ: TokenKind, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: user_id,
            acct: account_id,
            typ,
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the account ID from claims.
    #[must_use]
    pub const fn account_id(&self) -> Uuid {
        self.acct
    }

    /// Returns true for access tokens.
    #[must_use]
    pub fn is_access(&self) -> bool {
        self.typ == TokenKind::Access
    }
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// User email.
    pub email: String,
    /// User password.
    pub password: String,
}

/// Registration request payload.
///
/// Carries the user, the postal address and the bank account details
/// collected on the sign-up form.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// User email.
    pub email: String,
    /// User password.
    pub password: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Name of the account type to open (e.g. "Savings").
    pub account_type: String,
    /// `male` or `female`.
    pub gender: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Street line of the address.
    pub street_address: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub postal_code: i32,
    /// Country.
    pub country: String,
}

/// Refresh request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    /// Previously issued refresh token.
    pub refresh_token: String,
}

/// Login response payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Authenticated user info.
    pub user: UserInfo,
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Token expiration in seconds.
    pub expires_in: i64,
}

/// User info returned in auth responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    /// User ID.
    pub id: Uuid,
    /// User email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Bank account number.
    pub account_no: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    #[test]
    fn test_claims_new_sets_fields() {
        let user_id = Uuid::new_v4();
        let account_id = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::hours(1);
        let before = Utc::now().timestamp();

        let claims = Claims::new(user_id, account_id, TokenKind::Access, expires_at);

        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.account_id(), account_id);
        assert!(claims.is_access());
        assert!(claims.iat >= before);
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_claims_get_distinct_token_ids() {
        let user_id = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::days(1);

        let first = Claims::new(user_id, user_id, TokenKind::Refresh, expires_at);
        let second = Claims::new(user_id, user_id, TokenKind::Refresh, expires_at);

        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_refresh_claims_are_not_access() {
        let claims = Claims::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            TokenKind::Refresh,
            Utc::now() + Duration::days(1),
        );
        assert!(!claims.is_access());
    }

    #[test]
    fn test_register_request_deserializes() {
        let request: RegisterRequest = serde_json::from_value(json!({
            "email": "ada@example.com",
            "password": "s3cretpass",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "account_type": "Savings",
            "gender": "female",
            "birth_date": "1990-12-10",
            "street_address": "12 Analytical Row",
            "city": "London",
            "postal_code": 10001,
            "country": "UK"
        }))
        .unwrap();

        assert_eq!(request.birth_date, NaiveDate::from_ymd_opt(1990, 12, 10).unwrap());
        assert_eq!(request.postal_code, 10001);
    }
}
