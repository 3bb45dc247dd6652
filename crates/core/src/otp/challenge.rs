//! Per-account one-time code challenge.
//!
//! ```text
//! Idle --issue--> Issued --correct code--> Consumed
//!                   |  \--expired--------> Idle
//!                   \----last wrong code--> Consumed
//! ```
//!
//! Issuing from any state replaces the current challenge.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::code::OtpCode;
use super::error::OtpError;

/// Wrong submissions tolerated per challenge.
pub const MAX_ATTEMPTS: i16 = 5;

/// An outstanding challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedChallenge {
    /// User the code was sent to.
    pub owner: Uuid,
    /// Stored digest of the code.
    pub code_hash: String,
    /// Moment after which the code is refused.
    pub expires_at: DateTime<Utc>,
    /// Wrong submissions still allowed.
    pub attempts_left: i16,
}

/// State of an account's challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpChallenge {
    /// No challenge.
    Idle,
    /// Waiting for the code.
    Issued(IssuedChallenge),
    /// Used or burnt; needs a new issue.
    Consumed {
        /// When it stopped being usable.
        consumed_at: DateTime<Utc>,
    },
}

/// Outcome of a verification: the state to persist and the verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// State after the attempt.
    pub next: OtpChallenge,
    /// `Ok` when the code was accepted.
    pub result: Result<(), OtpError>,
}

/// Stateless service for challenge transitions.
pub struct OtpService;

impl OtpService {
    /// Issues a challenge for `owner` valid for `ttl_secs` seconds.
    #[must_use]
    pub fn issue(owner: Uuid, code: &OtpCode, now: DateTime<Utc>, ttl_secs: i64) -> IssuedChallenge {
        IssuedChallenge {
            owner,
            code_hash: code.digest(owner),
            expires_at: now + Duration::seconds(ttl_secs),
            attempts_left: MAX_ATTEMPTS,
        }
    }

    /// Checks `submitted` against the challenge of `owner`.
    ///
    /// A malformed submission is refused without spending an attempt.
    #[must_use]
    pub fn verify(
        challenge: OtpChallenge,
        owner: Uuid,
        submitted: &str,
        now: DateTime<Utc>,
    ) -> Verification {
        let code = match OtpCode::parse(submitted) {
            Ok(code) => code,
            Err(e) => {
                return Verification {
                    next: challenge,
                    result: Err(e),
                };
            }
        };

        let issued = match challenge {
            OtpChallenge::Issued(issued) if issued.owner == owner => issued,
            other => {
                return Verification {
                    next: other,
                    result: Err(OtpError::NotIssued),
                };
            }
        };

        if now >= issued.expires_at {
            return Verification {
                next: OtpChallenge::Idle,
                result: Err(OtpError::Expired),
            };
        }

        if code.digest(owner) == issued.code_hash {
            return Verification {
                next: OtpChallenge::Consumed { consumed_at: now },
                result: Ok(()),
            };
        }

        let attempts_left = issued.attempts_left.saturating_sub(1);
        if attempts_left <= 0 {
            return Verification {
                next: OtpChallenge::Consumed { consumed_at: now },
                result: Err(OtpError::AttemptsExhausted),
            };
        }

        Verification {
            next: OtpChallenge::Issued(IssuedChallenge {
                attempts_left,
                ..issued
            }),
            result: Err(OtpError::Mismatch { attempts_left }),
        }
    }
}
