//! Property-based tests for `OtpService`.
//!
//! - The issued code verifies once, before expiry
//! - Any other four-digit code is refused

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use super::{OtpChallenge, OtpCode, OtpError, OtpService};

fn four_digits() -> impl Strategy<Value = String> {
    (0u16..10_000).prop_map(|v| format!("{v:04}"))
}

proptest! {
    #[test]
    fn prop_issued_code_verifies_once(digits in four_digits(), elapsed in 0i64..300) {
        let owner = Uuid::new_v4();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let code = OtpCode::parse(&digits).unwrap();
        let challenge = OtpChallenge::Issued(OtpService::issue(owner, &code, now, 300));

        let at = now + Duration::seconds(elapsed);
        let first = OtpService::verify(challenge, owner, &digits, at);
        prop_assert_eq!(first.result, Ok(()));

        let second = OtpService::verify(first.next, owner, &digits, at);
        prop_assert_eq!(second.result, Err(OtpError::NotIssued));
    }

    #[test]
    fn prop_other_codes_refused(issued in four_digits(), submitted in four_digits()) {
        prop_assume!(issued != submitted);
        let owner = Uuid::new_v4();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let code = OtpCode::parse(&issued).unwrap();
        let challenge = OtpChallenge::Issued(OtpService::issue(owner, &code, now, 300));

        let outcome = OtpService::verify(challenge, owner, &submitted, now);
        let is_mismatch = matches!(outcome.result, Err(OtpError::Mismatch { .. }));
        prop_assert!(is_mismatch);
    }

    #[test]
    fn prop_expired_code_refused(digits in four_digits(), overdue in 0i64..10_000) {
        let owner = Uuid::new_v4();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let code = OtpCode::parse(&digits).unwrap();
        let challenge = OtpChallenge::Issued(OtpService::issue(owner, &code, now, 300));

        let outcome =
            OtpService::verify(challenge, owner, &digits, now + Duration::seconds(300 + overdue));
        prop_assert_eq!(outcome.result, Err(OtpError::Expired));
        prop_assert_eq!(outcome.next, OtpChallenge::Idle);
    }
}
