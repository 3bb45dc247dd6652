//! End-to-end tests through the router.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use chrono::Utc;
use serde_json::json;

use common::{FailingNotifier, RecordingNotifier, registration, spawn_app};

const DEPOSIT: &str = "/api/v1/transactions/deposit";
const WITHDRAW: &str = "/api/v1/transactions/withdraw";
const TRANSFER: &str = "/api/v1/transactions/transfer";

#[tokio::test]
async fn test_health_reports_database() {
    let app = spawn_app(Arc::new(RecordingNotifier::default())).await;

    let (status, body) = app.request(Method::GET, "/api/v1/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn test_register_returns_account_number() {
    let app = spawn_app(Arc::new(RecordingNotifier::default())).await;

    let (status, body) = app.register("ada@example.com", "Savings").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body["message"],
        "Thank You For Creating A Bank Account. Your Account Number is 10000000."
    );
    assert_eq!(body["user"]["account_no"], 10_000_000);
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_rejections() {
    let app = spawn_app(Arc::new(RecordingNotifier::default())).await;
    app.register("ada@example.com", "Savings").await;

    let (status, body) = app.register("ADA@example.com", "Current").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "email_taken");

    let mut bad_gender = registration("grace@example.com", "Savings");
    bad_gender["gender"] = json!("other");
    let (status, body) = app
        .request(Method::POST, "/api/v1/auth/register", None, Some(bad_gender))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_gender");

    let (status, body) = app.register("grace@example.com", "Platinum").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown_account_type");
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = spawn_app(Arc::new(RecordingNotifier::default())).await;
    app.register("ada@example.com", "Savings").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": "not-the-one" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_credentials");
}

#[tokio::test]
async fn test_protected_routes_need_access_token() {
    let app = spawn_app(Arc::new(RecordingNotifier::default())).await;
    let (_, refresh) = app.customer("ada@example.com").await;

    let (status, body) = app.request(Method::GET, "/api/v1/account", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing_token");

    let (status, body) = app
        .request(Method::GET, "/api/v1/account", Some(&refresh), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn test_refresh_issues_working_access_token() {
    let app = spawn_app(Arc::new(RecordingNotifier::default())).await;
    let (access, refresh) = app.customer("ada@example.com").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/refresh",
            None,
            Some(json!({ "refresh_token": refresh })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let renewed = body["access_token"].as_str().unwrap().to_string();

    let (status, body) = app
        .request(Method::GET, "/api/v1/account", Some(&renewed), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["account_no"], 10_000_000);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/auth/refresh",
            None,
            Some(json!({ "refresh_token": access })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_ends_the_session() {
    let app = spawn_app(Arc::new(RecordingNotifier::default())).await;
    let (_, refresh) = app.customer("ada@example.com").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/logout",
            None,
            Some(json!({ "refresh_token": refresh })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "You have been logged out");

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/refresh",
            None,
            Some(json!({ "refresh_token": refresh })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/auth/logout",
            None,
            Some(json!({ "refresh_token": refresh })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_keeps_other_logins() {
    let app = spawn_app(Arc::new(RecordingNotifier::default())).await;
    let (_, first) = app.customer("ada@example.com").await;
    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": "s3cretpass" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let second = body["refresh_token"].as_str().unwrap().to_string();

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/auth/logout",
            None,
            Some(json!({ "refresh_token": first })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/auth/refresh",
            None,
            Some(json!({ "refresh_token": second })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_body_is_a_json_bad_request() {
    let app = spawn_app(Arc::new(RecordingNotifier::default())).await;
    let (token, _) = app.customer("ada@example.com").await;

    let (status, body) = app
        .request(Method::POST, DEPOSIT, Some(&token), Some(json!({ "amt": "20" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
    assert!(body["message"].as_str().unwrap().contains("amount"));

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "ada@example.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn test_deposit_and_withdraw() {
    let app = spawn_app(Arc::new(RecordingNotifier::default())).await;
    let (token, _) = app.customer("ada@example.com").await;

    let (status, body) = app
        .request(Method::POST, DEPOSIT, Some(&token), Some(json!({ "amount": "100.00" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "100.00$ was deposited to your account successfully"
    );
    assert_eq!(body["balance"], "100.00");
    assert_eq!(body["transaction"]["transaction_type"], "deposit");

    let (status, body) = app
        .request(Method::POST, DEPOSIT, Some(&token), Some(json!({ "amount": 5 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "below_minimum_deposit");

    let (status, body) = app
        .request(Method::POST, WITHDRAW, Some(&token), Some(json!({ "amount": 5 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "You can withdraw at least 10 $");

    let (status, body) = app
        .request(Method::POST, WITHDRAW, Some(&token), Some(json!({ "amount": "150" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .ends_with("You can not withdraw more than your account balance")
    );

    let (status, body) = app
        .request(Method::POST, WITHDRAW, Some(&token), Some(json!({ "amount": "50" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully withdrawn 50.00$ from your account");
    assert_eq!(body["balance"], "50.00");
}

#[tokio::test]
async fn test_amount_with_three_decimals_is_rejected() {
    let app = spawn_app(Arc::new(RecordingNotifier::default())).await;
    let (token, _) = app.customer("ada@example.com").await;

    let (status, body) = app
        .request(Method::POST, DEPOSIT, Some(&token), Some(json!({ "amount": "10.005" })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_amount");
}

#[tokio::test]
async fn test_transfer_between_customers() {
    let app = spawn_app(Arc::new(RecordingNotifier::default())).await;
    let (ada, _) = app.customer("ada@example.com").await;
    let (bob, _) = app.customer("bob@example.com").await;
    app.request(Method::POST, DEPOSIT, Some(&ada), Some(json!({ "amount": "100" })))
        .await;

    let (status, body) = app
        .request(
            Method::POST,
            TRANSFER,
            Some(&ada),
            Some(json!({ "account_no": 10_000_001, "amount": "40" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Successfully transfer 40.00$ from your account to target account :10000001"
    );
    assert_eq!(body["balance"], "60.00");
    assert_eq!(body["transaction"]["counterparty_account_no"], 10_000_001);

    let (_, body) = app.request(Method::GET, "/api/v1/account", Some(&bob), None).await;
    assert_eq!(body["balance"], "40.00");

    let (status, body) = app
        .request(
            Method::POST,
            TRANSFER,
            Some(&ada),
            Some(json!({ "account_no": 99_999_999, "amount": "1" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "account_not_found");

    let (status, body) = app
        .request(
            Method::POST,
            TRANSFER,
            Some(&ada),
            Some(json!({ "account_no": 10_000_000, "amount": "1" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "self_transfer");
}

#[tokio::test]
async fn test_transaction_history_and_date_range() {
    let app = spawn_app(Arc::new(RecordingNotifier::default())).await;
    let (token, _) = app.customer("ada@example.com").await;
    app.request(Method::POST, DEPOSIT, Some(&token), Some(json!({ "amount": "20" })))
        .await;
    app.request(Method::POST, DEPOSIT, Some(&token), Some(json!({ "amount": "30" })))
        .await;

    let (status, body) = app
        .request(Method::GET, "/api/v1/transactions", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["transactions"][0]["amount"], "30.00");

    let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let uri = format!("/api/v1/transactions?daterange={today}%20-%20{today}");
    let (status, body) = app.request(Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);

    let (status, body) = app
        .request(Method::GET, "/api/v1/transactions?daterange=", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);

    let (status, body) = app
        .request(
            Method::GET,
            "/api/v1/transactions?daterange=2020-01-01%20-%202020-01-31",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);

    let (status, body) = app
        .request(
            Method::GET,
            "/api/v1/transactions?daterange=2024-01-01",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please select a date range.");

    let (status, body) = app
        .request(
            Method::GET,
            "/api/v1/transactions?daterange=2024-02-01%20-%202024-01-01",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid date range");
}

#[tokio::test]
async fn test_profile_behind_otp() {
    let notifier = Arc::new(RecordingNotifier::default());
    let app = spawn_app(notifier.clone()).await;
    let (token, _) = app.customer("ada@example.com").await;

    let (status, _) = app
        .request(Method::POST, "/api/v1/profile/otp", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let mail = notifier.last().unwrap();
    assert_eq!(mail.destination, "ada@example.com");
    let code = mail.body.trim_start_matches("Your OTP is ").to_string();
    assert_eq!(code.len(), 4);

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/profile/otp/verify",
            Some(&token),
            Some(json!({ "code": code })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["account_no"], 10_000_000);
    assert_eq!(body["balance"], "0.00");

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/profile/otp/verify",
            Some(&token),
            Some(json!({ "code": code })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "otp_not_issued");
}

#[tokio::test]
async fn test_unsent_otp_is_revoked() {
    let app = spawn_app(Arc::new(FailingNotifier)).await;
    let (token, _) = app.customer("ada@example.com").await;

    let (status, body) = app
        .request(Method::POST, "/api/v1/profile/otp", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "external_service_error");

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/profile/otp/verify",
            Some(&token),
            Some(json!({ "code": "1234" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "otp_not_issued");
}
