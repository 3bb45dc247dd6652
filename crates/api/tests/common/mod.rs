//! Test harness: router over an in-memory database.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{Value, json};
use tower::ServiceExt;

use ledgerbank_api::{AppState, DEFAULT_REQUEST_TIMEOUT, create_router};
use ledgerbank_db::migration::{Migrator, MigratorTrait};
use ledgerbank_shared::{BankingConfig, EmailError, JwtConfig, JwtService, Notifier};

/// A mail that would have been sent.
#[derive(Debug, Clone)]
pub struct SentMail {
    pub destination: String,
    pub subject: String,
    pub body: String,
}

/// Notifier that keeps messages in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<SentMail>>,
}

impl RecordingNotifier {
    pub fn last(&self) -> Option<SentMail> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, destination: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push(SentMail {
            destination: destination.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

/// Notifier whose relay is always down.
#[derive(Debug, Default)]
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _: &str, _: &str, _: &str) -> Result<(), EmailError> {
        Err(EmailError::SendError("relay unreachable".to_string()))
    }
}

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
}

pub async fn spawn_app(notifier: Arc<dyn Notifier>) -> TestApp {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("run migrations");

    let state = AppState {
        db: Arc::new(db.clone()),
        jwt_service: Arc::new(JwtService::new(JwtConfig::default())),
        notifier,
        banking: Arc::new(BankingConfig::default()),
        request_timeout: DEFAULT_REQUEST_TIMEOUT,
    };

    TestApp {
        router: create_router(state),
        db,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn register(&self, email: &str, account_type: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(registration(email, account_type)),
        )
        .await
    }

    /// Registers and logs in, returning `(access_token, refresh_token)`.
    pub async fn customer(&self, email: &str) -> (String, String) {
        let (status, _) = self.register(email, "Savings").await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .request(
                Method::POST,
                "/api/v1/auth/login",
                None,
                Some(json!({ "email": email, "password": "s3cretpass" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        (
            body["access_token"].as_str().unwrap().to_string(),
            body["refresh_token"].as_str().unwrap().to_string(),
        )
    }
}

pub fn registration(email: &str, account_type: &str) -> Value {
    json!({
        "email": email,
        "password": "s3cretpass",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "account_type": account_type,
        "gender": "female",
        "birth_date": "1990-12-10",
        "street_address": "12 Analytical Row",
        "city": "London",
        "postal_code": 10001,
        "country": "UK"
    })
}
