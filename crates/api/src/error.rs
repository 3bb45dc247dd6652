//! Maps domain and repository errors to `{error, message}` responses.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use ledgerbank_core::ledger::LedgerError;
use ledgerbank_core::otp::OtpError;
use ledgerbank_core::report::ReportError;
use ledgerbank_db::repositories::{BankingError, OtpStoreError, RegisterError};
use ledgerbank_shared::AppError;

/// Builds a JSON error response.
pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// JSON body extractor whose rejections keep the `{error, message}` shape.
///
/// A missing field, a wrong type or a body that is not JSON at all is a
/// `400 invalid_request`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_error(
                StatusCode::BAD_REQUEST,
                "invalid_request",
                rejection.body_text(),
            )),
        }
    }
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Generic 500 that hides the cause from the caller.
pub fn internal_error(context: &'static str, cause: &dyn std::fmt::Display) -> Response {
    error!(error = %cause, context, "Request failed");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "An internal error occurred",
    )
}

/// Ledger rule violations keep their message; arithmetic faults become a 500.
pub fn ledger_error_response(e: &LedgerError) -> Response {
    let code = e.http_status_code();
    if code >= 500 {
        return internal_error("ledger", e);
    }
    json_error(status(code), e.error_code(), e.to_string())
}

/// Maps `BankingError`.
pub fn banking_error_response(e: &BankingError) -> Response {
    match e {
        BankingError::Ledger(e) => ledger_error_response(e),
        BankingError::AccountNotFound(_) => json_error(
            StatusCode::NOT_FOUND,
            "account_not_found",
            "Account not found",
        ),
        BankingError::Database(e) => internal_error("banking", e),
    }
}

/// Maps `OtpError`.
pub fn otp_error_response(e: &OtpError) -> Response {
    json_error(status(e.http_status_code()), e.error_code(), e.to_string())
}

/// Maps `OtpStoreError`.
pub fn otp_store_error_response(e: &OtpStoreError) -> Response {
    match e {
        OtpStoreError::Otp(e) => otp_error_response(e),
        OtpStoreError::Database(e) => internal_error("otp", e),
    }
}

/// Registration refusals, including `409` for a taken email.
pub fn register_error_response(e: &RegisterError) -> Response {
    match e {
        RegisterError::Rejected(e) => {
            json_error(status(e.http_status_code()), e.error_code(), e.to_string())
        }
        RegisterError::Database(e) => internal_error("registration", e),
    }
}

/// Maps `ReportError`.
pub fn report_error_response(e: &ReportError) -> Response {
    json_error(status(e.http_status_code()), e.error_code(), e.to_string())
}

/// Renders an `AppError`, keeping infrastructure details out of the body.
pub fn app_error_response(e: &AppError) -> Response {
    if e.is_client_error() {
        return json_error(status(e.status_code()), e.error_code(), e.to_string());
    }
    error!(error = %e, "Request failed");
    json_error(
        status(e.status_code()),
        e.error_code(),
        "The request could not be completed",
    )
}
