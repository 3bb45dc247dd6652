//! OTP-gated profile routes.
//!
//! `POST /profile/otp` mails a 4-digit code; `POST /profile/otp/verify`
//! spends it and returns the profile.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::error::{
    ApiJson, app_error_response, internal_error, json_error, otp_store_error_response,
};
use crate::{AppState, middleware::AuthUser};
use ledgerbank_core::otp::{OtpCode, OtpService};
use ledgerbank_db::{OtpRepository, UserRepository};
use ledgerbank_shared::{AppError, OTP_SUBJECT, otp_body};

/// Creates the profile routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profile/otp", post(issue_otp))
        .route("/profile/otp/verify", post(verify_otp))
}

/// Body for code verification.
#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    /// The 4-digit code from the email.
    pub code: String,
}

/// POST /profile/otp - Issue a code and mail it to the account holder.
async fn issue_otp(State(state): State<AppState>, auth: AuthUser) -> Response {
    let user = match UserRepository::new((*state.db).clone())
        .find_by_id(auth.user_id())
        .await
    {
        Ok(Some(u)) => u,
        Ok(None) => return json_error(StatusCode::NOT_FOUND, "user_not_found", "User not found"),
        Err(e) => return internal_error("otp issue", &e),
    };

    let now = Utc::now();
    let code = OtpCode::generate();
    let challenge = OtpService::issue(user.id, &code, now, state.banking.otp_ttl_secs);
    let otp_repo = OtpRepository::new((*state.db).clone());

    if let Err(e) = otp_repo.issue(&challenge, now).await {
        return internal_error("otp issue", &e);
    }

    if let Err(e) = state
        .notifier
        .send(&user.email, OTP_SUBJECT, &otp_body(code.as_str()))
        .await
    {
        error!(user_id = %user.id, error = %e, "OTP delivery failed, revoking challenge");
        if let Err(e) = otp_repo.revoke(user.id).await {
            error!(user_id = %user.id, error = %e, "Failed to revoke undelivered OTP");
        }
        return app_error_response(&AppError::from(e));
    }

    info!(user_id = %user.id, "OTP sent");
    (
        StatusCode::OK,
        Json(json!({
            "message": "An OTP has been sent to your email address",
            "expires_at": challenge.expires_at
        })),
    )
        .into_response()
}

/// POST /profile/otp/verify - Spend the code and return the profile.
async fn verify_otp(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<VerifyOtpRequest>,
) -> Response {
    if let Err(e) = OtpRepository::new((*state.db).clone())
        .verify(auth.user_id(), &payload.code, Utc::now())
        .await
    {
        return otp_store_error_response(&e);
    }

    match UserRepository::new((*state.db).clone())
        .profile(auth.user_id())
        .await
    {
        Ok(Some(profile)) => (StatusCode::OK, Json(profile)).into_response(),
        Ok(None) => json_error(StatusCode::NOT_FOUND, "user_not_found", "User not found"),
        Err(e) => internal_error("profile", &e),
    }
}
