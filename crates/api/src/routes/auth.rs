//! Authentication routes: registration, login, token refresh and logout.
//!
//! Every refresh token is backed by a session row; logout revokes it.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::AppState;
use crate::error::{
    ApiJson, app_error_response, internal_error, json_error, register_error_response,
};
use ledgerbank_core::auth::{
    hash_password, registration_message, validate_registration, verify_password,
};
use ledgerbank_db::{
    AccountRepository, SessionRepository, UserRepository, repositories::RegisterError,
};
use ledgerbank_shared::AppError;
use ledgerbank_shared::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RegisterRequest, TokenKind, UserInfo,
};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
}

fn invalid_credentials() -> Response {
    json_error(
        StatusCode::UNAUTHORIZED,
        "invalid_credentials",
        "Invalid email or password",
    )
}

/// POST /auth/register - Open a customer account.
async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Response {
    let customer = match validate_registration(&payload, Utc::now().date_naive()) {
        Ok(c) => c,
        Err(e) => return register_error_response(&RegisterError::Rejected(e)),
    };

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => return internal_error("password hashing", &e),
    };

    let registered = match UserRepository::new((*state.db).clone())
        .register(&customer, &password_hash, state.banking.account_number_start)
        .await
    {
        Ok(r) => r,
        Err(e) => return register_error_response(&e),
    };

    (
        StatusCode::CREATED,
        Json(json!({
            "message": registration_message(registered.account.account_no),
            "user": UserInfo {
                id: registered.user.id,
                email: registered.user.email,
                first_name: registered.user.first_name,
                last_name: registered.user.last_name,
                account_no: registered.account.account_no,
            }
        })),
    )
        .into_response()
}

/// POST /auth/login - Authenticate and return tokens.
async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Response {
    let user = match UserRepository::new((*state.db).clone())
        .find_by_email(&payload.email)
        .await
    {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(email = %payload.email, "Login attempt for unknown email");
            return invalid_credentials();
        }
        Err(e) => return internal_error("login", &e),
    };

    if !user.is_active {
        return json_error(
            StatusCode::UNAUTHORIZED,
            "account_disabled",
            "This account has been disabled",
        );
    }

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt - invalid password");
            return invalid_credentials();
        }
        Err(e) => return internal_error("password verification", &e),
    }

    let account = match AccountRepository::new((*state.db).clone())
        .find_by_user(user.id)
        .await
    {
        Ok(Some(a)) => a,
        Ok(None) => {
            return json_error(
                StatusCode::FORBIDDEN,
                "no_account",
                "This user has no bank account",
            );
        }
        Err(e) => return internal_error("login", &e),
    };

    let tokens = state
        .jwt_service
        .generate_access_token(user.id, account.id)
        .and_then(|access| {
            state
                .jwt_service
                .generate_refresh_token(user.id, account.id)
                .map(|refresh| (access, refresh))
        });
    let (access_token, refresh_token) = match tokens {
        Ok(t) => t,
        Err(e) => return app_error_response(&AppError::from(e)),
    };

    let now = Utc::now();
    if let Err(e) = SessionRepository::new((*state.db).clone())
        .create(
            user.id,
            &refresh_token,
            now + state.jwt_service.refresh_token_lifetime(),
            now,
        )
        .await
    {
        return internal_error("session create", &e);
    }

    info!(user_id = %user.id, account_no = account.account_no, "User logged in");

    let response = LoginResponse {
        user: UserInfo {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            account_no: account.account_no,
        },
        access_token,
        refresh_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

fn inactive_session() -> Response {
    json_error(
        StatusCode::UNAUTHORIZED,
        "invalid_token",
        "This session has ended, please log in again",
    )
}

/// POST /auth/refresh - Exchange a refresh token for a new access token.
async fn refresh(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RefreshRequest>,
) -> Response {
    let claims = match state
        .jwt_service
        .validate_kind(&payload.refresh_token, TokenKind::Refresh)
    {
        Ok(c) => c,
        Err(e) => return app_error_response(&AppError::from(e)),
    };

    match SessionRepository::new((*state.db).clone())
        .find_live(&payload.refresh_token, Utc::now())
        .await
    {
        Ok(Some(_)) => {}
        Ok(None) => return inactive_session(),
        Err(e) => return internal_error("token refresh", &e),
    }

    let access_token = match state
        .jwt_service
        .generate_access_token(claims.user_id(), claims.account_id())
    {
        Ok(t) => t,
        Err(e) => return app_error_response(&AppError::from(e)),
    };

    (
        StatusCode::OK,
        Json(json!({
            "access_token": access_token,
            "expires_in": state.jwt_service.access_token_expires_in()
        })),
    )
        .into_response()
}

/// POST /auth/logout - Revoke the session behind a refresh token.
///
/// Access tokens already handed out stay valid until they expire.
async fn logout(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RefreshRequest>,
) -> Response {
    let claims = match state
        .jwt_service
        .validate_kind(&payload.refresh_token, TokenKind::Refresh)
    {
        Ok(c) => c,
        Err(e) => return app_error_response(&AppError::from(e)),
    };

    match SessionRepository::new((*state.db).clone())
        .revoke_by_token(&payload.refresh_token, Utc::now())
        .await
    {
        Ok(true) => {
            info!(user_id = %claims.user_id(), "User logged out");
            (
                StatusCode::OK,
                Json(json!({ "message": "You have been logged out" })),
            )
                .into_response()
        }
        Ok(false) => inactive_session(),
        Err(e) => internal_error("logout", &e),
    }
}
