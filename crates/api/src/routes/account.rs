//! Account overview route.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::error::{internal_error, json_error};
use crate::{AppState, middleware::AuthUser};
use ledgerbank_db::AccountRepository;

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/account", get(account_summary))
}

/// GET /account - Number, type, balance and interest dates of the caller's account.
async fn account_summary(State(state): State<AppState>, auth: AuthUser) -> Response {
    match AccountRepository::new((*state.db).clone())
        .summary(auth.account_id())
        .await
    {
        Ok(Some(summary)) => (StatusCode::OK, Json(summary)).into_response(),
        Ok(None) => json_error(StatusCode::NOT_FOUND, "account_not_found", "Account not found"),
        Err(e) => internal_error("account summary", &e),
    }
}
