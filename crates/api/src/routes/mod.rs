//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth_middleware};

pub mod account;
pub mod auth;
pub mod health;
pub mod profile;
pub mod transactions;

/// Creates the API router; account routes sit behind the auth middleware.
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(account::routes())
        .merge(transactions::routes())
        .merge(profile::routes())
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}
