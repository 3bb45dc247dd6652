//! Deposit, withdrawal, transfer and transaction history routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;

use crate::error::{
    ApiJson, banking_error_response, internal_error, ledger_error_response, report_error_response,
};
use crate::views::{AmountInput, OperationReceipt, TransactionList, TransactionView};
use crate::{AppState, middleware::AuthUser};
use ledgerbank_core::ledger::{LedgerError, OperationLimits};
use ledgerbank_core::report::DateRange;
use ledgerbank_db::{BankingRepository, TransactionRepository};
use ledgerbank_shared::types::{format_amount, parse_amount};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions/deposit", post(deposit))
        .route("/transactions/withdraw", post(withdraw))
        .route("/transactions/transfer", post(transfer))
}

// ============================================================================
// Request Types
// ============================================================================

/// Body for deposits and withdrawals.
#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    /// Amount with at most two decimals.
    pub amount: AmountInput,
}

/// Body for transfers.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    /// Destination account number.
    pub account_no: i64,
    /// Amount with at most two decimals.
    pub amount: AmountInput,
}

/// Query for the transaction history.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// `YYYY-MM-DD - YYYY-MM-DD`, both days included.
    pub daterange: Option<String>,
}

fn read_amount(input: &AmountInput) -> Result<rust_decimal::Decimal, Response> {
    parse_amount(&input.as_text()).map_err(|e| ledger_error_response(&LedgerError::from(e)))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /transactions/deposit
async fn deposit(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<AmountRequest>,
) -> Response {
    let amount = match read_amount(&payload.amount) {
        Ok(a) => a,
        Err(response) => return response,
    };
    let limits = OperationLimits::from(state.banking.as_ref());

    match BankingRepository::new((*state.db).clone())
        .deposit(auth.account_id(), amount, &limits)
        .await
    {
        Ok(outcome) => {
            let message = format!(
                "{}$ was deposited to your account successfully",
                format_amount(amount)
            );
            let receipt = OperationReceipt::new(message, &outcome.account, &outcome.transaction);
            (StatusCode::OK, Json(receipt)).into_response()
        }
        Err(e) => banking_error_response(&e),
    }
}

/// POST /transactions/withdraw
async fn withdraw(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<AmountRequest>,
) -> Response {
    let amount = match read_amount(&payload.amount) {
        Ok(a) => a,
        Err(response) => return response,
    };
    let limits = OperationLimits::from(state.banking.as_ref());

    match BankingRepository::new((*state.db).clone())
        .withdraw(auth.account_id(), amount, &limits)
        .await
    {
        Ok(outcome) => {
            let message = format!(
                "Successfully withdrawn {}$ from your account",
                format_amount(amount)
            );
            let receipt = OperationReceipt::new(message, &outcome.account, &outcome.transaction);
            (StatusCode::OK, Json(receipt)).into_response()
        }
        Err(e) => banking_error_response(&e),
    }
}

/// POST /transactions/transfer
async fn transfer(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<TransferRequest>,
) -> Response {
    let amount = match read_amount(&payload.amount) {
        Ok(a) => a,
        Err(response) => return response,
    };

    match BankingRepository::new((*state.db).clone())
        .transfer(auth.account_id(), payload.account_no, amount)
        .await
    {
        Ok(outcome) => {
            let message = format!(
                "Successfully transfer {}$ from your account to target account :{}",
                format_amount(amount),
                outcome.destination.account_no
            );
            let receipt = OperationReceipt::new(message, &outcome.source, &outcome.debit);
            (StatusCode::OK, Json(receipt)).into_response()
        }
        Err(e) => banking_error_response(&e),
    }
}

/// GET /transactions?daterange=YYYY-MM-DD - YYYY-MM-DD
///
/// A missing or blank `daterange` lists everything.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<HistoryQuery>,
) -> Response {
    let requested = query.daterange.as_deref().filter(|s| !s.trim().is_empty());
    let range = match requested.map(DateRange::parse) {
        None => None,
        Some(Ok(range)) => match range.bounds() {
            Ok(bounds) => Some(bounds),
            Err(e) => return report_error_response(&e),
        },
        Some(Err(e)) => return report_error_response(&e),
    };

    match TransactionRepository::new((*state.db).clone())
        .list_for_account(auth.account_id(), range)
        .await
    {
        Ok(records) => {
            let transactions: Vec<TransactionView> =
                records.iter().map(TransactionView::from).collect();
            let count = transactions.len();
            (StatusCode::OK, Json(TransactionList { transactions, count })).into_response()
        }
        Err(e) => internal_error("transaction history", &e),
    }
}
