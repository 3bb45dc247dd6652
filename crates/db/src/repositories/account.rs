//! Account repository for lookups and transfer target resolution.

use chrono::Utc;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use ledgerbank_core::ledger::{
    AccountType, LedgerAccount, LedgerError, RESOLVE_FETCH_LIMIT, resolve_unique,
};
use ledgerbank_core::profile::AccountSummary;
use ledgerbank_shared::types::at_money_scale;

use crate::entities::{account_types, accounts, users};

/// Error types for account lookups.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Resolution failed (no match or duplicate match).
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Account repository for read operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the account owned by a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<accounts::Model>, DbErr> {
        accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Builds the account overview shown to its owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn summary(&self, id: Uuid) -> Result<Option<AccountSummary>, DbErr> {
        let found = accounts::Entity::find_by_id(id)
            .find_also_related(account_types::Entity)
            .one(&self.db)
            .await?;

        Ok(found.map(|(account, account_type)| AccountSummary {
            account_no: account.account_no,
            account_type: account_type.map(|t| t.name).unwrap_or_default(),
            balance: at_money_scale(account.balance),
            initial_deposit_date: account.initial_deposit_date.map(|d| d.with_timezone(&Utc)),
            interest_start_date: account.interest_start_date.map(|d| d.with_timezone(&Utc)),
        }))
    }

    /// Lists the available account types.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn account_types(&self) -> Result<Vec<account_types::Model>, DbErr> {
        account_types::Entity::find()
            .order_by_asc(account_types::Column::Id)
            .all(&self.db)
            .await
    }

    /// Resolves the destination of a transfer by account number.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AccountNotFound` or
    /// `LedgerError::AmbiguousAccountNumber` (wrapped), or a database error.
    pub async fn resolve_transfer_target(
        &self,
        account_no: i64,
    ) -> Result<accounts::Model, AccountError> {
        find_transfer_target(&self.db, account_no).await
    }
}

/// Indexed lookup of a customer account by number.
///
/// Staff-owned accounts are not valid transfer destinations.
pub(crate) async fn find_transfer_target<C: ConnectionTrait>(
    conn: &C,
    account_no: i64,
) -> Result<accounts::Model, AccountError> {
    let candidates = accounts::Entity::find()
        .inner_join(users::Entity)
        .filter(accounts::Column::AccountNo.eq(account_no))
        .filter(users::Column::IsStaff.eq(false))
        .limit(RESOLVE_FETCH_LIMIT)
        .all(conn)
        .await?;

    Ok(resolve_unique(account_no, candidates)?)
}

/// Loads an account and its type, taking a row lock inside a transaction.
pub(crate) async fn lock_account<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<Option<(accounts::Model, account_types::Model)>, DbErr> {
    let Some(account) = accounts::Entity::find_by_id(id)
        .lock_exclusive()
        .one(conn)
        .await?
    else {
        return Ok(None);
    };

    let account_type = account_types::Entity::find_by_id(account.account_type_id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            DbErr::RecordNotFound(format!("account type {}", account.account_type_id))
        })?;

    Ok(Some((account, account_type)))
}

/// Maps a stored account to the ledger's view of it.
pub(crate) fn to_ledger_account(
    account: &accounts::Model,
    account_type: &account_types::Model,
) -> LedgerAccount {
    LedgerAccount {
        id: account.id,
        account_no: account.account_no,
        balance: account.balance,
        account_type: AccountType {
            id: account_type.id,
            name: account_type.name.clone(),
            maximum_withdrawal_amount: account_type.maximum_withdrawal_amount,
            interest_calculation_per_year: account_type.interest_calculation_per_year,
        },
        initial_deposit_date: account.initial_deposit_date.map(|d| d.with_timezone(&Utc)),
        interest_start_date: account.interest_start_date.map(|d| d.with_timezone(&Utc)),
    }
}
