//! Transaction history queries.

use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::transactions;

/// Read access to the append-only transaction log.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists an account's transactions, newest first.
    ///
    /// `range` is half-open: `from <= timestamp < to`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_account(
        &self,
        account_id: Uuid,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Vec<transactions::Model>, DbErr> {
        let mut query =
            transactions::Entity::find().filter(transactions::Column::AccountId.eq(account_id));

        if let Some((from, to)) = range {
            let from: DateTimeWithTimeZone = from.into();
            let to: DateTimeWithTimeZone = to.into();
            query = query
                .filter(transactions::Column::Timestamp.gte(from))
                .filter(transactions::Column::Timestamp.lt(to));
        }

        query
            .order_by_desc(transactions::Column::Timestamp)
            .order_by_desc(transactions::Column::Id)
            .all(&self.db)
            .await
    }
}
