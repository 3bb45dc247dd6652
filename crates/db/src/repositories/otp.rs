//! OTP challenge repository.
//!
//! One row per user holds the current challenge. A missing row is `Idle`,
//! a row with `consumed_at` set is `Consumed`, anything else is `Issued`.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};
use tracing::{info, warn};
use uuid::Uuid;

use ledgerbank_core::otp::{IssuedChallenge, OtpChallenge, OtpError, OtpService};

use crate::entities::otp_challenges;

/// Error types for OTP persistence.
#[derive(Debug, thiserror::Error)]
pub enum OtpStoreError {
    /// The submitted code was rejected.
    #[error(transparent)]
    Otp(#[from] OtpError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// OTP challenge repository.
#[derive(Debug, Clone)]
pub struct OtpRepository {
    db: DatabaseConnection,
}

impl OtpRepository {
    /// Creates a new OTP repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores `challenge` as the user's current one, replacing any prior challenge.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn issue(
        &self,
        challenge: &IssuedChallenge,
        now: DateTime<Utc>,
    ) -> Result<otp_challenges::Model, DbErr> {
        let txn = self.db.begin().await?;

        otp_challenges::Entity::delete_many()
            .filter(otp_challenges::Column::UserId.eq(challenge.owner))
            .exec(&txn)
            .await?;

        let stored = otp_challenges::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(challenge.owner),
            code_hash: Set(challenge.code_hash.clone()),
            expires_at: Set(challenge.expires_at.into()),
            attempts_left: Set(challenge.attempts_left),
            consumed_at: Set(None),
            created_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        info!(user_id = %challenge.owner, expires_at = %challenge.expires_at, "OTP challenge issued");
        Ok(stored)
    }

    /// Checks `submitted` against the user's challenge and persists the new state.
    ///
    /// # Errors
    ///
    /// Returns `OtpStoreError::Otp` when the code is rejected, or a database error.
    pub async fn verify(
        &self,
        user_id: Uuid,
        submitted: &str,
        now: DateTime<Utc>,
    ) -> Result<(), OtpStoreError> {
        let txn = self.db.begin().await?;

        let row = otp_challenges::Entity::find()
            .filter(otp_challenges::Column::UserId.eq(user_id))
            .lock_exclusive()
            .one(&txn)
            .await?;
        let current = row.as_ref().map_or(OtpChallenge::Idle, to_challenge);

        let verification = OtpService::verify(current.clone(), user_id, submitted, now);

        if verification.next != current {
            if let Some(row) = row {
                match &verification.next {
                    OtpChallenge::Idle => {
                        otp_challenges::Entity::delete_by_id(row.id).exec(&txn).await?;
                    }
                    OtpChallenge::Issued(issued) => {
                        let mut active: otp_challenges::ActiveModel = row.into();
                        active.attempts_left = Set(issued.attempts_left);
                        active.update(&txn).await?;
                    }
                    OtpChallenge::Consumed { consumed_at } => {
                        let mut active: otp_challenges::ActiveModel = row.into();
                        active.consumed_at = Set(Some((*consumed_at).into()));
                        active.update(&txn).await?;
                    }
                }
            }
        }

        txn.commit().await?;

        match verification.result {
            Ok(()) => {
                info!(user_id = %user_id, "OTP verified");
                Ok(())
            }
            Err(e) => {
                warn!(user_id = %user_id, reason = %e, "OTP rejected");
                Err(e.into())
            }
        }
    }

    /// Current challenge state for the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn current(&self, user_id: Uuid) -> Result<OtpChallenge, DbErr> {
        let row = otp_challenges::Entity::find()
            .filter(otp_challenges::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        Ok(row.as_ref().map_or(OtpChallenge::Idle, to_challenge))
    }

    /// Drops the user's challenge.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn revoke(&self, user_id: Uuid) -> Result<(), DbErr> {
        otp_challenges::Entity::delete_many()
            .filter(otp_challenges::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

fn to_challenge(row: &otp_challenges::Model) -> OtpChallenge {
    match row.consumed_at {
        Some(consumed_at) => OtpChallenge::Consumed {
            consumed_at: consumed_at.with_timezone(&Utc),
        },
        None => OtpChallenge::Issued(IssuedChallenge {
            owner: row.user_id,
            code_hash: row.code_hash.clone(),
            expires_at: row.expires_at.with_timezone(&Utc),
            attempts_left: row.attempts_left,
        }),
    }
}
