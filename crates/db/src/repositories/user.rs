//! User repository: registration, credential lookup and the profile view.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use ledgerbank_core::auth::{NewCustomer, RegistrationError, next_account_number};
use ledgerbank_core::profile::{Address, ProfileView};
use ledgerbank_shared::types::at_money_scale;

use crate::entities::{account_types, accounts, addresses, users};

/// Registrations racing for the same account number are retried this often.
const REGISTER_ATTEMPTS: u32 = 3;

/// Error types for registration.
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    /// Registration was refused.
    #[error(transparent)]
    Rejected(#[from] RegistrationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Rows created by a successful registration.
#[derive(Debug, Clone)]
pub struct Registered {
    /// New user.
    pub user: users::Model,
    /// New account with a zero balance.
    pub account: accounts::Model,
}

/// User repository for account holders.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    /// Creates user, address and account in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError::EmailTaken` or
    /// `RegistrationError::UnknownAccountType` (wrapped), or a database error.
    pub async fn register(
        &self,
        customer: &NewCustomer,
        password_hash: &str,
        account_number_start: i64,
    ) -> Result<Registered, RegisterError> {
        let mut attempt = 1;
        let result = loop {
            let result = self
                .register_in_txn(customer, password_hash, account_number_start, Utc::now())
                .await;
            match &result {
                Err(e) if is_account_number_clash(e) && attempt < REGISTER_ATTEMPTS => {
                    warn!(email = %customer.email, attempt, "Account number taken, retrying");
                    attempt += 1;
                }
                _ => break result,
            }
        };

        match &result {
            Ok(registered) => info!(
                user_id = %registered.user.id,
                account_no = registered.account.account_no,
                "Customer registered"
            ),
            Err(RegisterError::Database(e)) => {
                error!(email = %customer.email, error = %e, "Registration rolled back");
            }
            Err(RegisterError::Rejected(_)) => {}
        }
        result
    }

    async fn register_in_txn(
        &self,
        customer: &NewCustomer,
        password_hash: &str,
        account_number_start: i64,
        now: DateTime<Utc>,
    ) -> Result<Registered, RegisterError> {
        let txn = self.db.begin().await?;

        let taken = users::Entity::find()
            .filter(users::Column::Email.eq(&customer.email))
            .count(&txn)
            .await?;
        if taken > 0 {
            return Err(RegistrationError::EmailTaken.into());
        }

        let account_type = account_types::Entity::find()
            .filter(account_types::Column::Name.eq(&customer.account_type))
            .one(&txn)
            .await?
            .ok_or_else(|| RegistrationError::UnknownAccountType(customer.account_type.clone()))?;

        let highest = accounts::Entity::find()
            .order_by_desc(accounts::Column::AccountNo)
            .one(&txn)
            .await?
            .map(|a| a.account_no);
        let account_no = next_account_number(highest, account_number_start);

        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(customer.email.clone()),
            password_hash: Set(password_hash.to_string()),
            first_name: Set(customer.first_name.clone()),
            last_name: Set(customer.last_name.clone()),
            is_staff: Set(false),
            is_active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await
        .map_err(map_unique_email)?;

        addresses::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user.id),
            street_address: Set(customer.address.street_address.clone()),
            city: Set(customer.address.city.clone()),
            postal_code: Set(customer.address.postal_code),
            country: Set(customer.address.country.clone()),
            created_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;

        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user.id),
            account_type_id: Set(account_type.id),
            account_no: Set(account_no),
            gender: Set(customer.gender.as_str().to_string()),
            birth_date: Set(Some(customer.birth_date)),
            balance: Set(Decimal::ZERO),
            initial_deposit_date: Set(None),
            interest_start_date: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(Registered { user, account })
    }

    /// Flags a user as staff. Staff accounts cannot receive transfers.
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` for an unknown user.
    pub async fn set_staff(&self, user_id: Uuid, is_staff: bool) -> Result<users::Model, DbErr> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("user {user_id}")))?;

        let mut user: users::ActiveModel = user.into();
        user.is_staff = Set(is_staff);
        user.updated_at = Set(Utc::now().into());
        user.update(&self.db).await
    }

    /// Builds the profile view for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn profile(&self, user_id: Uuid) -> Result<Option<ProfileView>, DbErr> {
        let Some(user) = users::Entity::find_by_id(user_id).one(&self.db).await? else {
            return Ok(None);
        };
        let Some(account) = accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        let address = addresses::Entity::find()
            .filter(addresses::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .map(|a| {
                Address {
                    street_address: a.street_address,
                    city: a.city,
                    country: a.country,
                }
                .one_line()
            })
            .unwrap_or_default();

        Ok(Some(ProfileView {
            email: user.email,
            gender: account.gender,
            account_no: account.account_no,
            birth_date: account.birth_date,
            balance: at_money_scale(account.balance),
            address,
        }))
    }
}

fn map_unique_email(e: DbErr) -> RegisterError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => RegistrationError::EmailTaken.into(),
        _ => e.into(),
    }
}

/// A unique violation that survives the email mapping came from the
/// account number, which another registration claimed first.
fn is_account_number_clash(err: &RegisterError) -> bool {
    matches!(
        err,
        RegisterError::Database(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
    )
}
