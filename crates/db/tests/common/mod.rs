//! Shared fixtures for repository integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

use ledgerbank_core::auth::{NewAddress, NewCustomer};
use ledgerbank_core::profile::Gender;
use ledgerbank_db::entities::account_types;
use ledgerbank_db::migration::{Migrator, MigratorTrait};
use ledgerbank_db::repositories::{Registered, UserRepository};

pub const ACCOUNT_NUMBER_START: i64 = 10_000_000;

/// Fresh in-memory database with the full schema and seeded account types.
pub async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub fn customer(email: &str, account_type: &str) -> NewCustomer {
    NewCustomer {
        email: email.to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        gender: Gender::Female,
        birth_date: NaiveDate::from_ymd_opt(1990, 12, 10).unwrap(),
        account_type: account_type.to_string(),
        address: NewAddress {
            street_address: "12 Analytical Row".to_string(),
            city: "London".to_string(),
            postal_code: 10001,
            country: "UK".to_string(),
        },
    }
}

pub async fn register(db: &DatabaseConnection, email: &str, account_type: &str) -> Registered {
    UserRepository::new(db.clone())
        .register(&customer(email, account_type), "not-a-real-hash", ACCOUNT_NUMBER_START)
        .await
        .expect("register customer")
}

/// Adds an account type with a custom withdrawal ceiling.
pub async fn add_account_type(
    db: &DatabaseConnection,
    name: &str,
    maximum_withdrawal_amount: Decimal,
    interest_calculation_per_year: i16,
) -> account_types::Model {
    account_types::ActiveModel {
        name: Set(name.to_string()),
        maximum_withdrawal_amount: Set(maximum_withdrawal_amount),
        annual_interest_rate: Set(Decimal::ZERO),
        interest_calculation_per_year: Set(interest_calculation_per_year),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert account type")
}
