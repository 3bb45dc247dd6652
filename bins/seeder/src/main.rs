//! Development data for Ledgerbank.
//!
//! Seeds a staff operator and two customers with opening balances. Account
//! types come from the migrations, so run `migrator up` first.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;

use ledgerbank_core::auth::{NewAddress, NewCustomer, hash_password};
use ledgerbank_core::ledger::OperationLimits;
use ledgerbank_core::profile::Gender;
use ledgerbank_db::{BankingRepository, UserRepository};
use ledgerbank_shared::BankingConfig;

/// Password shared by every seeded login.
const SEED_PASSWORD: &str = "ledgerbank-dev";

struct SeedUser {
    email: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    gender: Gender,
    account_type: &'static str,
    opening_deposit: Option<Decimal>,
    is_staff: bool,
}

const SEED_USERS: [SeedUser; 3] = [
    SeedUser {
        email: "operator@ledgerbank.dev",
        first_name: "Bank",
        last_name: "Operator",
        gender: Gender::Female,
        account_type: "Current",
        opening_deposit: None,
        is_staff: true,
    },
    SeedUser {
        email: "alice@ledgerbank.dev",
        first_name: "Alice",
        last_name: "Martin",
        gender: Gender::Female,
        account_type: "Savings",
        opening_deposit: Some(dec!(1500.00)),
        is_staff: false,
    },
    SeedUser {
        email: "bob@ledgerbank.dev",
        first_name: "Bob",
        last_name: "Keller",
        gender: Gender::Male,
        account_type: "Current",
        opening_deposit: Some(dec!(250.00)),
        is_staff: false,
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = ledgerbank_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let banking = BankingConfig::default();
    println!("Seeding users...");
    for seed in &SEED_USERS {
        seed_user(&db, seed, &banking).await?;
    }

    println!("Seeding complete!");
    Ok(())
}

async fn seed_user(
    db: &DatabaseConnection,
    seed: &SeedUser,
    banking: &BankingConfig,
) -> anyhow::Result<()> {
    let users = UserRepository::new(db.clone());
    if users.email_exists(seed.email).await? {
        println!("  {} already exists, skipping...", seed.email);
        return Ok(());
    }

    let customer = NewCustomer {
        email: seed.email.to_string(),
        first_name: seed.first_name.to_string(),
        last_name: seed.last_name.to_string(),
        gender: seed.gender,
        birth_date: NaiveDate::from_ymd_opt(1988, 4, 2).context("invalid seed birth date")?,
        account_type: seed.account_type.to_string(),
        address: NewAddress {
            street_address: "1 Counting House Lane".to_string(),
            city: "Zurich".to_string(),
            postal_code: 8001,
            country: "Switzerland".to_string(),
        },
    };
    let password_hash = hash_password(SEED_PASSWORD)?;
    let registered = users
        .register(&customer, &password_hash, banking.account_number_start)
        .await?;

    if seed.is_staff {
        users.set_staff(registered.user.id, true).await?;
    }

    if let Some(amount) = seed.opening_deposit {
        BankingRepository::new(db.clone())
            .deposit(
                registered.account.id,
                amount,
                &OperationLimits::from(banking),
            )
            .await?;
    }

    println!(
        "  Created {} with account number {}",
        seed.email, registered.account.account_no
    );
    Ok(())
}
