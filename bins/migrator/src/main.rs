//! Schema migrations for Ledgerbank.
//!
//! Usage:
//!   migrator up      - Create tables and seed the account types
//!   migrator down    - Roll back the last migration
//!   migrator status  - List applied migrations
//!   migrator fresh   - Drop everything and migrate again
//!
//! Reads `DATABASE_URL` from the environment or `.env`.

use ledgerbank_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    cli::run_cli(Migrator).await;
}
