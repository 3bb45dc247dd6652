//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration and written with the
//! schema builder so the same set runs on Postgres and on SQLite.

pub use sea_orm_migration::prelude::*;

mod m20240601_000001_banking_schema;
mod m20240601_000002_account_types;
mod m20240601_000003_sessions;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_banking_schema::Migration),
            Box::new(m20240601_000002_account_types::Migration),
            Box::new(m20240601_000003_sessions::Migration),
        ]
    }
}
