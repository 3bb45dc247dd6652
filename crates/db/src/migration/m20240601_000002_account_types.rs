//! Reference account types.

use rust_decimal::Decimal;
use sea_orm_migration::prelude::*;

use super::m20240601_000001_banking_schema::AccountTypes;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// (name, maximum withdrawal, annual interest rate, interest computations per year)
const ACCOUNT_TYPES: [(&str, i64, i64, i16); 2] = [
    ("Savings", 2_000_000, 400, 4),
    ("Current", 5_000_000, 0, 1),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert.into_table(AccountTypes::Table).columns([
            AccountTypes::Name,
            AccountTypes::MaximumWithdrawalAmount,
            AccountTypes::AnnualInterestRate,
            AccountTypes::InterestCalculationPerYear,
        ]);

        // Amounts are stored in cents here to keep the table const.
        for (name, max_cents, rate_bp, frequency) in ACCOUNT_TYPES {
            insert
                .values([
                    name.into(),
                    Decimal::new(max_cents, 2).into(),
                    Decimal::new(rate_bp, 2).into(),
                    frequency.into(),
                ])
                .map_err(|e| DbErr::Migration(e.to_string()))?;
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(AccountTypes::Table)
            .and_where(
                Expr::col(AccountTypes::Name)
                    .is_in(ACCOUNT_TYPES.iter().map(|(name, ..)| *name)),
            )
            .to_owned();

        manager.exec_stmt(delete).await
    }
}
