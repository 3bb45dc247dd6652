//! Banking schema: users, addresses, account types, accounts,
//! transactions and one-time code challenges.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Email).string_len(254).not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::FirstName).string_len(150).not_null())
                    .col(ColumnDef::new(Users::LastName).string_len(150).not_null())
                    .col(ColumnDef::new(Users::IsStaff).boolean().not_null().default(false))
                    .col(ColumnDef::new(Users::IsActive).boolean().not_null().default(true))
                    .col(ColumnDef::new(Users::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Addresses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Addresses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Addresses::UserId).uuid().not_null().unique_key())
                    .col(ColumnDef::new(Addresses::StreetAddress).string_len(512).not_null())
                    .col(ColumnDef::new(Addresses::City).string_len(256).not_null())
                    .col(ColumnDef::new(Addresses::PostalCode).integer().not_null())
                    .col(ColumnDef::new(Addresses::Country).string_len(256).not_null())
                    .col(ColumnDef::new(Addresses::CreatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_addresses_user")
                            .from(Addresses::Table, Addresses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AccountTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccountTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AccountTypes::Name).string_len(128).not_null().unique_key())
                    .col(
                        ColumnDef::new(AccountTypes::MaximumWithdrawalAmount)
                            .decimal_len(16, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AccountTypes::AnnualInterestRate)
                            .decimal_len(5, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AccountTypes::InterestCalculationPerYear)
                            .small_integer()
                            .not_null()
                            .check(
                                Expr::col(AccountTypes::InterestCalculationPerYear)
                                    .between(1, 12),
                            ),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Accounts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Accounts::UserId).uuid().not_null().unique_key())
                    .col(ColumnDef::new(Accounts::AccountTypeId).integer().not_null())
                    .col(ColumnDef::new(Accounts::AccountNo).big_integer().not_null().unique_key())
                    .col(ColumnDef::new(Accounts::Gender).string_len(6).not_null())
                    .col(ColumnDef::new(Accounts::BirthDate).date().null())
                    .col(ColumnDef::new(Accounts::Balance).decimal_len(16, 2).not_null())
                    .col(
                        ColumnDef::new(Accounts::InitialDepositDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::InterestStartDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Accounts::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Accounts::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_accounts_user")
                            .from(Accounts::Table, Accounts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_accounts_account_type")
                            .from(Accounts::Table, Accounts::AccountTypeId)
                            .to(AccountTypes::Table, AccountTypes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Transactions::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Transactions::AccountId).uuid().not_null())
                    .col(ColumnDef::new(Transactions::Amount).decimal_len(16, 2).not_null())
                    .col(ColumnDef::new(Transactions::TransactionType).small_integer().not_null())
                    .col(
                        ColumnDef::new(Transactions::BalanceAfterTransaction)
                            .decimal_len(16, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::CounterpartyAccountNo).big_integer().null())
                    .col(ColumnDef::new(Transactions::Timestamp).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_account")
                            .from(Transactions::Table, Transactions::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Report queries filter by account and order by time
        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_account_timestamp")
                    .table(Transactions::Table)
                    .col(Transactions::AccountId)
                    .col(Transactions::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OtpChallenges::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OtpChallenges::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(OtpChallenges::UserId).uuid().not_null().unique_key())
                    .col(ColumnDef::new(OtpChallenges::CodeHash).string_len(64).not_null())
                    .col(
                        ColumnDef::new(OtpChallenges::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OtpChallenges::AttemptsLeft).small_integer().not_null())
                    .col(
                        ColumnDef::new(OtpChallenges::ConsumedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(OtpChallenges::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_otp_challenges_user")
                            .from(OtpChallenges::Table, OtpChallenges::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OtpChallenges::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AccountTypes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Addresses::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    PasswordHash,
    FirstName,
    LastName,
    IsStaff,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Addresses {
    Table,
    Id,
    UserId,
    StreetAddress,
    City,
    PostalCode,
    Country,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(super) enum AccountTypes {
    Table,
    Id,
    Name,
    MaximumWithdrawalAmount,
    AnnualInterestRate,
    InterestCalculationPerYear,
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    UserId,
    AccountTypeId,
    AccountNo,
    Gender,
    BirthDate,
    Balance,
    InitialDepositDate,
    InterestStartDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    AccountId,
    Amount,
    TransactionType,
    BalanceAfterTransaction,
    CounterpartyAccountNo,
    Timestamp,
}

#[derive(DeriveIden)]
enum OtpChallenges {
    Table,
    Id,
    UserId,
    CodeHash,
    ExpiresAt,
    AttemptsLeft,
    ConsumedAt,
    CreatedAt,
}
