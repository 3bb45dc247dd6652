//! Property-based tests for `LedgerService`.
//!
//! - Deposits at or above the floor add exactly the amount
//! - Withdrawals succeed exactly inside `[min, min(cap, balance)]`
//! - Transfers conserve the sum of both balances
//! - The interest schedule is fixed by the first deposit

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::account::{AccountType, LedgerAccount};
use super::service::LedgerService;
use super::transaction::TransactionType;
use super::validation::OperationLimits;

/// Strategy to generate amounts in cents (0.00 to 10,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..=1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a valid interest frequency.
fn frequency() -> impl Strategy<Value = i16> {
    1i16..=12
}

fn limits() -> OperationLimits {
    OperationLimits {
        minimum_deposit_amount: Decimal::new(10, 0),
        minimum_withdrawal_amount: Decimal::new(10, 0),
    }
}

fn make_account(account_no: i64, balance: Decimal, frequency: i16) -> LedgerAccount {
    LedgerAccount {
        id: Uuid::new_v4(),
        account_no,
        balance,
        account_type: AccountType {
            id: 1,
            name: "Savings".to_string(),
            maximum_withdrawal_amount: Decimal::new(500, 0),
            interest_calculation_per_year: frequency,
        },
        initial_deposit_date: None,
        interest_start_date: None,
    }
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 31, 10, 0, 0).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_deposit_adds_exact_amount(balance in amount(), deposit in amount()) {
        let mut account = make_account(10_000_001, balance, 4);
        let result = LedgerService::deposit(&mut account, deposit, &limits(), base_time());

        if deposit >= limits().minimum_deposit_amount {
            let posting = result.unwrap();
            prop_assert_eq!(account.balance, balance + deposit);
            prop_assert_eq!(posting.record.amount, deposit);
            prop_assert_eq!(posting.record.transaction_type, TransactionType::Deposit);
            prop_assert_eq!(posting.record.balance_after_transaction, account.balance);
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(account.balance, balance);
        }
    }

    #[test]
    fn prop_withdrawal_window(balance in amount(), withdrawal in amount()) {
        let mut account = make_account(10_000_001, balance, 4);
        let upper = account.account_type.maximum_withdrawal_amount.min(balance);
        let result = LedgerService::withdraw(&mut account, withdrawal, &limits(), base_time());

        if withdrawal >= limits().minimum_withdrawal_amount && withdrawal <= upper {
            let posting = result.unwrap();
            prop_assert_eq!(account.balance, balance - withdrawal);
            prop_assert_eq!(posting.record.balance_after_transaction, balance - withdrawal);
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(account.balance, balance);
        }
    }

    #[test]
    fn prop_transfer_conserves_sum(
        source_balance in amount(),
        destination_balance in amount(),
        transfer in amount(),
    ) {
        let mut source = make_account(10_000_001, source_balance, 4);
        let mut destination = make_account(10_000_002, destination_balance, 4);
        let total = source_balance + destination_balance;

        let result = LedgerService::transfer(&mut source, &mut destination, transfer, base_time());

        prop_assert_eq!(source.balance + destination.balance, total);
        if transfer <= source_balance {
            let posting = result.unwrap();
            prop_assert_eq!(source.balance, source_balance - transfer);
            prop_assert_eq!(destination.balance, destination_balance + transfer);
            prop_assert_eq!(posting.debit.record.amount, posting.credit.record.amount);
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(source.balance, source_balance);
        }
    }

    #[test]
    fn prop_schedule_fixed_by_first_deposit(
        frequency in frequency(),
        days_later in 1i64..400,
    ) {
        let mut account = make_account(10_000_001, Decimal::ZERO, frequency);
        let deposit = Decimal::new(100, 0);

        LedgerService::deposit(&mut account, deposit, &limits(), base_time()).unwrap();
        let initial = account.initial_deposit_date;
        let start = account.interest_start_date;

        let months = u32::try_from(12 / frequency).unwrap();
        prop_assert_eq!(initial, Some(base_time()));
        prop_assert_eq!(
            start,
            base_time().checked_add_months(chrono::Months::new(months))
        );

        let later = base_time() + Duration::days(days_later);
        let posting = LedgerService::deposit(&mut account, deposit, &limits(), later).unwrap();
        prop_assert_eq!(account.initial_deposit_date, initial);
        prop_assert_eq!(account.interest_start_date, start);
        prop_assert_eq!(posting.changes.initial_deposit_date, None);
    }
}
