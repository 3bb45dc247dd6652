//! Transfer target resolution.
//!
//! Lookups fetch at most [`RESOLVE_FETCH_LIMIT`] rows so that a duplicate
//! account number is detected without scanning the table.

use super::error::LedgerError;

/// Rows to fetch when resolving an account number.
pub const RESOLVE_FETCH_LIMIT: u64 = 2;

/// Reduces the rows matching `account_no` to exactly one.
///
/// # Errors
///
/// Returns `LedgerError::AccountNotFound` for no match and
/// `LedgerError::AmbiguousAccountNumber` for more than one.
pub fn resolve_unique<T>(account_no: i64, candidates: Vec<T>) -> Result<T, LedgerError> {
    let mut candidates = candidates.into_iter();
    match (candidates.next(), candidates.next()) {
        (Some(found), None) => Ok(found),
        (None, _) => Err(LedgerError::AccountNotFound(account_no)),
        (Some(_), Some(_)) => Err(LedgerError::AmbiguousAccountNumber(account_no)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_match() {
        assert_eq!(resolve_unique(10_000_002, vec!["acct"]), Ok("acct"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(
            resolve_unique::<u8>(10_000_002, vec![]),
            Err(LedgerError::AccountNotFound(10_000_002))
        );
    }

    #[test]
    fn test_duplicate_match() {
        assert_eq!(
            resolve_unique(10_000_002, vec![1, 2]),
            Err(LedgerError::AmbiguousAccountNumber(10_000_002))
        );
    }
}
