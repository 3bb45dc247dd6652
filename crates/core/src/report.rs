//! Transaction report filtering.
//!
//! A report range is written `YYYY-MM-DD - YYYY-MM-DD` and covers both
//! dates completely (UTC).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use thiserror::Error;

const RANGE_SEPARATOR: &str = " - ";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors that can occur while reading a report range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// The text does not contain two dates.
    #[error("Please select a date range.")]
    MissingRange,
    /// A date is unreadable or the range runs backwards.
    #[error("Invalid date range")]
    InvalidRange,
}

impl ReportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingRange => "missing_date_range",
            Self::InvalidRange => "invalid_date_range",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        400
    }
}

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// First day included.
    pub start: NaiveDate,
    /// Last day included.
    pub end: NaiveDate,
}

impl DateRange {
    /// Parses `YYYY-MM-DD - YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::MissingRange` unless there are exactly two
    /// parts, and `ReportError::InvalidRange` for a bad date or when the
    /// start is after the end.
    pub fn parse(input: &str) -> Result<Self, ReportError> {
        let parts: Vec<&str> = input.trim().split(RANGE_SEPARATOR).collect();
        let [start, end] = parts.as_slice() else {
            return Err(ReportError::MissingRange);
        };

        let start = NaiveDate::parse_from_str(start.trim(), DATE_FORMAT)
            .map_err(|_| ReportError::InvalidRange)?;
        let end = NaiveDate::parse_from_str(end.trim(), DATE_FORMAT)
            .map_err(|_| ReportError::InvalidRange)?;

        if start > end {
            return Err(ReportError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// Half-open timestamp bounds `[start 00:00, day after end 00:00)`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidRange` when the end is the last
    /// representable date.
    pub fn bounds(&self) -> Result<(DateTime<Utc>, DateTime<Utc>), ReportError> {
        let after_end = self.end.succ_opt().ok_or(ReportError::InvalidRange)?;
        Ok((
            self.start.and_time(NaiveTime::MIN).and_utc(),
            after_end.and_time(NaiveTime::MIN).and_utc(),
        ))
    }
}
