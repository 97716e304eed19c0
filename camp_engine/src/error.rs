//! Error types for the Camp Engine.
//!
//! Most engine operations are total: date validation answers with a
//! `bool` and unknown contract types pay zero.  The variants below
//! cover the few places where a caller asks for a typed failure, such
//! as parsing a date string into a [`JalaliDate`](crate::jalali::JalaliDate)
//! or requesting a report for a month that does not exist.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The string is not a valid `YYYY-MM-DD` Jalali date in the
    /// supported year range.
    #[error("invalid Jalali date: {0:?}")]
    InvalidDate(String),
    /// A report period outside `1..=12` months or with a zero year.
    #[error("invalid period {year}/{month}: month and year required")]
    InvalidPeriod { year: i32, month: u32 },
    #[error("configuration error: {0}")]
    Config(String),
}
