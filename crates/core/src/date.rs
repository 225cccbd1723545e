// Calendar date parsing and inclusive date ranges

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Wire format for every date accepted or returned by the API.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors produced when a request carries a date that is not `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventDateError {
    #[error("date is empty")]
    Empty,

    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    Invalid(String),
}

/// Parse a `YYYY-MM-DD` string into a calendar date.
///
/// Only the exact ten-character shape is accepted: no sign, no year past
/// 9999, no surrounding whitespace, no unpadded month or day. Stored dates
/// are compared as text, which orders correctly only for this shape.
pub fn parse_date(value: &str) -> Result<NaiveDate, EventDateError> {
    if value.is_empty() {
        return Err(EventDateError::Empty);
    }
    if !has_date_shape(value) {
        return Err(EventDateError::Invalid(value.to_string()));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| EventDateError::Invalid(value.to_string()))
}

/// Four digits, dash, two digits, dash, two digits.
fn has_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Inclusive date range used by the range filter.
/// Matching events are ordered by (date, id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DateRange {
    /// First day of the range (inclusive).
    pub start: NaiveDate,
    /// Last day of the range (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range covering a single day.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// A reversed range matches nothing.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}
