// Input validation for event APIs
//
// Requests are checked field by field and every failing field is reported
// at once, keyed by field name, with a fixed user-facing message.

use std::collections::BTreeMap;
use std::fmt;
use webcal_core::{parse_date, validate_event_name, DateRange, NewEvent, NewEventError};

// =============================================================================
// Messages
// =============================================================================

pub const EVENT_DATE_REQUIRED_MESSAGE: &str =
    "The event date with the correct format is required! The correct format is YYYY-MM-DD!";

pub const EVENT_NAME_REQUIRED_MESSAGE: &str = "The event name is required!";

pub const EVENT_NAME_TOO_LONG_MESSAGE: &str = "The event name must be at most 100 characters!";

pub const RANGE_DATE_INVALID_MESSAGE: &str =
    "The date with the correct format is required! The correct format is YYYY-MM-DD!";

// =============================================================================
// Validation Functions
// =============================================================================

/// Validation error - maps failing field names to their messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    fields: BTreeMap<String, String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        write!(f, "invalid fields: {}", names.join(", "))
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn add(&mut self, field: &str, message: &str) {
        self.fields.insert(field.to_string(), message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn message(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.fields
    }
}

/// Validate the fields of a create request and build the event to store
pub fn validate_create_event(
    date: Option<&str>,
    event: Option<&str>,
) -> Result<NewEvent, ValidationError> {
    let mut errors = ValidationError::default();
    let event = event.unwrap_or_default();

    let date = match date.map(parse_date) {
        Some(Ok(date)) => Some(date),
        _ => {
            errors.add("date", EVENT_DATE_REQUIRED_MESSAGE);
            None
        }
    };

    // With a usable date the name is checked by NewEvent itself; without
    // one it is still checked so that every failing field is reported.
    let checked = match date {
        Some(date) => NewEvent::new(event, date).map(Some),
        None => validate_event_name(event).map(|()| None),
    };

    match checked {
        Ok(Some(new_event)) => return Ok(new_event),
        Ok(None) => {}
        Err(err) => errors.add("event", event_name_message(&err)),
    }

    tracing::warn!(error = %errors, "Rejected create event request");
    Err(errors)
}

fn event_name_message(err: &NewEventError) -> &'static str {
    match err {
        NewEventError::EmptyName => EVENT_NAME_REQUIRED_MESSAGE,
        NewEventError::NameTooLong(_) => EVENT_NAME_TOO_LONG_MESSAGE,
    }
}

/// Validate the optional range filter of a list request.
///
/// The filter applies only when both bounds are present and non-empty;
/// otherwise the listing is unfiltered.
pub fn validate_date_range(
    start_time: Option<&str>,
    end_time: Option<&str>,
) -> Result<Option<DateRange>, ValidationError> {
    let (start_time, end_time) = match (start_time, end_time) {
        (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => (start, end),
        _ => return Ok(None),
    };

    let mut errors = ValidationError::default();
    let start = parse_date(start_time)
        .map_err(|_| errors.add("start_time", RANGE_DATE_INVALID_MESSAGE))
        .ok();
    let end = parse_date(end_time)
        .map_err(|_| errors.add("end_time", RANGE_DATE_INVALID_MESSAGE))
        .ok();

    match (start, end) {
        (Some(start), Some(end)) => Ok(Some(DateRange::new(start, end))),
        _ => {
            tracing::warn!(error = %errors, "Rejected event range filter");
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use webcal_core::MAX_EVENT_NAME_CHARS;

    #[test]
    fn test_valid_create() {
        let event = validate_create_event(Some("2024-03-01"), Some("Launch")).unwrap();
        assert_eq!(event.event(), "Launch");
        assert_eq!(event.date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_missing_date() {
        let err = validate_create_event(None, Some("Launch")).unwrap_err();
        assert_eq!(err.message("date"), Some(EVENT_DATE_REQUIRED_MESSAGE));
        assert_eq!(err.message("event"), None);
    }

    #[test]
    fn test_malformed_date() {
        let err = validate_create_event(Some("not-a-date"), Some("Launch")).unwrap_err();
        assert_eq!(err.message("date"), Some(EVENT_DATE_REQUIRED_MESSAGE));
    }

    #[test]
    fn test_missing_or_empty_event() {
        let err = validate_create_event(Some("2024-03-01"), None).unwrap_err();
        assert_eq!(err.message("event"), Some(EVENT_NAME_REQUIRED_MESSAGE));

        let err = validate_create_event(Some("2024-03-01"), Some("")).unwrap_err();
        assert_eq!(err.message("event"), Some(EVENT_NAME_REQUIRED_MESSAGE));
    }

    #[test]
    fn test_event_too_long() {
        let name = "x".repeat(MAX_EVENT_NAME_CHARS + 1);
        let err = validate_create_event(Some("2024-03-01"), Some(&name)).unwrap_err();
        assert_eq!(err.message("event"), Some(EVENT_NAME_TOO_LONG_MESSAGE));
    }

    #[test]
    fn test_whitespace_event_is_empty() {
        let err = validate_create_event(Some("2024-03-01"), Some("   ")).unwrap_err();
        assert_eq!(err.message("event"), Some(EVENT_NAME_REQUIRED_MESSAGE));
    }

    #[test]
    fn test_long_event_with_bad_date_reports_both() {
        let name = "x".repeat(MAX_EVENT_NAME_CHARS + 1);
        let err = validate_create_event(Some("2024-3-1"), Some(&name)).unwrap_err();
        assert_eq!(err.message("date"), Some(EVENT_DATE_REQUIRED_MESSAGE));
        assert_eq!(err.message("event"), Some(EVENT_NAME_TOO_LONG_MESSAGE));
    }

    #[test]
    fn test_signed_year_rejected() {
        let err = validate_create_event(Some("-0003-01-01"), Some("Launch")).unwrap_err();
        assert_eq!(err.message("date"), Some(EVENT_DATE_REQUIRED_MESSAGE));

        let err = validate_date_range(Some("2024-01-01"), Some("+20000-01-01")).unwrap_err();
        assert_eq!(err.message("end_time"), Some(RANGE_DATE_INVALID_MESSAGE));
    }

    #[test]
    fn test_all_failures_reported() {
        let fields = validate_create_event(None, None).unwrap_err().into_fields();
        assert_eq!(fields.len(), 2);
        assert!(fields.contains_key("date"));
        assert!(fields.contains_key("event"));
    }

    #[test]
    fn test_range_requires_both_bounds() {
        assert_eq!(validate_date_range(None, None).unwrap(), None);
        assert_eq!(validate_date_range(Some("2024-03-01"), None).unwrap(), None);
        assert_eq!(validate_date_range(None, Some("2024-03-01")).unwrap(), None);
        assert_eq!(validate_date_range(Some(""), Some("2024-03-01")).unwrap(), None);
    }

    #[test]
    fn test_valid_range() {
        let range = validate_date_range(Some("2024-03-01"), Some("2024-03-31"))
            .unwrap()
            .unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }

    #[test]
    fn test_malformed_range_bounds() {
        let err = validate_date_range(Some("yesterday"), Some("2024-03-31")).unwrap_err();
        assert_eq!(err.message("start_time"), Some(RANGE_DATE_INVALID_MESSAGE));
        assert_eq!(err.message("end_time"), None);

        let err = validate_date_range(Some("2024-03-01"), Some("2024/03/31")).unwrap_err();
        assert_eq!(err.message("end_time"), Some(RANGE_DATE_INVALID_MESSAGE));
    }
}
