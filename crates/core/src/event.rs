// Event domain types
//
// These types represent the Event entity.
// Used by both the API and the storage layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Longest event label accepted, in characters (the column is VARCHAR(100)).
pub const MAX_EVENT_NAME_CHARS: usize = 100;

/// Event - one dated calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Event {
    /// Store-assigned identifier. Never reused after deletion.
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    pub id: i64,
    /// Event label.
    #[cfg_attr(feature = "openapi", schema(example = "Launch"))]
    pub event: String,
    /// Calendar date of the event (YYYY-MM-DD).
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2024-03-01"))]
    pub date: NaiveDate,
}

/// Reasons a label cannot become an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NewEventError {
    #[error("event name is empty")]
    EmptyName,

    #[error("event name is {0} characters long (max: {MAX_EVENT_NAME_CHARS})")]
    NameTooLong(usize),
}

/// A validated event that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    event: String,
    date: NaiveDate,
}

impl NewEvent {
    /// Build a new event. The label must contain something other than
    /// whitespace and be at most [`MAX_EVENT_NAME_CHARS`] characters.
    pub fn new(event: impl Into<String>, date: NaiveDate) -> Result<Self, NewEventError> {
        let event = event.into();
        validate_event_name(&event)?;
        Ok(Self { event, date })
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn into_parts(self) -> (String, NaiveDate) {
        (self.event, self.date)
    }
}

/// Check an event label without building a [`NewEvent`].
pub fn validate_event_name(event: &str) -> Result<(), NewEventError> {
    if event.trim().is_empty() {
        return Err(NewEventError::EmptyName);
    }
    let chars = event.chars().count();
    if chars > MAX_EVENT_NAME_CHARS {
        return Err(NewEventError::NameTooLong(chars));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launch_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_new_event() {
        let event = NewEvent::new("Launch", launch_date()).unwrap();
        assert_eq!(event.event(), "Launch");
        assert_eq!(event.date(), launch_date());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(
            NewEvent::new("", launch_date()),
            Err(NewEventError::EmptyName)
        );
        assert_eq!(
            NewEvent::new("   ", launch_date()),
            Err(NewEventError::EmptyName)
        );
    }

    #[test]
    fn test_name_length_counts_chars_not_bytes() {
        let max = "é".repeat(MAX_EVENT_NAME_CHARS);
        assert!(NewEvent::new(max, launch_date()).is_ok());

        let too_long = "x".repeat(MAX_EVENT_NAME_CHARS + 1);
        assert_eq!(
            NewEvent::new(too_long, launch_date()),
            Err(NewEventError::NameTooLong(MAX_EVENT_NAME_CHARS + 1))
        );
    }

    #[test]
    fn test_event_serializes_date_as_iso_day() {
        let event = Event {
            id: 7,
            event: "Launch".to_string(),
            date: launch_date(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["event"], "Launch");
        assert_eq!(json["date"], "2024-03-01");
    }
}
