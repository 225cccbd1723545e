// Webcal core
//
// Domain types shared by the HTTP layer and the storage layer.
//
// Key design decisions:
// - An Event is a (label, date) pair with a store-assigned integer id
// - Dates are plain calendar dates (no time, no time zone)
// - Validation rules live here; user-facing messages belong to the HTTP layer

pub mod date;
pub mod event;

pub use date::{parse_date, DateRange, EventDateError, DATE_FORMAT};
pub use event::{validate_event_name, Event, NewEvent, NewEventError, MAX_EVENT_NAME_CHARS};
