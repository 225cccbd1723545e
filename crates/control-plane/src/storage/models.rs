// Database models (internal, may differ from public DTOs)

use chrono::NaiveDate;
use sqlx::FromRow;
use webcal_core::{Event, NewEvent};

// ============================================
// Event models
// ============================================

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct EventRow {
    pub id: i64,
    pub event: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct CreateEventRow {
    pub event: String,
    pub date: NaiveDate,
}

impl From<NewEvent> for CreateEventRow {
    fn from(new_event: NewEvent) -> Self {
        let (event, date) = new_event.into_parts();
        Self { event, date }
    }
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            event: row.event,
            date: row.date,
        }
    }
}
