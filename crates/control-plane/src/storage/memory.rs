// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: IDs come from a monotonically increasing counter and are never reused
//
// This implementation mirrors the SQLite repository API backed by an
// in-memory BTreeMap, allowing the service to run without a database file.

use anyhow::Result;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use webcal_core::DateRange;

use super::models::*;

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
#[derive(Default)]
pub struct InMemoryDatabase {
    events: RwLock<BTreeMap<i64, EventRow>>,
    // Last issued event id
    last_event_id: AtomicI64,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(&self, input: CreateEventRow) -> Result<EventRow> {
        let id = self.last_event_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = EventRow {
            id,
            event: input.event,
            date: input.date,
        };
        self.events.write().insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_event(&self, id: i64) -> Result<Option<EventRow>> {
        Ok(self.events.read().get(&id).cloned())
    }

    pub async fn list_events(&self) -> Result<Vec<EventRow>> {
        Ok(self.events.read().values().cloned().collect())
    }

    pub async fn list_events_in_range(&self, range: DateRange) -> Result<Vec<EventRow>> {
        let events = self.events.read();
        let mut result: Vec<_> = events
            .values()
            .filter(|e| range.contains(e.date))
            .cloned()
            .collect();
        result.sort_by(|a, b| (a.date, a.id).cmp(&(b.date, b.id)));
        Ok(result)
    }

    pub async fn delete_event(&self, id: i64) -> Result<bool> {
        Ok(self.events.write().remove(&id).is_some())
    }
}
