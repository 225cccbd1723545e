// Event service for business logic
//
// Every operation is a single statement against the store; the service
// itself keeps no state between calls.

use crate::storage::{CreateEventRow, StorageBackend};
use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::instrument;
use webcal_core::{DateRange, Event, NewEvent};

pub struct EventService {
    db: Arc<StorageBackend>,
}

impl EventService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    /// Store a new event and return it with its assigned id.
    #[instrument(skip(self, new_event), fields(event.date = %new_event.date()))]
    pub async fn create(&self, new_event: NewEvent) -> Result<Event> {
        let row = self.db.create_event(CreateEventRow::from(new_event)).await?;
        tracing::info!(event.id = row.id, "Event created");
        Ok(Event::from(row))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Option<Event>> {
        let row = self.db.get_event(id).await?;
        Ok(row.map(Event::from))
    }

    /// List events. With a range, only events dated inside it are returned,
    /// ordered by (date, id); without one, every event in store order.
    #[instrument(skip(self))]
    pub async fn list(&self, range: Option<DateRange>) -> Result<Vec<Event>> {
        let rows = match range {
            Some(range) => self.db.list_events_in_range(range).await?,
            None => self.db.list_events().await?,
        };
        Ok(rows.into_iter().map(Event::from).collect())
    }

    /// Events dated exactly `date`.
    pub async fn list_on(&self, date: NaiveDate) -> Result<Vec<Event>> {
        self.list(Some(DateRange::day(date))).await
    }

    /// Remove an event. Returns false when no event had that id.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let deleted = self.db.delete_event(id).await?;
        if deleted {
            tracing::info!(event.id = id, "Event deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn service() -> EventService {
        EventService::new(Arc::new(StorageBackend::in_memory()))
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service();

        let created = service
            .create(NewEvent::new("Launch", date("2024-03-01")).unwrap())
            .await
            .unwrap();
        let fetched = service.get(created.id).await.unwrap().unwrap();

        assert_eq!(fetched.event, "Launch");
        assert_eq!(fetched.date, date("2024-03-01"));
    }

    #[tokio::test]
    async fn test_list_on_matches_single_day() {
        let service = service();
        let today = date("2024-03-02");

        let yesterday = service
            .create(NewEvent::new("Yesterday", date("2024-03-01")).unwrap())
            .await
            .unwrap();
        let todays = service
            .create(NewEvent::new("Today", today).unwrap())
            .await
            .unwrap();

        let events = service.list_on(today).await.unwrap();
        assert_eq!(events, vec![todays]);
        assert!(!events.contains(&yesterday));
    }

    #[tokio::test]
    async fn test_list_without_range_returns_everything() {
        let service = service();
        for day in ["2024-03-03", "2024-01-01", "2025-12-31"] {
            service
                .create(NewEvent::new("Event", date(day)).unwrap())
                .await
                .unwrap();
        }

        assert_eq!(service.list(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let service = service();
        assert!(!service.delete(99).await.unwrap());
    }
}
