// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// This module provides a unified StorageBackend enum that can work with
// either SQLite (production) or in-memory (dev mode) storage.

use anyhow::Result;
use std::sync::Arc;
use webcal_core::DateRange;

use super::memory::InMemoryDatabase;
use super::models::*;
use super::repositories::Database;

/// Storage backend that can be either SQLite or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// SQLite database (production)
    Sqlite(Database),
    /// In-memory database (dev mode)
    InMemory(Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Create a SQLite storage backend from a database URL
    pub async fn sqlite(database_url: &str) -> Result<Self> {
        let db = Database::from_url(database_url).await?;
        Ok(Self::Sqlite(db))
    }

    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(InMemoryDatabase::new()))
    }

    /// Short backend name, reported by the health endpoint
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::InMemory(_) => "memory",
        }
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(&self, input: CreateEventRow) -> Result<EventRow> {
        match self {
            Self::Sqlite(db) => db.create_event(input).await,
            Self::InMemory(db) => db.create_event(input).await,
        }
    }

    pub async fn get_event(&self, id: i64) -> Result<Option<EventRow>> {
        match self {
            Self::Sqlite(db) => db.get_event(id).await,
            Self::InMemory(db) => db.get_event(id).await,
        }
    }

    pub async fn list_events(&self) -> Result<Vec<EventRow>> {
        match self {
            Self::Sqlite(db) => db.list_events().await,
            Self::InMemory(db) => db.list_events().await,
        }
    }

    pub async fn list_events_in_range(&self, range: DateRange) -> Result<Vec<EventRow>> {
        match self {
            Self::Sqlite(db) => db.list_events_in_range(range).await,
            Self::InMemory(db) => db.list_events_in_range(range).await,
        }
    }

    pub async fn delete_event(&self, id: i64) -> Result<bool> {
        match self {
            Self::Sqlite(db) => db.delete_event(id).await,
            Self::InMemory(db) => db.delete_event(id).await,
        }
    }
}

impl From<Database> for StorageBackend {
    fn from(db: Database) -> Self {
        Self::Sqlite(db)
    }
}
