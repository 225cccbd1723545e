// Storage layer for Webcal control-plane
// Decision: Support both SQLite (production) and in-memory (dev mode)
//
// - Database: sqlx/SQLite repository for the events table
// - InMemoryDatabase: parking_lot-guarded map with the same API
// - StorageBackend: enum dispatch over the two

pub mod backend;
pub mod memory;
pub mod models;
pub mod repositories;

pub use backend::StorageBackend;
pub use memory::InMemoryDatabase;
pub use models::*;
pub use repositories::*;
