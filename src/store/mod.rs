//! Store gateway: a thin interface over the `band` table.
//!
//! The service is generic over [`BandStore`] so it can run against the
//! PostgreSQL-backed store in production and the in-memory store in tests.

mod memory;
mod postgres;

pub use memory::MemoryBandStore;
pub use postgres::{create_pool, PgBandStore};

use crate::error::Result;
use crate::filter::BandFilter;
use crate::model::Band;
use async_trait::async_trait;

/// Outcome of a conditional insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Created,
    /// A record with the same name already exists; nothing was written.
    Conflict,
}

#[async_trait]
pub trait BandStore: Send + Sync {
    /// Connectivity probe, used at startup and by the health endpoint.
    async fn ping(&self) -> Result<()>;

    async fn list_all(&self) -> Result<Vec<Band>>;

    async fn get_by_name(&self, name: &str) -> Result<Option<Band>>;

    async fn list_where(&self, filter: BandFilter) -> Result<Vec<Band>>;

    /// Insert if and only if no record with the same name exists. The
    /// uniqueness guarantee lives here, in one atomic write, so two
    /// concurrent inserts of the same name cannot both report Created.
    async fn insert(&self, band: &Band) -> Result<InsertOutcome>;

    /// Update year and rating for the named record. Returns the number of
    /// rows matched; zero means the record is absent.
    async fn update_year_rating(&self, name: &str, year: i32, rating: u8) -> Result<u64>;

    /// Update only the rating. Returns rows matched.
    async fn update_rating(&self, name: &str, rating: u8) -> Result<u64>;

    /// Physically delete the named record. Returns rows removed.
    async fn delete_by_name(&self, name: &str) -> Result<u64>;
}
