//! In-memory band store: a key-ordered table behind an async lock.
//!
//! Row-count semantics mirror the PostgreSQL store: updates report rows
//! matched (an update to unchanged values still counts), deletes report
//! rows removed.

use crate::error::Result;
use crate::filter::BandFilter;
use crate::model::Band;
use crate::store::{BandStore, InsertOutcome};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryBandStore {
    bands: RwLock<BTreeMap<String, Band>>,
}

impl MemoryBandStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BandStore for MemoryBandStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Band>> {
        Ok(self.bands.read().await.values().cloned().collect())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Band>> {
        Ok(self.bands.read().await.get(name).cloned())
    }

    async fn list_where(&self, filter: BandFilter) -> Result<Vec<Band>> {
        Ok(self
            .bands
            .read()
            .await
            .values()
            .filter(|band| filter.matches(band))
            .cloned()
            .collect())
    }

    async fn insert(&self, band: &Band) -> Result<InsertOutcome> {
        let mut bands = self.bands.write().await;

        if bands.contains_key(&band.name) {
            return Ok(InsertOutcome::Conflict);
        }

        bands.insert(band.name.clone(), band.clone());
        Ok(InsertOutcome::Created)
    }

    async fn update_year_rating(&self, name: &str, year: i32, rating: u8) -> Result<u64> {
        let mut bands = self.bands.write().await;

        match bands.get_mut(name) {
            Some(band) => {
                band.year = year;
                band.rating = rating;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn update_rating(&self, name: &str, rating: u8) -> Result<u64> {
        let mut bands = self.bands.write().await;

        match bands.get_mut(name) {
            Some(band) => {
                band.rating = rating;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64> {
        let mut bands = self.bands.write().await;

        match bands.remove(name) {
            Some(_) => Ok(1),
            None => Ok(0),
        }
    }
}
