//! PostgreSQL-backed band store over a deadpool connection pool.

use crate::error::{CatalogError, Result};
use crate::filter::BandFilter;
use crate::model::Band;
use crate::store::{BandStore, InsertOutcome};
use async_trait::async_trait;
use deadpool_postgres::{Config as PoolConfig, Object, Pool, Runtime};
use std::time::Duration;
use tokio_postgres::{NoTls, Row};
use tracing::info;

pub struct PgBandStore {
    pool: Pool,
}

impl PgBandStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Ensure the `band` table exists. Called once at boot; a failure
    /// here is a fatal configuration error, not a request-time error.
    pub async fn ensure_schema(&self) -> Result<()> {
        let client = self.client().await?;
        client
            .batch_execute(
                "CREATE TABLE IF NOT EXISTS band (
                    name VARCHAR(30) PRIMARY KEY,
                    year INTEGER NOT NULL,
                    rating SMALLINT NOT NULL
                )",
            )
            .await?;

        info!("Ensured band table exists");
        Ok(())
    }

    async fn client(&self) -> Result<Object> {
        self.pool.get().await.map_err(CatalogError::from)
    }
}

fn row_to_band(row: &Row) -> Band {
    let rating: i16 = row.get(2);
    Band {
        name: row.get(0),
        year: row.get(1),
        rating: rating as u8,
    }
}

#[async_trait]
impl BandStore for PgBandStore {
    async fn ping(&self) -> Result<()> {
        let client = self.client().await?;
        client.execute("SELECT 1", &[]).await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Band>> {
        let client = self.client().await?;
        let rows = client
            .query("SELECT name, year, rating FROM band ORDER BY name", &[])
            .await?;

        Ok(rows.iter().map(row_to_band).collect())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Band>> {
        let client = self.client().await?;
        let row = client
            .query_opt(
                "SELECT name, year, rating FROM band WHERE name = $1",
                &[&name],
            )
            .await?;

        Ok(row.as_ref().map(row_to_band))
    }

    async fn list_where(&self, filter: BandFilter) -> Result<Vec<Band>> {
        let client = self.client().await?;

        let rows = match filter {
            BandFilter::Year(year) => {
                client
                    .query(
                        "SELECT name, year, rating FROM band WHERE year = $1 ORDER BY name",
                        &[&year],
                    )
                    .await?
            }
            BandFilter::Rating(rating) => {
                client
                    .query(
                        "SELECT name, year, rating FROM band WHERE rating = $1 ORDER BY name",
                        &[&(rating as i16)],
                    )
                    .await?
            }
            BandFilter::YearAndRating(year, rating) => {
                client
                    .query(
                        "SELECT name, year, rating FROM band \
                         WHERE year = $1 AND rating = $2 ORDER BY name",
                        &[&year, &(rating as i16)],
                    )
                    .await?
            }
        };

        Ok(rows.iter().map(row_to_band).collect())
    }

    async fn insert(&self, band: &Band) -> Result<InsertOutcome> {
        let client = self.client().await?;

        // The primary key carries the uniqueness guarantee; a concurrent
        // insert of the same name makes exactly one of the calls report
        // zero rows.
        let rows = client
            .execute(
                "INSERT INTO band (name, year, rating) VALUES ($1, $2, $3) \
                 ON CONFLICT (name) DO NOTHING",
                &[&band.name, &band.year, &(band.rating as i16)],
            )
            .await?;

        if rows == 1 {
            Ok(InsertOutcome::Created)
        } else {
            Ok(InsertOutcome::Conflict)
        }
    }

    async fn update_year_rating(&self, name: &str, year: i32, rating: u8) -> Result<u64> {
        let client = self.client().await?;
        let rows = client
            .execute(
                "UPDATE band SET year = $1, rating = $2 WHERE name = $3",
                &[&year, &(rating as i16), &name],
            )
            .await?;

        Ok(rows)
    }

    async fn update_rating(&self, name: &str, rating: u8) -> Result<u64> {
        let client = self.client().await?;
        let rows = client
            .execute(
                "UPDATE band SET rating = $1 WHERE name = $2",
                &[&(rating as i16), &name],
            )
            .await?;

        Ok(rows)
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64> {
        let client = self.client().await?;
        let rows = client
            .execute("DELETE FROM band WHERE name = $1", &[&name])
            .await?;

        Ok(rows)
    }
}

/// Build the shared connection pool. Fails fast on an unusable URL; the
/// first connection is only attempted on use, so callers should follow
/// up with [`BandStore::ping`] at startup.
pub fn create_pool(database_url: &str, max_size: u32) -> anyhow::Result<Pool> {
    let mut cfg = PoolConfig::new();
    cfg.url = Some(database_url.to_string());

    cfg.pool = Some(deadpool_postgres::PoolConfig {
        max_size: max_size as usize,
        timeouts: deadpool_postgres::Timeouts {
            wait: Some(Duration::from_secs(5)),
            create: Some(Duration::from_secs(5)),
            recycle: Some(Duration::from_secs(5)),
        },
        ..Default::default()
    });

    cfg.create_pool(Some(Runtime::Tokio1), NoTls)
        .map_err(|e| anyhow::anyhow!("Failed to create pool: {}", e))
}
