//! Record service: the six band operations and their mutation rules.
//!
//! Mutations lean on the store's atomic conditional writes instead of a
//! separate check-then-act step: Create uses a conditional insert, Replace
//! and Patch use the matched-row count of a single UPDATE. A zero-row
//! update is classified afterwards — absent record means not-found, a
//! record that is still present means not-modified.

use crate::error::{CatalogError, Result};
use crate::filter::{self, FilterQuery};
use crate::model::{Band, RATING_MAX, RATING_MIN};
use crate::store::{BandStore, InsertOutcome};
use tracing::debug;

pub struct BandService<S> {
    store: S,
}

impl<S: BandStore> BandService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn ping(&self) -> Result<()> {
        self.store.ping().await
    }

    /// All records. An empty catalog is a valid empty list, not an error.
    pub async fn list(&self) -> Result<Vec<Band>> {
        self.store.list_all().await
    }

    /// Records matching the query constraints. Zero matches after a
    /// filter is a not-found condition, unlike the unfiltered list.
    pub async fn list_filtered(&self, query: &FilterQuery) -> Result<Vec<Band>> {
        let predicate = filter::resolve(query)?;
        let bands = self.store.list_where(predicate).await?;

        if bands.is_empty() {
            return Err(CatalogError::NoMatchingRecords);
        }

        Ok(bands)
    }

    pub async fn get(&self, name: &str) -> Result<Band> {
        self.store
            .get_by_name(name)
            .await?
            .ok_or_else(|| CatalogError::BandNotFound {
                name: name.to_string(),
            })
    }

    /// Create a new record. A duplicate name is a non-mutating
    /// already-exists outcome, not a hard conflict.
    pub async fn create(&self, band: Band) -> Result<Band> {
        band.validate()?;

        match self.store.insert(&band).await? {
            InsertOutcome::Created => {
                debug!("Created band {}", band.name);
                Ok(band)
            }
            InsertOutcome::Conflict => Err(CatalogError::AlreadyExists { name: band.name }),
        }
    }

    /// Full update of year and rating, keyed by the body's name.
    pub async fn replace(&self, band: Band) -> Result<Band> {
        band.validate()?;

        let rows = self
            .store
            .update_year_rating(&band.name, band.year, band.rating)
            .await?;
        if rows == 0 {
            return Err(self.unmodified_outcome(&band.name).await);
        }

        debug!("Replaced band {}", band.name);
        Ok(band)
    }

    /// Update only the rating, from raw path parameters. The rate must
    /// parse to a non-zero integer inside the valid rating range; the
    /// parse-failure and zero cases stay distinguishable by message.
    pub async fn patch_rating(&self, name: &str, rate: &str) -> Result<()> {
        if name.is_empty() {
            return Err(CatalogError::Validation {
                message: "band name must not be empty".to_string(),
            });
        }

        let rate: i32 = rate.trim().parse().map_err(|_| CatalogError::Validation {
            message: format!("rate '{}' is not an integer", rate),
        })?;
        if rate == 0 {
            return Err(CatalogError::Validation {
                message: "rate must be a non-zero integer".to_string(),
            });
        }
        if rate < RATING_MIN as i32 || rate > RATING_MAX as i32 {
            return Err(CatalogError::Validation {
                message: format!(
                    "rating must be between {} and {}, got {}",
                    RATING_MIN, RATING_MAX, rate
                ),
            });
        }

        let rows = self.store.update_rating(name, rate as u8).await?;
        if rows == 0 {
            return Err(self.unmodified_outcome(name).await);
        }

        debug!("Patched rating of band {} to {}", name, rate);
        Ok(())
    }

    /// Physical delete. An absent key is not-found, consistent with the
    /// other keyed operations.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let rows = self.store.delete_by_name(name).await?;
        if rows == 0 {
            return Err(CatalogError::BandNotFound {
                name: name.to_string(),
            });
        }

        debug!("Deleted band {}", name);
        Ok(())
    }

    /// Classify a zero-row update: the record either vanished (not found)
    /// or is still present and simply was not modified.
    async fn unmodified_outcome(&self, name: &str) -> CatalogError {
        match self.store.get_by_name(name).await {
            Ok(Some(_)) => CatalogError::NotModified {
                name: name.to_string(),
            },
            Ok(None) => CatalogError::BandNotFound {
                name: name.to_string(),
            },
            Err(err) => err,
        }
    }
}
