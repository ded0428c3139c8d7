//! Filter resolution for the list endpoint.
//!
//! Query constraints arrive as raw strings. Absent or unparsable values
//! count as unset; a value that parses (including zero) is a real
//! constraint. At least one constraint must survive parsing, otherwise
//! the request is rejected.

use crate::error::{CatalogError, Result};
use crate::model::Band;
use serde::Deserialize;

/// Raw query parameters as received on `GET /api/bands`.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub year: Option<String>,
    pub rating: Option<String>,
}

impl FilterQuery {
    /// True when neither parameter was supplied with any content.
    /// `?year=` counts as absent.
    pub fn is_unfiltered(&self) -> bool {
        self.year.as_deref().map_or(true, str::is_empty)
            && self.rating.as_deref().map_or(true, str::is_empty)
    }
}

/// A resolved filter predicate. Multiple constraints are conjunctive;
/// there is no OR mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandFilter {
    Year(i32),
    Rating(u8),
    YearAndRating(i32, u8),
}

impl BandFilter {
    pub fn matches(&self, band: &Band) -> bool {
        match *self {
            BandFilter::Year(year) => band.year == year,
            BandFilter::Rating(rating) => band.rating == rating,
            BandFilter::YearAndRating(year, rating) => {
                band.year == year && band.rating == rating
            }
        }
    }
}

/// Resolve raw query constraints into a single predicate.
pub fn resolve(query: &FilterQuery) -> Result<BandFilter> {
    let year = query.year.as_deref().and_then(|raw| raw.trim().parse::<i32>().ok());
    let rating = query
        .rating
        .as_deref()
        .and_then(|raw| raw.trim().parse::<u8>().ok());

    match (year, rating) {
        (None, None) => Err(CatalogError::Validation {
            message: "must filter by year or rating".to_string(),
        }),
        (Some(year), None) => Ok(BandFilter::Year(year)),
        (None, Some(rating)) => Ok(BandFilter::Rating(rating)),
        (Some(year), Some(rating)) => Ok(BandFilter::YearAndRating(year, rating)),
    }
}
