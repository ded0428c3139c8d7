//! Band record model and validation rules.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};

pub const NAME_MIN_LEN: usize = 4;
pub const NAME_MAX_LEN: usize = 30;
pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 4;
pub const DEFAULT_RATING: u8 = 3;

/// One band record. The wire format uses capitalized field names
/// (`Name`, `Year`, `Rating`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Year")]
    pub year: i32,

    #[serde(rename = "Rating", default = "default_rating")]
    pub rating: u8,
}

fn default_rating() -> u8 {
    DEFAULT_RATING
}

impl Band {
    /// Check the data-model constraints: name length 4-30 characters,
    /// rating in [1,4]. Out-of-range values are rejected, never clamped.
    pub fn validate(&self) -> Result<()> {
        let name_len = self.name.chars().count();
        if name_len < NAME_MIN_LEN || name_len > NAME_MAX_LEN {
            return Err(CatalogError::Validation {
                message: format!(
                    "band name must be {} to {} characters, got {}",
                    NAME_MIN_LEN, NAME_MAX_LEN, name_len
                ),
            });
        }

        if self.rating < RATING_MIN || self.rating > RATING_MAX {
            return Err(CatalogError::Validation {
                message: format!(
                    "rating must be between {} and {}, got {}",
                    RATING_MIN, RATING_MAX, self.rating
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(name: &str, rating: u8) -> Band {
        Band {
            name: name.to_string(),
            year: 1990,
            rating,
        }
    }

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(band("Tool", 1).validate().is_ok()); // 4 chars, min rating
        assert!(band("abcdefghijklmnopqrstuvwxyz0123", 4).validate().is_ok()); // 30 chars
    }

    #[test]
    fn test_validate_rejects_name_length() {
        assert!(band("ZZ", 3).validate().is_err()); // Too short
        assert!(band("abcdefghijklmnopqrstuvwxyz01234", 3).validate().is_err()); // 31 chars
    }

    #[test]
    fn test_validate_rejects_rating_range() {
        assert!(band("Nirvana", 0).validate().is_err());
        assert!(band("Nirvana", 5).validate().is_err());
    }

    #[test]
    fn test_rating_defaults_to_three() {
        let band: Band = serde_json::from_str(r#"{"Name":"Nirvana","Year":1987}"#).unwrap();
        assert_eq!(band.rating, DEFAULT_RATING);
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(band("Nirvana", 4)).unwrap();
        assert_eq!(json["Name"], "Nirvana");
        assert_eq!(json["Year"], 1990);
        assert_eq!(json["Rating"], 4);
    }
}
