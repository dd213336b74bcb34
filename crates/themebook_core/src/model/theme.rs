//! Theme catalog domain model.
//!
//! # Responsibility
//! - Define the bookable theme record owned by the catalog store.
//! - Provide the structured partial-update shape used by theme edits.
//!
//! # Invariants
//! - `id` is `None` until the catalog store assigns one.
//! - `name` is the unique business key and must not be blank.
//! - `price` is never negative.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Catalog-assigned identifier for a theme.
pub type ThemeId = i64;

/// Bookable activity/room definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Assigned by the catalog store on insert.
    pub id: Option<ThemeId>,
    /// Unique display name. Compared exactly as stored.
    pub name: String,
    /// Serialized as `desc` to match the catalog column naming.
    #[serde(rename = "desc")]
    pub description: String,
    /// Non-negative price in the smallest currency unit.
    pub price: i64,
}

/// Field-level validation failures for theme records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeValidationError {
    BlankName,
    NegativePrice(i64),
}

impl Display for ThemeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "theme name must not be blank"),
            Self::NegativePrice(price) => {
                write!(f, "theme price must not be negative, got {price}")
            }
        }
    }
}

impl Error for ThemeValidationError {}

impl Theme {
    /// Creates an unsaved theme.
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    /// Checks field-level invariants.
    ///
    /// Uniqueness of `name` is not checked here; it needs catalog state.
    pub fn validate(&self) -> Result<(), ThemeValidationError> {
        if self.name.trim().is_empty() {
            return Err(ThemeValidationError::BlankName);
        }
        if self.price < 0 {
            return Err(ThemeValidationError::NegativePrice(self.price));
        }
        Ok(())
    }

    /// Returns a copy with every present patch field applied.
    pub fn patched(&self, patch: &ThemePatch) -> Self {
        Self {
            id: self.id,
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            price: patch.price.unwrap_or(self.price),
        }
    }
}

/// Partial theme update. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePatch {
    pub name: Option<String>,
    #[serde(rename = "desc")]
    pub description: Option<String>,
    pub price: Option<i64>,
}

impl ThemePatch {
    /// Returns whether no field would be changed.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.price.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::{Theme, ThemePatch, ThemeValidationError};

    #[test]
    fn validate_rejects_blank_name_and_negative_price() {
        let blank = Theme::new("   ", "desc", 1000);
        assert_eq!(blank.validate(), Err(ThemeValidationError::BlankName));

        let negative = Theme::new("Mystery Room", "desc", -1);
        assert_eq!(
            negative.validate(),
            Err(ThemeValidationError::NegativePrice(-1))
        );

        assert!(Theme::new("Mystery Room", "", 0).validate().is_ok());
    }

    #[test]
    fn patched_applies_only_present_fields() {
        let mut theme = Theme::new("Mystery Room", "locked study", 29_000);
        theme.id = Some(3);

        let patch = ThemePatch {
            price: Some(31_000),
            ..ThemePatch::default()
        };
        let updated = theme.patched(&patch);

        assert_eq!(updated.id, Some(3));
        assert_eq!(updated.name, "Mystery Room");
        assert_eq!(updated.description, "locked study");
        assert_eq!(updated.price, 31_000);
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(ThemePatch::default().is_empty());
        let patch = ThemePatch {
            description: Some(String::new()),
            ..ThemePatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn serializes_description_as_desc() {
        let theme = Theme::new("Mystery Room", "locked study", 29_000);
        let value = serde_json::to_value(&theme).expect("theme should serialize");
        assert_eq!(value["desc"], "locked study");
        assert!(value.get("description").is_none());
    }
}
