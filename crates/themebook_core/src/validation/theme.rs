//! Theme catalog validator.
//!
//! # Invariants
//! - Name matches are exact and case-sensitive, as stored.
//! - A theme referenced by any reservation may not be deleted or modified.

use super::error::{ValidationError, ValidationResult};
use crate::model::reservation::Reservation;
use crate::model::theme::Theme;

/// Stateless guard for catalog mutations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeValidator;

impl ThemeValidator {
    pub fn new() -> Self {
        Self
    }

    /// Rejects creation when a theme with the candidate name already exists.
    ///
    /// `existing_with_same_name` is the caller's exact-name lookup result.
    pub fn validate_for_same_name(&self, existing_with_same_name: &[Theme]) -> ValidationResult<()> {
        match existing_with_same_name.first() {
            Some(existing) => Err(ValidationError::DuplicateTheme {
                name: existing.name.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Rejects delete/update while reservations still reference the theme.
    pub fn validate_for_using_theme(
        &self,
        referencing_reservations: &[Reservation],
    ) -> ValidationResult<()> {
        if referencing_reservations.is_empty() {
            return Ok(());
        }
        Err(ValidationError::ThemeInUse)
    }
}
