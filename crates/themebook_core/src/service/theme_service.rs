//! Theme catalog use-case service.
//!
//! # Responsibility
//! - Validate catalog writes against name uniqueness and booking references.
//! - Provide create, list, get, partial update and delete entry points.
//!
//! # Invariants
//! - Update and delete are refused while any reservation references the theme.
//! - A rename never collides with another theme's name.
//! - Storage constraint conflicts map to the same validation kinds.

use crate::model::theme::{Theme, ThemeId, ThemePatch, ThemeValidationError};
use crate::repo::reservation_repo::ReservationRepository;
use crate::repo::theme_repo::ThemeRepository;
use crate::repo::RepoError;
use crate::validation::{ThemeValidator, ValidationError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from theme service operations.
#[derive(Debug)]
pub enum ThemeServiceError {
    /// Field-level check failed (blank name, negative price).
    InvalidTheme(ThemeValidationError),
    /// Business-rule rejection; surfaced verbatim.
    Validation(ValidationError),
    /// Update carried no fields.
    EmptyPatch,
    ThemeNotFound(ThemeId),
    Repo(RepoError),
    /// Write succeeded but read-back did not return the row.
    InconsistentState(&'static str),
}

impl Display for ThemeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTheme(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::EmptyPatch => write!(f, "theme update must set at least one field"),
            Self::ThemeNotFound(id) => write!(f, "theme not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent theme state: {details}"),
        }
    }
}

impl Error for ThemeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTheme(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ThemeValidationError> for ThemeServiceError {
    fn from(value: ThemeValidationError) -> Self {
        Self::InvalidTheme(value)
    }
}

impl From<ValidationError> for ThemeServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ThemeServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::InvalidTheme(err) => Self::InvalidTheme(err),
            RepoError::ThemeNotFound(id) => Self::ThemeNotFound(id),
            RepoError::ThemeNameTaken(name) => {
                Self::Validation(ValidationError::DuplicateTheme { name })
            }
            RepoError::ThemeReferenced(_) => Self::Validation(ValidationError::ThemeInUse),
            other => Self::Repo(other),
        }
    }
}

/// Catalog creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateThemeRequest {
    pub name: String,
    pub description: String,
    pub price: i64,
}

/// Catalog facade over the theme store, consulting the reservation store
/// before destructive edits.
pub struct ThemeService<T: ThemeRepository, R: ReservationRepository> {
    themes: T,
    reservations: R,
    validator: ThemeValidator,
}

impl<T: ThemeRepository, R: ReservationRepository> ThemeService<T, R> {
    pub fn new(themes: T, reservations: R) -> Self {
        Self {
            themes,
            reservations,
            validator: ThemeValidator::new(),
        }
    }

    /// Adds a theme to the catalog.
    ///
    /// # Errors
    /// - `InvalidTheme` for a blank name or negative price.
    /// - `Validation(DuplicateTheme)` when the name is already used.
    pub fn create_theme(&self, request: &CreateThemeRequest) -> Result<ThemeId, ThemeServiceError> {
        let theme = Theme::new(
            request.name.clone(),
            request.description.clone(),
            request.price,
        );
        theme.validate()?;

        let same_name = self.themes.find_by_name(&theme.name)?;
        self.validator
            .validate_for_same_name(&same_name)
            .inspect_err(|err| {
                warn!("event=theme_create module=service status=rejected error={err}")
            })?;

        let id = self.themes.create_theme(&theme)?;
        info!("event=theme_create module=service status=ok theme_id={id}");
        Ok(id)
    }

    /// Lists the catalog ordered by id.
    pub fn list_themes(&self) -> Result<Vec<Theme>, ThemeServiceError> {
        Ok(self.themes.list_themes()?)
    }

    pub fn get_theme(&self, id: ThemeId) -> Result<Theme, ThemeServiceError> {
        self.themes
            .get_theme(id)?
            .ok_or(ThemeServiceError::ThemeNotFound(id))
    }

    /// Applies a partial update and returns the stored result.
    ///
    /// # Errors
    /// - `EmptyPatch` when no field is present.
    /// - `Validation(ThemeInUse)` while reservations reference the theme.
    /// - `Validation(DuplicateTheme)` when renaming onto another theme's name.
    pub fn update_theme(
        &self,
        id: ThemeId,
        patch: &ThemePatch,
    ) -> Result<Theme, ThemeServiceError> {
        if patch.is_empty() {
            return Err(ThemeServiceError::EmptyPatch);
        }

        let current = self.get_theme(id)?;
        self.ensure_not_in_use(id, "theme_update")?;

        let updated = current.patched(patch);
        updated.validate()?;

        if updated.name != current.name {
            let same_name: Vec<Theme> = self
                .themes
                .find_by_name(&updated.name)?
                .into_iter()
                .filter(|theme| theme.id != Some(id))
                .collect();
            self.validator.validate_for_same_name(&same_name)?;
        }

        self.themes.update_theme(id, patch)?;
        info!("event=theme_update module=service status=ok theme_id={id}");

        self.themes
            .get_theme(id)?
            .ok_or(ThemeServiceError::InconsistentState(
                "updated theme not found in read-back",
            ))
    }

    /// Removes a theme that no reservation references.
    pub fn delete_theme(&self, id: ThemeId) -> Result<(), ThemeServiceError> {
        self.ensure_not_in_use(id, "theme_delete")?;
        self.themes.delete_theme(id)?;
        info!("event=theme_delete module=service status=ok theme_id={id}");
        Ok(())
    }

    fn ensure_not_in_use(&self, id: ThemeId, event: &str) -> Result<(), ThemeServiceError> {
        let referencing = self.reservations.find_by_theme_id(id)?;
        self.validator
            .validate_for_using_theme(&referencing)
            .map_err(|err| {
                warn!(
                    "event={event} module=service status=rejected theme_id={id} reservations={} error={err}",
                    referencing.len()
                );
                err.into()
            })
    }
}
