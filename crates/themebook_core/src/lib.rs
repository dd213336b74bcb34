//! Core domain logic for themebook: theme catalog and slot reservations.
//! This crate is the single source of truth for booking invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LoggingError};
pub use model::reservation::{
    CreateReservationRequest, NewReservation, Reservation, ReservationId, ThemeSnapshot,
};
pub use model::theme::{Theme, ThemeId, ThemePatch, ThemeValidationError};
pub use repo::reservation_repo::{ReservationRepository, SqliteReservationRepository};
pub use repo::theme_repo::{SqliteThemeRepository, ThemeRepository};
pub use repo::{RepoError, RepoResult};
pub use service::reservation_service::{ReservationService, ReservationServiceError};
pub use service::theme_service::{CreateThemeRequest, ThemeService, ThemeServiceError};
pub use validation::{
    Clock, FixedClock, ReservationValidator, SystemClock, ThemeValidator, ValidationError,
    ValidationResult,
};

/// Minimal health-check API used by the CLI `ping` command.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
