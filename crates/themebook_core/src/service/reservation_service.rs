//! Reservation use-case service.
//!
//! # Responsibility
//! - Fetch slot occupants, hand them to the validator, then persist.
//! - Resolve the booked theme explicitly from the request's `theme_id`.
//!
//! # Invariants
//! - Validation runs before the theme lookup and the insert.
//! - A storage-level slot conflict is reported as `DuplicateReservation`,
//!   the same kind the validator raises.

use crate::model::reservation::{
    CreateReservationRequest, NewReservation, Reservation, ReservationId,
};
use crate::model::theme::ThemeId;
use crate::repo::reservation_repo::ReservationRepository;
use crate::repo::theme_repo::ThemeRepository;
use crate::repo::RepoError;
use crate::validation::{Clock, ReservationValidator, SystemClock, ValidationError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from reservation service operations.
#[derive(Debug)]
pub enum ReservationServiceError {
    /// Business-rule rejection; surfaced verbatim.
    Validation(ValidationError),
    /// Requested theme does not exist in the catalog.
    ThemeNotFound(ThemeId),
    ReservationNotFound(ReservationId),
    Repo(RepoError),
}

impl Display for ReservationServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::ThemeNotFound(id) => write!(f, "theme not found: {id}"),
            Self::ReservationNotFound(id) => write!(f, "reservation not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReservationServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ReservationServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ReservationServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::SlotTaken { date, time } => {
                Self::Validation(ValidationError::DuplicateReservation {
                    requested_at: date.and_time(time),
                })
            }
            RepoError::ThemeNotFound(id) => Self::ThemeNotFound(id),
            RepoError::ReservationNotFound(id) => Self::ReservationNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Booking facade over the reservation and theme stores.
pub struct ReservationService<R, T, C = SystemClock>
where
    R: ReservationRepository,
    T: ThemeRepository,
    C: Clock,
{
    reservations: R,
    themes: T,
    validator: ReservationValidator<C>,
}

impl<R: ReservationRepository, T: ThemeRepository> ReservationService<R, T, SystemClock> {
    /// Creates a service validating against the local wall clock.
    pub fn new(reservations: R, themes: T) -> Self {
        Self::with_clock(reservations, themes, SystemClock)
    }
}

impl<R, T, C> ReservationService<R, T, C>
where
    R: ReservationRepository,
    T: ThemeRepository,
    C: Clock,
{
    pub fn with_clock(reservations: R, themes: T, clock: C) -> Self {
        Self {
            reservations,
            themes,
            validator: ReservationValidator::with_clock(clock),
        }
    }

    /// Books the requested slot and returns the new reservation id.
    ///
    /// # Errors
    /// - `Validation(InvalidRequest)` when the slot is not in the future.
    /// - `Validation(DuplicateReservation)` when the slot is already booked.
    /// - `ThemeNotFound` when `request.theme_id` is not in the catalog.
    pub fn create_reservation(
        &self,
        request: &CreateReservationRequest,
    ) -> Result<ReservationId, ReservationServiceError> {
        let existing = self
            .reservations
            .find_by_date_and_time(request.date, request.time)?;
        if let Err(err) = self.validator.validate_for_create(request, &existing) {
            warn!(
                "event=reservation_create module=service status=rejected theme_id={} error={}",
                request.theme_id, err
            );
            return Err(err.into());
        }

        let theme = self
            .themes
            .get_theme(request.theme_id)?
            .ok_or(ReservationServiceError::ThemeNotFound(request.theme_id))?;

        let id = self
            .reservations
            .create_reservation(&NewReservation::from_request(request, &theme))
            .map_err(|err| {
                warn!(
                    "event=reservation_create module=service status=error theme_id={} error={}",
                    request.theme_id, err
                );
                ReservationServiceError::from(err)
            })?;

        info!(
            "event=reservation_create module=service status=ok reservation_id={} theme_id={}",
            id, request.theme_id
        );
        Ok(id)
    }

    pub fn get_reservation(
        &self,
        id: ReservationId,
    ) -> Result<Reservation, ReservationServiceError> {
        self.reservations
            .get_reservation(id)?
            .ok_or(ReservationServiceError::ReservationNotFound(id))
    }

    /// Cancels (hard-deletes) a reservation.
    pub fn cancel_reservation(&self, id: ReservationId) -> Result<(), ReservationServiceError> {
        self.reservations.delete_reservation(id)?;
        info!("event=reservation_cancel module=service status=ok reservation_id={id}");
        Ok(())
    }
}
