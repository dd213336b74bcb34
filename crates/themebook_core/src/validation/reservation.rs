//! Reservation creation validator.
//!
//! # Invariants
//! - Checks run in a fixed order: temporal first, slot conflict second.
//! - Slot exclusivity is time-based; the conflicting theme is irrelevant.

use super::clock::{Clock, SystemClock};
use super::error::{ValidationError, ValidationResult};
use crate::model::reservation::{CreateReservationRequest, Reservation};
use chrono::NaiveDateTime;

/// Decides whether a booking request may be persisted.
#[derive(Debug, Clone, Default)]
pub struct ReservationValidator<C: Clock = SystemClock> {
    clock: C,
}

impl ReservationValidator<SystemClock> {
    /// Creates a validator evaluated against the local wall clock.
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> ReservationValidator<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Validates `request` against the reservations already occupying its slot.
    ///
    /// `existing_at_same_slot` must be fetched by the caller for the exact
    /// `(request.date, request.time)`.
    ///
    /// # Errors
    /// - `InvalidRequest` when the requested instant is not strictly after now.
    /// - `DuplicateReservation` when the slot already has a reservation.
    pub fn validate_for_create(
        &self,
        request: &CreateReservationRequest,
        existing_at_same_slot: &[Reservation],
    ) -> ValidationResult<()> {
        validate_for_create_at(request, existing_at_same_slot, self.clock.now())
    }
}

/// Same as [`ReservationValidator::validate_for_create`] with an explicit
/// evaluation instant.
pub fn validate_for_create_at(
    request: &CreateReservationRequest,
    existing_at_same_slot: &[Reservation],
    now: NaiveDateTime,
) -> ValidationResult<()> {
    let requested_at = request.scheduled_at();
    if requested_at <= now {
        return Err(ValidationError::InvalidRequest {
            requested_at,
            evaluated_at: now,
        });
    }

    if !existing_at_same_slot.is_empty() {
        return Err(ValidationError::DuplicateReservation { requested_at });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_for_create_at, ReservationValidator};
    use crate::model::reservation::{CreateReservationRequest, Reservation, ThemeSnapshot};
    use crate::validation::{FixedClock, ValidationError};
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_time(time(h, min))
    }

    fn booked(date: NaiveDate, time: NaiveTime, theme_id: i64) -> Reservation {
        Reservation {
            id: 1,
            date,
            time,
            name: "existing".to_string(),
            theme_id,
            theme: ThemeSnapshot {
                name: format!("theme-{theme_id}"),
                description: String::new(),
                price: 0,
            },
        }
    }

    #[test]
    fn past_request_is_invalid_against_wall_clock() {
        let request = CreateReservationRequest::new(date(2022, 10, 23), time(13, 0), "baker", 1);

        let err = ReservationValidator::new()
            .validate_for_create(&request, &[])
            .expect_err("2022 request must be rejected");
        assert!(matches!(err, ValidationError::InvalidRequest { .. }));
    }

    #[test]
    fn request_at_exact_evaluation_instant_is_invalid() {
        let request = CreateReservationRequest::new(date(2023, 10, 23), time(13, 0), "baker", 1);
        let now = at(2023, 10, 23, 13, 0);

        let err = validate_for_create_at(&request, &[], now).expect_err("not strictly future");
        assert_eq!(
            err,
            ValidationError::InvalidRequest {
                requested_at: now,
                evaluated_at: now,
            }
        );
    }

    #[test]
    fn occupied_slot_is_duplicate_regardless_of_theme() {
        let validator = ReservationValidator::with_clock(FixedClock(at(2023, 1, 1, 9, 0)));
        let request = CreateReservationRequest::new(date(2023, 10, 23), time(13, 0), "baker", 1);

        for other_theme in [1, 2] {
            let existing = vec![booked(date(2023, 10, 23), time(13, 0), other_theme)];
            let err = validator
                .validate_for_create(&request, &existing)
                .expect_err("occupied slot must be rejected");
            assert!(matches!(err, ValidationError::DuplicateReservation { .. }));
        }
    }

    #[test]
    fn past_and_conflicting_request_reports_invalid_request_first() {
        let validator = ReservationValidator::with_clock(FixedClock(at(2024, 1, 1, 0, 0)));
        let request = CreateReservationRequest::new(date(2023, 10, 23), time(13, 0), "baker", 1);
        let existing = vec![booked(date(2023, 10, 23), time(13, 0), 1)];

        let err = validator
            .validate_for_create(&request, &existing)
            .expect_err("must be rejected");
        assert!(matches!(err, ValidationError::InvalidRequest { .. }));
    }

    #[test]
    fn future_request_with_free_slot_is_accepted() {
        let validator = ReservationValidator::with_clock(FixedClock(at(2023, 10, 23, 12, 59)));
        let request = CreateReservationRequest::new(date(2023, 10, 23), time(13, 0), "baker", 1);

        validator
            .validate_for_create(&request, &[])
            .expect("free future slot should be accepted");
    }
}
