use chrono::NaiveDateTime;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Rejection kinds raised by the business-rule validators.
///
/// None of these are retriable with the same input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Requested instant is not strictly in the future.
    InvalidRequest {
        requested_at: NaiveDateTime,
        evaluated_at: NaiveDateTime,
    },
    /// The `(date, time)` slot is already booked.
    DuplicateReservation { requested_at: NaiveDateTime },
    /// A theme with the same name already exists.
    DuplicateTheme { name: String },
    /// At least one reservation still references the theme.
    ThemeInUse,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest {
                requested_at,
                evaluated_at,
            } => write!(
                f,
                "reservation must be in the future: requested {requested_at}, now {evaluated_at}"
            ),
            Self::DuplicateReservation { requested_at } => {
                write!(f, "slot already booked: {requested_at}")
            }
            Self::DuplicateTheme { name } => write!(f, "theme name already exists: `{name}`"),
            Self::ThemeInUse => {
                write!(f, "cannot delete/modify a theme with active reservations")
            }
        }
    }
}

impl Error for ValidationError {}
