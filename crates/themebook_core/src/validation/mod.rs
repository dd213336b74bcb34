//! Business-rule validators guarding catalog and booking integrity.
//!
//! # Responsibility
//! - Decide accept/reject for reservation creation and theme mutation.
//! - Stay free of I/O: callers fetch candidate rows, validators decide.
//!
//! # Invariants
//! - Validators hold no mutable state and never mutate their inputs.
//! - Failures are returned verbatim; nothing is retried or swallowed.

mod clock;
mod error;
pub mod reservation;
pub mod theme;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ValidationError, ValidationResult};
pub use reservation::ReservationValidator;
pub use theme::ThemeValidator;
