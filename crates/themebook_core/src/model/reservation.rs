//! Reservation domain model.
//!
//! # Responsibility
//! - Define booking records and the request shape that creates them.
//! - Keep the booked theme as an owned snapshot, not a live reference.
//!
//! # Invariants
//! - A reservation occupies exactly one `(date, time)` slot.
//! - `theme` is copied at booking time and never refreshed afterwards.

use crate::model::theme::{Theme, ThemeId};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Store-assigned identifier for a reservation.
pub type ReservationId = i64;

/// Theme attributes captured when the reservation was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSnapshot {
    pub name: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub price: i64,
}

impl From<&Theme> for ThemeSnapshot {
    fn from(theme: &Theme) -> Self {
        Self {
            name: theme.name.clone(),
            description: theme.description.clone(),
            price: theme.price,
        }
    }
}

/// Persisted booking of one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Customer name.
    pub name: String,
    /// Catalog theme this booking still references.
    pub theme_id: ThemeId,
    pub theme: ThemeSnapshot,
}

impl Reservation {
    /// Returns the booked instant.
    pub fn scheduled_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// Booking request as received from callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub name: String,
    pub theme_id: ThemeId,
}

impl CreateReservationRequest {
    pub fn new(date: NaiveDate, time: NaiveTime, name: impl Into<String>, theme_id: ThemeId) -> Self {
        Self {
            date,
            time,
            name: name.into(),
            theme_id,
        }
    }

    /// Returns the requested instant (`date` + `time`).
    pub fn scheduled_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// Insert payload for the reservation store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub name: String,
    pub theme_id: ThemeId,
    pub theme: ThemeSnapshot,
}

impl NewReservation {
    /// Builds an insert payload from an accepted request and its looked-up theme.
    pub fn from_request(request: &CreateReservationRequest, theme: &Theme) -> Self {
        Self {
            date: request.date,
            time: request.time,
            name: request.name.clone(),
            theme_id: request.theme_id,
            theme: ThemeSnapshot::from(theme),
        }
    }
}
