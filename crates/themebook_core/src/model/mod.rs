//! Domain model for the theme catalog and slot bookings.
//!
//! # Responsibility
//! - Define canonical data structures used by validators and services.
//! - Keep catalog records and booking records independently owned.
//!
//! # Invariants
//! - Reservations embed a theme snapshot; they never borrow catalog rows.

pub mod reservation;
pub mod theme;
