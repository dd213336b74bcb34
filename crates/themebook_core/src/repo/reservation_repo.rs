//! Reservation store contracts and SQLite implementation.
//!
//! # Invariants
//! - At most one row exists per `(date, time)`; the schema enforces it.
//! - Theme attributes are stored as a snapshot next to the `theme_id` reference.

use crate::db::{constraint_violation, ConstraintViolation};
use crate::model::reservation::{NewReservation, Reservation, ReservationId, ThemeSnapshot};
use crate::model::theme::ThemeId;
use crate::repo::{ensure_schema_ready, RepoError, RepoResult};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, Connection, Params, Row};

const RESERVATION_SELECT_SQL: &str = "SELECT
    id,
    date,
    time,
    name,
    theme_id,
    theme_name,
    theme_description,
    theme_price
FROM reservations";

/// Booking store used by the reservation and theme services.
pub trait ReservationRepository {
    /// Persists a booking; `SlotTaken` when the slot is already occupied.
    fn create_reservation(&self, reservation: &NewReservation) -> RepoResult<ReservationId>;
    fn get_reservation(&self, id: ReservationId) -> RepoResult<Option<Reservation>>;
    /// Returns reservations occupying exactly `(date, time)`.
    fn find_by_date_and_time(&self, date: NaiveDate, time: NaiveTime)
        -> RepoResult<Vec<Reservation>>;
    /// Returns reservations referencing catalog theme `theme_id`.
    fn find_by_theme_id(&self, theme_id: ThemeId) -> RepoResult<Vec<Reservation>>;
    /// Cancels a booking; `ReservationNotFound` when no row matched.
    fn delete_reservation(&self, id: ReservationId) -> RepoResult<()>;
}

/// SQLite-backed reservation store.
pub struct SqliteReservationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReservationRepository<'conn> {
    /// Wraps a connection returned by `db::open_db*`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }

    fn query_reservations<P: Params>(&self, filter: &str, params: P) -> RepoResult<Vec<Reservation>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RESERVATION_SELECT_SQL} {filter} ORDER BY id ASC;"))?;
        let mut rows = stmt.query(params)?;
        let mut reservations = Vec::new();
        while let Some(row) = rows.next()? {
            reservations.push(parse_reservation_row(row)?);
        }
        Ok(reservations)
    }
}

impl ReservationRepository for SqliteReservationRepository<'_> {
    fn create_reservation(&self, reservation: &NewReservation) -> RepoResult<ReservationId> {
        self.conn
            .execute(
                "INSERT INTO reservations (
                    date,
                    time,
                    name,
                    theme_id,
                    theme_name,
                    theme_description,
                    theme_price
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                params![
                    reservation.date,
                    reservation.time,
                    reservation.name,
                    reservation.theme_id,
                    reservation.theme.name,
                    reservation.theme.description,
                    reservation.theme.price,
                ],
            )
            .map_err(|err| match constraint_violation(&err) {
                Some(ConstraintViolation::Unique) => RepoError::SlotTaken {
                    date: reservation.date,
                    time: reservation.time,
                },
                Some(ConstraintViolation::ForeignKey) => {
                    RepoError::ThemeNotFound(reservation.theme_id)
                }
                _ => RepoError::from(err),
            })?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_reservation(&self, id: ReservationId) -> RepoResult<Option<Reservation>> {
        Ok(self
            .query_reservations("WHERE id = ?1", [id])?
            .into_iter()
            .next())
    }

    fn find_by_date_and_time(
        &self,
        date: NaiveDate,
        time: NaiveTime,
    ) -> RepoResult<Vec<Reservation>> {
        self.query_reservations("WHERE date = ?1 AND time = ?2", params![date, time])
    }

    fn find_by_theme_id(&self, theme_id: ThemeId) -> RepoResult<Vec<Reservation>> {
        self.query_reservations("WHERE theme_id = ?1", [theme_id])
    }

    fn delete_reservation(&self, id: ReservationId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM reservations WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::ReservationNotFound(id));
        }
        Ok(())
    }
}

fn parse_reservation_row(row: &Row<'_>) -> RepoResult<Reservation> {
    let id: ReservationId = row.get("id")?;
    let theme_price: i64 = row.get("theme_price")?;
    if theme_price < 0 {
        return Err(RepoError::InvalidData(format!(
            "negative theme_price `{theme_price}` in reservation {id}"
        )));
    }

    Ok(Reservation {
        id,
        date: row.get("date")?,
        time: row.get("time")?,
        name: row.get("name")?,
        theme_id: row.get("theme_id")?,
        theme: ThemeSnapshot {
            name: row.get("theme_name")?,
            description: row.get("theme_description")?,
            price: theme_price,
        },
    })
}
