//! Repository layer: catalog and booking stores over SQLite.
//!
//! # Responsibility
//! - Define the store contracts the services query before validation.
//! - Isolate SQLite query details from validation and orchestration.
//!
//! # Invariants
//! - Write paths validate field-level invariants before SQL mutations.
//! - Schema constraint violations surface as semantic errors
//!   (`SlotTaken`, `ThemeNameTaken`, `ThemeReferenced`), never as raw SQLite codes.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::reservation::ReservationId;
use crate::model::theme::{ThemeId, ThemeValidationError};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod reservation_repo;
pub mod theme_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Store error shared by the catalog and booking repositories.
#[derive(Debug)]
pub enum RepoError {
    /// Field-level theme validation failed before any write.
    InvalidTheme(ThemeValidationError),
    Db(DbError),
    ThemeNotFound(ThemeId),
    ReservationNotFound(ReservationId),
    /// `UNIQUE (date, time)` rejected the insert.
    SlotTaken { date: NaiveDate, time: NaiveTime },
    /// `UNIQUE (name)` rejected the write.
    ThemeNameTaken(String),
    /// The foreign key from a reservation blocked the theme delete.
    ThemeReferenced(ThemeId),
    /// Connection has not been migrated to the schema this binary expects.
    SchemaNotReady { found: u32, expected: u32 },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTheme(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::ThemeNotFound(id) => write!(f, "theme not found: {id}"),
            Self::ReservationNotFound(id) => write!(f, "reservation not found: {id}"),
            Self::SlotTaken { date, time } => write!(f, "slot already taken: {date} {time}"),
            Self::ThemeNameTaken(name) => write!(f, "theme name already taken: `{name}`"),
            Self::ThemeReferenced(id) => {
                write!(f, "theme {id} is still referenced by reservations")
            }
            Self::SchemaNotReady { found, expected } => write!(
                f,
                "schema version {found} does not match expected {expected}; open via db::open_db"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTheme(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ThemeValidationError> for RepoError {
    fn from(value: ThemeValidationError) -> Self {
        Self::InvalidTheme(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn ensure_schema_ready(conn: &Connection) -> RepoResult<()> {
    let found = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    let expected = latest_version();
    if found != expected {
        return Err(RepoError::SchemaNotReady { found, expected });
    }
    Ok(())
}
