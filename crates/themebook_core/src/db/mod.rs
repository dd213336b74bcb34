//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the catalog and booking stores.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Slot uniqueness, theme name uniqueness and theme references are
//!   enforced by schema constraints, independent of service validation.
//! - Constraint failures are classified here so stores can name them.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl DbError {
    /// Returns the constraint family when this error is a rejected write.
    pub fn constraint_violation(&self) -> Option<ConstraintViolation> {
        match self {
            Self::Sqlite(err) => constraint_violation(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Constraint family reported by SQLite for a rejected write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    Unique,
    ForeignKey,
    Check,
    Other,
}

const FOREIGN_KEY_FAILED_MESSAGE: &str = "FOREIGN KEY constraint failed";

/// Classifies a SQLite constraint failure; `None` for any other error.
///
/// SQLite reports foreign keys declared with an `ON DELETE` action
/// (`RESTRICT`, ...) under `SQLITE_CONSTRAINT_TRIGGER`, so that code is read
/// as a foreign key failure when the message says so.
pub fn constraint_violation(err: &rusqlite::Error) -> Option<ConstraintViolation> {
    let rusqlite::Error::SqliteFailure(failure, message) = err else {
        return None;
    };
    if failure.code != rusqlite::ErrorCode::ConstraintViolation {
        return None;
    }

    Some(match failure.extended_code {
        rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
            ConstraintViolation::Unique
        }
        rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => ConstraintViolation::ForeignKey,
        rusqlite::ffi::SQLITE_CONSTRAINT_TRIGGER
            if message.as_deref() == Some(FOREIGN_KEY_FAILED_MESSAGE) =>
        {
            ConstraintViolation::ForeignKey
        }
        rusqlite::ffi::SQLITE_CONSTRAINT_CHECK => ConstraintViolation::Check,
        _ => ConstraintViolation::Other,
    })
}
