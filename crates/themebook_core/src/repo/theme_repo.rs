//! Theme catalog store contracts and SQLite implementation.
//!
//! # Invariants
//! - `find_by_name` is an exact, case-sensitive match.
//! - Updates bind a fixed statement; absent patch fields keep their stored value.

use crate::db::{constraint_violation, ConstraintViolation};
use crate::model::theme::{Theme, ThemeId, ThemePatch, ThemeValidationError};
use crate::repo::{ensure_schema_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const THEME_SELECT_SQL: &str = "SELECT id, name, description, price FROM themes";

/// Catalog store used by the theme and reservation services.
pub trait ThemeRepository {
    fn create_theme(&self, theme: &Theme) -> RepoResult<ThemeId>;
    /// Returns all themes ordered by id.
    fn list_themes(&self) -> RepoResult<Vec<Theme>>;
    fn get_theme(&self, id: ThemeId) -> RepoResult<Option<Theme>>;
    fn find_by_name(&self, name: &str) -> RepoResult<Vec<Theme>>;
    /// Applies present patch fields; `ThemeNotFound` when no row matched.
    fn update_theme(&self, id: ThemeId, patch: &ThemePatch) -> RepoResult<()>;
    /// Hard-deletes a theme; `ThemeReferenced` when a reservation points at it.
    fn delete_theme(&self, id: ThemeId) -> RepoResult<()>;
}

/// SQLite-backed theme catalog.
pub struct SqliteThemeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteThemeRepository<'conn> {
    /// Wraps a connection returned by `db::open_db*`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ThemeRepository for SqliteThemeRepository<'_> {
    fn create_theme(&self, theme: &Theme) -> RepoResult<ThemeId> {
        theme.validate()?;

        self.conn
            .execute(
                "INSERT INTO themes (name, description, price) VALUES (?1, ?2, ?3);",
                params![theme.name, theme.description, theme.price],
            )
            .map_err(|err| map_name_conflict(err, &theme.name))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_themes(&self) -> RepoResult<Vec<Theme>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{THEME_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut themes = Vec::new();
        while let Some(row) = rows.next()? {
            themes.push(parse_theme_row(row)?);
        }
        Ok(themes)
    }

    fn get_theme(&self, id: ThemeId) -> RepoResult<Option<Theme>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{THEME_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_theme_row(row)?));
        }
        Ok(None)
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Vec<Theme>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{THEME_SELECT_SQL} WHERE name = ?1 ORDER BY id ASC;"))?;
        let mut rows = stmt.query([name])?;
        let mut themes = Vec::new();
        while let Some(row) = rows.next()? {
            themes.push(parse_theme_row(row)?);
        }
        Ok(themes)
    }

    fn update_theme(&self, id: ThemeId, patch: &ThemePatch) -> RepoResult<()> {
        if let Some(name) = patch.name.as_deref() {
            if name.trim().is_empty() {
                return Err(ThemeValidationError::BlankName.into());
            }
        }
        if let Some(price) = patch.price {
            if price < 0 {
                return Err(ThemeValidationError::NegativePrice(price).into());
            }
        }

        let changed = self
            .conn
            .execute(
                "UPDATE themes
                 SET
                    name = COALESCE(?2, name),
                    description = COALESCE(?3, description),
                    price = COALESCE(?4, price)
                 WHERE id = ?1;",
                params![id, patch.name, patch.description, patch.price],
            )
            .map_err(|err| map_name_conflict(err, patch.name.as_deref().unwrap_or_default()))?;

        if changed == 0 {
            return Err(RepoError::ThemeNotFound(id));
        }
        Ok(())
    }

    fn delete_theme(&self, id: ThemeId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM themes WHERE id = ?1;", [id])
            .map_err(|err| match constraint_violation(&err) {
                Some(ConstraintViolation::ForeignKey) => RepoError::ThemeReferenced(id),
                _ => RepoError::from(err),
            })?;

        if changed == 0 {
            return Err(RepoError::ThemeNotFound(id));
        }
        Ok(())
    }
}

fn map_name_conflict(err: rusqlite::Error, name: &str) -> RepoError {
    match constraint_violation(&err) {
        Some(ConstraintViolation::Unique) => RepoError::ThemeNameTaken(name.to_string()),
        _ => RepoError::from(err),
    }
}

fn parse_theme_row(row: &Row<'_>) -> RepoResult<Theme> {
    let theme = Theme {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        description: row.get("description")?,
        price: row.get("price")?,
    };
    theme.validate().map_err(|err| {
        RepoError::InvalidData(format!("theme {} in themes: {err}", theme.id.unwrap_or_default()))
    })?;
    Ok(theme)
}
