//! Formula CRUD operations for [`SqliteStore`].

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row, params};
use tracing::debug;

use basecoat_core::formula::{Formula, FormulaDetail};

use crate::error::{Result, StorageError};
use crate::sqlite::store::SqliteStore;
use crate::sqlite::{bases, colorants};
use crate::traits::{ClearedCounts, FormulaUpdates, Statistics};

/// All formula columns in a deterministic order for SELECT queries.
pub(crate) const FORMULA_COLUMNS: &str = "id, formula_name, formula_number, customer_name, \
     summary, notes, created_at, updated_at";

// ---------------------------------------------------------------------------
// Row scanning
// ---------------------------------------------------------------------------

/// Deserialises a row into a [`Formula`].
pub(crate) fn scan_formula(row: &Row<'_>) -> rusqlite::Result<Formula> {
    let created_at_str: String = row.get("created_at")?;
    let updated_at_str: String = row.get("updated_at")?;
    Ok(Formula {
        id: row.get("id")?,
        formula_name: row.get("formula_name")?,
        formula_number: row.get("formula_number")?,
        customer_name: row.get("customer_name")?,
        summary: row.get("summary")?,
        notes: row.get("notes")?,
        created_at: parse_datetime(&created_at_str),
        updated_at: parse_datetime(&updated_at_str),
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Formats a `DateTime<Utc>` as ISO 8601 TEXT for SQLite.
pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Parses an ISO 8601 TEXT string from SQLite into a `DateTime<Utc>`.
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    s.parse::<DateTime<Utc>>().unwrap_or_else(|_| {
        chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.fZ")
            .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
            .map(|ndt| ndt.and_utc())
            .unwrap_or_else(|_| Utc::now())
    })
}

// ---------------------------------------------------------------------------
// Connection-level helpers (shared with Transaction)
// ---------------------------------------------------------------------------

/// Inserts a formula and returns the generated id.
///
/// The id is assigned by SQLite on insert, so it is usable for child rows on
/// the same connection before the surrounding transaction commits.
pub(crate) fn insert_formula_on_conn(conn: &Connection, formula: &Formula) -> Result<i64> {
    conn.execute(
        "INSERT INTO formulas (formula_name, formula_number, customer_name, summary, notes,
                               created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            formula.formula_name,
            formula.formula_number,
            formula.customer_name,
            formula.summary,
            formula.notes,
            format_datetime(&formula.created_at),
            format_datetime(&formula.updated_at),
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(id, name = %formula.formula_name, "inserted formula");
    Ok(id)
}

/// Retrieves a single formula by id on the given connection.
pub(crate) fn get_formula_on_conn(conn: &Connection, id: i64) -> Result<Formula> {
    let sql = format!("SELECT {FORMULA_COLUMNS} FROM formulas WHERE id = ?1");
    conn.query_row(&sql, params![id], scan_formula)
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StorageError::not_found("formula", id),
            other => StorageError::Query(other),
        })
}

/// Applies partial updates on the given connection.
pub(crate) fn update_formula_on_conn(
    conn: &Connection,
    id: i64,
    updates: &FormulaUpdates,
) -> Result<()> {
    let now_str = format_datetime(&Utc::now());
    let mut set_clauses: Vec<&str> = Vec::new();
    let mut param_values: Vec<&dyn rusqlite::types::ToSql> = Vec::new();

    macro_rules! add_field {
        ($field:ident) => {
            if let Some(ref val) = updates.$field {
                set_clauses.push(concat!(stringify!($field), " = ?"));
                param_values.push(val);
            }
        };
    }

    add_field!(formula_name);
    add_field!(formula_number);
    add_field!(customer_name);
    add_field!(summary);
    add_field!(notes);

    // updated_at is always written, so an empty update still fails on a
    // missing row.
    set_clauses.push("updated_at = ?");
    param_values.push(&now_str);

    let sql = format!("UPDATE formulas SET {} WHERE id = ?", set_clauses.join(", "));
    param_values.push(&id);

    let affected = conn.execute(&sql, param_values.as_slice())?;
    if affected == 0 {
        return Err(StorageError::not_found("formula", id));
    }
    debug!(id, fields = set_clauses.len() - 1, "updated formula");
    Ok(())
}

/// Lists all formulas on the given connection, oldest first.
pub(crate) fn list_formulas_on_conn(conn: &Connection) -> Result<Vec<Formula>> {
    let sql = format!("SELECT {FORMULA_COLUMNS} FROM formulas ORDER BY id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], scan_formula)?;
    let mut formulas = Vec::new();
    for row in rows {
        formulas.push(row?);
    }
    Ok(formulas)
}

// ---------------------------------------------------------------------------
// SqliteStore formula methods
// ---------------------------------------------------------------------------

impl SqliteStore {
    /// Returns every formula.
    pub fn list_formulas_impl(&self) -> Result<Vec<Formula>> {
        let conn = self.lock_conn()?;
        list_formulas_on_conn(&conn)
    }

    /// Retrieves a formula by id.
    pub fn get_formula_impl(&self, id: i64) -> Result<Formula> {
        let conn = self.lock_conn()?;
        get_formula_on_conn(&conn, id)
    }

    /// Retrieves a formula with its colorants and bases.
    pub fn get_formula_detail_impl(&self, id: i64) -> Result<FormulaDetail> {
        let conn = self.lock_conn()?;
        let formula = get_formula_on_conn(&conn, id)?;
        let colorants = colorants::get_colorants_on_conn(&conn, id)?;
        let bases = bases::get_bases_on_conn(&conn, id)?;
        Ok(FormulaDetail {
            formula,
            colorants,
            bases,
        })
    }

    /// Inserts a single formula outside any caller transaction.
    #[cfg(test)]
    pub(crate) fn insert_formula_impl(&self, formula: &Formula) -> Result<i64> {
        let conn = self.lock_conn()?;
        insert_formula_on_conn(&conn, formula)
    }

    /// Deletes all rows. Children go first so the foreign keys never dangle.
    pub fn delete_all_impl(&self) -> Result<ClearedCounts> {
        let conn = self.lock_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| StorageError::Transaction(format!("failed to begin: {e}")))?;
        let counts = ClearedCounts {
            colorants: tx.execute("DELETE FROM colorants", [])?,
            bases: tx.execute("DELETE FROM bases", [])?,
            formulas: tx.execute("DELETE FROM formulas", [])?,
        };
        tx.commit()
            .map_err(|e| StorageError::Transaction(format!("failed to commit: {e}")))?;
        Ok(counts)
    }

    /// Returns aggregate row counts.
    pub fn statistics_impl(&self) -> Result<Statistics> {
        let conn = self.lock_conn()?;
        let stats = conn.query_row(
            "SELECT
                (SELECT COUNT(*) FROM formulas),
                (SELECT COUNT(*) FROM colorants),
                (SELECT COUNT(*) FROM bases),
                (SELECT COUNT(DISTINCT customer_name) FROM formulas WHERE customer_name != '')",
            [],
            |row| {
                Ok(Statistics {
                    formulas: row.get(0)?,
                    colorants: row.get(1)?,
                    bases: row.get(2)?,
                    customers: row.get(3)?,
                })
            },
        )?;
        Ok(stats)
    }
}
