//! Colorant CRUD operations for [`SqliteStore`].

use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::debug;

use basecoat_core::formula::Colorant;

use crate::error::{Result, StorageError};
use crate::sqlite::store::SqliteStore;

fn scan_colorant(row: &Row<'_>) -> rusqlite::Result<Colorant> {
    Ok(Colorant {
        id: Some(row.get("id")?),
        formula_id: row.get("formula_id")?,
        colorant_name: row.get("colorant_name")?,
        amount: row.get("amount")?,
    })
}

// ---------------------------------------------------------------------------
// Connection-level helpers (shared with Transaction)
// ---------------------------------------------------------------------------

pub(crate) fn get_colorant_on_conn(conn: &Connection, id: i64) -> Result<Option<Colorant>> {
    Ok(conn
        .query_row(
            "SELECT id, formula_id, colorant_name, amount FROM colorants WHERE id = ?1",
            params![id],
            scan_colorant,
        )
        .optional()?)
}

pub(crate) fn get_colorants_on_conn(conn: &Connection, formula_id: i64) -> Result<Vec<Colorant>> {
    let mut stmt = conn.prepare(
        "SELECT id, formula_id, colorant_name, amount
         FROM colorants WHERE formula_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![formula_id], scan_colorant)?;
    let mut colorants = Vec::new();
    for row in rows {
        colorants.push(row?);
    }
    Ok(colorants)
}

/// Inserts a new colorant row, ignoring any id on the input.
pub(crate) fn insert_colorant_on_conn(conn: &Connection, colorant: &Colorant) -> Result<Colorant> {
    conn.execute(
        "INSERT INTO colorants (formula_id, colorant_name, amount) VALUES (?1, ?2, ?3)",
        params![colorant.formula_id, colorant.colorant_name, colorant.amount],
    )?;
    let id = conn.last_insert_rowid();
    Ok(colorant.clone().with_id(Some(id)))
}

/// Writes a colorant by identity: overwrite when the id exists, insert
/// otherwise.
pub(crate) fn upsert_colorant_on_conn(conn: &Connection, colorant: &Colorant) -> Result<Colorant> {
    conn.execute(
        "INSERT INTO colorants (id, formula_id, colorant_name, amount)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET
             formula_id = excluded.formula_id,
             colorant_name = excluded.colorant_name,
             amount = excluded.amount",
        params![
            colorant.id,
            colorant.formula_id,
            colorant.colorant_name,
            colorant.amount
        ],
    )?;
    // last_insert_rowid is not touched by the DO UPDATE path.
    let id = colorant.id.unwrap_or_else(|| conn.last_insert_rowid());
    debug!(id, name = %colorant.colorant_name, "upserted colorant");
    Ok(colorant.clone().with_id(Some(id)))
}

pub(crate) fn delete_colorant_on_conn(conn: &Connection, id: i64) -> Result<()> {
    let affected = conn.execute("DELETE FROM colorants WHERE id = ?1", params![id])?;
    if affected == 0 {
        return Err(StorageError::not_found("colorant", id));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// SqliteStore methods
// ---------------------------------------------------------------------------

impl SqliteStore {
    /// Returns the colorants of a formula.
    pub fn get_colorants_impl(&self, formula_id: i64) -> Result<Vec<Colorant>> {
        let conn = self.lock_conn()?;
        get_colorants_on_conn(&conn, formula_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basecoat_core::formula::FormulaBuilder;
    use pretty_assertions::assert_eq;

    fn store_with_formula() -> (SqliteStore, i64) {
        let store = SqliteStore::open_in_memory().unwrap();
        let id = store
            .insert_formula_impl(&FormulaBuilder::new("Red").build())
            .unwrap();
        (store, id)
    }

    #[test]
    fn insert_assigns_id() {
        let (store, fid) = store_with_formula();
        let conn = store.lock_conn().unwrap();
        let c = insert_colorant_on_conn(&conn, &Colorant::new(fid, "Crimson", "5")).unwrap();
        assert!(c.id.is_some());
        let got = get_colorant_on_conn(&conn, c.id.unwrap()).unwrap();
        assert_eq!(got, Some(c));
    }

    #[test]
    fn upsert_overwrites_in_place() {
        let (store, fid) = store_with_formula();
        let conn = store.lock_conn().unwrap();
        let c = insert_colorant_on_conn(&conn, &Colorant::new(fid, "Crimson", "5")).unwrap();

        let changed = Colorant::new(fid, "Crimson", "7").with_id(c.id);
        let written = upsert_colorant_on_conn(&conn, &changed).unwrap();
        assert_eq!(written.id, c.id);

        let all = get_colorants_on_conn(&conn, fid).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].amount, "7");
    }

    #[test]
    fn upsert_without_id_inserts() {
        let (store, fid) = store_with_formula();
        let conn = store.lock_conn().unwrap();
        let first = upsert_colorant_on_conn(&conn, &Colorant::new(fid, "A", "1")).unwrap();
        let second = upsert_colorant_on_conn(&conn, &Colorant::new(fid, "B", "2")).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(get_colorants_on_conn(&conn, fid).unwrap().len(), 2);
    }

    #[test]
    fn upsert_unknown_id_inserts_with_that_id() {
        let (store, fid) = store_with_formula();
        let conn = store.lock_conn().unwrap();
        let written =
            upsert_colorant_on_conn(&conn, &Colorant::new(fid, "A", "1").with_id(Some(40)))
                .unwrap();
        assert_eq!(written.id, Some(40));
        assert!(get_colorant_on_conn(&conn, 40).unwrap().is_some());
    }

    #[test]
    fn insert_requires_existing_formula() {
        let store = SqliteStore::open_in_memory().unwrap();
        let conn = store.lock_conn().unwrap();
        let err = insert_colorant_on_conn(&conn, &Colorant::new(77, "A", "1")).unwrap_err();
        assert!(err.is_constraint_violation(), "{err}");
    }

    #[test]
    fn delete_missing_is_not_found() {
        let (store, _) = store_with_formula();
        let conn = store.lock_conn().unwrap();
        assert!(delete_colorant_on_conn(&conn, 123).unwrap_err().is_not_found());
    }

    #[test]
    fn cascade_on_formula_delete() {
        let (store, fid) = store_with_formula();
        let conn = store.lock_conn().unwrap();
        insert_colorant_on_conn(&conn, &Colorant::new(fid, "A", "1")).unwrap();
        conn.execute("DELETE FROM formulas WHERE id = ?1", params![fid])
            .unwrap();
        assert!(get_colorants_on_conn(&conn, fid).unwrap().is_empty());
    }
}
