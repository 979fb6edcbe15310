//! Base CRUD operations for [`SqliteStore`].

use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::debug;

use basecoat_core::formula::Base;

use crate::error::{Result, StorageError};
use crate::sqlite::store::SqliteStore;

fn scan_base(row: &Row<'_>) -> rusqlite::Result<Base> {
    Ok(Base {
        id: Some(row.get("id")?),
        formula_id: row.get("formula_id")?,
        base_name: row.get("base_name")?,
        product_name: row.get("product_name")?,
    })
}

pub(crate) fn get_base_on_conn(conn: &Connection, id: i64) -> Result<Option<Base>> {
    Ok(conn
        .query_row(
            "SELECT id, formula_id, base_name, product_name FROM bases WHERE id = ?1",
            params![id],
            scan_base,
        )
        .optional()?)
}

pub(crate) fn get_bases_on_conn(conn: &Connection, formula_id: i64) -> Result<Vec<Base>> {
    let mut stmt = conn.prepare(
        "SELECT id, formula_id, base_name, product_name
         FROM bases WHERE formula_id = ?1 ORDER BY id",
    )?;
    let bases = stmt
        .query_map(params![formula_id], scan_base)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(bases)
}

pub(crate) fn insert_base_on_conn(conn: &Connection, base: &Base) -> Result<Base> {
    conn.execute(
        "INSERT INTO bases (formula_id, base_name, product_name) VALUES (?1, ?2, ?3)",
        params![base.formula_id, base.base_name, base.product_name],
    )?;
    Ok(base.clone().with_id(Some(conn.last_insert_rowid())))
}

pub(crate) fn upsert_base_on_conn(conn: &Connection, base: &Base) -> Result<Base> {
    conn.execute(
        "INSERT INTO bases (id, formula_id, base_name, product_name)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET
             formula_id = excluded.formula_id,
             base_name = excluded.base_name,
             product_name = excluded.product_name",
        params![base.id, base.formula_id, base.base_name, base.product_name],
    )?;
    let id = base.id.unwrap_or_else(|| conn.last_insert_rowid());
    debug!(id, name = %base.base_name, "upserted base");
    Ok(base.clone().with_id(Some(id)))
}

pub(crate) fn delete_base_on_conn(conn: &Connection, id: i64) -> Result<()> {
    let affected = conn.execute("DELETE FROM bases WHERE id = ?1", params![id])?;
    if affected == 0 {
        return Err(StorageError::not_found("base", id));
    }
    Ok(())
}

impl SqliteStore {
    /// Returns the bases of a formula.
    pub fn get_bases_impl(&self, formula_id: i64) -> Result<Vec<Base>> {
        let conn = self.lock_conn()?;
        get_bases_on_conn(&conn, formula_id)
    }
}
