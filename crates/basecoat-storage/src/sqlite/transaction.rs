//! Transaction wrapper for [`SqliteStore`].

use rusqlite::Connection;
use tracing::debug;

use basecoat_core::formula::{Base, Colorant, Formula, FormulaDetail};

use crate::error::{Result, StorageError};
use crate::sqlite::bases;
use crate::sqlite::colorants;
use crate::sqlite::formulas;
use crate::sqlite::store::SqliteStore;
use crate::traits::{FormulaUpdates, Transaction};

/// A thin wrapper around a SQLite connection that is inside a transaction.
///
/// The [`SqliteTx`] holds a reference to the connection (which already has an
/// active transaction via `BEGIN`). It implements [`Transaction`] by delegating
/// to the same connection-level helpers used by [`SqliteStore`].
pub(crate) struct SqliteTx<'a> {
    pub(crate) conn: &'a Connection,
}

impl Transaction for SqliteTx<'_> {
    fn get_formula(&self, id: i64) -> Result<Formula> {
        formulas::get_formula_on_conn(self.conn, id)
    }

    fn insert_formula(&self, formula: &Formula) -> Result<i64> {
        formulas::insert_formula_on_conn(self.conn, formula)
    }

    fn update_formula(&self, id: i64, updates: &FormulaUpdates) -> Result<()> {
        formulas::update_formula_on_conn(self.conn, id, updates)
    }

    fn get_colorant(&self, id: i64) -> Result<Option<Colorant>> {
        colorants::get_colorant_on_conn(self.conn, id)
    }

    fn get_colorants(&self, formula_id: i64) -> Result<Vec<Colorant>> {
        colorants::get_colorants_on_conn(self.conn, formula_id)
    }

    fn insert_colorant(&self, colorant: &Colorant) -> Result<Colorant> {
        colorants::insert_colorant_on_conn(self.conn, colorant)
    }

    fn upsert_colorant(&self, colorant: &Colorant) -> Result<Colorant> {
        colorants::upsert_colorant_on_conn(self.conn, colorant)
    }

    fn delete_colorant(&self, id: i64) -> Result<()> {
        colorants::delete_colorant_on_conn(self.conn, id)
    }

    fn get_base(&self, id: i64) -> Result<Option<Base>> {
        bases::get_base_on_conn(self.conn, id)
    }

    fn get_bases(&self, formula_id: i64) -> Result<Vec<Base>> {
        bases::get_bases_on_conn(self.conn, formula_id)
    }

    fn insert_base(&self, base: &Base) -> Result<Base> {
        bases::insert_base_on_conn(self.conn, base)
    }

    fn upsert_base(&self, base: &Base) -> Result<Base> {
        bases::upsert_base_on_conn(self.conn, base)
    }

    fn delete_base(&self, id: i64) -> Result<()> {
        bases::delete_base_on_conn(self.conn, id)
    }
}

// ---------------------------------------------------------------------------
// SqliteStore::run_in_transaction
// ---------------------------------------------------------------------------

impl SqliteStore {
    /// Runs a closure inside a database transaction.
    pub fn run_in_transaction_impl(
        &self,
        f: &dyn Fn(&dyn Transaction) -> Result<()>,
    ) -> Result<()> {
        let conn = self.lock_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| StorageError::Transaction(format!("failed to begin: {e}")))?;

        let sqlite_tx = SqliteTx { conn: &tx };
        match f(&sqlite_tx) {
            Ok(()) => {
                tx.commit()
                    .map_err(|e| StorageError::Transaction(format!("failed to commit: {e}")))?;
                Ok(())
            }
            Err(e) => {
                debug!(error = %e, "rolling back transaction");
                // Transaction is rolled back on drop.
                Err(e)
            }
        }
    }

    /// Inserts formulas with their children in a single transaction and
    /// returns the generated formula ids in input order.
    ///
    /// Ids on the detail records are ignored.
    pub fn insert_formulas_impl(&self, details: &[FormulaDetail]) -> Result<Vec<i64>> {
        let conn = self.lock_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| StorageError::Transaction(format!("failed to begin: {e}")))?;

        let mut ids = Vec::with_capacity(details.len());
        for detail in details {
            let id = formulas::insert_formula_on_conn(&tx, &detail.formula)?;
            for colorant in &detail.colorants {
                let colorant = Colorant {
                    formula_id: id,
                    ..colorant.clone()
                };
                colorants::insert_colorant_on_conn(&tx, &colorant)?;
            }
            for base in &detail.bases {
                let base = Base {
                    formula_id: id,
                    ..base.clone()
                };
                bases::insert_base_on_conn(&tx, &base)?;
            }
            ids.push(id);
        }

        tx.commit()
            .map_err(|e| StorageError::Transaction(format!("failed to commit: {e}")))?;
        Ok(ids)
    }
}
