//! Storage backend for basecoat.
//!
//! Provides the [`Storage`] trait and a SQLite implementation ([`SqliteStore`]).

pub mod error;
pub mod sqlite;
pub mod traits;

// Re-exports for convenience.
pub use error::{Result, StorageError};
pub use sqlite::SqliteStore;
pub use traits::{ClearedCounts, FormulaUpdates, Statistics, Storage, Transaction};

// ---------------------------------------------------------------------------
// Storage trait implementation for SqliteStore
// ---------------------------------------------------------------------------

use basecoat_core::formula::{Base, Colorant, Formula, FormulaDetail};

impl Storage for SqliteStore {
    fn list_formulas(&self) -> Result<Vec<Formula>> {
        self.list_formulas_impl()
    }

    fn get_formula(&self, id: i64) -> Result<Formula> {
        self.get_formula_impl(id)
    }

    fn get_formula_detail(&self, id: i64) -> Result<FormulaDetail> {
        self.get_formula_detail_impl(id)
    }

    fn insert_formulas(&self, details: &[FormulaDetail]) -> Result<Vec<i64>> {
        self.insert_formulas_impl(details)
    }

    fn get_colorants(&self, formula_id: i64) -> Result<Vec<Colorant>> {
        self.get_colorants_impl(formula_id)
    }

    fn get_bases(&self, formula_id: i64) -> Result<Vec<Base>> {
        self.get_bases_impl(formula_id)
    }

    fn delete_all(&self) -> Result<ClearedCounts> {
        self.delete_all_impl()
    }

    fn statistics(&self) -> Result<Statistics> {
        self.statistics_impl()
    }

    fn run_in_transaction(&self, f: &dyn Fn(&dyn Transaction) -> Result<()>) -> Result<()> {
        self.run_in_transaction_impl(f)
    }
}
