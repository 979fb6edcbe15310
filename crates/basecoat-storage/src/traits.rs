//! Storage and Transaction traits -- the public API for formula persistence.
//!
//! Consumers depend on these traits rather than on concrete implementations so
//! that alternative backends (mocks, proxies, etc.) can be substituted.

use basecoat_core::formula::{Base, Colorant, Formula, FormulaDetail};
use basecoat_core::submission::FormulaFields;

use crate::error::Result;

// ---------------------------------------------------------------------------
// View / helper types
// ---------------------------------------------------------------------------

/// Typed partial-update struct for formulas.
///
/// Only `Some` fields are applied; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormulaUpdates {
    pub formula_name: Option<String>,
    pub formula_number: Option<String>,
    pub customer_name: Option<String>,
    pub summary: Option<String>,
    pub notes: Option<String>,
}

impl FormulaUpdates {
    /// Returns `true` if no field would be written.
    pub fn is_empty(&self) -> bool {
        self.formula_name.is_none()
            && self.formula_number.is_none()
            && self.customer_name.is_none()
            && self.summary.is_none()
            && self.notes.is_none()
    }
}

impl From<FormulaFields> for FormulaUpdates {
    fn from(f: FormulaFields) -> Self {
        Self {
            formula_name: f.formula_name,
            formula_number: f.formula_number,
            customer_name: f.customer_name,
            summary: f.summary,
            notes: f.notes,
        }
    }
}

/// Number of rows removed from each table by [`Storage::delete_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearedCounts {
    pub colorants: usize,
    pub bases: usize,
    pub formulas: usize,
}

/// Row counts for the whole database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    pub formulas: i64,
    pub colorants: i64,
    pub bases: i64,
    pub customers: i64,
}

// ---------------------------------------------------------------------------
// Storage trait
// ---------------------------------------------------------------------------

/// Primary storage interface for formula persistence.
///
/// All methods return [`Result`] to propagate
/// [`StorageError`](crate::StorageError)s.
pub trait Storage: Send + Sync {
    // -- Formulas ------------------------------------------------------------

    /// Returns every formula, oldest first.
    fn list_formulas(&self) -> Result<Vec<Formula>>;

    /// Retrieves a formula by id.
    fn get_formula(&self, id: i64) -> Result<Formula>;

    /// Retrieves a formula together with its colorants and bases.
    fn get_formula_detail(&self, id: i64) -> Result<FormulaDetail>;

    /// Inserts formulas with their colorants and bases atomically. Returns
    /// the generated ids in input order.
    fn insert_formulas(&self, details: &[FormulaDetail]) -> Result<Vec<i64>>;

    // -- Children ------------------------------------------------------------

    /// Returns the colorants of a formula.
    fn get_colorants(&self, formula_id: i64) -> Result<Vec<Colorant>>;

    /// Returns the bases of a formula.
    fn get_bases(&self, formula_id: i64) -> Result<Vec<Base>>;

    // -- Maintenance ---------------------------------------------------------

    /// Deletes every row, children first.
    fn delete_all(&self) -> Result<ClearedCounts>;

    /// Returns aggregate row counts.
    fn statistics(&self) -> Result<Statistics>;

    // -- Transactions --------------------------------------------------------

    /// Executes a closure within a database transaction.
    ///
    /// If the closure returns `Ok`, the transaction is committed.
    /// If it returns `Err` or panics, the transaction is rolled back.
    fn run_in_transaction(&self, f: &dyn Fn(&dyn Transaction) -> Result<()>) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Transaction trait
// ---------------------------------------------------------------------------

/// The unit of work handed to [`Storage::run_in_transaction`].
///
/// All operations share a single database connection and are committed or
/// rolled back atomically.
pub trait Transaction {
    // -- Formula operations --------------------------------------------------

    fn get_formula(&self, id: i64) -> Result<Formula>;
    fn insert_formula(&self, formula: &Formula) -> Result<i64>;
    fn update_formula(&self, id: i64, updates: &FormulaUpdates) -> Result<()>;

    // -- Colorant operations -------------------------------------------------

    fn get_colorant(&self, id: i64) -> Result<Option<Colorant>>;
    fn get_colorants(&self, formula_id: i64) -> Result<Vec<Colorant>>;
    fn insert_colorant(&self, colorant: &Colorant) -> Result<Colorant>;

    /// Overwrites the row with the colorant's id, or inserts it when the id
    /// is absent or unknown. Returns the written row.
    fn upsert_colorant(&self, colorant: &Colorant) -> Result<Colorant>;
    fn delete_colorant(&self, id: i64) -> Result<()>;

    // -- Base operations -----------------------------------------------------

    fn get_base(&self, id: i64) -> Result<Option<Base>>;
    fn get_bases(&self, formula_id: i64) -> Result<Vec<Base>>;
    fn insert_base(&self, base: &Base) -> Result<Base>;
    fn upsert_base(&self, base: &Base) -> Result<Base>;
    fn delete_base(&self, id: i64) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updates_from_fields() {
        let fields = FormulaFields {
            formula_name: Some("Red".into()),
            notes: Some(String::new()),
            ..FormulaFields::default()
        };
        let updates = FormulaUpdates::from(fields);
        assert!(!updates.is_empty());
        assert_eq!(updates.formula_name.as_deref(), Some("Red"));
        assert_eq!(updates.notes.as_deref(), Some(""));
        assert!(updates.summary.is_none());
        assert!(FormulaUpdates::default().is_empty());
    }
}
