//! Child-row reconciliation shared by colorants and bases.
//!
//! Submitted entries are matched to stored rows by id first, then by name.
//! Matched rows are overwritten in place; unmatched entries become new rows.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use basecoat_core::ValidationError;
use basecoat_core::formula::{Base, Colorant};
use basecoat_core::submission::{BaseEntry, ColorantEntry};
use basecoat_storage::{Result as StorageResult, Transaction};

use crate::error::Result;

/// Per-kind write counts for one submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChildCounts {
    pub inserted: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl ChildCounts {
    /// Total rows touched.
    pub fn total(&self) -> usize {
        self.inserted + self.updated + self.deleted
    }
}

/// A kind of child row owned by a formula.
pub(crate) trait ChildKind {
    type Row;
    type Entry;

    const KIND: &'static str;

    fn existing(tx: &dyn Transaction, formula_id: i64) -> StorageResult<Vec<Self::Row>>;
    fn lookup(tx: &dyn Transaction, id: i64) -> StorageResult<Option<Self::Row>>;
    fn insert(tx: &dyn Transaction, row: &Self::Row) -> StorageResult<Self::Row>;
    fn upsert(tx: &dyn Transaction, row: &Self::Row) -> StorageResult<Self::Row>;
    fn delete(tx: &dyn Transaction, id: i64) -> StorageResult<()>;

    fn row_id(row: &Self::Row) -> Option<i64>;
    fn row_owner(row: &Self::Row) -> i64;
    fn row_name(row: &Self::Row) -> &str;

    fn entry_id(entry: &Self::Entry) -> Option<i64>;
    fn entry_name(entry: &Self::Entry) -> &str;

    /// Builds the row an entry is written as.
    fn build(formula_id: i64, entry: &Self::Entry, id: Option<i64>) -> Self::Row;
}

pub(crate) struct Colorants;

impl ChildKind for Colorants {
    type Row = Colorant;
    type Entry = ColorantEntry;

    const KIND: &'static str = "colorant";

    fn existing(tx: &dyn Transaction, formula_id: i64) -> StorageResult<Vec<Colorant>> {
        tx.get_colorants(formula_id)
    }

    fn lookup(tx: &dyn Transaction, id: i64) -> StorageResult<Option<Colorant>> {
        tx.get_colorant(id)
    }

    fn insert(tx: &dyn Transaction, row: &Colorant) -> StorageResult<Colorant> {
        tx.insert_colorant(row)
    }

    fn upsert(tx: &dyn Transaction, row: &Colorant) -> StorageResult<Colorant> {
        tx.upsert_colorant(row)
    }

    fn delete(tx: &dyn Transaction, id: i64) -> StorageResult<()> {
        tx.delete_colorant(id)
    }

    fn row_id(row: &Colorant) -> Option<i64> {
        row.id
    }

    fn row_owner(row: &Colorant) -> i64 {
        row.formula_id
    }

    fn row_name(row: &Colorant) -> &str {
        &row.colorant_name
    }

    fn entry_id(entry: &ColorantEntry) -> Option<i64> {
        entry.id
    }

    fn entry_name(entry: &ColorantEntry) -> &str {
        &entry.name
    }

    fn build(formula_id: i64, entry: &ColorantEntry, id: Option<i64>) -> Colorant {
        Colorant::new(formula_id, entry.name.clone(), entry.amount.clone()).with_id(id)
    }
}

pub(crate) struct Bases;

impl ChildKind for Bases {
    type Row = Base;
    type Entry = BaseEntry;

    const KIND: &'static str = "base";

    fn existing(tx: &dyn Transaction, formula_id: i64) -> StorageResult<Vec<Base>> {
        tx.get_bases(formula_id)
    }

    fn lookup(tx: &dyn Transaction, id: i64) -> StorageResult<Option<Base>> {
        tx.get_base(id)
    }

    fn insert(tx: &dyn Transaction, row: &Base) -> StorageResult<Base> {
        tx.insert_base(row)
    }

    fn upsert(tx: &dyn Transaction, row: &Base) -> StorageResult<Base> {
        tx.upsert_base(row)
    }

    fn delete(tx: &dyn Transaction, id: i64) -> StorageResult<()> {
        tx.delete_base(id)
    }

    fn row_id(row: &Base) -> Option<i64> {
        row.id
    }

    fn row_owner(row: &Base) -> i64 {
        row.formula_id
    }

    fn row_name(row: &Base) -> &str {
        &row.base_name
    }

    fn entry_id(entry: &BaseEntry) -> Option<i64> {
        entry.id
    }

    fn entry_name(entry: &BaseEntry) -> &str {
        &entry.name
    }

    fn build(formula_id: i64, entry: &BaseEntry, id: Option<i64>) -> Base {
        Base::new(formula_id, entry.name.clone(), entry.product_name.clone()).with_id(id)
    }
}

/// Inserts one row per entry for a freshly created formula. Entry ids are
/// ignored.
pub(crate) fn create_children<K: ChildKind>(
    tx: &dyn Transaction,
    formula_id: i64,
    entries: &[K::Entry],
) -> Result<ChildCounts> {
    for entry in entries {
        K::insert(tx, &K::build(formula_id, entry, None))?;
    }
    Ok(ChildCounts {
        inserted: entries.len(),
        ..ChildCounts::default()
    })
}

/// Merges entries into the existing children of `formula_id`.
///
/// An entry id that belongs to this formula overwrites that row; an unknown id
/// is inserted under that id; an id owned by another formula is rejected. An
/// entry without an id reuses the id of a same-named row not claimed by any
/// other entry. With `prune`, rows not written by this call are deleted.
///
/// Entries carrying an id are written before entries without one, so a
/// generated id can never take a value another entry asked for.
pub(crate) fn reconcile_children<K: ChildKind>(
    tx: &dyn Transaction,
    formula_id: i64,
    entries: &[K::Entry],
    prune: bool,
) -> Result<ChildCounts> {
    let existing = K::existing(tx, formula_id)?;
    let existing_ids: HashSet<i64> = existing.iter().filter_map(K::row_id).collect();
    let mut claimed: HashSet<i64> = entries.iter().filter_map(K::entry_id).collect();
    let mut counts = ChildCounts::default();

    let (with_id, without_id): (Vec<&K::Entry>, Vec<&K::Entry>) =
        entries.iter().partition(|e| K::entry_id(e).is_some());

    for entry in with_id.into_iter().chain(without_id) {
        let target = match K::entry_id(entry) {
            Some(id) if existing_ids.contains(&id) => Some(id),
            Some(id) => match K::lookup(tx, id)? {
                Some(row) if K::row_owner(&row) != formula_id => {
                    return Err(ValidationError::ForeignChild {
                        kind: K::KIND,
                        id,
                        owner: K::row_owner(&row),
                        formula_id,
                    }
                    .into());
                }
                Some(_) => Some(id),
                None => {
                    counts.inserted += 1;
                    K::upsert(tx, &K::build(formula_id, entry, Some(id)))?;
                    continue;
                }
            },
            None => existing
                .iter()
                .filter(|row| K::row_name(row) == K::entry_name(entry))
                .filter_map(K::row_id)
                .find(|id| !claimed.contains(id)),
        };

        let written = K::upsert(tx, &K::build(formula_id, entry, target))?;
        match target {
            Some(_) => counts.updated += 1,
            None => counts.inserted += 1,
        }
        if let Some(id) = K::row_id(&written) {
            claimed.insert(id);
        }
    }

    if prune {
        let stale: Vec<i64> = existing
            .iter()
            .filter_map(K::row_id)
            .filter(|id| !claimed.contains(id))
            .collect();
        for id in stale {
            K::delete(tx, id)?;
            counts.deleted += 1;
        }
    }

    debug!(
        kind = K::KIND,
        formula_id,
        inserted = counts.inserted,
        updated = counts.updated,
        deleted = counts.deleted,
        "reconciled children"
    );
    Ok(counts)
}
