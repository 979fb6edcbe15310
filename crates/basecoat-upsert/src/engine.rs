//! The create-or-update workflow for one formula submission.

use std::cell::RefCell;

use serde::Serialize;
use tracing::{info, warn};

use basecoat_core::formula::Formula;
use basecoat_core::submission::FormulaSubmission;
use basecoat_core::validation::validate;
use basecoat_storage::{FormulaUpdates, Storage, StorageError, Transaction};

use crate::error::{Result, UpsertError};
use crate::reconcile::{Bases, ChildCounts, Colorants, create_children, reconcile_children};

/// Knobs for [`submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOptions {
    /// Delete stored children that an update submission leaves out.
    pub prune_missing: bool,
    /// Title-case `formula_name` and `customer_name` of a new formula.
    pub title_case: bool,
}

impl Default for UpsertOptions {
    fn default() -> Self {
        Self {
            prune_missing: true,
            title_case: true,
        }
    }
}

/// What a successful submission wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpsertOutcome {
    pub formula_id: i64,
    /// `true` when a new formula was inserted.
    pub created: bool,
    pub colorants: ChildCounts,
    pub bases: ChildCounts,
}

/// Normalizes, validates and persists a submission in one transaction.
///
/// Without a `formula_id` a new formula is created along with its children.
/// With one, the formula is updated in place and its children are merged.
/// Any failure rolls back every write of the submission.
pub fn submit(
    store: &dyn Storage,
    submission: &FormulaSubmission,
    opts: &UpsertOptions,
) -> Result<UpsertOutcome> {
    let submission = submission.normalized(opts.title_case);
    validate(&submission)?;

    let outcome = RefCell::new(None);
    let rejected = RefCell::new(None);
    let result = store.run_in_transaction(&|tx| match apply(tx, &submission, opts) {
        Ok(o) => {
            *outcome.borrow_mut() = Some(o);
            Ok(())
        }
        Err(UpsertError::Storage(e)) => Err(e),
        Err(e) => {
            let message = e.to_string();
            *rejected.borrow_mut() = Some(e);
            Err(StorageError::Internal(message))
        }
    });

    if let Some(e) = rejected.into_inner() {
        warn!(error = %e, "submission rejected, rolled back");
        return Err(e);
    }
    if let Err(e) = result {
        warn!(error = %e, "submission failed, rolled back");
        return Err(e.into());
    }

    let outcome = outcome
        .into_inner()
        .ok_or_else(|| StorageError::Internal("transaction committed without an outcome".into()))?;
    info!(
        formula_id = outcome.formula_id,
        created = outcome.created,
        colorant_writes = outcome.colorants.total(),
        base_writes = outcome.bases.total(),
        "formula saved"
    );
    Ok(outcome)
}

/// Applies an already normalized and validated submission inside `tx`.
pub fn apply(
    tx: &dyn Transaction,
    submission: &FormulaSubmission,
    opts: &UpsertOptions,
) -> Result<UpsertOutcome> {
    match submission.formula_id {
        None => create(tx, submission),
        Some(id) => update(tx, id, submission, opts),
    }
}

fn create(tx: &dyn Transaction, sub: &FormulaSubmission) -> Result<UpsertOutcome> {
    let fields = sub.fields.clone();
    let formula = Formula {
        formula_name: fields.formula_name.unwrap_or_default(),
        formula_number: fields.formula_number.unwrap_or_default(),
        customer_name: fields.customer_name.unwrap_or_default(),
        summary: fields.summary.unwrap_or_default(),
        notes: fields.notes.unwrap_or_default(),
        ..Formula::default()
    };
    let formula_id = tx.insert_formula(&formula)?;
    info!(formula_id, name = %formula.formula_name, "creating formula");

    Ok(UpsertOutcome {
        formula_id,
        created: true,
        colorants: create_children::<Colorants>(tx, formula_id, &sub.colorants)?,
        bases: create_children::<Bases>(tx, formula_id, &sub.bases)?,
    })
}

fn update(
    tx: &dyn Transaction,
    formula_id: i64,
    sub: &FormulaSubmission,
    opts: &UpsertOptions,
) -> Result<UpsertOutcome> {
    tx.get_formula(formula_id)?;
    info!(formula_id, "updating formula");

    let updates = FormulaUpdates::from(sub.fields.clone());
    tx.update_formula(formula_id, &updates)?;

    Ok(UpsertOutcome {
        formula_id,
        created: false,
        colorants: reconcile_children::<Colorants>(
            tx,
            formula_id,
            &sub.colorants,
            opts.prune_missing,
        )?,
        bases: reconcile_children::<Bases>(tx, formula_id, &sub.bases, opts.prune_missing)?,
    })
}
