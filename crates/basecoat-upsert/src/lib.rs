//! Formula create-or-update workflow.
//!
//! [`submit`] takes a [`FormulaSubmission`](basecoat_core::FormulaSubmission),
//! normalizes and validates it, then writes the formula and its colorants and
//! bases in a single transaction.

pub mod engine;
pub mod error;
mod reconcile;

pub use engine::{UpsertOptions, UpsertOutcome, apply, submit};
pub use error::{Result, UpsertError};
pub use reconcile::ChildCounts;
