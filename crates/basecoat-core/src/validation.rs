//! Submission validation rules.
//!
//! These run on a normalized submission, before any database access.

use std::collections::HashSet;

use crate::submission::FormulaSubmission;

/// Largest child id a submission may carry. Ids stay exact as JSON numbers,
/// and an unknown id inserted under its own value leaves the key space open
/// for generated ids.
pub const MAX_ENTRY_ID: i64 = (1 << 53) - 1;

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("formula_name is required")]
    FormulaNameRequired,

    #[error("formula_name cannot be blank")]
    FormulaNameBlank,

    #[error("{kind} name cannot be blank")]
    BlankEntryName { kind: &'static str },

    #[error("{kind} {name:?} is listed more than once")]
    DuplicateEntryName { kind: &'static str, name: String },

    #[error("{kind} id {id} is used by more than one entry")]
    DuplicateEntryId { kind: &'static str, id: i64 },

    #[error("{kind} id must be between 1 and {max} (got {id})", max = MAX_ENTRY_ID)]
    InvalidEntryId { kind: &'static str, id: i64 },

    #[error("formula id must be positive (got {0})")]
    InvalidFormulaId(i64),

    #[error("{kind} {id} belongs to formula {owner}, not formula {formula_id}")]
    ForeignChild {
        kind: &'static str,
        id: i64,
        owner: i64,
        formula_id: i64,
    },
}

/// Validates a normalized submission.
///
/// Creating a formula requires a non-blank `formula_name`; an update may omit
/// it but not blank it out. Entry names must be non-blank and unique per kind,
/// and no id may be claimed by two entries of the same kind.
pub fn validate(sub: &FormulaSubmission) -> Result<(), ValidationError> {
    match (&sub.formula_id, sub.fields.formula_name.as_deref()) {
        (Some(id), _) if *id <= 0 => return Err(ValidationError::InvalidFormulaId(*id)),
        (None, None) => return Err(ValidationError::FormulaNameRequired),
        (_, Some(name)) if name.trim().is_empty() => {
            return Err(ValidationError::FormulaNameBlank);
        }
        _ => {}
    }

    check_entries(
        "colorant",
        sub.colorants.iter().map(|c| (c.name.as_str(), c.id)),
    )?;
    check_entries("base", sub.bases.iter().map(|b| (b.name.as_str(), b.id)))?;
    Ok(())
}

fn check_entries<'a>(
    kind: &'static str,
    entries: impl Iterator<Item = (&'a str, Option<i64>)>,
) -> Result<(), ValidationError> {
    let mut names = HashSet::new();
    let mut ids = HashSet::new();
    for (name, id) in entries {
        if name.trim().is_empty() {
            return Err(ValidationError::BlankEntryName { kind });
        }
        if !names.insert(name) {
            return Err(ValidationError::DuplicateEntryName {
                kind,
                name: name.to_string(),
            });
        }
        if let Some(id) = id {
            if !(1..=MAX_ENTRY_ID).contains(&id) {
                return Err(ValidationError::InvalidEntryId { kind, id });
            }
            if !ids.insert(id) {
                return Err(ValidationError::DuplicateEntryId { kind, id });
            }
        }
    }
    Ok(())
}
