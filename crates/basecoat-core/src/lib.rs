//! Core types for basecoat: formulas, their colorant and base lines, and the
//! submission payload used to create or update them.

pub mod formula;
pub mod normalize;
pub mod submission;
pub mod validation;

pub use formula::{Base, Colorant, Formula, FormulaBuilder, FormulaDetail};
pub use submission::{BaseEntry, ColorantEntry, FormulaFields, FormulaSubmission};
pub use validation::ValidationError;
