//! Formula, Colorant, and Base -- the stored records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A paint mixing recipe.
///
/// Owns zero or more [`Colorant`] and [`Base`] rows through their
/// `formula_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    /// Surrogate key. `0` until the row has been inserted.
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub formula_name: String,

    #[serde(default)]
    pub formula_number: String,

    #[serde(default)]
    pub customer_name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Default for Formula {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            formula_name: String::new(),
            formula_number: String::new(),
            customer_name: String::new(),
            summary: String::new(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// One pigment ingredient of a formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colorant {
    /// `None` until persisted; a `Some` id on write means "overwrite this row".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub formula_id: i64,

    pub colorant_name: String,

    /// Amount as entered (may be a plain number or something like "2 oz").
    #[serde(default)]
    pub amount: String,
}

impl Colorant {
    pub fn new(formula_id: i64, name: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            id: None,
            formula_id,
            colorant_name: name.into(),
            amount: amount.into(),
        }
    }

    /// Returns a copy carrying the given identity.
    pub fn with_id(mut self, id: Option<i64>) -> Self {
        self.id = id;
        self
    }
}

/// One base product used within a formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub formula_id: i64,

    pub base_name: String,

    #[serde(default)]
    pub product_name: String,
}

impl Base {
    pub fn new(formula_id: i64, name: impl Into<String>, product: impl Into<String>) -> Self {
        Self {
            id: None,
            formula_id,
            base_name: name.into(),
            product_name: product.into(),
        }
    }

    pub fn with_id(mut self, id: Option<i64>) -> Self {
        self.id = id;
        self
    }
}

/// A formula together with its child rows, as shown on the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaDetail {
    #[serde(flatten)]
    pub formula: Formula,

    #[serde(default)]
    pub colorants: Vec<Colorant>,

    #[serde(default)]
    pub bases: Vec<Base>,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Formula`], mostly used by seeding and tests.
#[derive(Debug, Clone)]
pub struct FormulaBuilder {
    formula: Formula,
}

impl FormulaBuilder {
    /// Creates a new builder with the given formula name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            formula: Formula {
                formula_name: name.into(),
                ..Formula::default()
            },
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.formula.id = id;
        self
    }

    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.formula.formula_number = number.into();
        self
    }

    pub fn customer(mut self, customer: impl Into<String>) -> Self {
        self.formula.customer_name = customer.into();
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.formula.summary = summary.into();
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.formula.notes = notes.into();
        self
    }

    pub fn build(self) -> Formula {
        self.formula
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_sets_fields() {
        let f = FormulaBuilder::new("Red Paint")
            .number("R1")
            .customer("Acme Co")
            .summary("s")
            .notes("n")
            .build();
        assert_eq!(f.id, 0);
        assert_eq!(f.formula_name, "Red Paint");
        assert_eq!(f.formula_number, "R1");
        assert_eq!(f.customer_name, "Acme Co");
        assert_eq!(f.summary, "s");
        assert_eq!(f.notes, "n");
    }

    #[test]
    fn detail_serializes_flat() {
        let detail = FormulaDetail {
            formula: FormulaBuilder::new("Blue").id(7).build(),
            colorants: vec![Colorant::new(7, "Navy", "3").with_id(Some(1))],
            bases: vec![],
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["formula_name"], "Blue");
        assert_eq!(json["colorants"][0]["colorant_name"], "Navy");
        assert!(json.get("summary").is_none());
    }

    #[test]
    fn unsaved_colorant_omits_id() {
        let c = Colorant::new(1, "Crimson", "5");
        let json = serde_json::to_value(&c).unwrap();
        assert!(json.get("id").is_none());
    }
}
