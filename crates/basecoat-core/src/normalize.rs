//! Input cleanup applied to every submission before it reaches storage.

use crate::submission::{BaseEntry, ColorantEntry, FormulaFields, FormulaSubmission};

/// Title-cases a string: the first letter of every run of letters is
/// upper-cased and the rest of the run lower-cased.
///
/// Any non-letter starts a new run, so `"o'neil"` becomes `"O'Neil"` and
/// `"3rd coat"` becomes `"3Rd Coat"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

fn trim_opt(v: &Option<String>) -> Option<String> {
    v.as_deref().map(|s| s.trim().to_string())
}

impl FormulaFields {
    /// Returns a copy with every submitted field trimmed and, when
    /// `title_case_names` is set, `formula_name` and `customer_name`
    /// title-cased.
    pub fn normalized(&self, title_case_names: bool) -> Self {
        let name_case = |v: Option<String>| {
            if title_case_names {
                v.map(|s| title_case(&s))
            } else {
                v
            }
        };
        Self {
            formula_name: name_case(trim_opt(&self.formula_name)),
            formula_number: trim_opt(&self.formula_number),
            customer_name: name_case(trim_opt(&self.customer_name)),
            summary: trim_opt(&self.summary),
            notes: trim_opt(&self.notes),
        }
    }
}

impl FormulaSubmission {
    /// Returns a copy with flat fields and child entries cleaned up.
    ///
    /// Names are title-cased only for a new formula; an update stores them as
    /// submitted apart from trimming.
    pub fn normalized(&self, title_case_names: bool) -> Self {
        Self {
            formula_id: self.formula_id,
            fields: self
                .fields
                .normalized(title_case_names && !self.is_update()),
            colorants: self
                .colorants
                .iter()
                .map(|c| ColorantEntry {
                    id: c.id,
                    name: c.name.trim().to_string(),
                    amount: c.amount.trim().to_string(),
                })
                .collect(),
            bases: self
                .bases
                .iter()
                .map(|b| BaseEntry {
                    id: b.id,
                    name: b.name.trim().to_string(),
                    product_name: b.product_name.trim().to_string(),
                })
                .collect(),
        }
    }
}
