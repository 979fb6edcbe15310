//! Submission payload: what a client sends to create or update a formula.
//!
//! The JSON shape matches what the formula entry form posts:
//!
//! ```json
//! {
//!   "formula_id": "12",
//!   "formula_name": "Red Paint",
//!   "colorant_list": { "Crimson": { "colorant_amount": 5, "colorant_id": 3 } },
//!   "base_list": { "White Base": { "base_product_name": "Acme Base" } }
//! }
//! ```
//!
//! On the Rust side the nested maps become ordered lists of typed entries
//! ([`ColorantEntry`], [`BaseEntry`]) and every id is an `Option<i64>`.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::formula::FormulaDetail;

/// The flat formula attributes of a submission.
///
/// `None` means the field was not submitted. On update only submitted fields
/// are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormulaFields {
    pub formula_name: Option<String>,
    pub formula_number: Option<String>,
    pub customer_name: Option<String>,
    pub summary: Option<String>,
    pub notes: Option<String>,
}

/// A colorant line of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorantEntry {
    /// Existing row to overwrite, if any.
    pub id: Option<i64>,
    pub name: String,
    pub amount: String,
}

/// A base line of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseEntry {
    pub id: Option<i64>,
    pub name: String,
    pub product_name: String,
}

/// A complete create-or-update request for one formula.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireSubmission", into = "WireSubmission")]
pub struct FormulaSubmission {
    /// Present when updating an existing formula.
    pub formula_id: Option<i64>,
    pub fields: FormulaFields,
    pub colorants: Vec<ColorantEntry>,
    pub bases: Vec<BaseEntry>,
}

impl FormulaSubmission {
    /// Parses a submission from its JSON form.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Returns `true` if this submission targets an existing formula.
    pub fn is_update(&self) -> bool {
        self.formula_id.is_some()
    }

    /// Builds the update submission that would reproduce the given formula
    /// unchanged, child ids included.
    pub fn from_detail(detail: &FormulaDetail) -> Self {
        let f = &detail.formula;
        Self {
            formula_id: Some(f.id),
            fields: FormulaFields {
                formula_name: Some(f.formula_name.clone()),
                formula_number: Some(f.formula_number.clone()),
                customer_name: Some(f.customer_name.clone()),
                summary: Some(f.summary.clone()),
                notes: Some(f.notes.clone()),
            },
            colorants: detail
                .colorants
                .iter()
                .map(|c| ColorantEntry {
                    id: c.id,
                    name: c.colorant_name.clone(),
                    amount: c.amount.clone(),
                })
                .collect(),
            bases: detail
                .bases
                .iter()
                .map(|b| BaseEntry {
                    id: b.id,
                    name: b.base_name.clone(),
                    product_name: b.product_name.clone(),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire representation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireSubmission {
    #[serde(
        default,
        deserialize_with = "de_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    formula_id: Option<i64>,

    #[serde(
        default,
        deserialize_with = "de_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    formula_name: Option<String>,

    #[serde(
        default,
        deserialize_with = "de_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    formula_number: Option<String>,

    #[serde(
        default,
        deserialize_with = "de_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    customer_name: Option<String>,

    #[serde(
        default,
        deserialize_with = "de_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    summary: Option<String>,

    #[serde(
        default,
        deserialize_with = "de_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    notes: Option<String>,

    #[serde(default, with = "entry_map")]
    colorant_list: Vec<(String, WireColorant)>,

    #[serde(default, with = "entry_map")]
    base_list: Vec<(String, WireBase)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireColorant {
    #[serde(default, deserialize_with = "de_text")]
    colorant_amount: String,

    #[serde(
        default,
        deserialize_with = "de_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    colorant_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireBase {
    #[serde(default, deserialize_with = "de_text")]
    base_product_name: String,

    #[serde(
        default,
        deserialize_with = "de_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    base_id: Option<i64>,
}

impl From<WireSubmission> for FormulaSubmission {
    fn from(w: WireSubmission) -> Self {
        Self {
            formula_id: w.formula_id,
            fields: FormulaFields {
                formula_name: w.formula_name,
                formula_number: w.formula_number,
                customer_name: w.customer_name,
                summary: w.summary,
                notes: w.notes,
            },
            colorants: w
                .colorant_list
                .into_iter()
                .map(|(name, c)| ColorantEntry {
                    id: c.colorant_id,
                    name,
                    amount: c.colorant_amount,
                })
                .collect(),
            bases: w
                .base_list
                .into_iter()
                .map(|(name, b)| BaseEntry {
                    id: b.base_id,
                    name,
                    product_name: b.base_product_name,
                })
                .collect(),
        }
    }
}

impl From<FormulaSubmission> for WireSubmission {
    fn from(s: FormulaSubmission) -> Self {
        Self {
            formula_id: s.formula_id,
            formula_name: s.fields.formula_name,
            formula_number: s.fields.formula_number,
            customer_name: s.fields.customer_name,
            summary: s.fields.summary,
            notes: s.fields.notes,
            colorant_list: s
                .colorants
                .into_iter()
                .map(|c| {
                    (
                        c.name,
                        WireColorant {
                            colorant_amount: c.amount,
                            colorant_id: c.id,
                        },
                    )
                })
                .collect(),
            base_list: s
                .bases
                .into_iter()
                .map(|b| {
                    (
                        b.name,
                        WireBase {
                            base_product_name: b.product_name,
                            base_id: b.id,
                        },
                    )
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Field deserializers
// ---------------------------------------------------------------------------

/// Form posts send ids as strings; API clients send numbers. Accept both.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Int(i64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextRepr {
    Text(String),
    Int(i64),
    Float(f64),
}

fn de_opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    match Option::<IdRepr>::deserialize(d)? {
        None => Ok(None),
        Some(IdRepr::Int(n)) => Ok(Some(n)),
        Some(IdRepr::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<i64>()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid id {s:?}: expected an integer")))
        }
    }
}

fn de_opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<TextRepr>::deserialize(d)?.map(|t| match t {
        TextRepr::Text(s) => s,
        TextRepr::Int(n) => n.to_string(),
        TextRepr::Float(f) => f.to_string(),
    }))
}

fn de_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(de_opt_text(d)?.unwrap_or_default())
}

/// (De)serializes a JSON object as an ordered list of `(key, value)` pairs.
mod entry_map {
    use super::*;

    #[allow(clippy::ptr_arg)]
    pub fn serialize<S, V>(entries: &Vec<(String, V)>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Serialize,
    {
        s.collect_map(entries.iter().map(|(k, v)| (k, v)))
    }

    pub fn deserialize<'de, D, V>(d: D) -> Result<Vec<(String, V)>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        Ok(Option::<Entries<V>>::deserialize(d)?
            .map(|e| e.0)
            .unwrap_or_default())
    }

    struct Entries<V>(Vec<(String, V)>);

    impl<'de, V: Deserialize<'de>> Deserialize<'de> for Entries<V> {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            d.deserialize_map(EntriesVisitor(PhantomData))
        }
    }

    struct EntriesVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
        type Value = Entries<V>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object keyed by display name")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((k, v)) = map.next_entry::<String, V>()? {
                out.push((k, v));
            }
            Ok(Entries(out))
        }
    }
}
