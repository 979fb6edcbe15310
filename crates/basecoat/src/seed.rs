//! Random formula generation for `basecoat populate`.

use rand::Rng;
use rand::seq::SliceRandom;

use basecoat_config::SeedConfig;
use basecoat_core::formula::{Base, Colorant, Formula, FormulaDetail};
use basecoat_core::normalize::title_case;

const SHADES: &[&str] = &[
    "light", "dark", "pale", "deep", "dusty", "bright", "muted", "soft", "warm", "cool",
];

const COLORS: &[&str] = &[
    "olive", "teal", "crimson", "maroon", "navy", "coral", "salmon", "ivory", "khaki", "plum",
    "orchid", "sienna", "slate", "azure", "indigo", "amber", "sage", "rust", "mint", "cobalt",
];

const PIGMENTS: &[&str] = &[
    "Titanium White",
    "Lamp Black",
    "Yellow Oxide",
    "Red Oxide",
    "Phthalo Blue",
    "Phthalo Green",
    "Raw Umber",
    "Burnt Sienna",
    "Organic Yellow",
    "Magenta",
    "Thalo Red",
    "Medium Yellow",
];

const BASES: &[&str] = &["Pastel", "Medium", "Deep", "Ultra Deep", "Neutral", "Clear"];

const BRANDS: &[&str] = &["Acme", "Northwind", "Summit", "Harbor", "Keystone"];

const PRODUCT_LINES: &[&str] = &["Interior Eggshell", "Exterior Satin", "Primer", "Flat Enamel"];

const SURNAMES: &[&str] = &[
    "Harper", "Lindqvist", "Okafor", "Moreno", "Castellano", "Whitfield", "Nakamura", "Brennan",
];

const COMPANY_SUFFIXES: &[&str] = &["& Sons", "LLC", "Group", "Inc", "Painting", "Builders"];

const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua",
];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, words: &[&'a str]) -> &'a str {
    words[rng.gen_range(0..words.len())]
}

fn sentence<R: Rng + ?Sized>(rng: &mut R, min_words: usize, max_words: usize) -> String {
    let n = rng.gen_range(min_words..=max_words);
    let words: Vec<&str> = (0..n).map(|_| pick(rng, LOREM)).collect();
    let mut s = words.join(" ");
    if let Some(first) = s.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    s.push('.');
    s
}

/// Generates one formula with its colorants and bases.
pub fn fake_formula<R: Rng + ?Sized>(rng: &mut R, config: &SeedConfig) -> FormulaDetail {
    let formula = Formula {
        formula_name: title_case(&format!("{} {}", pick(rng, SHADES), pick(rng, COLORS))),
        formula_number: format!("#{:06x}", rng.gen_range(0..0x100_0000u32)),
        customer_name: format!("{} {}", pick(rng, SURNAMES), pick(rng, COMPANY_SUFFIXES)),
        summary: sentence(rng, 4, 8),
        notes: (0..rng.gen_range(1..=2))
            .map(|_| sentence(rng, 6, 12))
            .collect::<Vec<_>>()
            .join(" "),
        ..Formula::default()
    };

    let mut pigments = PIGMENTS.to_vec();
    pigments.shuffle(rng);
    let colorants = pigments
        .into_iter()
        .take(config.colorants_per_formula)
        .map(|name| Colorant::new(0, name, rng.gen_range(1..=10).to_string()))
        .collect();

    let mut bases = BASES.to_vec();
    bases.shuffle(rng);
    let bases = bases
        .into_iter()
        .take(config.bases_per_formula)
        .map(|name| {
            let product = format!("{} {}", pick(rng, BRANDS), pick(rng, PRODUCT_LINES));
            Base::new(0, name, product)
        })
        .collect();

    FormulaDetail {
        formula,
        colorants,
        bases,
    }
}

/// Generates `count` formulas.
pub fn fake_formulas<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    config: &SeedConfig,
) -> Vec<FormulaDetail> {
    (0..count).map(|_| fake_formula(rng, config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn respects_child_counts() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = SeedConfig {
            colorants_per_formula: 3,
            bases_per_formula: 2,
        };
        for detail in fake_formulas(&mut rng, 5, &config) {
            assert_eq!(detail.colorants.len(), 3);
            assert_eq!(detail.bases.len(), 2);
            let names: HashSet<&str> = detail
                .colorants
                .iter()
                .map(|c| c.colorant_name.as_str())
                .collect();
            assert_eq!(names.len(), 3);
        }
    }

    #[test]
    fn child_counts_are_capped() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = SeedConfig {
            colorants_per_formula: 100,
            bases_per_formula: 0,
        };
        let detail = fake_formula(&mut rng, &config);
        assert_eq!(detail.colorants.len(), PIGMENTS.len());
        assert!(detail.bases.is_empty());
    }

    #[test]
    fn field_shapes() {
        let mut rng = StdRng::seed_from_u64(42);
        let detail = fake_formula(&mut rng, &SeedConfig::default());
        let f = &detail.formula;

        assert_eq!(f.formula_number.len(), 7);
        assert!(f.formula_number.starts_with('#'));
        assert_eq!(f.formula_name, title_case(&f.formula_name));
        assert!(f.summary.ends_with('.'));
        for c in &detail.colorants {
            let amount: u32 = c.amount.parse().unwrap();
            assert!((1..=10).contains(&amount));
        }
    }

    #[test]
    fn seeded_runs_repeat() {
        let config = SeedConfig::default();
        let a = fake_formulas(&mut StdRng::seed_from_u64(3), 4, &config);
        let b = fake_formulas(&mut StdRng::seed_from_u64(3), 4, &config);
        let names = |v: &[FormulaDetail]| -> Vec<String> {
            v.iter().map(|d| d.formula.formula_name.clone()).collect()
        };
        assert_eq!(names(&a), names(&b));
    }
}
