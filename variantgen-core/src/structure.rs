//! Page-structure generation.
//!
//! Variant pages randomize their section order to keep generated pages
//! from all looking alike, under fixed rules:
//!
//! 1. `whatIs` and `examples` fill the first two positions, in either
//!    order.
//! 2. `howToUse` and `benefits` are shuffled between.
//! 3. `faq` and `cta` are always the final two sections, in that order.

use rand::seq::SliceRandom;
use rand::thread_rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A renderable page section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    /// Explainer section.
    WhatIs,
    /// Example gallery.
    Examples,
    /// Usage steps.
    HowToUse,
    /// Benefit cards.
    Benefits,
    /// Question/answer list.
    Faq,
    /// Call to action.
    Cta,
}

impl SectionKey {
    /// The wire name used in `pageStructure` arrays.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::WhatIs => "whatIs",
            SectionKey::Examples => "examples",
            SectionKey::HowToUse => "howToUse",
            SectionKey::Benefits => "benefits",
            SectionKey::Faq => "faq",
            SectionKey::Cta => "cta",
        }
    }

    /// All sections, in canonical order.
    pub fn all() -> [SectionKey; 6] {
        [
            SectionKey::WhatIs,
            SectionKey::Examples,
            SectionKey::HowToUse,
            SectionKey::Benefits,
            SectionKey::Faq,
            SectionKey::Cta,
        ]
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "whatIs" => Ok(SectionKey::WhatIs),
            "examples" => Ok(SectionKey::Examples),
            "howToUse" => Ok(SectionKey::HowToUse),
            "benefits" => Ok(SectionKey::Benefits),
            "faq" => Ok(SectionKey::Faq),
            "cta" => Ok(SectionKey::Cta),
            other => Err(format!("unknown section key: {other}")),
        }
    }
}

const PRIORITY: [SectionKey; 2] = [SectionKey::WhatIs, SectionKey::Examples];
const MIDDLE: [SectionKey; 2] = [SectionKey::HowToUse, SectionKey::Benefits];
const TAIL: [SectionKey; 2] = [SectionKey::Faq, SectionKey::Cta];

/// Generate a randomized page structure honoring the ordering rules.
pub fn random_structure() -> Vec<SectionKey> {
    let mut rng = thread_rng();

    let mut priority = PRIORITY;
    priority.shuffle(&mut rng);

    let mut middle = MIDDLE;
    middle.shuffle(&mut rng);

    priority
        .into_iter()
        .chain(middle)
        .chain(TAIL)
        .collect()
}

/// Generate a page structure deterministically from a seed string.
///
/// Useful in tests and wherever a keyword should always map to the same
/// layout.
pub fn deterministic_structure(seed: &str) -> Vec<SectionKey> {
    // Classic shift-and-add string hash, wrapping on overflow.
    let mut hash: i32 = 0;
    for c in seed.chars() {
        hash = hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(c as i32);
    }
    let hash = hash.unsigned_abs() as usize;

    let priority: Vec<SectionKey> = if hash % 2 == 0 {
        PRIORITY.to_vec()
    } else {
        PRIORITY.iter().rev().copied().collect()
    };

    let rot = hash % MIDDLE.len();
    let middle: Vec<SectionKey> = MIDDLE[rot..].iter().chain(&MIDDLE[..rot]).copied().collect();

    priority.into_iter().chain(middle).chain(TAIL).collect()
}

/// Check a page structure against the ordering rules.
///
/// Returns a list of human-readable violations; empty means valid.
pub fn validate_structure(structure: &[SectionKey]) -> Vec<String> {
    let mut errors = Vec::new();

    for key in SectionKey::all() {
        let count = structure.iter().filter(|&&k| k == key).count();
        if count > 1 {
            errors.push(format!("section '{key}' appears {count} times"));
        }
    }

    let has_faq = structure.contains(&SectionKey::Faq);
    let has_cta = structure.contains(&SectionKey::Cta);
    match (has_faq, has_cta) {
        (true, true) => {
            let n = structure.len();
            if n < 2
                || structure[n - 2] != SectionKey::Faq
                || structure[n - 1] != SectionKey::Cta
            {
                errors.push("'faq' and 'cta' must be the final two sections".to_string());
            }
        }
        (false, true) => {
            if structure.last() != Some(&SectionKey::Cta) {
                errors.push("'cta' must be the last section".to_string());
            }
        }
        (true, false) => {
            if structure.last() != Some(&SectionKey::Faq) {
                errors.push("'faq' must be the last section".to_string());
            }
        }
        (false, false) => {}
    }

    let first_two = &structure[..structure.len().min(2)];
    let has_priority_lead = first_two.contains(&SectionKey::WhatIs)
        || first_two.contains(&SectionKey::Examples);
    if structure.len() >= 2 && !has_priority_lead {
        errors.push(
            "either 'whatIs' or 'examples' must be in the first two positions".to_string(),
        );
    }

    errors
}
