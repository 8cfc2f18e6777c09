//! Warn-only structural validation of recovered SEO documents.
//!
//! Validation never rejects a document. A page with a missing section
//! still renders the sections it has, so every finding is a warning the
//! caller can log, surface in generation metadata, or feed into a
//! reflection prompt. Absent and malformed sections are reported as
//! distinct findings because they call for different fixes upstream.
//!
//! Validation runs on the raw [`serde_json::Value`], before the lenient
//! typed deserialization in `variantgen-core` erases the difference
//! between "missing" and "present but wrong shape".

use serde_json::{Map, Value as JsonValue};
use std::fmt;
use variantgen_core::FaqSection;

/// Sections a complete SEO document carries.
const REQUIRED_SECTIONS: &[&str] = &[
    "meta", "hero", "whatIs", "examples", "howToUse", "benefits", "faq", "cta",
];

/// One structural finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// A required section is absent entirely.
    MissingSection {
        /// Section name as it appears on the wire.
        section: &'static str,
    },
    /// A required section is present but is not a JSON object.
    MalformedSection {
        /// Section name as it appears on the wire.
        section: &'static str,
    },
    /// A required field within a section is absent or not a string.
    MissingField {
        /// Owning section.
        section: &'static str,
        /// Field name.
        field: &'static str,
    },
    /// A field that must be an array holds something else.
    NotAnArray {
        /// Owning section.
        section: &'static str,
        /// Field name.
        field: &'static str,
    },
    /// The FAQ is missing entries from its fixed key set.
    MissingFaqKeys {
        /// The absent keys, in canonical order.
        keys: Vec<String>,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSection { section } => write!(f, "section '{section}' is missing"),
            Self::MalformedSection { section } => {
                write!(f, "section '{section}' is not an object")
            }
            Self::MissingField { section, field } => {
                write!(f, "section '{section}' is missing field '{field}'")
            }
            Self::NotAnArray { section, field } => {
                write!(f, "field '{section}.{field}' is not an array")
            }
            Self::MissingFaqKeys { keys } => {
                write!(f, "faq is missing keys: {}", keys.join(", "))
            }
        }
    }
}

/// Collected findings for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// All findings, in document order.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Whether the document passed with no findings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Number of findings.
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Whether the report holds no findings.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Findings rendered as human-readable messages.
    pub fn messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

/// Validate the structure of a recovered SEO document.
///
/// Every finding is also emitted as a `tracing` warning so batch runs
/// leave an audit trail even when callers drop the report.
pub fn validate(doc: &JsonValue) -> ValidationReport {
    let mut report = ValidationReport::default();

    for &name in REQUIRED_SECTIONS {
        match doc.get(name) {
            None | Some(JsonValue::Null) => {
                report.warnings.push(ValidationWarning::MissingSection { section: name });
            }
            Some(JsonValue::Object(_)) => {}
            Some(_) => {
                report
                    .warnings
                    .push(ValidationWarning::MalformedSection { section: name });
            }
        }
    }

    if let Some(meta) = object(doc, "meta") {
        require_string(meta, "meta", "title", &mut report);
        require_string(meta, "meta", "description", &mut report);
        require_string(meta, "meta", "keywords", &mut report);
    }
    if let Some(hero) = object(doc, "hero") {
        // The subtitle is optional copy; only the title is required.
        require_string(hero, "hero", "title", &mut report);
    }
    if let Some(what_is) = object(doc, "whatIs") {
        require_string(what_is, "whatIs", "title", &mut report);
        require_string(what_is, "whatIs", "description", &mut report);
    }
    if let Some(how_to) = object(doc, "howToUse") {
        require_string(how_to, "howToUse", "title", &mut report);
        require_array(how_to, "howToUse", "steps", &mut report);
    }
    if let Some(benefits) = object(doc, "benefits") {
        require_string(benefits, "benefits", "title", &mut report);
        require_array(benefits, "benefits", "features", &mut report);
    }
    if let Some(faq) = object(doc, "faq") {
        let missing: Vec<String> = FaqSection::expected_keys()
            .into_iter()
            .filter(|key| !faq.contains_key(key.as_str()))
            .collect();
        if !missing.is_empty() {
            report.warnings.push(ValidationWarning::MissingFaqKeys { keys: missing });
        }
    }
    if let Some(cta) = object(doc, "cta") {
        require_string(cta, "cta", "title", &mut report);
        require_string(cta, "cta", "description", &mut report);
        require_string(cta, "cta", "buttonText", &mut report);
    }

    for warning in &report.warnings {
        tracing::warn!(%warning, "seo document structure warning");
    }
    report
}

fn object<'a>(doc: &'a JsonValue, name: &str) -> Option<&'a Map<String, JsonValue>> {
    doc.get(name).and_then(JsonValue::as_object)
}

fn require_string(
    section: &Map<String, JsonValue>,
    section_name: &'static str,
    field: &'static str,
    report: &mut ValidationReport,
) {
    match section.get(field) {
        Some(JsonValue::String(s)) if !s.trim().is_empty() => {}
        _ => report.warnings.push(ValidationWarning::MissingField {
            section: section_name,
            field,
        }),
    }
}

fn require_array(
    section: &Map<String, JsonValue>,
    section_name: &'static str,
    field: &'static str,
    report: &mut ValidationReport,
) {
    match section.get(field) {
        Some(JsonValue::Array(_)) => {}
        None => report.warnings.push(ValidationWarning::MissingField {
            section: section_name,
            field,
        }),
        Some(_) => report.warnings.push(ValidationWarning::NotAnArray {
            section: section_name,
            field,
        }),
    }
}
