//! # variantgen-output
//!
//! Resilient recovery of structured SEO documents from raw model
//! output.
//!
//! Model completions arrive noisy: wrapped in prose or markdown fences,
//! double-encoded as JSON strings, sprinkled with trailing commas and
//! zero-width characters, or truncated mid-object. This crate turns
//! that noise back into a parseable document in three stages:
//!
//! - **[`extract`]**: locate the JSON object inside the raw text,
//!   closing truncated objects when the completion was cut off
//! - **[`repair`]**: apply an ordered sequence of targeted fixes to a
//!   candidate that does not parse, recording each applied fix in a
//!   [`RepairTrace`]
//! - **[`validate`]**: warn-only structural checks against the expected
//!   SEO section layout, distinguishing absent sections from malformed
//!   ones
//!
//! [`recover`] runs extraction and repair end to end:
//!
//! ```rust
//! let raw = "Here you go:\n```json\n{\"meta\": {\"title\": \"Pixel Art\"},}\n```";
//! let recovered = variantgen_output::recover(raw).unwrap();
//! assert_eq!(recovered.value["meta"]["title"], "Pixel Art");
//! assert_eq!(recovered.trace.applied(), vec!["trailing-commas"]);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod extract;
pub mod repair;
pub mod validate;

pub use error::ExtractError;
pub use extract::extract;
pub use repair::{repair, RepairStep, RepairTrace};
pub use validate::{validate, ValidationReport, ValidationWarning};

/// A document recovered from raw model output.
#[derive(Debug, Clone)]
pub struct Recovered {
    /// The parsed document.
    pub value: serde_json::Value,
    /// The candidate text that parsed, post-repair.
    pub candidate: String,
    /// Fixes that were applied to make the candidate parse.
    pub trace: RepairTrace,
}

/// Extract a JSON object from `raw` and repair it until it parses.
///
/// Fails with [`ExtractError::NotFound`] when no object can be located,
/// or [`ExtractError::Unparsable`] when the best candidate still does
/// not parse after every repair pass.
pub fn recover(raw: &str) -> Result<Recovered, ExtractError> {
    let candidate = extract(raw)?;
    let (candidate, trace) = repair(&candidate);
    match serde_json::from_str(&candidate) {
        Ok(value) => Ok(Recovered { value, candidate, trace }),
        Err(err) => {
            tracing::warn!(
                fixes = ?trace.applied(),
                error = %err,
                "candidate still unparsable after repair"
            );
            Err(ExtractError::Unparsable(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_recover_clean_output_has_empty_trace() {
        let recovered = recover(r#"{"meta": {"title": "X"}}"#).unwrap();
        assert!(recovered.trace.is_empty());
        assert_eq!(recovered.value, json!({"meta": {"title": "X"}}));
    }

    #[test]
    fn test_recover_fenced_faq_with_trailing_comma() {
        let raw = concat!(
            "Here is your SEO content:\n",
            "```json\n",
            "{\n",
            "  \"faq\": {\n",
            "    \"title\": \"FAQ\",\n",
            "    \"q1\": \"What is it?\",\n",
            "    \"a1\": \"A tool.\",\n",
            "  }\n",
            "}\n",
            "```\n",
            "Hope that helps!"
        );
        let recovered = recover(raw).unwrap();
        assert_eq!(recovered.value["faq"]["q1"], "What is it?");
        assert_eq!(recovered.trace.applied(), vec!["trailing-commas"]);
    }

    #[test]
    fn test_recover_truncated_completion() {
        let raw = r#"{"meta": {"title": "X", "description": "Y"}, "hero": {"title": "Z", "subtitle""#;
        let recovered = recover(raw).unwrap();
        assert_eq!(recovered.value["meta"]["title"], "X");
        assert_eq!(recovered.value["hero"]["title"], "Z");
    }

    #[test]
    fn test_recover_reports_not_found() {
        assert!(matches!(recover("no json here"), Err(ExtractError::NotFound)));
    }
}
