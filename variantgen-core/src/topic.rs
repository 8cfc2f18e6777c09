//! Topic keyword parsing.
//!
//! Batch inputs name topics as pipe-separated keyword lists, e.g.
//! `"pixel art maker|pixel character creator"`. The first entry is the
//! primary keyword the page is optimized for; the rest are woven into
//! the copy as secondary keywords.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed generation topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// The primary keyword the page targets.
    pub primary: String,
    /// Additional keywords to integrate.
    pub additional: Vec<String>,
}

impl Topic {
    /// Parse a `"primary|alt1|alt2"` keyword string.
    ///
    /// Blank segments are dropped; a fully blank input yields an empty
    /// primary keyword, which callers should treat as unusable.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw
            .split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        let primary = parts.next().unwrap_or_default();
        Self {
            primary,
            additional: parts.collect(),
        }
    }

    /// Create a topic from a single keyword.
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            additional: Vec::new(),
        }
    }

    /// URL/file slug for the primary keyword: lowercased, runs of
    /// non-alphanumerics collapsed to single hyphens.
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.primary.len());
        let mut last_was_hyphen = true; // suppress a leading hyphen
        for c in self.primary.to_lowercase().chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c);
                last_was_hyphen = false;
            } else if !last_was_hyphen {
                slug.push('-');
                last_was_hyphen = true;
            }
        }
        while slug.ends_with('-') {
            slug.pop();
        }
        slug
    }

    /// All keywords, primary first.
    pub fn keywords(&self) -> Vec<String> {
        let mut all = vec![self.primary.clone()];
        all.extend(self.additional.iter().cloned());
        all
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.primary)
    }
}
