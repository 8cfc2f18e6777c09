//! The typed SEO content document.
//!
//! [`SeoContent`] mirrors the section tree a generation backend is asked
//! to produce. Every section is optional and deserialized leniently: when
//! a section is present in the JSON but has the wrong shape, it degrades
//! to `None` rather than failing the whole document. Structural problems
//! are reported separately by the validator, which inspects the raw JSON.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// Deserialize a section tolerantly: wrong shape becomes `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// The `meta` section: page title, description and keywords.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaSection {
    /// Page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Meta description (150-160 characters in practice).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Comma-separated keyword list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
}

/// The `hero` section shown at the top of the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroSection {
    /// Hero title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional subtitle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

/// The `whatIs` explainer section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WhatIsSection {
    /// Section title ("What is {keyword}?").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Long-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The `examples` section header (media references live on the document).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExamplesSection {
    /// Section title ("{keyword} Examples").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Section description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One step inside the `howToUse` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Step title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Step body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// The `howToUse` section: ordered usage steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HowToUseSection {
    /// Section title ("How to Use The {keyword}").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Ordered steps.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,
}

/// One feature inside the `benefits` section.
///
/// The emoji belongs in `icon`, never in `title`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Feature title (no emoji).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Feature description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Emoji or symbol icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// The `benefits` section ("Why Use The {keyword}").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenefitsSection {
    /// Section title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Section description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered feature cards.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<Feature>,
}

/// The `faq` section.
///
/// The wire shape is a flat string map with the fixed key set
/// `{title, description, q1..q9, a1..a9}`. Key order is preserved so a
/// round-tripped document serializes the way the backend produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaqSection {
    /// All FAQ entries, in insertion order.
    #[serde(flatten)]
    pub entries: IndexMap<String, String>,
}

impl FaqSection {
    /// The fixed key set every complete FAQ must carry.
    pub fn expected_keys() -> Vec<String> {
        let mut keys = vec!["title".to_string(), "description".to_string()];
        for i in 1..=9 {
            keys.push(format!("q{i}"));
            keys.push(format!("a{i}"));
        }
        keys
    }

    /// Section title, if present.
    pub fn title(&self) -> Option<&str> {
        self.entries.get("title").map(String::as_str)
    }

    /// Section description, if present.
    pub fn description(&self) -> Option<&str> {
        self.entries.get("description").map(String::as_str)
    }

    /// The nth question/answer pair (1-based), if both halves are present.
    pub fn qa(&self, n: usize) -> Option<(&str, &str)> {
        let q = self.entries.get(&format!("q{n}"))?;
        let a = self.entries.get(&format!("a{n}"))?;
        Some((q.as_str(), a.as_str()))
    }

    /// Keys from the fixed set that are absent.
    pub fn missing_keys(&self) -> Vec<String> {
        Self::expected_keys()
            .into_iter()
            .filter(|k| !self.entries.contains_key(k))
            .collect()
    }

    /// Whether the full fixed key set is present.
    pub fn is_complete(&self) -> bool {
        self.missing_keys().is_empty()
    }
}

/// The `cta` call-to-action section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CtaSection {
    /// Action title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Motivational message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Button label.
    #[serde(
        default,
        rename = "buttonText",
        skip_serializing_if = "Option::is_none"
    )]
    pub button_text: Option<String>,
}

/// The full SEO section tree for one page.
///
/// Every section is optional; unknown sections survive round-trips via
/// the flattened `extra` map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoContent {
    /// `meta` section.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaSection>,
    /// `hero` section.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub hero: Option<HeroSection>,
    /// `whatIs` section.
    #[serde(
        default,
        rename = "whatIs",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub what_is: Option<WhatIsSection>,
    /// `examples` section header.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub examples: Option<ExamplesSection>,
    /// `howToUse` section.
    #[serde(
        default,
        rename = "howToUse",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub how_to_use: Option<HowToUseSection>,
    /// `benefits` section.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub benefits: Option<BenefitsSection>,
    /// `faq` section.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub faq: Option<FaqSection>,
    /// `cta` section.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub cta: Option<CtaSection>,
    /// Sections this model does not know about.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, JsonValue>,
}

impl SeoContent {
    /// Parse from a raw JSON value. Never fails: malformed sections
    /// degrade to `None` and anything unrecognized lands in `extra`.
    pub fn from_value(value: &JsonValue) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_else(|_| {
            // Non-object input carries no sections at all.
            SeoContent::default()
        })
    }

    /// Whether the fields a usable document must carry are present and
    /// non-empty: meta title/description, hero title, whatIs
    /// title/description.
    pub fn has_required_fields(&self) -> bool {
        fn filled(field: &Option<String>) -> bool {
            field.as_deref().is_some_and(|s| !s.trim().is_empty())
        }

        let meta_ok = self
            .meta
            .as_ref()
            .is_some_and(|m| filled(&m.title) && filled(&m.description));
        let hero_ok = self.hero.as_ref().is_some_and(|h| filled(&h.title));
        let what_is_ok = self
            .what_is
            .as_ref()
            .is_some_and(|w| filled(&w.title) && filled(&w.description));

        meta_ok && hero_ok && what_is_ok
    }

    /// Whether no section is present at all.
    pub fn is_empty(&self) -> bool {
        self.meta.is_none()
            && self.hero.is_none()
            && self.what_is.is_none()
            && self.examples.is_none()
            && self.how_to_use.is_none()
            && self.benefits.is_none()
            && self.faq.is_none()
            && self.cta.is_none()
            && self.extra.is_empty()
    }
}
