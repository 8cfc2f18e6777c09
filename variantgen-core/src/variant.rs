//! The assembled variant page document.

use crate::document::SeoContent;
use crate::structure::SectionKey;
use crate::topic::Topic;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Tool metadata attached to a generated variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantConfig {
    /// Display name (the primary keyword).
    pub name: String,
    /// Short description.
    pub description: String,
    /// Tool category, derived from the tool type.
    pub category: String,
    /// All targeted keywords.
    pub keywords: Vec<String>,
    /// The base tool this variant derives from.
    pub tool_type: String,
}

impl VariantConfig {
    /// Build the config for a topic/tool-type pair.
    pub fn for_topic(tool_type: &str, topic: &Topic) -> Self {
        Self {
            name: topic.primary.clone(),
            description: format!("AI-powered {} generator", topic.primary.to_lowercase()),
            category: tool_category(tool_type).to_string(),
            keywords: topic.keywords(),
            tool_type: tool_type.to_string(),
        }
    }
}

/// The canonical generated document for one variant page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantDocument {
    /// The SEO section tree.
    pub seo: SeoContent,
    /// Tool metadata.
    pub config: VariantConfig,
    /// Input-box placeholder copy.
    pub placeholder_text: String,
    /// The keyword this variant was generated for.
    pub original_keyword: String,
    /// Style preset inferred from the keyword, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_style: Option<String>,
    /// Media reference objects carried over from the source document.
    #[serde(default)]
    pub examples: Vec<JsonValue>,
    /// Ordered section keys for rendering; faq/cta always last.
    pub page_structure: Vec<SectionKey>,
}

impl VariantDocument {
    /// Assemble a document from generated SEO content.
    pub fn assemble(
        seo: SeoContent,
        tool_type: &str,
        topic: &Topic,
        examples: Vec<JsonValue>,
        page_structure: Vec<SectionKey>,
    ) -> Self {
        let style = default_style(&topic.primary, tool_type).map(kebab_case);
        Self {
            config: VariantConfig::for_topic(tool_type, topic),
            placeholder_text: format!("Transform your photo into {} style", topic.primary),
            original_keyword: topic.primary.clone(),
            default_style: style,
            seo,
            examples,
            page_structure,
        }
    }

    /// Preferred on-disk file name for this variant.
    pub fn file_name(&self) -> String {
        let topic = Topic::new(&self.original_keyword);
        format!("{}-{}.json", self.config.tool_type, topic.slug())
    }
}

/// Tool category for a tool type.
pub fn tool_category(tool_type: &str) -> &'static str {
    match tool_type {
        "video-to-video" => "Video Generation",
        "oc-maker" => "Character Creation",
        "ai-anime-generator" => "Anime Generation",
        "ai-comic-generator" => "Comic Creation",
        "playground" => "Style Transfer",
        _ => "AI Generation",
    }
}

/// Style presets matched against the keyword for video-effect tools.
const VIDEO_EFFECT_STYLES: &[(&str, &str)] = &[
    ("bankai", "bankai"),
    ("super saiyan", "super-saiyan"),
    ("saiyan", "super-saiyan"),
    ("rasengan", "rasengan"),
    ("sharingan", "sharingan"),
    ("gear 5", "gear-5"),
    ("gear5", "gear-5"),
    ("domain expansion", "domain-expansion"),
    ("titan", "titan-transformation"),
    ("kamehameha", "kamehameha"),
    ("ghibli", "ghibli"),
    ("cyberpunk", "cyberpunk"),
    ("cartoon", "cartoon"),
    ("anime dance", "anime-dance"),
];

/// Style presets matched against the keyword for image tools.
const IMAGE_STYLES: &[(&str, &str)] = &[
    ("studio ghibli", "ghibli-anime"),
    ("ghibli", "ghibli-anime"),
    ("anime", "anime"),
    ("cartoon", "cartoon"),
    ("manga", "manga"),
    ("sketch", "sketch"),
    ("claymation", "claymation"),
    ("clay", "claymation"),
    ("pixel", "pixel-art"),
    ("minecraft", "pixel-art"),
    ("simpsons", "the-simpsons"),
    ("lego", "lego"),
    ("disney", "disney"),
    ("pixar", "pixar"),
    ("funko", "funko-pop"),
    ("pop art", "pop-art"),
    ("caricature", "caricature"),
    ("comic", "comic-book"),
    ("line art", "line-art"),
    ("avatar", "anime-avatar"),
    ("tarot", "tarot-card"),
    ("isometric", "isometric"),
    ("id photo", "id-photo"),
    ("emoji", "apple-emoji"),
];

/// Infer a default style preset from the keyword.
///
/// Falls back to a per-tool default when nothing matches.
pub fn default_style(keyword: &str, tool_type: &str) -> Option<String> {
    let lower = keyword.to_lowercase();

    let table = if tool_type == "ai-video-effects" {
        VIDEO_EFFECT_STYLES
    } else {
        IMAGE_STYLES
    };

    for (needle, style) in table {
        if lower.contains(needle) {
            return Some((*style).to_string());
        }
    }

    match tool_type {
        "playground" | "video-to-video" => Some("anime".to_string()),
        "ai-video-effects" => Some("ghibli".to_string()),
        _ => None,
    }
}

fn kebab_case(s: String) -> String {
    s.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_variant_config_for_topic() {
        let topic = Topic::parse("Pixel Art Maker|8-bit maker");
        let config = VariantConfig::for_topic("playground", &topic);

        assert_eq!(config.name, "Pixel Art Maker");
        assert_eq!(config.category, "Style Transfer");
        assert_eq!(config.keywords.len(), 2);
        assert_eq!(config.description, "AI-powered pixel art maker generator");
    }

    #[test]
    fn test_tool_category_fallback() {
        assert_eq!(tool_category("oc-maker"), "Character Creation");
        assert_eq!(tool_category("something-new"), "AI Generation");
    }

    #[test]
    fn test_default_style_matching() {
        assert_eq!(
            default_style("Minecraft Skin Maker", "playground"),
            Some("pixel-art".to_string())
        );
        assert_eq!(
            default_style("Super Saiyan Effect", "ai-video-effects"),
            Some("super-saiyan".to_string())
        );
        // Unmatched keyword falls back to the tool default.
        assert_eq!(
            default_style("watercolor portrait", "playground"),
            Some("anime".to_string())
        );
        assert_eq!(default_style("watercolor portrait", "oc-maker"), None);
    }

    #[test]
    fn test_assemble_document() {
        let topic = Topic::parse("Pixel Art Maker");
        let structure = crate::structure::deterministic_structure("pixel art maker");
        let doc = VariantDocument::assemble(
            SeoContent::default(),
            "playground",
            &topic,
            Vec::new(),
            structure.clone(),
        );

        assert_eq!(doc.original_keyword, "Pixel Art Maker");
        assert_eq!(doc.placeholder_text, "Transform your photo into Pixel Art Maker style");
        assert_eq!(doc.default_style.as_deref(), Some("pixel-art"));
        assert_eq!(doc.page_structure, structure);
        assert_eq!(doc.file_name(), "playground-pixel-art-maker.json");
    }

    #[test]
    fn test_document_wire_shape() {
        let topic = Topic::parse("Anime Avatar");
        let doc = VariantDocument::assemble(
            SeoContent::default(),
            "playground",
            &topic,
            Vec::new(),
            crate::structure::deterministic_structure("anime avatar"),
        );

        let value = serde_json::to_value(&doc).unwrap();
        assert!(value.get("seo").is_some());
        assert!(value.get("placeholderText").is_some());
        assert!(value.get("originalKeyword").is_some());
        assert!(value.get("pageStructure").is_some());
        assert!(value["pageStructure"]
            .as_array()
            .unwrap()
            .iter()
            .all(|v| v.is_string()));
    }
}
