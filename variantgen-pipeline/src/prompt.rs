//! Prompt builders.
//!
//! All prompts target the KomikoAI platform voice. The generation and
//! research prompts embed the source tool's SEO object as structural
//! reference material the model must rewrite rather than copy, plus the
//! standardized headings and the strict FAQ/CTA templates the site's
//! page renderer expects.

use serde_json::Value as JsonValue;
use variantgen_core::Topic;

/// The fixed FAQ and CTA wire templates embedded in prompts. Keys must
/// survive generation verbatim for the page renderer to pick them up.
const FAQ_CTA_TEMPLATE: &str = r#""faq": {
  "title": "Frequently Asked Questions",
  "description": "[15-20 words FAQ section intro]",
  "q1": "What is [Tool Name]?",
  "a1": "[Tool Name] is an AI tool that [comprehensive explanation 45-55 words]",
  "q2": "How to [use Tool Name/create with Tool Name]?",
  "a2": "Using [Tool Name] is simple! First [step], then [step], and [step]. [Additional details 50-60 words total]",
  "q3": "How does [Tool Name] work?",
  "a3": "[Tool Name] uses [technology] technology to [process]. It works by [technical explanation 45-55 words total]",
  "q4": "What is the best [tool category]?",
  "a4": "KomikoAI provides the best [tool category] tool. Our goal is to be the leading AI creation platform by delivering professional-quality results, powerful and fun customization, and an intuitive workflow, completely free to try. With KomikoAI's [Tool Name], you can [list benefits], making it perfect for users who [target audience description]",
  "q5": "Is the KomikoAI [Tool Name] free online?",
  "a5": "Yes, you can test out the [Tool Name] on KomikoAI for free, without having to sign up to any subscription. Try our [tool] today!",
  "q6": "What can I do with [Tool Name]?",
  "a6": "You can use [Tool Name] on KomikoAI to create [list specific possibilities 45-55 words]",
  "q7": "Can I use [Tool Name] on my phone?",
  "a7": "Yes, you can use [Tool Name] as a web app on different devices, including smartphones and computers, making it convenient for everyone.",
  "q8": "Can I download my generation from [Tool Name]?",
  "a8": "Yes, KomikoAI's [Tool Name] allows you to export your generation in various formats, such as [list formats], for easy sharing.",
  "q9": "Why should I use [Tool Name]?",
  "a9": "Using [Tool Name] can [list benefits]. Our [tool] allows you to [list capabilities 45-55 words total]"
},
"cta": {
  "title": "[Action phrase] for FREE with Our [Tool Name] Today!",
  "description": "[Motivational call-to-action message 12-16 words]",
  "buttonText": "Try Our [Tool Name] Free"
}"#;

fn pretty(value: &JsonValue) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn additional_keywords_clause(topic: &Topic) -> String {
    if topic.additional.is_empty() {
        String::new()
    } else {
        format!(" and related keywords ({})", topic.additional.join(", "))
    }
}

/// Build the primary content-generation prompt.
///
/// The source SEO object is included pretty-printed as a structural
/// reference; the model rewrites every section for the new keyword.
pub fn generation_prompt(source_seo: &JsonValue, topic: &Topic, tool_type: &str) -> String {
    let kw = &topic.primary;
    format!(
        r#"Act as an SEO expert. My website KomikoAI is an AI platform for creating comics, manhwa, manga, anime, animations, etc. I'm adding a new tool webpage to KomikoAI titled '{kw}' to improve SEO, the new tool is a variation of the original {tool_type} tool, i.e., the same functionality but to optimize for another Google keyword.

**TARGET AUDIENCE:** Content creators, artists, comic enthusiasts, anime fans, and digital creators looking for AI-powered creative tools.

**ORIGINAL SEO CONTENT (for structure reference):**
{source}

**TASK:**
Rewrite all content for "{kw}" while maintaining the same JSON structure and depth.

**SEO REQUIREMENTS:**
1. **Keyword Integration**: Naturally integrate "{kw}" throughout all content with high keyword density
2. **User Intent**: Address the search intent of users looking for "{kw}" tools
3. **Natural Language**: Maintain human-like, readable content while maximizing SEO value
4. **KomikoAI Branding**: Reference "AI {kw}" directly (not "KomikoAI's AI {kw}")

**STANDARDIZED SECTION HEADINGS (MUST USE EXACTLY):**
- meta.title: "{kw}"
- hero.title: "{kw}"
- whatIs.title: "What is {kw}?"
- examples.title: "{kw} Examples"
- howToUse.title: "How to Use The {kw}"
- benefits.title: "Why Use The {kw}"
- faq.title: "{kw} FAQ"
- cta.title: "Transform for FREE with Our {kw} Today!" (or similar action phrase)

**BENEFITS FEATURES FORMAT (MUST FOLLOW EXACTLY):**
- Each feature must have: "title", "content", and "icon"
- The "title" field should NOT include emoji - put emoji ONLY in the "icon" field
- Example: {{"title": "Fast and Efficient", "content": "Generate results in seconds...", "icon": "⚡"}}
- NOT like this: {{"title": "⚡ Fast and Efficient", ...}}

**STRICT FAQ & CTA TEMPLATE (MUST FOLLOW EXACTLY):**
- Use EXACT keys below for faq: title, description, q1..q9, a1..a9
- Use EXACT keys below for cta: title, description, buttonText
- Keep wording patterns and word-count ranges as noted

JSON TEMPLATE (copy this structure exactly into the output JSON):
{template}

**OUTPUT:**
Return the complete JSON object with all content rewritten for "{kw}"{additional}.
**IMPORTANT**: Ensure that all double quotes inside JSON string values are properly escaped with a backslash (e.g., "key": "value with \"quotes\""). This is critical for the JSON to be valid."#,
        source = pretty(source_seo),
        template = FAQ_CTA_TEMPLATE,
        additional = additional_keywords_clause(topic),
    )
}

/// Build the reflection prompt reviewing a generated document.
///
/// Asks for an issue list followed by the corrected JSON in a fenced
/// block, which the extractor prefers over the surrounding analysis.
pub fn reflection_prompt(candidate_seo: &JsonValue, topic: &Topic) -> String {
    let kw = &topic.primary;
    format!(
        r#"You are a quality assurance expert reviewing AI-generated SEO content for KomikoAI. Review the following content for a "{kw}" tool page and provide improvements.

**GENERATED CONTENT TO REVIEW:**
{candidate}

**QUALITY STANDARDS:**
1. **Meta Description**: Must be 150-160 characters, clearly summarize the page, highlight key benefits, include a strong call-to-action, and align with user search intent for "{kw}"
2. **Keyword Integration**: "{kw}" should appear naturally throughout all content with high density{additional}
3. **KomikoAI Branding**: Use "AI {kw}" directly (not "KomikoAI's AI {kw}")
4. **Content Quality**: All sections should provide specific value for "{kw}" users, avoid generic content
5. **Completeness**: All sections (meta, whatIs, howToUse, benefits, faq, cta) should be complete and valuable
6. **FAQ Template**: faq must include title, description, q1..q9 and a1..a9 exactly, and respect the word-count ranges
7. **CTA Template**: cta must include title, description (12-16 words), and buttonText

**REVIEW INSTRUCTIONS:**
1. First, identify specific issues in the current content
2. Then provide the corrected JSON with improvements
3. Focus on making content more specific to "{kw}" and removing generic language

**OUTPUT FORMAT:**
First provide your analysis, then output the improved JSON:

ISSUES FOUND:
- Issue 1: [describe specific problem]
- Issue 2: [describe specific problem]

IMPROVED CONTENT:
```json
{{corrected json here}}
```

Begin your review:"#,
        candidate = pretty(candidate_seo),
        additional = if topic.additional.is_empty() {
            String::new()
        } else {
            format!(". Also integrate: {}", topic.additional.join(", "))
        },
    )
}

/// Build the research-and-rewrite prompt for the research backend.
///
/// Two-step framing: research the new keyword as a topic first, then
/// rewrite the source copy against what was found. Output is requested
/// as bare JSON with a `seo` wrapper object.
pub fn research_prompt(source_seo: &JsonValue, topic: &Topic, tool_type: &str) -> String {
    let kw = &topic.primary;
    format!(
        r#"Act as an SEO expert. My website KomikoAI is an AI platform for creating comics, manhwa, manga, anime, animations, etc. I'm adding a new tool webpage to KomikoAI titled '{kw}' to improve SEO, the new tool is a variation of the original {tool_type} tool, i.e., the same functionality but to optimize for another Google keyword.

I need you to do 2 steps:

1. Research about the new tool title as a new topic, extract the core set of keywords other websites are using
2. Reference those webpages you've found to rewrite the webpage copy about the new tool with great SEO. You should change the copy of the original tool so that it's about the new topic and the wording is very different from the original copy. However, for the How to use section, you should only change the wording but don't change too much as it's still the same functionality just a different name. Use very natural and human-like language, write very detailed content so the webpage is highly detailed, and make sure my webpage has high keyword density (according to the core keywords from the websites you've found). Don't mention KomikoAI's AI {kw}, but directly say AI {kw}. You only need to output the new webpage copy after editing and improving the SEO. No need to summarize what you've found.

**Analysis First:**

The webpage content copy of the original tool:
{source}

**STANDARDIZED SECTION HEADINGS (MUST USE EXACTLY):**
- "How to Use The {kw}"
- "{kw} Examples"
- "Why Use The {kw}"
- "{kw} FAQ"

**BENEFITS FEATURES FORMAT (MUST FOLLOW EXACTLY):**
- Each feature must have: "title", "content", and "icon"
- The "title" field should NOT include emoji - put emoji ONLY in the "icon" field

**STRICT FAQ TEMPLATE (MUST FOLLOW EXACTLY - 9 QUESTIONS):**
The FAQ section must include exactly 9 questions, with the exact keys title, description, q1..q9 and a1..a9:
{template}

Return ONLY valid JSON wrapped as {{"seo": {{...}}, "examples": []}} (no extra text, no code blocks, no explanations), with all content rewritten for "{kw}"{additional}."#,
        source = pretty(source_seo),
        template = FAQ_CTA_TEMPLATE,
        additional = additional_keywords_clause(topic),
    )
}
