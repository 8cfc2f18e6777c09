//! Locating the JSON object inside raw model output.
//!
//! Model completions rarely arrive as clean JSON. They come wrapped in
//! prose ("Here is the JSON you asked for:"), inside markdown code
//! fences, quoted as a single JSON string, or cut off mid-object when
//! the token budget runs out. [`extract`] digs the best candidate object
//! out of all of those shapes without ever parsing prose as JSON.

use crate::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Locate the first complete JSON object in `raw` and return it as a
/// string slice of the input, repaired for truncation if necessary.
///
/// The search order is:
///
/// 1. trim surrounding whitespace and strip a single pair of wrapping
///    quotes (some transports double-encode the completion as a JSON
///    string);
/// 2. prefer the body of the first markdown code fence, if one exists
///    and contains an object;
/// 3. scan for a brace-balanced object, tracking string and escape
///    state so braces inside string values never confuse the depth
///    count;
/// 4. if the scan runs out of input with unbalanced braces, attempt to
///    close the truncated object.
///
/// Returns [`ExtractError::NotFound`] when no candidate survives.
///
/// ```rust
/// let raw = "Sure! Here it is:\n```json\n{\"meta\": {\"title\": \"X\"}}\n```";
/// let json = variantgen_output::extract(raw).unwrap();
/// assert_eq!(json, "{\"meta\": {\"title\": \"X\"}}");
/// ```
pub fn extract(raw: &str) -> Result<String, ExtractError> {
    let unwrapped = strip_quote_wrapping(raw.trim());

    let scan = match fenced_body(&unwrapped) {
        Some(body) => match find_object(body) {
            // An empty or prose-only fence falls back to the full text.
            Scan::NotFound => find_object(&unwrapped),
            hit => hit,
        },
        None => find_object(&unwrapped),
    };

    match scan {
        Scan::Complete(object) => Ok(object.to_string()),
        Scan::Truncated(tail) => {
            tracing::debug!(tail_len = tail.len(), "closing truncated JSON object");
            close_truncated(tail).ok_or(ExtractError::NotFound)
        }
        Scan::NotFound => Err(ExtractError::NotFound),
    }
}

/// Strip one pair of wrapping double quotes and undo the string-level
/// escaping that comes with them. Unescaping only happens when the
/// wrapping quotes were actually present.
fn strip_quote_wrapping(text: &str) -> Cow<'_, str> {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        let inner = &text[1..text.len() - 1];
        Cow::Owned(inner.replace("\\\"", "\"").replace("\\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Body of the first markdown code fence, with any info string on the
/// opening fence line skipped. An unclosed fence extends to the end of
/// the text.
fn fenced_body(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after = &text[open + 3..];
    let body_start = after.find('\n').map(|i| i + 1).unwrap_or(after.len());
    let body = &after[body_start..];
    let body = match body.find("```") {
        Some(close) => &body[..close],
        None => body,
    };
    Some(body.trim())
}

enum Scan<'a> {
    /// A brace-balanced object slice.
    Complete(&'a str),
    /// Input ended with open braces; the slice starts at the opening
    /// brace and runs to the end of the text.
    Truncated(&'a str),
    NotFound,
}

/// String-aware scan for the first balanced `{...}` in `text`.
fn find_object(text: &str) -> Scan<'_> {
    let start = match text.find('{') {
        Some(i) => i,
        None => return Scan::NotFound,
    };

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape = false;

    for (i, c) in text[start..].char_indices() {
        if escape {
            escape = false;
            continue;
        }
        match c {
            '\\' => escape = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Scan::Complete(&text[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }

    Scan::Truncated(&text[start..])
}

/// A dangling `, "key"` or `, "key": "` left behind when a completion
/// is cut off right after starting a new field.
static DANGLING_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s),\s*"(?:[^"\\]|\\.)*"\s*(:\s*"?)?\s*$"#).unwrap()
});

/// Try to close a truncated object fragment.
///
/// Candidates are tried in order of how much content they preserve:
/// the fragment as-is, the fragment cut at its last quote with any
/// dangling partial field stripped, and the fragment cut at its last
/// `}`. Each candidate gets its open delimiters closed in stack order
/// and is accepted only if the result parses.
fn close_truncated(tail: &str) -> Option<String> {
    let mut candidates = vec![Cow::Borrowed(tail.trim_end())];

    if let Some(cut) = tail.rfind('"') {
        let head = DANGLING_FIELD.replace(&tail[..=cut], "");
        let head = head.trim_end().trim_end_matches(',').trim_end().to_string();
        candidates.push(Cow::Owned(head));
    }
    if let Some(cut) = tail.rfind('}') {
        candidates.push(Cow::Borrowed(&tail[..=cut]));
    }

    for candidate in candidates {
        if let Some(closed) = close_delimiters(&candidate) {
            if serde_json::from_str::<serde_json::Value>(&closed).is_ok() {
                return Some(closed);
            }
        }
    }
    None
}

/// Append the closing delimiters a fragment is missing, in reverse
/// nesting order. Returns `None` when the fragment ends inside a string
/// or its existing delimiters are mismatched.
fn close_delimiters(fragment: &str) -> Option<String> {
    let mut stack = Vec::new();
    let mut in_string = false;
    let mut escape = false;

    for c in fragment.chars() {
        if escape {
            escape = false;
            continue;
        }
        match c {
            '\\' => escape = true,
            '"' => in_string = !in_string,
            '{' if !in_string => stack.push('}'),
            '[' if !in_string => stack.push(']'),
            '}' | ']' if !in_string => {
                if stack.pop()? != c {
                    return None;
                }
            }
            _ => {}
        }
    }
    if in_string {
        return None;
    }

    let mut closed = String::with_capacity(fragment.len() + stack.len());
    closed.push_str(fragment);
    while let Some(c) = stack.pop() {
        closed.push(c);
    }
    Some(closed)
}
