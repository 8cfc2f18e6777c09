//! Ordered, trace-recording repair of malformed JSON candidates.
//!
//! Each fix targets one defect class observed in real completions:
//! invisible characters pasted from chat UIs, trailing commas, CJK
//! full-width commas, strings broken across lines by token streaming,
//! unescaped backslashes, bare unquoted values, duplicate commas, and
//! strings the model never closed.
//!
//! Fixes run in a fixed order and every fix that changed the candidate
//! is recorded in a [`RepairTrace`], so a failed recovery can report
//! exactly what was attempted. A candidate that already parses is
//! returned byte-for-byte unchanged with an empty trace.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// One fix that changed the candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairStep {
    /// Stable name of the fix.
    pub fix: &'static str,
    /// Candidate text before the fix ran.
    pub before: String,
    /// Candidate text after the fix ran.
    pub after: String,
}

/// Record of every fix that modified a candidate, in application order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairTrace {
    /// Applied fixes, oldest first.
    pub steps: Vec<RepairStep>,
}

impl RepairTrace {
    /// Whether any fix changed the candidate.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Names of the applied fixes, in order.
    pub fn applied(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.fix).collect()
    }
}

type Fix = fn(&str) -> String;

/// The repair sequence. Order matters: structural fixes that could be
/// confused by stray characters run after those characters are removed.
const FIXES: &[(&str, Fix)] = &[
    ("strip-invisible", strip_invisible),
    ("trailing-commas", strip_trailing_commas),
    ("fullwidth-commas", replace_fullwidth_commas),
    ("key-value-newline", join_key_value),
    ("split-strings", join_split_strings),
    ("lone-backslashes", escape_lone_backslashes),
    ("bare-values", quote_bare_values),
    ("duplicate-commas", collapse_duplicate_commas),
    ("unterminated-string", close_open_string),
];

/// Run the repair sequence over `candidate`.
///
/// Never fails: the result is the best candidate produced, whether or
/// not it parses. Fixes stop as soon as the candidate parses, so a
/// valid input short-circuits with an empty trace and no byte changes.
pub fn repair(candidate: &str) -> (String, RepairTrace) {
    let mut trace = RepairTrace::default();

    if parses(candidate) {
        return (candidate.to_string(), trace);
    }

    let mut current = candidate.to_string();
    for (name, fix) in FIXES {
        let fixed = fix(&current);
        if fixed != current {
            tracing::debug!(fix = name, "applied JSON repair");
            trace.steps.push(RepairStep {
                fix: name,
                before: current,
                after: fixed.clone(),
            });
            current = fixed;
        }
        if parses(&current) {
            break;
        }
    }

    (current, trace)
}

fn parses(candidate: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(candidate).is_ok()
}

/// Re-apply `f` until it stops changing the input. The cap guards
/// against a fix pair that oscillates.
fn fixpoint(s: &str, f: impl Fn(&str) -> String) -> String {
    let mut current = s.to_string();
    for _ in 0..10 {
        let next = f(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// Zero-width and BOM characters that chat UIs smuggle into copy.
fn strip_invisible(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '\u{200B}'..='\u{200D}' | '\u{FEFF}'))
        .collect()
}

static TRAILING_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*([}\]])").unwrap());

fn strip_trailing_commas(s: &str) -> String {
    fixpoint(s, |t| TRAILING_COMMA.replace_all(t, "${1}").into_owned())
}

static FULLWIDTH_BETWEEN_STRINGS: Lazy<Regex> =
    Lazy::new(|| Regex::new("\"\\s*，\\s*\"").unwrap());
static FULLWIDTH_TRAILING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*，\s*([}\]])").unwrap());

/// Full-width commas (U+FF0C) used as separators between string items.
fn replace_fullwidth_commas(s: &str) -> String {
    let s = FULLWIDTH_BETWEEN_STRINGS.replace_all(s, "\", \"");
    FULLWIDTH_TRAILING.replace_all(&s, "${1}").into_owned()
}

static KEY_VALUE_NEWLINE: Lazy<Regex> = Lazy::new(|| Regex::new("(\"\\s*:)[ \t]*\n\\s*").unwrap());

/// A newline the model emitted between a key's colon and its value.
fn join_key_value(s: &str) -> String {
    KEY_VALUE_NEWLINE.replace_all(s, "${1} ").into_owned()
}

/// Raw newlines inside string values, produced when a long value is
/// streamed across lines. The newline and any following indentation
/// collapse to one space. String-aware: separators between fields are
/// never touched.
fn join_split_strings(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_string = false;
    let mut escape = false;
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if escape {
            out.push(c);
            escape = false;
            continue;
        }
        match c {
            '\\' if in_string => {
                out.push(c);
                escape = true;
            }
            '"' => {
                in_string = !in_string;
                out.push(c);
            }
            '\n' if in_string => {
                while matches!(chars.peek(), Some(' ' | '\t')) {
                    chars.next();
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }
    out
}

/// A backslash that does not start a valid JSON escape gets doubled,
/// including one sitting at the very end of the input.
fn escape_lone_backslashes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' | 'u') => {
                out.push('\\');
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            _ => out.push_str("\\\\"),
        }
    }
    out
}

static BARE_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#":\s*([^\s",\{\}\[\]]+)\s*([,}\]])"#).unwrap());

/// Unquoted symbol values like `"status": ok`. Keywords and numbers
/// are left alone.
fn quote_bare_values(s: &str) -> String {
    BARE_VALUE
        .replace_all(s, |caps: &Captures<'_>| {
            let token = &caps[1];
            if matches!(token, "true" | "false" | "null") || token.parse::<f64>().is_ok() {
                caps[0].to_string()
            } else {
                format!(": \"{}\"{}", token, &caps[2])
            }
        })
        .into_owned()
}

static DUPLICATE_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*,").unwrap());

fn collapse_duplicate_commas(s: &str) -> String {
    fixpoint(s, |t| DUPLICATE_COMMA.replace_all(t, ",").into_owned())
}

/// If the candidate ends inside a string, insert the missing closing
/// quote before any trailing delimiters so the structure around it
/// still closes.
fn close_open_string(s: &str) -> String {
    let mut in_string = false;
    let mut escape = false;
    for c in s.chars() {
        if escape {
            escape = false;
            continue;
        }
        match c {
            '\\' if in_string => escape = true,
            '"' => in_string = !in_string,
            _ => {}
        }
    }
    if !in_string {
        return s.to_string();
    }

    // Insert right after the last character that is not a closing
    // delimiter, separator, or whitespace.
    let insert_at = s
        .rfind(|c: char| !matches!(c, '}' | ']' | ',' | ' ' | '\n' | '\t' | '\r'))
        .map(|i| i + s[i..].chars().next().map_or(0, char::len_utf8))
        .unwrap_or(0);

    let mut out = String::with_capacity(s.len() + 1);
    out.push_str(&s[..insert_at]);
    out.push('"');
    out.push_str(&s[insert_at..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{json, Value};

    fn repaired(candidate: &str) -> Value {
        let (fixed, _) = repair(candidate);
        serde_json::from_str(&fixed).unwrap()
    }

    #[test]
    fn test_valid_input_is_untouched() {
        let input = "{\"a\":  1 }"; // odd spacing must survive
        let (fixed, trace) = repair(input);
        assert_eq!(fixed, input);
        assert!(trace.is_empty());
    }

    #[test]
    fn test_trailing_comma() {
        assert_eq!(repaired(r#"{"a": 1, "b": [1, 2,],}"#), json!({"a": 1, "b": [1, 2]}));
    }

    #[test]
    fn test_fullwidth_comma_between_items() {
        assert_eq!(repaired("[\"a\"，\"b\"]"), json!(["a", "b"]));
    }

    #[test]
    fn test_invisible_characters() {
        let input = "{\"a\": \u{FEFF}1\u{200B}}";
        let (fixed, trace) = repair(input);
        assert_eq!(fixed, "{\"a\": 1}");
        assert_eq!(trace.applied(), vec!["strip-invisible"]);
    }

    #[test]
    fn test_newline_between_key_and_value() {
        assert_eq!(
            repaired("{\"title\":\n    \"hello\"}"),
            json!({"title": "hello"})
        );
    }

    #[test]
    fn test_string_split_across_lines() {
        assert_eq!(
            repaired("{\"a\": \"first half\n    second half\"}"),
            json!({"a": "first half second half"})
        );
    }

    #[test]
    fn test_split_string_leaves_separators_alone() {
        assert_eq!(
            repaired("{\"a\": \"one\ntwo\",\n\"b\": \"c\"}"),
            json!({"a": "one two", "b": "c"})
        );
    }

    #[rstest]
    #[case(r#"{"path": "C:\Users"}"#, json!({"path": "C:\\Users"}))]
    #[case(r#"{"discount": "50\% off"}"#, json!({"discount": "50\\% off"}))]
    fn test_lone_backslashes(#[case] input: &str, #[case] expected: Value) {
        assert_eq!(repaired(input), expected);
    }

    #[test]
    fn test_bare_symbol_value() {
        assert_eq!(
            repaired(r#"{"status": ok, "count": 3, "flag": true}"#),
            json!({"status": "ok", "count": 3, "flag": true})
        );
    }

    #[test]
    fn test_duplicate_commas() {
        assert_eq!(repaired(r#"{"a": 1,, "b": 2}"#), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_unterminated_string() {
        let (fixed, trace) = repair(r#"{"a": "oops}"#);
        assert_eq!(
            serde_json::from_str::<Value>(&fixed).unwrap(),
            json!({"a": "oops"})
        );
        assert_eq!(trace.applied(), vec!["unterminated-string"]);
    }

    #[test]
    fn test_repair_is_idempotent() {
        let (once, _) = repair(r#"{"a": 1,}"#);
        let (twice, trace) = repair(&once);
        assert_eq!(once, twice);
        assert!(trace.is_empty());
    }

    #[test]
    fn test_trace_records_before_and_after() {
        let (_, trace) = repair(r#"{"a": 1,}"#);
        assert_eq!(trace.steps.len(), 1);
        assert_eq!(trace.steps[0].fix, "trailing-commas");
        assert_eq!(trace.steps[0].before, r#"{"a": 1,}"#);
        assert_eq!(trace.steps[0].after, r#"{"a": 1}"#);
    }

    #[test]
    fn test_unfixable_input_returns_best_effort() {
        let (fixed, _) = repair("{]");
        assert!(serde_json::from_str::<Value>(&fixed).is_err());
    }
}
