//! Identifier rules and label escaping for each target grammar
//!
//! Identifiers are emitted as raw tokens, so they are checked and rejected
//! rather than escaped. Labels are free text and are escaped.

use crate::format::OutputFormat;

const DOT_KEYWORDS: &[&str] = &["node", "edge", "graph", "digraph", "subgraph", "strict"];

const MERMAID_KEYWORDS: &[&str] = &[
    "end",
    "subgraph",
    "graph",
    "flowchart",
    "style",
    "classDef",
    "class",
    "click",
    "linkStyle",
    "direction",
];

/// Check that `id` can be emitted as a bare identifier in `format`
///
/// Returns the reason it cannot, if any.
pub fn identifier_issue(id: &str, format: OutputFormat) -> Option<&'static str> {
    let mut chars = id.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return Some("identifier is empty"),
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Some("must start with an ASCII letter or underscore");
    }

    match format {
        OutputFormat::GraphDescription => {
            if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Some("only ASCII letters, digits and underscores are allowed");
            }
            if DOT_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(id)) {
                return Some("reserved keyword");
            }
        }
        OutputFormat::FlowchartMarkup => {
            if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Some("only ASCII letters, digits and underscores are allowed");
            }
            // `End` and `END` are fine, only the lowercase form closes a block
            if MERMAID_KEYWORDS.contains(&id) {
                return Some("reserved keyword");
            }
        }
        OutputFormat::VectorMarkup => {
            if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')) {
                return Some("only ASCII letters, digits, '_', '-' and '.' are allowed");
            }
        }
    }
    None
}

/// Escape text for a double-quoted DOT string
pub fn escape_dot(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for a double-quoted Mermaid label
///
/// Mermaid uses `#name;` entity codes inside quoted labels.
pub fn escape_mermaid(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '#' => out.push_str("#35;"),
            '"' => out.push_str("#quot;"),
            '<' => out.push_str("#lt;"),
            '>' => out.push_str("#gt;"),
            '\n' => out.push_str("<br/>"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Flatten text onto a single line for use in a `%%` comment
pub fn mermaid_comment(s: &str) -> String {
    s.split(['\n', '\r'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape special XML characters
///
/// Characters XML 1.0 cannot carry at all, such as most C0 controls, are
/// dropped.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
    out
}

/// The XML 1.0 `Char` production
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Check a fill color: `#` plus 3, 4, 6 or 8 hex digits, or a name/token
pub fn is_valid_color(color: &str) -> bool {
    if let Some(hex) = color.strip_prefix('#') {
        return matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    let mut chars = color.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric() || c == '-'),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_identifiers_accepted() {
        for format in OutputFormat::ALL {
            assert_eq!(identifier_issue("user_svc", format), None);
            assert_eq!(identifier_issue("_a1", format), None);
        }
    }

    #[test]
    fn test_empty_and_leading_digit_rejected() {
        for format in OutputFormat::ALL {
            assert!(identifier_issue("", format).is_some());
            assert!(identifier_issue("1st", format).is_some());
        }
    }

    #[test]
    fn test_dot_rejects_keywords_and_punctuation() {
        let dot = OutputFormat::GraphDescription;
        assert_eq!(identifier_issue("Node", dot), Some("reserved keyword"));
        assert_eq!(identifier_issue("subgraph", dot), Some("reserved keyword"));
        assert!(identifier_issue("a-b", dot).is_some());
        assert!(identifier_issue("a;b", dot).is_some());
        assert!(identifier_issue("a b", dot).is_some());
    }

    #[test]
    fn test_mermaid_rejects_end() {
        let mermaid = OutputFormat::FlowchartMarkup;
        assert_eq!(identifier_issue("end", mermaid), Some("reserved keyword"));
        assert_eq!(identifier_issue("End", mermaid), None);
        assert!(identifier_issue("a[b]", mermaid).is_some());
    }

    #[test]
    fn test_svg_allows_xml_name_chars() {
        let svg = OutputFormat::VectorMarkup;
        assert_eq!(identifier_issue("user-db.v2", svg), None);
        assert!(identifier_issue("a\"b", svg).is_some());
    }

    #[test]
    fn test_escape_dot() {
        assert_eq!(escape_dot(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_dot(r"C:\tmp"), r"C:\\tmp");
        assert_eq!(escape_dot("two\nlines"), r"two\nlines");
    }

    #[test]
    fn test_escape_mermaid() {
        assert_eq!(escape_mermaid(r#"a "b""#), "a #quot;b#quot;");
        assert_eq!(escape_mermaid("C# <x>"), "C#35; #lt;x#gt;");
        assert_eq!(escape_mermaid("[ok] (fine)"), "[ok] (fine)");
    }

    #[test]
    fn test_mermaid_comment_single_line() {
        assert_eq!(mermaid_comment("a\nb\r\nc"), "a b c");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("it's \"x\""), "it&apos;s &quot;x&quot;");
    }

    #[test]
    fn test_escape_xml_drops_forbidden_controls() {
        assert_eq!(escape_xml("bell\u{7}here"), "bellhere");
        assert_eq!(escape_xml("a\u{0}b\u{B}c\u{C}d\u{1F}e\u{FFFE}"), "abcde");
        assert_eq!(escape_xml("tab\tline\nend"), "tab\tline\nend");
        assert_eq!(escape_xml("caf\u{e9} \u{1F600}"), "caf\u{e9} \u{1F600}");
    }

    #[test]
    fn test_color_validation() {
        assert!(is_valid_color("#e1f5ff"));
        assert!(is_valid_color("#fff"));
        assert!(is_valid_color("lightgrey"));
        assert!(is_valid_color("accent-2"));
        assert!(!is_valid_color("#12345"));
        assert!(!is_valid_color("red; stroke:black"));
        assert!(!is_valid_color("#zzzzzz"));
        assert!(!is_valid_color(""));
    }
}
