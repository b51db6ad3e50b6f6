//! PatternBuilder - Composes matching expressions from delimiters and tags
//!
//! Single-line pattern:
//! ```text
//! (?i)(?P<lead>(?:DELIM)+LAST*[ \t]*)(?P<tag>T1|T2|..)(?P<rest>[^\r\n]*)
//! ```
//! `LAST*` lets odd runs such as `///` or `---` belong to the lead.
//! Block patterns are a pair: an outer expression that finds whole `/* */`
//! (or `/** */`) blocks with a lazy body, and an inner expression run over each
//! block to find tagged lines.
//!
//! Tags are alternated in registration order, so when one literal is a prefix
//! of another the earlier registered one wins. This is alternation order, not
//! longest match.

use regex::Regex;

use super::error::CommentError;
use super::language::LanguageProfile;
use super::tags::{escape_literal, TagRegistry};

/// Capture holding the delimiter run / indentation / asterisk prefix
pub const LEAD: &str = "lead";
/// Capture holding the matched tag literal
pub const TAG: &str = "tag";
/// Capture holding the text after the tag
pub const REST: &str = "rest";

const BLOCK_OPEN: &str = r"/\*";
const BLOCK_CLOSE: &str = r"\*/";
const DOC_MARKER: &str = r"\*";

/// Outer/inner expression pair for one block style
#[derive(Debug, Clone)]
pub struct BlockPatterns {
    /// Finds whole blocks; `body` is the lazily captured content
    pub outer: Regex,
    /// Finds tagged lines inside a block
    pub inner: Regex,
}

fn compile(pattern: String) -> Result<Regex, CommentError> {
    Regex::new(&pattern).map_err(|e| CommentError::InvalidPattern {
        pattern,
        reason: e.to_string(),
    })
}

/// Pattern for `delimiter`-led line comments
pub fn build_single_line(delimiter: &str, registry: &TagRegistry) -> Result<Regex, CommentError> {
    let trailing = delimiter
        .chars()
        .last()
        .map(|c| format!("{}*", escape_literal(c.encode_utf8(&mut [0; 4]))))
        .unwrap_or_default();

    compile(format!(
        r"(?i)(?P<{LEAD}>(?:{})+{trailing}[ \t]*)(?P<{TAG}>{})(?P<{REST}>[^\r\n]*)",
        escape_literal(delimiter),
        registry.alternation(),
    ))
}

/// Pattern for plain-text documents: each line start is the lead
pub fn build_plain_text(registry: &TagRegistry) -> Result<Regex, CommentError> {
    compile(format!(
        r"(?im)^(?P<{LEAD}>[ \t]*)(?P<{TAG}>{})(?P<{REST}>[^\r\n]*)",
        registry.alternation(),
    ))
}

/// Line pattern appropriate for a resolved profile, `None` if the profile
/// has nothing to scan
pub fn build_for_profile(
    profile: &LanguageProfile,
    registry: &TagRegistry,
) -> Result<Option<Regex>, CommentError> {
    if !profile.is_supported {
        return Ok(None);
    }
    if profile.plain_text {
        return build_plain_text(registry).map(Some);
    }
    match profile.single_line_delimiter.as_deref() {
        Some(delimiter) => build_single_line(delimiter, registry).map(Some),
        None => Ok(None),
    }
}

/// Outer/inner pair for doc-style (`/** */`) or plain (`/* */`) blocks
pub fn build_multiline(registry: &TagRegistry, doc_style: bool) -> Result<BlockPatterns, CommentError> {
    // Doc blocks: `/**` then anything but `/` (so `/**/` stays an empty plain
    // block). Plain blocks: `/*` then anything but the doc marker.
    let (open, body_head) = if doc_style {
        (format!("{BLOCK_OPEN}{DOC_MARKER}"), "[^/]")
    } else {
        (BLOCK_OPEN.to_string(), "[^*]")
    };

    let outer = compile(format!(
        r"(?m)(?:^|[ \t])(?P<open>{open})(?P<body>{body_head}[\s\S]*?)(?P<close>{BLOCK_CLOSE})"
    ))?;

    let line_lead = if doc_style { r"[ \t]*\*[ \t]*" } else { r"[ \t]*" };

    // The remainder may not open with `*` or `/`, which keeps the closing
    // marker out of a match.
    let inner = compile(format!(
        r"(?im)^(?P<{LEAD}>{line_lead})(?P<{TAG}>{})[ :]*(?P<{REST}>[^*/\r\n][^\r\n]*)",
        registry.alternation(),
    ))?;

    Ok(BlockPatterns { outer, inner })
}

// ==================== TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::config::{default_tags, TagConfig};

    fn registry(literals: &[&str]) -> TagRegistry {
        let configs: Vec<TagConfig> = literals.iter().map(|l| TagConfig::new(l, "#FFF")).collect();
        TagRegistry::build(&configs).unwrap()
    }

    fn tag_of<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
        re.captures(text).and_then(|c| c.name(TAG)).map(|m| m.as_str())
    }

    #[test]
    fn test_single_line_basic() {
        let re = build_single_line("//", &registry(&["TODO", "!"])).unwrap();
        let cap = re.captures("let x = 1; // TODO: tidy up").unwrap();
        assert_eq!(&cap[TAG], "TODO");
        assert_eq!(&cap[REST], ": tidy up");
        assert_eq!(&cap[0], "// TODO: tidy up");
    }

    #[test]
    fn test_single_line_case_insensitive() {
        let re = build_single_line("#", &registry(&["todo"])).unwrap();
        assert_eq!(tag_of(&re, "# ToDo later"), Some("ToDo"));
    }

    #[test]
    fn test_single_line_repeated_delimiter_and_tabs() {
        let re = build_single_line("//", &registry(&["!"])).unwrap();
        let cap = re.captures("//// \t! loud").unwrap();
        assert_eq!(&cap[LEAD], "//// \t");
        assert_eq!(&cap[REST], " loud");
    }

    #[test]
    fn test_single_line_odd_delimiter_run() {
        let re = build_single_line("//", &registry(&["todo"])).unwrap();
        let cap = re.captures("/// TODO x").unwrap();
        assert_eq!(cap.get(0).unwrap().start(), 0);
        assert_eq!(&cap[LEAD], "/// ");

        let re = build_single_line("--", &registry(&["todo"])).unwrap();
        let cap = re.captures("--- TODO x").unwrap();
        assert_eq!(&cap[0], "--- TODO x");
        assert_eq!(&cap[LEAD], "--- ");
    }

    #[test]
    fn test_single_line_stops_at_newline() {
        let re = build_single_line("--", &registry(&["?"])).unwrap();
        let cap = re.captures("-- ? why\r\nselect 1;").unwrap();
        assert_eq!(&cap[REST], " why");
    }

    #[test]
    fn test_single_line_requires_tag_right_after_lead() {
        let re = build_single_line("//", &registry(&["TODO"])).unwrap();
        assert!(!re.is_match("// remember the TODO list"));
    }

    #[test]
    fn test_delimiter_metacharacters_escaped() {
        // `*>` would be an invalid repetition if not escaped
        let re = build_single_line("*>", &registry(&["todo"])).unwrap();
        assert_eq!(tag_of(&re, "      *> TODO fix"), Some("TODO"));
        assert!(!re.is_match("> todo"));
    }

    #[test]
    fn test_tag_that_looks_like_delimiter() {
        let re = build_single_line("//", &TagRegistry::build(&default_tags()).unwrap()).unwrap();
        let cap = re.captures("// // old_code();").unwrap();
        assert_eq!(&cap[TAG], "//");
        assert_eq!(&cap[REST], " old_code();");
    }

    #[test]
    fn test_alternation_order_wins_over_length() {
        let re = build_single_line("//", &registry(&["!", "!!"])).unwrap();
        let cap = re.captures("// !! urgent").unwrap();
        assert_eq!(&cap[TAG], "!");
        assert_eq!(&cap[REST], "! urgent");

        let re = build_single_line("//", &registry(&["!!", "!"])).unwrap();
        assert_eq!(tag_of(&re, "// !! urgent"), Some("!!"));
    }

    #[test]
    fn test_plain_text_line_start() {
        let re = build_plain_text(&registry(&["todo"])).unwrap();
        let starts: Vec<usize> = re.find_iter("todo one\n  TODO two\nnot todo").map(|m| m.start()).collect();
        assert_eq!(starts, vec![0, 9]);
    }

    #[test]
    fn test_build_for_unsupported_profile() {
        let profile = LanguageProfile::unsupported();
        assert!(build_for_profile(&profile, &registry(&["x"])).unwrap().is_none());
    }

    #[test]
    fn test_doc_outer_is_lazy() {
        let patterns = build_multiline(&registry(&["todo"]), true).unwrap();
        let text = "/** a */\ncode();\n/** b */";
        let bodies: Vec<&str> = patterns
            .outer
            .captures_iter(text)
            .map(|c| c.name("body").unwrap().as_str())
            .collect();
        assert_eq!(bodies, vec![" a ", " b "]);
    }

    #[test]
    fn test_plain_outer_skips_doc_blocks() {
        let plain = build_multiline(&registry(&["todo"]), false).unwrap();
        assert!(!plain.outer.is_match("/** doc */"));
        assert!(plain.outer.is_match("/* plain */"));

        let doc = build_multiline(&registry(&["todo"]), true).unwrap();
        assert!(!doc.outer.is_match("/* plain */"));
        assert!(!doc.outer.is_match("/**/"));
    }

    #[test]
    fn test_outer_requires_line_start_or_blank_before() {
        let plain = build_multiline(&registry(&["todo"]), false).unwrap();
        assert!(!plain.outer.is_match("a/* glued */"));
        assert!(plain.outer.is_match("a /* spaced */"));
    }

    #[test]
    fn test_doc_inner_asterisk_prefix() {
        let patterns = build_multiline(&registry(&["todo"]), true).unwrap();
        let cap = patterns.inner.captures("  * TODO: write docs").unwrap();
        assert_eq!(&cap[LEAD], "  * ");
        assert_eq!(&cap[TAG], "TODO");
        assert_eq!(&cap[REST], "write docs");
        assert!(!patterns.inner.is_match("  TODO: no asterisk"));
    }

    #[test]
    fn test_inner_rest_cannot_start_with_block_chars() {
        let patterns = build_multiline(&registry(&["*"]), false).unwrap();
        assert!(!patterns.inner.is_match(" */"));
        assert!(patterns.inner.is_match(" * highlighted"));
    }

    #[test]
    fn test_tag_with_unbalanced_closer_compiles() {
        assert!(build_single_line("//", &registry(&["]"])).is_ok());
        assert!(build_multiline(&registry(&["}"]), true).is_ok());
    }
}
