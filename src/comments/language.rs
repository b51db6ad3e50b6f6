//! DelimiterResolver - Language id to comment syntax
//!
//! Comment syntax cannot be inferred from anything the scanner sees, so it is a
//! hand-curated static table: language id → comment family → profile.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::config::HighlightConfig;

// ==================== TYPE DEFINITIONS ====================

/// Comment convention shared by a group of languages
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommentFamily {
    /// `//` line comments with `/* */` blocks
    DoubleSlash,
    Hash,
    DoubleDash,
    Apostrophe,
    Percent,
    Semicolon,
    /// `#` comments whose first line is usually a shebang
    Shell,
    /// `#` comments that also accept `/* */` blocks
    Terraform,
    /// No delimiter: every line is a comment
    PlainText,
}

impl CommentFamily {
    fn delimiter(self) -> Option<&'static str> {
        match self {
            CommentFamily::DoubleSlash => Some("//"),
            CommentFamily::Hash | CommentFamily::Shell | CommentFamily::Terraform => Some("#"),
            CommentFamily::DoubleDash => Some("--"),
            CommentFamily::Apostrophe => Some("'"),
            CommentFamily::Percent => Some("%"),
            CommentFamily::Semicolon => Some(";"),
            CommentFamily::PlainText => None,
        }
    }

    fn allows_multiline(self) -> bool {
        matches!(self, CommentFamily::DoubleSlash | CommentFamily::Terraform)
    }
}

/// Resolved scanning parameters for one language
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LanguageProfile {
    pub single_line_delimiter: Option<String>,
    pub multiline_enabled: bool,
    pub skip_first_line_if_at_origin: bool,
    pub is_supported: bool,
    /// Lines are led by their own start rather than a delimiter
    pub plain_text: bool,
}

impl LanguageProfile {
    /// Profile for a language the table does not know
    pub fn unsupported() -> Self {
        Self::default()
    }

    fn from_family(family: CommentFamily, multiline_globally_enabled: bool) -> Self {
        Self {
            single_line_delimiter: family.delimiter().map(str::to_string),
            multiline_enabled: family.allows_multiline() && multiline_globally_enabled,
            skip_first_line_if_at_origin: family == CommentFamily::Shell,
            is_supported: true,
            plain_text: family == CommentFamily::PlainText,
        }
    }
}

// ==================== LANGUAGE TABLE ====================

const LANGUAGE_TABLE: &[(&str, CommentFamily)] = &[
    // `//` family
    ("al", CommentFamily::DoubleSlash),
    ("apex", CommentFamily::DoubleSlash),
    ("c", CommentFamily::DoubleSlash),
    ("cpp", CommentFamily::DoubleSlash),
    ("csharp", CommentFamily::DoubleSlash),
    ("css", CommentFamily::DoubleSlash),
    ("dart", CommentFamily::DoubleSlash),
    ("flax", CommentFamily::DoubleSlash),
    ("fsharp", CommentFamily::DoubleSlash),
    ("go", CommentFamily::DoubleSlash),
    ("groovy", CommentFamily::DoubleSlash),
    ("haxe", CommentFamily::DoubleSlash),
    ("java", CommentFamily::DoubleSlash),
    ("javascript", CommentFamily::DoubleSlash),
    ("javascriptreact", CommentFamily::DoubleSlash),
    ("jsonc", CommentFamily::DoubleSlash),
    ("kotlin", CommentFamily::DoubleSlash),
    ("less", CommentFamily::DoubleSlash),
    ("objectpascal", CommentFamily::DoubleSlash),
    ("pascal", CommentFamily::DoubleSlash),
    ("php", CommentFamily::DoubleSlash),
    ("rust", CommentFamily::DoubleSlash),
    ("sass", CommentFamily::DoubleSlash),
    ("scala", CommentFamily::DoubleSlash),
    ("scss", CommentFamily::DoubleSlash),
    ("solidity", CommentFamily::DoubleSlash),
    ("stylus", CommentFamily::DoubleSlash),
    ("swift", CommentFamily::DoubleSlash),
    ("typescript", CommentFamily::DoubleSlash),
    ("typescriptreact", CommentFamily::DoubleSlash),
    ("verilog", CommentFamily::DoubleSlash),
    ("vue", CommentFamily::DoubleSlash),
    // `#` family
    ("coffeescript", CommentFamily::Hash),
    ("dockerfile", CommentFamily::Hash),
    ("elixir", CommentFamily::Hash),
    ("gdscript", CommentFamily::Hash),
    ("graphql", CommentFamily::Hash),
    ("julia", CommentFamily::Hash),
    ("makefile", CommentFamily::Hash),
    ("nim", CommentFamily::Hash),
    ("perl", CommentFamily::Hash),
    ("perl6", CommentFamily::Hash),
    ("powershell", CommentFamily::Hash),
    ("python", CommentFamily::Hash),
    ("r", CommentFamily::Hash),
    ("ruby", CommentFamily::Hash),
    ("tcl", CommentFamily::Hash),
    ("toml", CommentFamily::Hash),
    ("yaml", CommentFamily::Hash),
    // `--` family
    ("ada", CommentFamily::DoubleDash),
    ("elm", CommentFamily::DoubleDash),
    ("haskell", CommentFamily::DoubleDash),
    ("lua", CommentFamily::DoubleDash),
    ("plsql", CommentFamily::DoubleDash),
    ("sql", CommentFamily::DoubleDash),
    ("vhdl", CommentFamily::DoubleDash),
    // `'` family
    ("vb", CommentFamily::Apostrophe),
    // `%` family
    ("erlang", CommentFamily::Percent),
    ("latex", CommentFamily::Percent),
    ("matlab", CommentFamily::Percent),
    // `;` family
    ("clojure", CommentFamily::Semicolon),
    ("lisp", CommentFamily::Semicolon),
    ("racket", CommentFamily::Semicolon),
    ("scheme", CommentFamily::Semicolon),
    // bespoke
    ("shellscript", CommentFamily::Shell),
    ("terraform", CommentFamily::Terraform),
    ("plaintext", CommentFamily::PlainText),
];

static LANGUAGES: LazyLock<HashMap<&'static str, CommentFamily>> =
    LazyLock::new(|| LANGUAGE_TABLE.iter().copied().collect());

/// Comment family for a language id, if the table knows it
pub fn family_of(language_id: &str) -> Option<CommentFamily> {
    LANGUAGES.get(language_id).copied()
}

/// All language ids the resolver recognises
pub fn supported_languages() -> impl Iterator<Item = &'static str> {
    LANGUAGE_TABLE.iter().map(|(id, _)| *id)
}

// ==================== RESOLUTION ====================

/// Resolve a language id. Plain text is treated as unsupported here; use
/// [`resolve_with`] to honor the plain-text setting.
pub fn resolve(language_id: &str, multiline_globally_enabled: bool) -> LanguageProfile {
    match family_of(language_id) {
        Some(CommentFamily::PlainText) | None => LanguageProfile::unsupported(),
        Some(family) => LanguageProfile::from_family(family, multiline_globally_enabled),
    }
}

/// Resolve a language id against the full configuration
pub fn resolve_with(language_id: &str, config: &HighlightConfig) -> LanguageProfile {
    match family_of(language_id) {
        Some(CommentFamily::PlainText) if config.highlight_plain_text => {
            LanguageProfile::from_family(CommentFamily::PlainText, config.multiline_comments)
        }
        _ => resolve(language_id, config.multiline_comments),
    }
}

// ==================== TESTS ====================
