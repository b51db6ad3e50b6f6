//! CommentScanner - Runs the line and block passes over document text
//!
//! Both passes append into `RangeBuffers`, one bucket per registered tag.
//! The buffers belong to a single scan cycle: the dispatcher drains them, so
//! nothing carries over into the next cycle.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::language::LanguageProfile;
use super::pattern::{BlockPatterns, LEAD, TAG};
use super::tags::TagRegistry;

// ==================== TYPE DEFINITIONS ====================

/// Half-open byte range into the scanned text
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Per-tag range accumulators for one scan cycle, indexed like the registry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeBuffers {
    buckets: Vec<Vec<TextRange>>,
}

impl RangeBuffers {
    pub fn for_registry(registry: &TagRegistry) -> Self {
        Self {
            buckets: vec![Vec::new(); registry.len()],
        }
    }

    pub fn push(&mut self, tag_index: usize, range: TextRange) {
        if let Some(bucket) = self.buckets.get_mut(tag_index) {
            bucket.push(range);
        }
    }

    pub fn ranges(&self, tag_index: usize) -> &[TextRange] {
        self.buckets.get(tag_index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Remove and return a tag's ranges, leaving its bucket empty
    pub fn take(&mut self, tag_index: usize) -> Vec<TextRange> {
        self.buckets
            .get_mut(tag_index)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

// ==================== PASSES ====================

/// Single-line pass. Returns the number of ranges recorded.
pub fn scan_single_line(
    text: &str,
    profile: &LanguageProfile,
    pattern: &Regex,
    registry: &TagRegistry,
    buffers: &mut RangeBuffers,
) -> usize {
    if !profile.is_supported {
        return 0;
    }

    let mut recorded = 0;

    for cap in pattern.captures_iter(text) {
        let (Some(full), Some(tag)) = (cap.get(0), cap.name(TAG)) else {
            continue;
        };

        // Line 0, column 0 is the shebang slot
        if profile.skip_first_line_if_at_origin && full.start() == 0 {
            continue;
        }

        if let Some((index, _)) = registry.lookup(tag.as_str()) {
            buffers.push(index, TextRange::new(full.start(), full.end()));
            recorded += 1;
        }
    }

    recorded
}

/// Two-phase block pass: outer pattern finds blocks, inner pattern finds
/// tagged lines within each block. Ranges start at the tag and run to the end
/// of the line match. Returns the number of ranges recorded.
pub fn scan_multiline(
    text: &str,
    profile: &LanguageProfile,
    patterns: &BlockPatterns,
    registry: &TagRegistry,
    buffers: &mut RangeBuffers,
) -> usize {
    if !profile.multiline_enabled {
        return 0;
    }

    let mut recorded = 0;

    for block in patterns.outer.find_iter(text) {
        let base = block.start();

        for cap in patterns.inner.captures_iter(block.as_str()) {
            let (Some(full), Some(lead), Some(tag)) = (cap.get(0), cap.name(LEAD), cap.name(TAG)) else {
                continue;
            };

            if let Some((index, _)) = registry.lookup(tag.as_str()) {
                buffers.push(index, TextRange::new(base + lead.end(), base + full.end()));
                recorded += 1;
            }
        }
    }

    recorded
}

// ==================== TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::config::TagConfig;
    use crate::comments::language::resolve;
    use crate::comments::pattern::{build_multiline, build_single_line};

    fn registry(literals: &[&str]) -> TagRegistry {
        let configs: Vec<TagConfig> = literals.iter().map(|l| TagConfig::new(l, "#FFF")).collect();
        TagRegistry::build(&configs).unwrap()
    }

    fn single(text: &str, language: &str, literals: &[&str]) -> (RangeBuffers, usize) {
        let registry = registry(literals);
        let profile = resolve(language, true);
        let delimiter = profile.single_line_delimiter.clone().unwrap_or_default();
        let pattern = build_single_line(&delimiter, &registry).unwrap();
        let mut buffers = RangeBuffers::for_registry(&registry);
        let n = scan_single_line(text, &profile, &pattern, &registry, &mut buffers);
        (buffers, n)
    }

    #[test]
    fn test_single_line_range_covers_comment() {
        let text = "fn main() {} // TODO: ship it\n";
        let (buffers, n) = single(text, "rust", &["todo:"]);
        assert_eq!(n, 1);
        assert_eq!(buffers.ranges(0)[0].slice(text), "// TODO: ship it");
    }

    #[test]
    fn test_single_line_groups_by_tag() {
        let text = "# ! one\n# ? two\n# ! three\nx = 1";
        let (buffers, n) = single(text, "python", &["!", "?"]);
        assert_eq!(n, 3);
        assert_eq!(buffers.ranges(0).len(), 2);
        assert_eq!(buffers.ranges(1).len(), 1);
        assert_eq!(buffers.ranges(1)[0].slice(text), "# ? two");
    }

    #[test]
    fn test_unsupported_profile_is_noop() {
        let registry = registry(&["todo"]);
        let pattern = build_single_line("//", &registry).unwrap();
        let mut buffers = RangeBuffers::for_registry(&registry);
        let n = scan_single_line(
            "// todo",
            &LanguageProfile::unsupported(),
            &pattern,
            &registry,
            &mut buffers,
        );
        assert_eq!(n, 0);
        assert!(buffers.is_empty());
    }

    #[test]
    fn test_shebang_at_origin_skipped() {
        let text = "#!/bin/bash\n# ! careful\n";
        let (buffers, n) = single(text, "shellscript", &["!"]);
        assert_eq!(n, 1);
        assert_eq!(buffers.ranges(0)[0].start, 12);
    }

    #[test]
    fn test_origin_skip_only_for_shell() {
        let (_, n) = single("#!/usr/bin/env python\n", "python", &["!"]);
        assert_eq!(n, 1);
    }

    #[test]
    fn test_multiline_disabled_is_noop() {
        let registry = registry(&["todo"]);
        let patterns = build_multiline(&registry, true).unwrap();
        let mut buffers = RangeBuffers::for_registry(&registry);
        let text = "/**\n * todo: x\n */";

        for profile in [resolve("rust", false), resolve("python", true)] {
            assert_eq!(scan_multiline(text, &profile, &patterns, &registry, &mut buffers), 0);
        }
        assert!(buffers.is_empty());
    }

    #[test]
    fn test_block_offsets_are_absolute() {
        let registry = registry(&["todo"]);
        let patterns = build_multiline(&registry, true).unwrap();
        let mut buffers = RangeBuffers::for_registry(&registry);
        let text = "let a = 1;\n/**\n * TODO tidy\n */\n";

        let n = scan_multiline(text, &resolve("typescript", true), &patterns, &registry, &mut buffers);
        assert_eq!(n, 1);
        let range = buffers.ranges(0)[0];
        assert_eq!(range.slice(text), "TODO tidy");
        assert_eq!(range.start, text.find("TODO").unwrap());
    }

    #[test]
    fn test_several_blocks_and_lines() {
        let registry = registry(&["todo", "!"]);
        let patterns = build_multiline(&registry, false).unwrap();
        let mut buffers = RangeBuffers::for_registry(&registry);
        let text = "/*\n  todo a\n  ! b\n*/\nint x;\n/*\n  TODO c\n*/";

        let n = scan_multiline(text, &resolve("c", true), &patterns, &registry, &mut buffers);
        assert_eq!(n, 3);
        let todos: Vec<&str> = buffers.ranges(0).iter().map(|r| r.slice(text)).collect();
        assert_eq!(todos, vec!["todo a", "TODO c"]);
        assert_eq!(buffers.ranges(1)[0].slice(text), "! b");
    }

    #[test]
    fn test_take_clears_bucket() {
        let mut buffers = RangeBuffers {
            buckets: vec![vec![TextRange::new(0, 1)], Vec::new()],
        };
        assert_eq!(buffers.take(0), vec![TextRange::new(0, 1)]);
        assert!(buffers.ranges(0).is_empty());
        assert!(buffers.take(7).is_empty());
    }
}
