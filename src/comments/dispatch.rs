//! RenderDispatcher - Drains per-tag ranges into host decorations
//!
//! One flush per completed cycle. Every registered tag is emitted, in
//! registration order, even when it matched nothing: the host replaces a
//! decoration's ranges wholesale, so an empty list is what clears stale
//! highlights.

use serde::Serialize;

use super::offsets::{LineIndex, Position};
use super::scanner::RangeBuffers;
use super::tags::{TagRegistry, TagStyle};

/// Host-ready style: the configured style plus derived CSS-like values
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StyleDescriptor {
    #[serde(flatten)]
    pub base: TagStyle,
    pub text_decoration: String,
    pub font_weight: String,
    pub font_style: String,
}

impl From<&TagStyle> for StyleDescriptor {
    fn from(style: &TagStyle) -> Self {
        Self {
            base: style.clone(),
            text_decoration: style.text_decoration(),
            font_weight: style.font_weight().to_string(),
            font_style: style.font_style().to_string(),
        }
    }
}

/// One range in host coordinates
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DecorationRange {
    /// Offset in the configured host encoding
    pub start: usize,
    pub end: usize,
    pub start_position: Position,
    pub end_position: Position,
}

/// Style and ranges for one tag
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Decoration {
    pub tag: String,
    pub style: StyleDescriptor,
    pub ranges: Vec<DecorationRange>,
}

/// Emit every tag's style with its accumulated ranges, then clear them
pub fn flush(
    registry: &TagRegistry,
    buffers: &mut RangeBuffers,
    index: &LineIndex<'_>,
) -> Vec<Decoration> {
    registry
        .tags()
        .iter()
        .enumerate()
        .map(|(tag_index, tag)| Decoration {
            tag: tag.literal.clone(),
            style: StyleDescriptor::from(&tag.style),
            ranges: buffers
                .take(tag_index)
                .into_iter()
                .map(|range| DecorationRange {
                    start: index.host_offset(range.start),
                    end: index.host_offset(range.end),
                    start_position: index.position(range.start),
                    end_position: index.position(range.end),
                })
                .collect(),
        })
        .collect()
}

// ==================== TESTS ====================
