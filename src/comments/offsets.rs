//! LineIndex - Byte offsets to host offsets and positions
//!
//! The regex engine reports UTF-8 byte offsets. JavaScript hosts index strings
//! by UTF-16 code units and address positions as `{line, character}`, so every
//! range is translated once at flush time.
//!
//! Line breaks are `\n`, `\r\n` and a lone `\r`, as editor hosts count them.

use serde::{Deserialize, Serialize};

use super::config::OffsetEncoding;

/// Zero-based line/character position, character counted in the host encoding
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

/// Line table for one document snapshot
#[derive(Debug)]
pub struct LineIndex<'a> {
    text: &'a str,
    encoding: OffsetEncoding,
    /// Byte offset of each line start
    line_starts: Vec<usize>,
    /// Host-encoded offset of each line start
    host_line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str, encoding: OffsetEncoding) -> Self {
        let mut line_starts = vec![0];
        let mut host_line_starts = vec![0];
        let mut host_offset = 0;

        let mut chars = text.char_indices().peekable();
        while let Some((byte_offset, c)) = chars.next() {
            host_offset += match encoding {
                OffsetEncoding::Utf8 => c.len_utf8(),
                OffsetEncoding::Utf16 => c.len_utf16(),
            };
            let breaks = match c {
                '\n' => true,
                '\r' => !matches!(chars.peek(), Some((_, '\n'))),
                _ => false,
            };
            if breaks {
                line_starts.push(byte_offset + 1);
                host_line_starts.push(host_offset);
            }
        }

        Self {
            text,
            encoding,
            line_starts,
            host_line_starts,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    fn line_of(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset) - 1
    }

    /// Position of a byte offset. Offsets past the end clamp to the end.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line = self.line_of(offset);
        let line_text = &self.text[self.line_starts[line]..offset];

        let character = match self.encoding {
            OffsetEncoding::Utf8 => line_text.len(),
            OffsetEncoding::Utf16 => line_text.encode_utf16().count(),
        };

        Position { line, character }
    }

    /// Offset of a byte offset in the host encoding
    pub fn host_offset(&self, offset: usize) -> usize {
        let position = self.position(offset);
        self.host_line_starts[position.line] + position.character
    }
}

// ==================== TESTS ====================
