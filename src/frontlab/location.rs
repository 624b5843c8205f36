//! Position tracking for source locations
//!
//! Tokens carry byte offsets only. Lines and columns are derived on demand from a
//! table of line starts, so the lexer never has to count newlines.
//!
//! - [`Position`] - a 0-based line:column position; columns count characters
//! - [`SourceLocation`] - converts byte offsets to positions in O(log n)
//! - [`position_to_line_column`] - one-shot conversion for callers without a table

use serde::Serialize;
use std::fmt;

/// Represents a position in source code (line and column), both 0-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Provides fast conversion from byte offsets to line/column positions
#[derive(Debug, Clone)]
pub struct SourceLocation<'src> {
    source: &'src str,
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl<'src> SourceLocation<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self {
            source,
            line_starts,
        }
    }

    /// Convert a byte offset to a line/column position.
    ///
    /// Offsets past the end are clamped to the end of input, which belongs to the last
    /// line.
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let offset = self.clamp(byte_offset);
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i - 1);

        let line_start = self.line_starts[line];
        let column = self.source[line_start..offset].chars().count();

        Position::new(line, column)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    fn clamp(&self, byte_offset: usize) -> usize {
        let mut offset = byte_offset.min(self.source.len());
        while !self.source.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }
}

/// Map a byte offset to a 0-based `(line, column)` pair.
pub fn position_to_line_column(text: &str, offset: usize) -> (usize, usize) {
    let position = SourceLocation::new(text).byte_to_position(offset);
    (position.line, position.column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        assert_eq!(position_to_line_column("for i", 4), (0, 4));
    }

    #[test]
    fn test_after_newline() {
        let text = "ab\ncd\nef";
        assert_eq!(position_to_line_column(text, 3), (1, 0));
        assert_eq!(position_to_line_column(text, 4), (1, 1));
        assert_eq!(position_to_line_column(text, 7), (2, 1));
    }

    #[test]
    fn test_newline_character_belongs_to_its_line() {
        assert_eq!(position_to_line_column("ab\ncd", 2), (0, 2));
    }

    #[test]
    fn test_end_of_input_is_on_last_line() {
        let text = "a\nbc";
        assert_eq!(position_to_line_column(text, text.len()), (1, 2));
        assert_eq!(position_to_line_column("a\n", 2), (1, 0));
    }

    #[test]
    fn test_offset_past_end_is_clamped() {
        assert_eq!(position_to_line_column("abc", 99), (0, 3));
    }

    #[test]
    fn test_columns_count_characters() {
        // "жж" is four bytes, two characters
        assert_eq!(position_to_line_column("жж x", 5), (0, 3));
    }

    #[test]
    fn test_line_table() {
        let location = SourceLocation::new("a\nb\n");
        assert_eq!(location.line_count(), 3);
        assert_eq!(location.line_start(1), Some(2));
        assert_eq!(location.line_start(5), None);
    }
}
