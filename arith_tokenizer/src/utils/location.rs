//! Source location tracking
//!
//! Positions count bytes for `offset` and characters for `column`, so a
//! location can both slice the expression and point at it on screen.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and byte offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// The origin: offset 0, line 1, column 1
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// Advance position by one character
    pub fn advance(self, ch: char) -> Self {
        match ch {
            '\n' => Self {
                offset: self.offset + 1,
                line: self.line + 1,
                column: 1,
            },
            '\t' => Self {
                offset: self.offset + 1,
                line: self.line,
                column: self.column + 4 - ((self.column - 1) % 4),
            },
            _ => Self {
                offset: self.offset + ch.len_utf8(),
                line: self.line,
                column: self.column + 1,
            },
        }
    }

    /// Advance position over a string
    pub fn advance_str(self, s: &str) -> Self {
        s.chars().fold(self, |pos, ch| pos.advance(ch))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range of source text, optionally tagged with the name of
/// the expression it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Location {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Location {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Location start must not be after end"
        );
        Self {
            start,
            end,
            source: None,
        }
    }

    /// Zero-width location at `pos`
    pub fn point(pos: Position) -> Self {
        Self::new(pos, pos)
    }

    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source;
        self
    }

    /// Smallest location covering both; keeps this location's source
    pub fn extend(&self, other: &Location) -> Location {
        let start = if other.start.offset < self.start.offset {
            other.start
        } else {
            self.start
        };
        let end = if other.end.offset > self.end.offset {
            other.end
        } else {
            self.end
        };

        Location {
            start,
            end,
            source: self.source.clone().or_else(|| other.source.clone()),
        }
    }

    /// Byte length
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start.offset && offset < self.end.offset
    }

    /// Source text covered by this location, if it lies inside `input`
    pub fn slice<'a>(&self, input: &'a str) -> Option<&'a str> {
        input.get(self.start.offset..self.end.offset)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "{}:", source)?;
        }

        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A source map that tracks line starts for position lookup and diagnostics
#[derive(Debug, Clone)]
pub struct SourceMap {
    pub source: String,
    line_starts: Vec<usize>,
}

impl SourceMap {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut line_starts = vec![0];
        for (offset, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(offset + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// Line and column for a byte offset (clamped to the source length)
    pub fn position_at(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.source.len());
        while !self.source.is_char_boundary(offset) {
            offset -= 1;
        }

        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };

        let line_start = self.line_starts[line];
        let column = Position::new(line_start, line as u32 + 1, 1)
            .advance_str(&self.source[line_start..offset])
            .column;

        Position::new(offset, line as u32 + 1, column)
    }

    /// Get a line of text by line number (1-based)
    pub fn get_line(&self, line_num: u32) -> Option<&str> {
        let line_idx = (line_num as usize).checked_sub(1)?;
        let start = *self.line_starts.get(line_idx)?;
        let end = self
            .line_starts
            .get(line_idx + 1)
            .map(|next| next - 1)
            .unwrap_or(self.source.len());

        Some(self.source[start..end].trim_end_matches('\r'))
    }

    /// Render a message with the offending line and a caret underline
    pub fn format_error(&self, location: &Location, message: &str) -> String {
        let mut result = format!("Error: {}\n", message);
        match &location.source {
            Some(source) => result.push_str(&format!("  --> {}:{}\n", source, location.start)),
            None => result.push_str(&format!("  --> {}\n", location.start)),
        }

        let Some(line) = self.get_line(location.start.line) else {
            return result;
        };

        let line_num_str = location.start.line.to_string();
        let padding = " ".repeat(line_num_str.len());

        result.push_str(&format!("{} |\n", padding));
        result.push_str(&format!("{} | {}\n", line_num_str, line));

        let caret_count = if location.start.line == location.end.line {
            location.end.column.saturating_sub(location.start.column) as usize
        } else {
            (line.chars().count() + 1).saturating_sub(location.start.column as usize)
        };

        result.push_str(&format!(
            "{} | {}{}\n",
            padding,
            " ".repeat(location.start.column.saturating_sub(1) as usize),
            "^".repeat(caret_count.max(1))
        ));

        result
    }
}
