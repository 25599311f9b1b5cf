//! Source positions for tokens and diagnostics.

use std::fmt;

/// A position in the source text, represented as line and column.
///
/// Both `line` and `column` are 1-indexed and count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The position of the first character of a file.
    pub fn start() -> Self {
        Self { line: 1, column: 1 }
    }

    /// The position following `ch` when `ch` is read at this position.
    pub fn after(self, ch: char) -> Self {
        if ch == '\n' {
            Self::new(self.line + 1, 1)
        } else {
            Self::new(self.line, self.column + 1)
        }
    }

    /// Shift the column right by `n` characters on the same line.
    pub fn advanced(self, n: usize) -> Self {
        Self::new(self.line, self.column + n)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_after_regular_char() {
        assert_eq!(Position::start().after('x'), Position::new(1, 2));
    }

    #[test]
    fn test_after_newline_resets_column() {
        assert_eq!(Position::new(3, 17).after('\n'), Position::new(4, 1));
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(12, 4).to_string(), "12:4");
    }
}
