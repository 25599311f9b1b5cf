//! Tokens produced by the lexer.

use std::fmt;
use std::ops::Range;

use crate::position::Position;

/// Lexical problems carried by [`TokenKind::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexError {
    /// A character that cannot start any token.
    UnexpectedChar,
    /// A quote with no matching closing quote before end of input.
    UnterminatedString,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedChar => write!(f, "unexpected character"),
            Self::UnterminatedString => write!(f, "unterminated string literal"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Error(LexError),

    Identifier,
    /// A run of decimal digits; the value is parsed on demand.
    Number,
    /// A quoted string; the lexeme excludes the quotes.
    Str,
    /// `#` to end of line.
    Comment,

    Comma,
    Equals,
    Slash,
    Dollar,
    Bang,
    LParen,
    RParen,
    Star,
    Plus,
    Minus,
    Percent,

    /// `b` or `B`
    Dead,
    /// `o` or `O`
    Alive,
    /// `s` or `S`
    Survive,

    Rule,
    Call,
}

impl TokenKind {
    /// How the parser names this kind when it is expected but missing.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Eof => "end of input",
            Self::Error(_) => "invalid input",
            Self::Identifier => "identifier",
            Self::Number => "number",
            Self::Str => "string",
            Self::Comment => "comment",
            Self::Comma => "','",
            Self::Equals => "'='",
            Self::Slash => "'/'",
            Self::Dollar => "'$'",
            Self::Bang => "'!'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::Star => "'*'",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Percent => "'%'",
            Self::Dead => "'b'",
            Self::Alive => "'o'",
            Self::Survive => "'s'",
            Self::Rule => "'rule'",
            Self::Call => "'call'",
        }
    }
}

/// A token together with its text and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
    /// Byte range in the source, including quotes for strings.
    pub span: Range<usize>,
    pub position: Position,
}

impl<'a> Token<'a> {
    /// An end-of-input token at `offset`.
    pub fn eof(offset: usize, position: Position) -> Self {
        Self {
            kind: TokenKind::Eof,
            lexeme: "",
            span: offset..offset,
            position,
        }
    }

    /// Parse the lexeme of a number token.
    ///
    /// Returns `None` for other kinds and for literals that do not fit in an `i64`.
    pub fn value(&self) -> Option<i64> {
        match self.kind {
            TokenKind::Number => self.lexeme.parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::Number => write!(f, "number '{}'", self.lexeme),
            TokenKind::Str => write!(f, "string '{}'", self.lexeme),
            TokenKind::Comment => write!(f, "comment '{}'", self.lexeme.trim_end()),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, lexeme: &str) -> Token<'_> {
        Token {
            kind,
            lexeme,
            span: 0..lexeme.len(),
            position: Position::start(),
        }
    }

    #[test]
    fn test_number_value() {
        assert_eq!(token(TokenKind::Number, "042").value(), Some(42));
        assert_eq!(token(TokenKind::Identifier, "x").value(), None);
    }

    #[test]
    fn test_number_value_out_of_range() {
        assert_eq!(token(TokenKind::Number, "99999999999999999999").value(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(token(TokenKind::Identifier, "x").to_string(), "identifier 'x'");
        assert_eq!(token(TokenKind::Dollar, "$").to_string(), "'$'");
        assert_eq!(token(TokenKind::Dead, "B").to_string(), "'B'");
        assert_eq!(Token::eof(0, Position::start()).to_string(), "end of input");
    }
}
