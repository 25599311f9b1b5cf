//! Hand-written lexer for RTL pattern files.
//!
//! Produces one [`Token`] per call to [`Lexer::next_token`], tracking the
//! line and column of each token start. Whitespace never produces a token.

use std::iter::Peekable;
use std::str::CharIndices;

use itertools::Itertools;
use phf::{Map, phf_map};

use crate::position::Position;
use crate::token::{LexError, Token, TokenKind};

/// Words with a meaning of their own. Anything else is an identifier.
const KEYWORDS: Map<&'static str, TokenKind> = phf_map! {
    "call" => TokenKind::Call,
    "rule" => TokenKind::Rule,
};

/// Characters that always form a token on their own.
///
/// The cell markers are listed here so that they win over identifier scanning.
const SINGLE_CHAR_TOKENS: Map<char, TokenKind> = phf_map! {
    ',' => TokenKind::Comma,
    '=' => TokenKind::Equals,
    '$' => TokenKind::Dollar,
    '/' => TokenKind::Slash,
    '!' => TokenKind::Bang,
    '*' => TokenKind::Star,
    '+' => TokenKind::Plus,
    '-' => TokenKind::Minus,
    '%' => TokenKind::Percent,
    '(' => TokenKind::LParen,
    ')' => TokenKind::RParen,
    'b' => TokenKind::Dead,
    'B' => TokenKind::Dead,
    'o' => TokenKind::Alive,
    'O' => TokenKind::Alive,
    's' => TokenKind::Survive,
    'S' => TokenKind::Survive,
};

pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    position: Position,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            position: Position::start(),
        }
    }

    /// Position of the next unread character.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Lex the next token. Returns [`TokenKind::Eof`] forever once input is exhausted.
    pub fn next_token(&mut self) -> Token<'a> {
        self.skip_whitespace();

        let start = self.offset();
        let position = self.position;
        let Some(ch) = self.bump() else {
            return Token::eof(start, position);
        };

        let kind = if let Some(&kind) = SINGLE_CHAR_TOKENS.get(&ch) {
            kind
        } else if ch.is_ascii_alphabetic() || ch == '_' {
            self.eat_while(|c| c.is_ascii_alphabetic() || c == '_');
            let end = self.offset();
            KEYWORDS
                .get(&self.source[start..end])
                .copied()
                .unwrap_or(TokenKind::Identifier)
        } else if ch.is_ascii_digit() {
            self.eat_while(|c| c.is_ascii_digit());
            TokenKind::Number
        } else if ch == '#' {
            self.eat_while(|c| c != '\n');
            TokenKind::Comment
        } else if ch == '"' || ch == '\'' {
            return self.string(ch, start, position);
        } else {
            TokenKind::Error(LexError::UnexpectedChar)
        };

        let end = self.offset();
        Token {
            kind,
            lexeme: &self.source[start..end],
            span: start..end,
            position,
        }
    }

    /// Lex a quoted string whose opening `quote` has been consumed.
    fn string(&mut self, quote: char, start: usize, position: Position) -> Token<'a> {
        let body = self.offset();
        loop {
            match self.bump() {
                Some(ch) if ch == quote => {
                    let end = self.offset();
                    return Token {
                        kind: TokenKind::Str,
                        lexeme: &self.source[body..end - quote.len_utf8()],
                        span: start..end,
                        position,
                    };
                }
                Some(_) => {}
                None => {
                    let end = self.source.len();
                    return Token {
                        kind: TokenKind::Error(LexError::UnterminatedString),
                        lexeme: &self.source[start..end],
                        span: start..end,
                        position,
                    };
                }
            }
        }
    }

    /// Byte offset of the next unread character.
    fn offset(&mut self) -> usize {
        self.chars
            .peek()
            .map_or(self.source.len(), |&(offset, _)| offset)
    }

    fn bump(&mut self) -> Option<char> {
        let (_, ch) = self.chars.next()?;
        self.position = self.position.after(ch);
        Some(ch)
    }

    /// Consume characters while `pred` holds. `pred` must reject `'\n'`.
    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        let count = self
            .chars
            .peeking_take_while(|&(_, ch)| pred(ch))
            .count();
        self.position = self.position.advanced(count);
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, ch)) = self.chars.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.bump();
        }
    }
}
