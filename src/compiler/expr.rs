//! Integer expressions inside `%( )`.

use std::io::Write;

use super::{Compiler, Step};
use crate::position::Position;
use crate::token::TokenKind;

impl<'src, W: Write> Compiler<'src, '_, W> {
    /// Parse `%(expr)` at the current `%`, returning the value and its source text.
    pub(super) fn bracketed(&mut self) -> Step<(i64, &'src str)> {
        let start = self.token.span.start;
        self.advance();
        self.expect(TokenKind::LParen);
        let value = self.expr()?;
        self.expect(TokenKind::RParen);

        let source = self.source;
        let end = self.previous.span.end.max(start);
        Ok((value, &source[start..end]))
    }

    /// `expr = term [("+" | "-") expr]`
    pub(super) fn expr(&mut self) -> Step<i64> {
        let position = self.token.position;
        let left = self.term()?;
        if self.accept(TokenKind::Plus) {
            let right = self.expr()?;
            self.checked(left.checked_add(right), position)
        } else if self.accept(TokenKind::Minus) {
            let right = self.expr()?;
            self.checked(left.checked_sub(right), position)
        } else {
            Ok(left)
        }
    }

    /// `term = factor [("*" | "/") term]`
    fn term(&mut self) -> Step<i64> {
        let position = self.token.position;
        let left = self.factor()?;
        if self.accept(TokenKind::Star) {
            let right = self.term()?;
            self.checked(left.checked_mul(right), position)
        } else if self.accept(TokenKind::Slash) {
            let divisor = self.previous.position;
            let right = self.term()?;
            if right == 0 {
                return Err(self.fatal(divisor, "division by zero"));
            }
            self.checked(left.checked_div(right), position)
        } else {
            Ok(left)
        }
    }

    fn factor(&mut self) -> Step<i64> {
        let position = self.token.position;
        if self.accept(TokenKind::Minus) {
            let value = self.factor()?;
            return self.checked(value.checked_neg(), position);
        }
        if self.accept(TokenKind::Plus) {
            return self.factor();
        }
        if self.accept(TokenKind::Number) {
            return Ok(self.number_value());
        }
        if self.accept(TokenKind::Identifier) {
            let name = self.previous.lexeme;
            return Ok(self.symbols.get(name).unwrap_or_else(|| {
                self.diagnostics
                    .error(position, format!("unknown variable '{name}'"));
                0
            }));
        }
        if self.accept(TokenKind::LParen) {
            let value = self.expr()?;
            self.expect(TokenKind::RParen);
            return Ok(value);
        }
        self.unexpected("expression");
        Ok(0)
    }

    fn checked(&mut self, value: Option<i64>, position: Position) -> Step<i64> {
        value.ok_or_else(|| self.fatal(position, "arithmetic overflow"))
    }
}

