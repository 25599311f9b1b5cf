//! The run-length pattern body.

use std::io::Write;

use super::{Compiler, Step};
use crate::grid::{Cursor, Grid};
use crate::position::Position;
use crate::token::TokenKind;

const RUN_START: [TokenKind; 4] = [
    TokenKind::Number,
    TokenKind::Percent,
    TokenKind::Dead,
    TokenKind::Alive,
];

impl<W: Write> Compiler<'_, '_, W> {
    /// Decode lines separated by `$` into `grid` up to the closing `!`.
    ///
    /// Anything after the `!` is never read.
    pub(super) fn pattern_section(&mut self, grid: &mut Grid) -> Step<()> {
        let mut cursor = Cursor::origin();
        let mut start_row = 0;
        loop {
            self.line(grid, &mut cursor)?;
            if self.accept(TokenKind::Dollar) {
                self.finish_line(grid, &mut cursor, start_row, self.previous.position);
                start_row = cursor.row;
                continue;
            }
            if self.at_any(&[TokenKind::Bang, TokenKind::Eof]) {
                break;
            }
            self.unexpected("run, '$' or '!'");
            self.advance();
        }
        self.finish_line(grid, &mut cursor, start_row, self.token.position);
        self.expect(TokenKind::Bang);
        Ok(())
    }

    fn line(&mut self, grid: &mut Grid, cursor: &mut Cursor) -> Step<()> {
        loop {
            if self.at_any(&RUN_START) {
                self.run(grid, cursor)?;
            } else if !self.accept(TokenKind::Comment) {
                return Ok(());
            }
        }
    }

    /// `[count] ("b" | "o")`, where count is a number or `%(expr)`.
    fn run(&mut self, grid: &mut Grid, cursor: &mut Cursor) -> Step<()> {
        let position = self.token.position;
        let count = if self.accept(TokenKind::Number) {
            Some(self.number_value())
        } else if self.at(TokenKind::Percent) {
            let (value, text) = self.bracketed()?;
            if value < 0 {
                self.error_at(position, format!("negative value of expression '{text}'"));
                None
            } else {
                Some(value)
            }
        } else {
            Some(1)
        };

        let alive = if self.accept(TokenKind::Dead) {
            false
        } else if self.accept(TokenKind::Alive) {
            true
        } else {
            self.unexpected("'b' or 'o'");
            return Ok(());
        };

        let Some(count) = count else {
            return Ok(());
        };
        let count = usize::try_from(count).unwrap_or(usize::MAX);
        let written = grid.fill(cursor, count, alive);
        if written < count && !self.clipped {
            self.clipped = true;
            self.warning_at(position, "pattern extends past the last row, extra cells ignored");
        }
        Ok(())
    }

    /// Pad the rest of the current row with dead cells at a `$` or the closing `!`.
    ///
    /// A line that already ran into a later row is reported. A line that
    /// ended exactly on a row boundary needs no padding.
    fn finish_line(
        &mut self,
        grid: &mut Grid,
        cursor: &mut Cursor,
        start_row: usize,
        position: Position,
    ) {
        if *cursor > Cursor::new(start_row.saturating_add(1), 0) {
            self.error_at(position, "line too long");
        }
        if cursor.row == start_row || cursor.col > 0 {
            let rest = grid.width() - cursor.col;
            grid.fill(cursor, rest, false);
        }
    }
}
