//! Recursive descent compiler for RTL pattern files.
//!
//! Reads the header statements, binds identifiers, builds the grid once both
//! dimensions are known, then decodes the run-length body into it.
//!
//! ```text
//! file    = {comment}, header, pattern ;
//! header  = [stmt, {",", stmt}] ;
//! stmt    = "call", ident, "(", [arg, {[","], arg}], ")"
//!         | (ident | "rule"), "=", value ;
//! value   = "b", [number], "/", "s", [number]     (* rule only *)
//!         | ["+" | "-"], number
//!         | "%", "(", expr, ")" ;
//! pattern = line, {"$", line}, "!" ;
//! line    = {run} ;
//! run     = [number | "%", "(", expr, ")"], ("b" | "o") ;
//! ```
//!
//! Errors are recovered locally so that one pass reports as many problems as
//! possible. Only fatal conditions (bad dimensions, division by zero,
//! overflow) stop the parse early.

mod body;
mod expr;

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::diagnostics::Diagnostics;
use crate::grid::{Grid, Pattern};
use crate::lexer::Lexer;
use crate::options::ParseOptions;
use crate::position::Position;
use crate::rules::{MAX_NEIGHBOURS, Rules};
use crate::symbols::SymbolTable;
use crate::token::{LexError, Token, TokenKind};

/// A parse that finished with errors and produced no pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub name: String,
    pub errors: usize,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} error{}, no pattern produced",
            self.name,
            self.errors,
            if self.errors == 1 { "" } else { "s" }
        )
    }
}

impl std::error::Error for ParseFailure {}

/// Parse RTL text from `input`. Diagnostics go to stderr, `print` output to stdout.
pub fn parse<R: Read>(input: R, name: &str) -> Result<Pattern> {
    parse_with(input, name, &ParseOptions::default())
}

pub fn parse_with<R: Read>(mut input: R, name: &str, options: &ParseOptions) -> Result<Pattern> {
    let mut source = String::new();
    input
        .read_to_string(&mut source)
        .with_context(|| format!("Failed to read {name}"))?;

    let mut diagnostics = Diagnostics::stderr(name, options.max_errors);
    let mut stdout = io::stdout();
    compile(&source, options, &mut diagnostics, &mut stdout).ok_or_else(|| {
        ParseFailure {
            name: name.to_string(),
            errors: diagnostics.error_count(),
        }
        .into()
    })
}

/// Parse the file at `path`, using the path as the diagnostic name.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Pattern> {
    parse_file_with(path, &ParseOptions::default())
}

pub fn parse_file_with(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Pattern> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    parse_with(BufReader::new(file), &path.display().to_string(), options)
}

pub fn parse_stdin() -> Result<Pattern> {
    parse(io::stdin().lock(), "stdin")
}

/// Compile `source` into a [`Pattern`].
///
/// Every diagnostic is reported to `diagnostics`; `print` receives the output
/// of `call print(...)` statements. Returns `None` if any error was reported.
pub fn compile<W: Write>(
    source: &str,
    options: &ParseOptions,
    diagnostics: &mut Diagnostics<W>,
    print: &mut dyn Write,
) -> Option<Pattern> {
    let result = Compiler::new(source, options, diagnostics, print).file();
    match result {
        Ok(pattern) if !diagnostics.has_errors() => Some(pattern),
        _ => {
            debug!(
                "{}: failed with {} error(s)",
                diagnostics.name(),
                diagnostics.error_count()
            );
            None
        }
    }
}

/// Marker for a fatal condition that has already been reported.
#[derive(Debug)]
struct Abort;

type Step<T> = std::result::Result<T, Abort>;

struct Compiler<'src, 'io, W: Write> {
    source: &'src str,
    lexer: Lexer<'src>,
    /// The lookahead.
    token: Token<'src>,
    /// The most recently consumed token.
    previous: Token<'src>,
    options: &'io ParseOptions,
    diagnostics: &'io mut Diagnostics<W>,
    print: &'io mut dyn Write,
    symbols: SymbolTable,
    rules: Rules,
    /// Set once a run has been dropped for falling past the last row.
    clipped: bool,
}

impl<'src, 'io, W: Write> Compiler<'src, 'io, W> {
    fn new(
        source: &'src str,
        options: &'io ParseOptions,
        diagnostics: &'io mut Diagnostics<W>,
        print: &'io mut dyn Write,
    ) -> Self {
        let start = Token::eof(0, Position::start());
        let mut compiler = Self {
            source,
            lexer: Lexer::new(source),
            token: start.clone(),
            previous: start,
            options,
            diagnostics,
            print,
            symbols: SymbolTable::new(),
            rules: Rules::empty(),
            clipped: false,
        };
        compiler.advance();
        compiler
    }

    fn file(&mut self) -> Step<Pattern> {
        while self.accept(TokenKind::Comment) {}
        self.header()?;

        let width = self.dimension("x", self.options.default_width);
        let height = self.dimension("y", self.options.default_height);
        let rules = self.resolve_rules();
        let mut grid = self.allocate(width, height)?;
        debug!(
            "{}: {}x{} grid, rule {}, bindings {:?}",
            self.diagnostics.name(),
            grid.width(),
            grid.height(),
            rules,
            self.symbols.sorted()
        );

        self.pattern_section(&mut grid)?;
        Ok(Pattern::new(grid, rules))
    }

    // Header

    fn header(&mut self) -> Step<()> {
        if !self.at_any(&[TokenKind::Identifier, TokenKind::Call, TokenKind::Rule]) {
            return Ok(());
        }
        self.statement()?;
        while self.accept(TokenKind::Comma) {
            self.statement()?;
        }
        Ok(())
    }

    fn statement(&mut self) -> Step<()> {
        if self.accept(TokenKind::Call) {
            self.call()
        } else if self.accept(TokenKind::Rule) {
            if self.expect(TokenKind::Equals) {
                self.rule_description();
            }
            Ok(())
        } else {
            self.assignment()
        }
    }

    fn assignment(&mut self) -> Step<()> {
        if !self.expect(TokenKind::Identifier) {
            return Ok(());
        }
        let name = self.previous.lexeme;
        if !self.expect(TokenKind::Equals) {
            return Ok(());
        }
        let value = self.value()?;
        self.symbols.assign(name, value);
        Ok(())
    }

    /// The right-hand side of an assignment: a signed literal or `%(expr)`.
    fn value(&mut self) -> Step<i64> {
        let sign = self.token.clone();
        let negative = self.accept(TokenKind::Minus);
        let signed = negative || self.accept(TokenKind::Plus);

        if self.accept(TokenKind::Number) {
            let value = self.number_value();
            return Ok(if negative { -value } else { value });
        }

        if !self.at(TokenKind::Percent) {
            self.unexpected("number or '%'");
            return Ok(0);
        }
        if signed {
            let which = if negative { "minus" } else { "plus" };
            self.error_at(sign.position, format!("unary {which} not allowed here"));
        }
        let (value, _) = self.bracketed()?;
        if negative {
            value
                .checked_neg()
                .ok_or_else(|| self.fatal(sign.position, "arithmetic overflow"))
        } else {
            Ok(value)
        }
    }

    /// `B<digits>/S<digits>` after `rule =`.
    fn rule_description(&mut self) {
        self.expect(TokenKind::Dead);
        let born = self.rule_digits();
        self.expect(TokenKind::Slash);
        self.expect(TokenKind::Survive);
        let survive = self.rule_digits();
        self.rules = Rules::new(born, survive);
    }

    /// Each digit of an optional number is a separate neighbour count.
    fn rule_digits(&mut self) -> Vec<u8> {
        if !self.accept(TokenKind::Number) {
            return Vec::new();
        }
        let token = self.previous.clone();
        let mut counts = Vec::new();
        for (index, digit) in token.lexeme.bytes().map(|b| b - b'0').enumerate() {
            if digit > MAX_NEIGHBOURS {
                self.error_at(
                    token.position.advanced(index),
                    format!("neighbour count {digit} out of range 0-{MAX_NEIGHBOURS}"),
                );
            } else {
                counts.push(digit);
            }
        }
        counts
    }

    fn call(&mut self) -> Step<()> {
        if !self.expect(TokenKind::Identifier) {
            return Ok(());
        }
        let name = self.previous.clone();
        let known = name.lexeme == "print";
        if !known {
            self.error_at(name.position, format!("no function named '{}'", name.lexeme));
        }
        if !self.expect(TokenKind::LParen) {
            return Ok(());
        }
        self.print_arguments(known)?;
        self.expect(TokenKind::RParen);
        Ok(())
    }

    /// Evaluate arguments up to `)` and, if `emit`, print them as one line.
    fn print_arguments(&mut self, emit: bool) -> Step<()> {
        let mut line = String::new();
        while !self.at_any(&[TokenKind::RParen, TokenKind::Eof]) {
            let start = self.token.span.start;
            if self.accept(TokenKind::Str) {
                line.push_str(self.previous.lexeme);
            } else {
                let value = self.expr()?;
                line.push_str(&value.to_string());
            }
            if self.token.span.start == start {
                self.advance();
            }
            self.accept(TokenKind::Comma);
        }
        if emit
            && !self.diagnostics.has_errors()
            && let Err(err) = writeln!(self.print, "{line}")
        {
            debug!("{}: print output lost: {err}", self.diagnostics.name());
        }
        Ok(())
    }

    fn dimension(&mut self, name: &str, default: usize) -> Option<usize> {
        let position = self.token.position;
        let value = match self.symbols.get(name) {
            Some(value) => value,
            None => {
                self.warning_at(position, format!("{name} not set, using default {default}"));
                i64::try_from(default).unwrap_or(i64::MAX)
            }
        };
        match usize::try_from(value) {
            Ok(value) if value >= 1 => Some(value),
            _ => {
                self.error_at(position, format!("invalid value of {name}: {value}"));
                None
            }
        }
    }

    fn resolve_rules(&mut self) -> Rules {
        if self.rules.is_complete() {
            return self.rules.clone();
        }
        let rules = Rules::default();
        self.warning_at(
            self.token.position,
            format!("rule not set, using default {rules}"),
        );
        rules
    }

    fn allocate(&mut self, width: Option<usize>, height: Option<usize>) -> Step<Grid> {
        let (Some(width), Some(height)) = (width, height) else {
            return Err(Abort);
        };
        match width.checked_mul(height) {
            Some(cells) if cells <= self.options.max_cells => Ok(Grid::new(height, width)),
            _ => Err(self.fatal(
                self.token.position,
                format!(
                    "grid of {width}x{height} cells exceeds the limit of {}",
                    self.options.max_cells
                ),
            )),
        }
    }

    // Tokens

    fn advance(&mut self) {
        let next = loop {
            let token = self.lexer.next_token();
            if let TokenKind::Error(LexError::UnterminatedString) = token.kind {
                self.error_at(token.position, LexError::UnterminatedString.to_string());
                continue;
            }
            break token;
        };
        self.previous = std::mem::replace(&mut self.token, next);
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.token.kind == kind
    }

    fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.token.kind)
    }

    fn accept(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `kind`, reporting and skipping every other token before it.
    ///
    /// Returns `false` if end of input was reached first.
    fn expect(&mut self, kind: TokenKind) -> bool {
        while !self.accept(kind) {
            self.unexpected(kind.describe());
            if self.at(TokenKind::Eof) {
                return false;
            }
            self.advance();
        }
        true
    }

    /// Value of the number token just consumed.
    fn number_value(&mut self) -> i64 {
        let token = self.previous.clone();
        token.value().unwrap_or_else(|| {
            self.error_at(token.position, format!("number {} out of range", token.lexeme));
            0
        })
    }

    // Diagnostics

    fn unexpected(&mut self, expected: &str) {
        let message = format!("unexpected token {}, expected {expected}", self.token);
        self.error_at(self.token.position, message);
    }

    fn error_at(&mut self, position: Position, message: impl Into<String>) {
        self.diagnostics.error(position, message);
    }

    fn warning_at(&mut self, position: Position, message: impl Into<String>) {
        self.diagnostics.warning(position, message);
    }

    /// Report a fatal error, returning the marker that unwinds the parse.
    fn fatal(&mut self, position: Position, message: impl Into<String>) -> Abort {
        self.error_at(position, message);
        Abort
    }
}
