//! Error and warning reporting for one parse.
//!
//! Every diagnostic is recorded, but only the first `max_errors` errors are
//! written to the sink. The next one is replaced by a single
//! "max error count exceeded" notice and later ones are counted silently.
//! Warnings are always written and never counted as errors.

use std::fmt;
use std::io::{self, Write};

use log::debug;

use crate::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::Warning => write!(f, "WARNING"),
        }
    }
}

/// A single message tied to a source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub position: Position,
}

pub struct Diagnostics<W: Write> {
    name: String,
    max_errors: usize,
    errors: usize,
    records: Vec<Diagnostic>,
    sink: W,
}

impl Diagnostics<io::Stderr> {
    /// Diagnostics for `name` written to standard error.
    pub fn stderr(name: &str, max_errors: usize) -> Self {
        Self::new(name, max_errors, io::stderr())
    }
}

impl<W: Write> Diagnostics<W> {
    pub fn new(name: &str, max_errors: usize, sink: W) -> Self {
        Self {
            name: name.to_string(),
            max_errors,
            errors: 0,
            records: Vec::new(),
            sink,
        }
    }

    /// The file name used as the location prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn error(&mut self, position: Position, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            severity: Severity::Error,
            message: message.into(),
            position,
        };
        if self.errors == self.max_errors {
            if let Err(err) = writeln!(self.sink, "{}: max error count exceeded", Severity::Error) {
                debug!("{}: diagnostic lost: {err}", self.name);
            }
        } else if self.errors < self.max_errors {
            self.write(&diagnostic);
        }
        self.errors += 1;
        self.records.push(diagnostic);
    }

    pub fn warning(&mut self, position: Position, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
            position,
        };
        self.write(&diagnostic);
        self.records.push(diagnostic);
    }

    /// Number of errors reported so far, including unprinted ones.
    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn warning_count(&self) -> usize {
        self.records.len() - self.errors
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Every diagnostic in the order it was reported.
    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    pub fn into_sink(self) -> W {
        self.sink
    }

    fn write(&mut self, diagnostic: &Diagnostic) {
        if let Err(err) = writeln!(
            self.sink,
            "{}: {}  {}:{}",
            diagnostic.severity, diagnostic.message, self.name, diagnostic.position
        ) {
            debug!("{}: diagnostic lost: {err}", self.name);
        }
    }
}
