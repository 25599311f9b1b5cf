//! Compiler and encoder for RTL, a run-length format for life-like automaton patterns.
//!
//! # Example
//!
//! ```rust
//! use rtl::{Rules, parse};
//!
//! let source = "# glider\nx = 3, y = 3, rule = B3/S23\nbo$2bo$3o!";
//! let pattern = parse(source.as_bytes(), "glider.rtl").unwrap();
//!
//! assert_eq!(pattern.rules, Rules::default());
//! assert_eq!(pattern.grid.population(), 5);
//!
//! // Headers may bind variables and compute run counts from them
//! let source = "n = 2, x = %(n + 1), y = 1, rule = B3/S23\n%(n)bo!";
//! let pattern = parse(source.as_bytes(), "shifted.rtl").unwrap();
//! assert!(pattern.grid.get(0, 2));
//!
//! // Displaying a pattern re-encodes it
//! assert!(pattern.to_string().ends_with("x = 3, y = 1, rule = B3/S23\n2bo!\n"));
//! ```

pub mod compiler;
pub mod diagnostics;
mod encoder;
mod grid;
pub mod lexer;
mod options;
mod position;
mod rules;
mod symbols;
pub mod token;

pub use compiler::{
    ParseFailure, compile, parse, parse_file, parse_file_with, parse_stdin, parse_with,
};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use encoder::{Encoding, encode, save_to_file, serialize};
pub use grid::{Cursor, Grid, Pattern};
pub use options::{EncodeOptions, ParseOptions};
pub use position::Position;
pub use rules::{MAX_NEIGHBOURS, Rules};
pub use symbols::SymbolTable;
