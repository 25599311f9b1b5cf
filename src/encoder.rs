//! Run-length encoder, the inverse of the pattern decoder.
//!
//! Output is a header comment, the `x`/`y`/`rule` header line, then each row
//! as maximal runs of `<count><marker>` separated by `$` and terminated by `!`.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use itertools::Itertools;
use log::debug;

use crate::grid::{Grid, Pattern};
use crate::options::EncodeOptions;
use crate::rules::Rules;

/// A grid and rule formatted as RTL text.
pub struct Encoding<'a> {
    grid: &'a Grid,
    rules: &'a Rules,
    options: &'a EncodeOptions,
}

impl<'a> Encoding<'a> {
    pub fn new(grid: &'a Grid, rules: &'a Rules, options: &'a EncodeOptions) -> Self {
        Self {
            grid,
            rules,
            options,
        }
    }
}

impl fmt::Display for Encoding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(comment) = &self.options.header_comment {
            writeln!(f, "# {comment}")?;
        }
        writeln!(
            f,
            "x = {}, y = {}, rule = {}",
            self.grid.width(),
            self.grid.height(),
            self.rules
        )?;

        let mut body = WrappedLine::new(f, self.options.line_width);
        for (index, row) in self.grid.rows().enumerate() {
            if index > 0 {
                body.token("$")?;
            }
            for (count, &alive) in row.iter().dedup_with_count() {
                let marker = if alive { 'o' } else { 'b' };
                if count == 1 {
                    body.token(marker.encode_utf8(&mut [0; 4]))?;
                } else {
                    body.token(&format!("{count}{marker}"))?;
                }
            }
        }
        body.token("!")?;
        body.finish()
    }
}

/// Writes whole tokens, breaking the line before any token that would overflow it.
struct WrappedLine<'f> {
    out: &'f mut dyn fmt::Write,
    width: usize,
    column: usize,
}

impl<'f> WrappedLine<'f> {
    fn new(out: &'f mut dyn fmt::Write, width: usize) -> Self {
        Self {
            out,
            width,
            column: 0,
        }
    }

    fn token(&mut self, token: &str) -> fmt::Result {
        if self.column > 0 && self.column + token.len() > self.width {
            writeln!(self.out)?;
            self.column = 0;
        }
        self.column += token.len();
        self.out.write_str(token)
    }

    fn finish(self) -> fmt::Result {
        writeln!(self.out)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = EncodeOptions::default();
        fmt::Display::fmt(&Encoding::new(&self.grid, &self.rules, &options), f)
    }
}

/// Write `grid` and `rules` to `out` with default options.
pub fn serialize(grid: &Grid, rules: &Rules, out: &mut dyn Write) -> io::Result<()> {
    encode(grid, rules, &EncodeOptions::default(), out)
}

/// Write `grid` and `rules` to `out`.
pub fn encode(
    grid: &Grid,
    rules: &Rules,
    options: &EncodeOptions,
    out: &mut dyn Write,
) -> io::Result<()> {
    debug!(
        "encoding {}x{} grid, {} live cells, rule {}",
        grid.width(),
        grid.height(),
        grid.population(),
        rules
    );
    write!(out, "{}", Encoding::new(grid, rules, options))?;
    out.flush()
}

/// Encode `pattern` into a newly created file at `path`.
pub fn save_to_file(pattern: &Pattern, path: impl AsRef<Path>, options: &EncodeOptions) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    encode(&pattern.grid, &pattern.rules, options, &mut writer)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from(rows: &[&str]) -> Grid {
        let mut grid = Grid::new(rows.len(), rows[0].len());
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                grid.set(row, col, ch == 'o');
            }
        }
        grid
    }

    fn body(grid: &Grid, line_width: usize) -> String {
        let options = EncodeOptions {
            line_width,
            header_comment: None,
        };
        let text = Encoding::new(grid, &Rules::default(), &options).to_string();
        text.lines().skip(1).join("\n")
    }

    #[test]
    fn test_glider() {
        let pattern = Pattern::new(grid_from(&[".o.", "..o", "ooo"]), Rules::default());
        assert_eq!(
            pattern.to_string(),
            "# Auto generated map file\nx = 3, y = 3, rule = B3/S23\nbob$2bo$3o!\n"
        );
    }

    #[test]
    fn test_without_header_comment() {
        let options = EncodeOptions {
            header_comment: None,
            ..EncodeOptions::default()
        };
        let grid = grid_from(&["o"]);
        let rules = Rules::new([3, 6], [2, 3]);
        assert_eq!(
            Encoding::new(&grid, &rules, &options).to_string(),
            "x = 1, y = 1, rule = B36/S23\no!\n"
        );
    }

    #[test]
    fn test_dead_rows_are_written() {
        assert_eq!(body(&Grid::new(2, 4), 80), "4b$4b!");
    }

    #[test]
    fn test_runs_do_not_cross_rows() {
        assert_eq!(body(&grid_from(&["oo", "oo"]), 80), "2o$2o!");
    }

    #[test]
    fn test_wrap_keeps_tokens_whole() {
        let grid = grid_from(&["oo...oo...oo."]);
        assert_eq!(body(&grid, 5), "2o3b\n2o3b\n2ob!");
    }

    #[test]
    fn test_wrapped_lines_fit() {
        let row: String = (0..200).map(|i| if i % 3 == 0 { 'o' } else { '.' }).collect();
        let grid = grid_from(&[row.as_str()]);
        let text = body(&grid, 16);
        assert!(text.lines().count() > 1);
        assert!(text.lines().all(|line| line.len() <= 16), "{text}");
        assert!(text.ends_with('!'));
    }

    #[test]
    fn test_serialize_to_writer() {
        let grid = grid_from(&["o."]);
        let mut out = Vec::new();
        serialize(&grid, &Rules::default(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "# Auto generated map file\nx = 2, y = 1, rule = B3/S23\nob!\n"
        );
    }
}
