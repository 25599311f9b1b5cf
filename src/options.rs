//! Tunables for parsing and encoding.

/// Settings for one parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Errors written out before the "max error count exceeded" notice.
    pub max_errors: usize,
    /// Width used when the header does not bind `x`.
    pub default_width: usize,
    /// Height used when the header does not bind `y`.
    pub default_height: usize,
    /// Largest `width * height` that will be allocated.
    pub max_cells: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_errors: 4,
            default_width: 10,
            default_height: 10,
            max_cells: 1 << 26,
        }
    }
}

/// Settings for writing a pattern back out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Column budget for the run-length body. Tokens are never split.
    pub line_width: usize,
    /// Text of the `#` line written before the header, if any.
    pub header_comment: Option<String>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            line_width: 80,
            header_comment: Some("Auto generated map file".to_string()),
        }
    }
}
