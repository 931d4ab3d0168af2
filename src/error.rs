//! Error types for banner rendering.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Strict mode only: `ch` at char index `index` has no glyph.
    #[error("no glyph for {ch:?} at position {index}")]
    UnsupportedCharacter { ch: char, index: usize },

    /// Even zoom 1 overflows the printable area.
    #[error(
        "banner needs {needed_rows}x{needed_cols} (rows x cols) at zoom 1, \
         but only {available_rows}x{available_cols} fit inside the margins"
    )]
    BannerTooLarge {
        needed_rows: usize,
        needed_cols: usize,
        available_rows: usize,
        available_cols: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
