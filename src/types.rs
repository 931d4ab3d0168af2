//! Shared boundary types for the banner pipeline.
//!
//! This module defines the data contracts between the stages:
//! - caller → Engine: `RenderOptions` (what to draw and on what paper)
//! - Engine → Renderer (in-memory): `BannerMatrix`, the unrotated glyph strip
//! - Renderer → caller: `Page`, the finished fixed-size character grid

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Render options
// ---------------------------------------------------------------------------

/// Direction the banner strip is turned before it is placed on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    /// First character at the top of the page, glyph tops toward the right edge.
    #[default]
    Clockwise,
    /// First character at the bottom of the page, glyph tops toward the left edge.
    CounterClockwise,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub page_width: u16,
    pub page_height: u16,
    /// `None` picks the largest zoom that fits. `Some(z)` caps the zoom at `z`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<u16>,
    pub ink_char: char,
    /// Blank rows kept above and below the banner.
    pub margin_top_bottom: u16,
    /// Blank columns kept left and right of the banner.
    pub margin_sides: u16,
    /// Reject characters that have no glyph instead of leaving a gap.
    pub strict: bool,
    pub rotation: Rotation,
    /// Upper bound on how many pages the banner may run across.
    pub max_pages: u16,
    /// Draw each letter with the letter itself instead of `ink_char`.
    pub ink_from_text: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            page_width: 80,
            page_height: 66,
            zoom: None,
            ink_char: '#',
            margin_top_bottom: 10,
            margin_sides: 5,
            strict: false,
            rotation: Rotation::Clockwise,
            max_pages: 1,
            ink_from_text: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Engine → Renderer boundary (in-memory only, never serialized)
// ---------------------------------------------------------------------------

/// The assembled, unrotated strip of scaled glyphs.
///
/// Each cell is `Some(letter)` when inked (the uppercased source character
/// that produced it) and `None` when blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerMatrix {
    pub zoom: u16,
    /// Number of pages the strip was laid out for.
    pub pages: u16,
    pub cells: Vec<Vec<Option<char>>>,
}

impl BannerMatrix {
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    pub fn width(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }
}

// ---------------------------------------------------------------------------
// Renderer → caller boundary
// ---------------------------------------------------------------------------

/// A finished banner: `pages * page_height` rows of exactly `page_width`
/// characters each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub page_width: usize,
    pub page_height: usize,
    pub pages: usize,
    pub zoom: u16,
    pub rows: Vec<Vec<char>>,
}

impl Page {
    /// A blank canvas of `pages` stacked pages.
    pub fn blank(page_width: usize, page_height: usize, pages: usize) -> Self {
        Page {
            page_width,
            page_height,
            pages,
            zoom: 0,
            rows: vec![vec![' '; page_width]; page_height * pages],
        }
    }

    /// Each row as an owned string, in print order.
    pub fn lines(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.iter().collect()).collect()
    }

    /// The page as text, rows joined with `\n` (no trailing newline).
    pub fn to_text(&self) -> String {
        self.lines().join("\n")
    }

    /// Indices of the first and last rows that carry any ink.
    pub fn inked_rows(&self) -> Option<(usize, usize)> {
        let is_inked = |row: &Vec<char>| row.iter().any(|c| *c != ' ');
        let first = self.rows.iter().position(is_inked)?;
        let last = self.rows.iter().rposition(is_inked)?;
        Some((first, last))
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_page_has_requested_shape() {
        let page = Page::blank(10, 4, 2);
        assert_eq!(page.rows.len(), 8);
        assert!(page.rows.iter().all(|r| r.len() == 10));
        assert_eq!(page.inked_rows(), None);
    }

    #[test]
    fn to_text_joins_rows_without_trailing_newline() {
        let mut page = Page::blank(3, 2, 1);
        page.rows[1][1] = '#';
        assert_eq!(page.to_text(), "   \n # ");
        assert_eq!(page.inked_rows(), Some((1, 1)));
    }

    #[test]
    fn options_deserialize_from_partial_json() {
        let opts: RenderOptions =
            serde_json::from_str(r#"{"page_width": 132, "rotation": "counter_clockwise"}"#)
                .unwrap();
        assert_eq!(opts.page_width, 132);
        assert_eq!(opts.page_height, 66);
        assert_eq!(opts.rotation, Rotation::CounterClockwise);
        assert_eq!(opts.zoom, None);
    }
}
