//! Renderer: the deterministic page rasterizer.
//!
//! Takes the `BannerMatrix` produced by the engine, turns it a quarter turn,
//! and stamps it into the middle of a blank `Page`.
//!
//! The renderer is pure and stateless. Given the same input, it always
//! produces the same output.

use crate::engine::Engine;
use crate::error::RenderError;
use crate::types::{BannerMatrix, Page, RenderOptions, Rotation};

pub struct Renderer;

impl Renderer {
    /// Render `text` as a sideways banner centred on the page.
    ///
    /// The result has `pages * page_height` rows of `page_width` characters,
    /// where `pages` is 1 unless `max_pages` allows more and the text needs it.
    pub fn render(text: &str, opts: &RenderOptions) -> Result<Page, RenderError> {
        let banner = Engine::compile(text, opts)?;
        let rotated = rotate(&banner.cells, opts.rotation);
        Ok(Self::stamp(&rotated, &banner, opts))
    }

    /// Copy the rotated strip into the centre of a blank page.
    ///
    /// Odd leftovers go below and to the right of the banner.
    fn stamp(rotated: &[Vec<Option<char>>], banner: &BannerMatrix, opts: &RenderOptions) -> Page {
        let cols = usize::from(opts.page_width);
        let page_rows = usize::from(opts.page_height);
        let pages = usize::from(banner.pages);

        let mut page = Page::blank(cols, page_rows, pages);
        page.zoom = banner.zoom;

        let rot_h = rotated.len();
        let rot_w = rotated.first().map_or(0, Vec::len);
        let top = (page.rows.len().saturating_sub(rot_h)) / 2;
        let left = cols.saturating_sub(rot_w) / 2;

        for (y, src) in rotated.iter().enumerate() {
            let Some(dst) = page.rows.get_mut(top + y) else {
                break;
            };
            for (x, cell) in src.iter().enumerate() {
                if let (Some(letter), Some(slot)) = (cell, dst.get_mut(left + x)) {
                    *slot = if opts.ink_from_text { *letter } else { opts.ink_char };
                }
            }
        }

        page
    }
}

/// Turn a grid a quarter turn.
///
/// Clockwise: the first column of the input becomes the top row and the
/// input's top row ends up on the right. Counter-clockwise: the last column
/// becomes the top row and the input's top row ends up on the left.
pub fn rotate<T: Copy>(cells: &[Vec<T>], rotation: Rotation) -> Vec<Vec<T>> {
    let h = cells.len();
    let w = cells.first().map_or(0, Vec::len);
    match rotation {
        Rotation::Clockwise => (0..w)
            .map(|r| (0..h).map(|c| cells[h - 1 - c][r]).collect())
            .collect(),
        Rotation::CounterClockwise => (0..w)
            .map(|r| (0..h).map(|c| cells[c][w - 1 - r]).collect())
            .collect(),
    }
}
