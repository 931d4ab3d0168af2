//! Engine: the layout stage.
//!
//! Turns text plus `RenderOptions` into a `BannerMatrix`: glyphs looked up,
//! zoom chosen against the page and its margins, and the scaled glyphs laid
//! side by side. The engine never rotates or positions anything on a page.

pub mod font;

use tracing::debug;

use crate::error::RenderError;
use crate::types::{BannerMatrix, RenderOptions};
use font::{Glyph, GLYPH_HEIGHT, GLYPH_WIDTH};

/// Blank columns between consecutive glyphs. Not scaled by zoom.
pub const GLYPH_SPACING: usize = 1;

pub struct Engine;

impl Engine {
    /// Lay out `text` as an unrotated strip at the largest zoom that fits.
    pub fn compile(text: &str, opts: &RenderOptions) -> Result<BannerMatrix, RenderError> {
        validate(text, opts)?;
        let glyphs = lookup(text, opts.strict)?;
        let (zoom, pages) = fit(glyphs.len(), opts)?;
        debug!(zoom, pages, chars = glyphs.len(), "banner layout chosen");

        Ok(BannerMatrix {
            zoom,
            pages,
            cells: assemble(&glyphs, zoom),
        })
    }
}

/// Reject options no page could be drawn with.
pub fn validate(text: &str, opts: &RenderOptions) -> Result<(), RenderError> {
    let invalid = |msg: String| Err(RenderError::InvalidConfiguration(msg));

    if text.is_empty() {
        return invalid("text is empty".into());
    }
    if opts.page_width == 0 || opts.page_height == 0 {
        return invalid(format!(
            "page must be at least 1x1, got {}x{}",
            opts.page_width, opts.page_height
        ));
    }
    if opts.zoom == Some(0) {
        return invalid("zoom must be at least 1".into());
    }
    if opts.max_pages == 0 {
        return invalid("max_pages must be at least 1".into());
    }
    if u32::from(opts.margin_sides) * 2 > u32::from(opts.page_width) {
        return invalid(format!(
            "side margin {} is more than half the page width {}",
            opts.margin_sides, opts.page_width
        ));
    }
    if u32::from(opts.margin_top_bottom) * 2 > u32::from(opts.page_height) {
        return invalid(format!(
            "top/bottom margin {} is more than half the page height {}",
            opts.margin_top_bottom, opts.page_height
        ));
    }
    if !opts.ink_from_text && opts.ink_char.is_whitespace() {
        return invalid(format!("ink character {:?} would print nothing", opts.ink_char));
    }
    Ok(())
}

/// Map each character to its glyph after ASCII upper-casing.
///
/// Outside strict mode an unknown character becomes a blank glyph so the
/// spacing of the rest of the banner is preserved.
pub fn lookup(text: &str, strict: bool) -> Result<Vec<(char, Glyph)>, RenderError> {
    text.chars()
        .enumerate()
        .map(|(index, ch)| {
            let upper = ch.to_ascii_uppercase();
            match font::glyph(upper) {
                Some(g) => Ok((upper, g)),
                None if strict => Err(RenderError::UnsupportedCharacter { ch, index }),
                None => {
                    debug!(?ch, index, "no glyph, leaving a gap");
                    Ok((upper, font::BLANK))
                }
            }
        })
        .collect()
}

/// Length of the strip along the text direction, in cells.
pub fn strip_length(chars: usize, zoom: usize) -> usize {
    if chars == 0 {
        return 0;
    }
    chars * GLYPH_WIDTH * zoom + (chars - 1) * GLYPH_SPACING
}

/// Thickness of the strip across the text direction, in cells.
pub fn strip_thickness(zoom: usize) -> usize {
    GLYPH_HEIGHT * zoom
}

/// Printable columns across the page once side margins are taken out.
fn usable_cols(opts: &RenderOptions) -> usize {
    usize::from(opts.page_width).saturating_sub(2 * usize::from(opts.margin_sides))
}

/// Printable rows down `pages` stacked pages once the top and bottom margins
/// are taken out.
fn usable_rows(opts: &RenderOptions, pages: u16) -> usize {
    (usize::from(pages) * usize::from(opts.page_height))
        .saturating_sub(2 * usize::from(opts.margin_top_bottom))
}

/// Choose `(zoom, pages)` for `chars` glyphs.
///
/// Uses the fewest pages that admit any zoom, then the largest zoom that fits
/// on that many pages. An explicit zoom is an upper bound, not a demand.
pub fn fit(chars: usize, opts: &RenderOptions) -> Result<(u16, u16), RenderError> {
    let cols = usable_cols(opts);
    let mut ceiling = cols / GLYPH_HEIGHT;
    if let Some(z) = opts.zoom {
        ceiling = ceiling.min(usize::from(z));
    }

    for pages in 1..=opts.max_pages {
        let rows = usable_rows(opts, pages);
        let best = (1..=ceiling)
            .rev()
            .find(|&z| strip_length(chars, z) <= rows && strip_thickness(z) <= cols);
        if let Some(zoom) = best {
            if let Some(requested) = opts.zoom {
                if usize::from(requested) > zoom {
                    debug!(requested, zoom, "requested zoom reduced to fit the page");
                }
            }
            // `zoom <= cols / 7` and `cols` came from a u16, so this cannot truncate.
            return Ok((zoom as u16, pages));
        }
    }

    Err(RenderError::BannerTooLarge {
        needed_rows: strip_length(chars, 1),
        needed_cols: strip_thickness(1),
        available_rows: usable_rows(opts, opts.max_pages),
        available_cols: cols,
    })
}

/// Scale each glyph by `zoom` and lay them left to right with
/// `GLYPH_SPACING` blank columns in between.
pub fn assemble(glyphs: &[(char, Glyph)], zoom: u16) -> Vec<Vec<Option<char>>> {
    let z = usize::from(zoom);
    let width = strip_length(glyphs.len(), z);
    let height = strip_thickness(z);
    let mut cells = vec![vec![None; width]; height];

    let advance = GLYPH_WIDTH * z + GLYPH_SPACING;
    for (i, (letter, g)) in glyphs.iter().enumerate() {
        let x0 = i * advance;
        for (y, row) in cells.iter_mut().enumerate() {
            for dx in 0..GLYPH_WIDTH * z {
                if font::is_ink(g, y / z, dx / z) {
                    row[x0 + dx] = Some(*letter);
                }
            }
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_length_counts_one_gap_between_glyphs() {
        assert_eq!(strip_length(1, 1), 5);
        assert_eq!(strip_length(2, 1), 11);
        assert_eq!(strip_length(2, 3), 31);
        assert_eq!(strip_length(0, 4), 0);
    }

    #[test]
    fn default_page_fits_two_letters_at_zoom_four() {
        // 46 usable rows: 2*5*4 + 1 = 41 fits, 2*5*5 + 1 = 51 does not.
        assert_eq!(fit(2, &RenderOptions::default()), Ok((4, 1)));
    }

    #[test]
    fn single_letter_is_capped_by_page_width() {
        // 70 usable columns cap the thickness at 7*10.
        let opts = RenderOptions {
            page_height: 200,
            ..Default::default()
        };
        assert_eq!(fit(1, &opts), Ok((10, 1)));
    }

    #[test]
    fn explicit_zoom_is_an_upper_bound() {
        let opts = RenderOptions {
            zoom: Some(2),
            ..Default::default()
        };
        assert_eq!(fit(2, &opts), Ok((2, 1)));

        let opts = RenderOptions {
            zoom: Some(9),
            ..Default::default()
        };
        assert_eq!(fit(2, &opts), Ok((4, 1)));
    }

    #[test]
    fn extra_pages_are_used_only_when_needed() {
        let opts = RenderOptions {
            max_pages: 3,
            ..Default::default()
        };
        assert_eq!(fit(2, &opts), Ok((4, 1)));

        // 20 chars need 119 rows at zoom 1. Two pages leave 112, three leave 178.
        assert_eq!(fit(20, &opts), Ok((1, 3)));
    }

    #[test]
    fn too_long_reports_zoom_one_geometry() {
        let err = fit(43, &RenderOptions::default()).unwrap_err();
        assert_eq!(
            err,
            RenderError::BannerTooLarge {
                needed_rows: 257,
                needed_cols: 7,
                available_rows: 46,
                available_cols: 70,
            }
        );
    }

    #[test]
    fn lookup_folds_case_and_blanks_unknowns() {
        let glyphs = lookup("a@", false).unwrap();
        assert_eq!(glyphs[0].0, 'A');
        assert_eq!(glyphs[1].1, font::BLANK);
    }

    #[test]
    fn strict_lookup_names_the_offender() {
        assert_eq!(
            lookup("OK~", true),
            Err(RenderError::UnsupportedCharacter { ch: '~', index: 2 })
        );
    }

    #[test]
    fn assemble_scales_cells_into_blocks() {
        let glyphs = lookup("I", false).unwrap();
        let cells = assemble(&glyphs, 2);
        assert_eq!(cells.len(), 14);
        assert_eq!(cells[0].len(), 10);
        // Top row of 'I' is " ### ": columns 2..8 inked at zoom 2.
        let top: String = cells[0].iter().map(|c| if c.is_some() { '#' } else { ' ' }).collect();
        assert_eq!(top, "  ######  ");
        assert_eq!(cells[0], cells[1]);
    }

    #[test]
    fn assemble_leaves_separator_column_blank() {
        let glyphs = lookup("HH", false).unwrap();
        let cells = assemble(&glyphs, 1);
        assert!(cells.iter().all(|row| row[5].is_none()));
        assert_eq!(cells[3][6], Some('H'));
    }

    #[test]
    fn validate_rejects_bad_geometry() {
        let bad = [
            RenderOptions { zoom: Some(0), ..Default::default() },
            RenderOptions { page_width: 0, ..Default::default() },
            RenderOptions { margin_sides: 41, ..Default::default() },
            RenderOptions { margin_top_bottom: 34, ..Default::default() },
            RenderOptions { max_pages: 0, ..Default::default() },
            RenderOptions { ink_char: ' ', ..Default::default() },
        ];
        for opts in bad {
            assert!(matches!(
                validate("X", &opts),
                Err(RenderError::InvalidConfiguration(_))
            ));
        }
        assert!(validate("X", &RenderOptions::default()).is_ok());
    }
}
