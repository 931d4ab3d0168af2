//! 5×7 bitmap font for banner lettering.
//!
//! Every glyph is exactly 5 columns wide and 7 rows tall. A non-space
//! character in a row means "ink"; a space means "blank".

/// Columns per glyph.
pub const GLYPH_WIDTH: usize = 5;

/// Rows per glyph.
pub const GLYPH_HEIGHT: usize = 7;

/// A single glyph, top row first.
pub type Glyph = [&'static str; GLYPH_HEIGHT];

/// The all-blank glyph; used for spaces and, outside strict mode, for any
/// character the font does not cover.
pub const BLANK: Glyph = ["     "; GLYPH_HEIGHT];

/// Every character `glyph` knows about, in table order.
pub const SUPPORTED: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 !?.-:,'/+";

/// Return the 7-row bitmap for `ch`, or `None` if the character is not in
/// the font. The caller should handle case folding before calling this.
pub fn glyph(ch: char) -> Option<Glyph> {
    let g = match ch {
        'A' => [" ### ", "#   #", "#   #", "#####", "#   #", "#   #", "#   #"],
        'B' => ["#### ", "#   #", "#   #", "#### ", "#   #", "#   #", "#### "],
        'C' => [" ### ", "#   #", "#    ", "#    ", "#    ", "#   #", " ### "],
        'D' => ["###  ", "#  # ", "#   #", "#   #", "#   #", "#  # ", "###  "],
        'E' => ["#####", "#    ", "#    ", "#### ", "#    ", "#    ", "#####"],
        'F' => ["#####", "#    ", "#    ", "#### ", "#    ", "#    ", "#    "],
        'G' => [" ### ", "#   #", "#    ", "# ###", "#   #", "#   #", " ### "],
        'H' => ["#   #", "#   #", "#   #", "#####", "#   #", "#   #", "#   #"],
        'I' => [" ### ", "  #  ", "  #  ", "  #  ", "  #  ", "  #  ", " ### "],
        'J' => ["  ###", "   # ", "   # ", "   # ", "#  # ", "#  # ", " ##  "],
        'K' => ["#   #", "#  # ", "# #  ", "##   ", "# #  ", "#  # ", "#   #"],
        'L' => ["#    ", "#    ", "#    ", "#    ", "#    ", "#    ", "#####"],
        'M' => ["#   #", "## ##", "# # #", "# # #", "#   #", "#   #", "#   #"],
        'N' => ["#   #", "#   #", "##  #", "# # #", "#  ##", "#   #", "#   #"],
        'O' => [" ### ", "#   #", "#   #", "#   #", "#   #", "#   #", " ### "],
        'P' => ["#### ", "#   #", "#   #", "#### ", "#    ", "#    ", "#    "],
        'Q' => [" ### ", "#   #", "#   #", "#   #", "# # #", "#  # ", " ## #"],
        'R' => ["#### ", "#   #", "#   #", "#### ", "# #  ", "#  # ", "#   #"],
        'S' => [" ####", "#    ", "#    ", " ### ", "    #", "    #", "#### "],
        'T' => ["#####", "  #  ", "  #  ", "  #  ", "  #  ", "  #  ", "  #  "],
        'U' => ["#   #", "#   #", "#   #", "#   #", "#   #", "#   #", " ### "],
        'V' => ["#   #", "#   #", "#   #", "#   #", "#   #", " # # ", "  #  "],
        'W' => ["#   #", "#   #", "#   #", "# # #", "# # #", "## ##", "#   #"],
        'X' => ["#   #", "#   #", " # # ", "  #  ", " # # ", "#   #", "#   #"],
        'Y' => ["#   #", "#   #", " # # ", "  #  ", "  #  ", "  #  ", "  #  "],
        'Z' => ["#####", "    #", "   # ", "  #  ", " #   ", "#    ", "#####"],

        '0' => [" ### ", "#   #", "#  ##", "# # #", "##  #", "#   #", " ### "],
        '1' => ["  #  ", " ##  ", "  #  ", "  #  ", "  #  ", "  #  ", " ### "],
        '2' => [" ### ", "#   #", "    #", "  ## ", " #   ", "#    ", "#####"],
        '3' => ["#### ", "    #", "    #", " ### ", "    #", "    #", "#### "],
        '4' => ["   # ", "  ## ", " # # ", "#  # ", "#####", "   # ", "   # "],
        '5' => ["#####", "#    ", "#### ", "    #", "    #", "#   #", " ### "],
        '6' => ["  ## ", " #   ", "#    ", "#### ", "#   #", "#   #", " ### "],
        '7' => ["#####", "    #", "   # ", "  #  ", " #   ", " #   ", " #   "],
        '8' => [" ### ", "#   #", "#   #", " ### ", "#   #", "#   #", " ### "],
        '9' => [" ### ", "#   #", "#   #", " ####", "    #", "   # ", " ##  "],

        ' ' => BLANK,
        '!' => ["  #  ", "  #  ", "  #  ", "  #  ", "  #  ", "     ", "  #  "],
        '?' => [" ### ", "#   #", "    #", "  ## ", "  #  ", "     ", "  #  "],
        '.' => ["     ", "     ", "     ", "     ", "     ", "  ## ", "  ## "],
        '-' => ["     ", "     ", "     ", " ### ", "     ", "     ", "     "],
        ':' => ["     ", "  ## ", "  ## ", "     ", "  ## ", "  ## ", "     "],
        ',' => ["     ", "     ", "     ", "     ", "  ## ", "  #  ", " #   "],
        '\'' => ["  #  ", "  #  ", " #   ", "     ", "     ", "     ", "     "],
        '/' => ["    #", "   # ", "   # ", "  #  ", " #   ", " #   ", "#    "],
        '+' => ["     ", "  #  ", "  #  ", "#####", "  #  ", "  #  ", "     "],

        _ => return None,
    };
    debug_assert!(
        g.iter().all(|row| row.len() == GLYPH_WIDTH),
        "glyph '{ch}' is not {GLYPH_WIDTH} columns wide",
    );
    Some(g)
}

/// Whether `(row, col)` of `g` carries ink.
pub fn is_ink(g: &Glyph, row: usize, col: usize) -> bool {
    g[row].as_bytes().get(col).is_some_and(|b| *b != b' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_supported_glyph_is_five_by_seven() {
        for ch in SUPPORTED.chars() {
            let g = glyph(ch).unwrap();
            assert!(g.iter().all(|row| row.len() == GLYPH_WIDTH), "{ch:?}");
        }
    }

    #[test]
    fn every_visible_glyph_has_ink() {
        for ch in SUPPORTED.chars().filter(|c| *c != ' ') {
            let g = glyph(ch).unwrap();
            let inked = (0..GLYPH_HEIGHT)
                .any(|r| (0..GLYPH_WIDTH).any(|c| is_ink(&g, r, c)));
            assert!(inked, "glyph {ch:?} is blank");
        }
    }

    #[test]
    fn lowercase_and_unknown_are_not_in_table() {
        assert!(glyph('a').is_none());
        assert!(glyph('é').is_none());
        assert!(glyph('@').is_none());
    }

    #[test]
    fn space_is_blank() {
        assert_eq!(glyph(' '), Some(BLANK));
    }
}
