use super::state::Viewport;

/// Widest the selection panel gets, in columns.
pub const LEFT_PANEL_MAX: u16 = 40;
/// Columns on the right of the preview reserved for the letter strip.
pub const LETTER_STRIP_WIDTH: u16 = 3;

pub struct Layout {
    pub term_width: u16,
    pub menu_h: u16,
    pub panel_y: u16,
    pub panel_height: u16,
    pub left_width: u16,
    /// Column of the vertical divider between the panels.
    pub divider_x: u16,
    pub right_x: u16,
    pub right_width: u16,
    pub status_y: u16,
}

impl Layout {
    pub fn compute(term_width: u16, term_height: u16) -> Self {
        let menu_h: u16 = 1;
        let status_h: u16 = 1;
        let left_width = LEFT_PANEL_MAX.min(term_width / 3);
        let divider_x = left_width;
        let right_x = divider_x + 1;
        Layout {
            term_width,
            menu_h,
            panel_y: menu_h,
            panel_height: term_height.saturating_sub(menu_h + status_h),
            left_width,
            divider_x,
            right_x,
            right_width: term_width.saturating_sub(right_x),
            status_y: term_height.saturating_sub(status_h),
        }
    }

    /// First screen row of the framed preview (below the panel title).
    pub fn preview_y(&self) -> u16 {
        self.panel_y + 1
    }

    /// Rows available to the framed preview: title above, indicators below.
    pub fn preview_height(&self) -> u16 {
        self.panel_height.saturating_sub(2)
    }

    pub fn preview_width(&self) -> u16 {
        self.right_width.saturating_sub(LETTER_STRIP_WIDTH + 1)
    }

    /// Rows available to the birthday list: header above, spacer below.
    pub fn list_height(&self) -> u16 {
        self.panel_height.saturating_sub(2)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            list_height: usize::from(self.list_height()),
            preview_height: usize::from(self.preview_height()),
            preview_width: usize::from(self.preview_width()),
        }
    }
}
