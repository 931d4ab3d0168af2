use tracing::{info, warn};

use crate::birthdays::{self, Birthday};
use crate::config::AppConfig;
use crate::error::RenderError;
use crate::renderer::Renderer;
use crate::types::Page;

/// Longest custom banner the input box accepts.
pub const MAX_CUSTOM_LEN: usize = 50;
/// Rows moved by PgUp/PgDn.
pub const PAGE_SCROLL: usize = 10;
/// Columns moved by ←/→.
pub const H_SCROLL: usize = 5;
/// Rows of blank paper kept above the first inked row when a preview opens.
const LEAD_IN: usize = 5;

/// Which source feeds the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Birthdays,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browse,
    /// Typing a CSV path to load.
    OpenFile {
        buf: String,
        /// Char index of the text cursor.
        cursor: usize,
    },
    /// Modal message; any key dismisses it.
    Error { message: String },
}

pub struct StudioState {
    pub config: AppConfig,
    pub csv_path: String,
    pub roster: Vec<Birthday>,
    pub focus: Focus,
    pub mode: Mode,
    pub selected: usize,
    /// First roster entry shown in the list.
    pub list_scroll: usize,
    pub custom_text: String,
    pub preview: Option<Result<Page, RenderError>>,
    /// First framed preview line shown.
    pub preview_scroll: usize,
    /// Columns of the framed preview scrolled off the left edge.
    pub preview_h_scroll: usize,
    pub viewport: Viewport,
    pub status_message: Option<String>,
}

/// Visible sizes of the scrollable areas, refreshed from the layout before
/// every event so scrolling can clamp against what is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub list_height: usize,
    pub preview_height: usize,
    pub preview_width: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            list_height: 15,
            preview_height: 20,
            preview_width: 82,
        }
    }
}

impl StudioState {
    /// Build the studio state. A roster that fails to load is reported in an
    /// error dialog rather than aborting.
    pub fn open(csv_path: &str, config: AppConfig) -> Self {
        let mut state = StudioState {
            config,
            csv_path: csv_path.to_string(),
            roster: Vec::new(),
            focus: Focus::Birthdays,
            mode: Mode::Browse,
            selected: 0,
            list_scroll: 0,
            custom_text: String::new(),
            preview: None,
            preview_scroll: 0,
            preview_h_scroll: 0,
            viewport: Viewport::default(),
            status_message: None,
        };
        state.load_roster();
        state.refresh_preview();
        state
    }

    /// Switch to another CSV and reset the selection.
    pub fn reload(&mut self, csv_path: &str) {
        self.csv_path = csv_path.to_string();
        self.load_roster();
        if matches!(self.mode, Mode::Error { .. }) {
            self.status_message = Some(format!("Error loading {}", self.csv_path));
        } else if self.roster.is_empty() {
            self.status_message = Some(format!("No birthdays found in {}", self.csv_path));
        } else {
            self.status_message = Some(format!(
                "Loaded {} birthdays from {}",
                self.roster.len(),
                self.csv_path
            ));
        }
        self.refresh_preview();
    }

    fn load_roster(&mut self) {
        self.selected = 0;
        self.list_scroll = 0;
        match birthdays::load(&self.csv_path) {
            Ok(roster) => {
                self.roster = roster;
                self.mode = Mode::Browse;
            }
            Err(e) => {
                warn!(path = %self.csv_path, "roster not loaded: {e}");
                self.roster.clear();
                self.mode = Mode::Error {
                    message: e.to_string(),
                };
            }
        }
    }

    /// The banner text for the current focus, if there is any.
    pub fn current_text(&self) -> Option<String> {
        match self.focus {
            Focus::Custom if !self.custom_text.is_empty() => Some(self.custom_text.clone()),
            Focus::Custom => None,
            Focus::Birthdays => self.roster.get(self.selected).map(|b| {
                birthdays::banner_text(&self.config.birthday_message, b.display_name())
            }),
        }
    }

    /// Re-render the preview and scroll it to just above the first letter.
    pub fn refresh_preview(&mut self) {
        self.preview = self
            .current_text()
            .map(|text| Renderer::render(&text, &self.config.render));
        self.preview_h_scroll = 0;
        self.preview_scroll = match &self.preview {
            Some(Ok(page)) => page
                .inked_rows()
                .map_or(0, |(first, _)| framed_index(page, first).saturating_sub(LEAD_IN)),
            _ => 0,
        };
    }

    /// Number of lines in the framed preview (rules included).
    pub fn preview_len(&self) -> usize {
        match &self.preview {
            Some(Ok(page)) => page.rows.len() + page.pages + 1,
            _ => 0,
        }
    }

    pub fn max_preview_scroll(&self) -> usize {
        self.preview_len().saturating_sub(self.viewport.preview_height)
    }

    pub fn max_h_scroll(&self) -> usize {
        match &self.preview {
            Some(Ok(page)) => (page.page_width + 2).saturating_sub(self.viewport.preview_width),
            _ => 0,
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.preview_scroll = self.preview_scroll.min(self.max_preview_scroll());
        self.preview_h_scroll = self.preview_h_scroll.min(self.max_h_scroll());
        self.keep_selection_visible();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Birthdays => Focus::Custom,
            Focus::Custom => Focus::Birthdays,
        };
        self.refresh_preview();
    }

    pub fn select_prev(&mut self) {
        if self.focus != Focus::Birthdays || self.roster.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
        self.keep_selection_visible();
        self.refresh_preview();
    }

    pub fn select_next(&mut self) {
        if self.focus != Focus::Birthdays || self.roster.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.roster.len() - 1);
        self.keep_selection_visible();
        self.refresh_preview();
    }

    fn keep_selection_visible(&mut self) {
        let height = self.viewport.list_height.max(1);
        if self.selected < self.list_scroll {
            self.list_scroll = self.selected;
        } else if self.selected >= self.list_scroll + height {
            self.list_scroll = self.selected + 1 - height;
        }
    }

    pub fn scroll_up(&mut self) {
        self.preview_scroll = self.preview_scroll.saturating_sub(PAGE_SCROLL);
    }

    pub fn scroll_down(&mut self) {
        self.preview_scroll = (self.preview_scroll + PAGE_SCROLL).min(self.max_preview_scroll());
    }

    pub fn scroll_left(&mut self) {
        self.preview_h_scroll = self.preview_h_scroll.saturating_sub(H_SCROLL);
    }

    pub fn scroll_right(&mut self) {
        self.preview_h_scroll = (self.preview_h_scroll + H_SCROLL).min(self.max_h_scroll());
    }

    /// Append a typed character to the custom banner.
    pub fn type_char(&mut self, c: char) {
        if self.custom_text.chars().count() < MAX_CUSTOM_LEN {
            self.custom_text.push(c);
            self.refresh_preview();
        }
    }

    pub fn backspace(&mut self) {
        if self.custom_text.pop().is_some() {
            self.refresh_preview();
        }
    }

    pub fn clear_custom(&mut self) {
        self.custom_text.clear();
        self.refresh_preview();
    }

    /// Spool the current preview and report the outcome in the status line.
    pub fn print_current(&mut self) {
        let (Some(text), Some(Ok(page))) = (self.current_text(), &self.preview) else {
            self.status_message = Some("No banner to print".into());
            return;
        };
        self.status_message = Some(match self.config.spool.print(page) {
            Ok(()) => {
                info!(text = %text, "printed from studio");
                format!("Printing: {text}")
            }
            Err(e) => format!("Print error: {e}"),
        });
    }
}

/// Index of page row `row` within the framed preview, which starts with a
/// rule and repeats it at every page boundary.
pub fn framed_index(page: &Page, row: usize) -> usize {
    row + row / page.page_height.max(1) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_roster(csv: &str) -> (tempfile::TempDir, StudioState) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("birthdays.csv");
        std::fs::write(&path, csv).unwrap();
        let state = StudioState::open(path.to_str().unwrap(), AppConfig::default());
        (dir, state)
    }

    #[test]
    fn missing_csv_opens_error_dialog() {
        let state = StudioState::open("/nonexistent/birthdays.csv", AppConfig::default());
        assert!(matches!(state.mode, Mode::Error { .. }));
        assert!(state.roster.is_empty());
        assert!(state.preview.is_none());
    }

    #[test]
    fn preview_opens_near_first_letter() {
        let (_dir, state) = state_with_roster("First Name,Date of Birth\nBo,2000-01-02\n");
        let Some(Ok(page)) = &state.preview else {
            panic!("expected a preview");
        };
        let (first, _) = page.inked_rows().unwrap();
        assert_eq!(state.preview_scroll, framed_index(page, first) - 5);
    }

    #[test]
    fn selection_scrolls_list() {
        let mut csv = String::from("First Name,Date of Birth\n");
        for d in 1..=9 {
            csv.push_str(&format!("P{d},2000-01-0{d}\n"));
        }
        let (_dir, mut state) = state_with_roster(&csv);
        state.set_viewport(Viewport {
            list_height: 3,
            ..Viewport::default()
        });
        for _ in 0..5 {
            state.select_next();
        }
        assert_eq!(state.selected, 5);
        assert_eq!(state.list_scroll, 3);
        for _ in 0..20 {
            state.select_next();
        }
        assert_eq!(state.selected, 8);
        state.select_prev();
        assert_eq!(state.selected, 7);
    }

    #[test]
    fn custom_text_is_capped() {
        let mut state = StudioState::open("/nonexistent.csv", AppConfig::default());
        state.focus = Focus::Custom;
        for _ in 0..60 {
            state.type_char('X');
        }
        assert_eq!(state.custom_text.len(), MAX_CUSTOM_LEN);
        // Fifty characters never fit on one page.
        assert!(matches!(
            state.preview,
            Some(Err(RenderError::BannerTooLarge { .. }))
        ));
        state.clear_custom();
        assert_eq!(state.current_text(), None);
    }

    #[test]
    fn framed_index_skips_rules() {
        let page = Page::blank(4, 3, 2);
        assert_eq!(framed_index(&page, 0), 1);
        assert_eq!(framed_index(&page, 2), 3);
        assert_eq!(framed_index(&page, 3), 5);
    }

    #[test]
    fn nothing_to_print_without_text() {
        let mut state = StudioState::open("/nonexistent.csv", AppConfig::default());
        state.focus = Focus::Custom;
        state.print_current();
        assert_eq!(state.status_message.as_deref(), Some("No banner to print"));
    }
}
