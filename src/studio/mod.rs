//! Studio: the interactive banner browser.
//!
//! Lists the birthday roster (or takes typed text), previews the banner on
//! framed paper, and spools it on request. All banner drawing goes through
//! the same `Renderer` the command line uses.

mod dialog;
pub mod input;
mod list;
mod menubar;
mod preview;
pub mod state;
mod ui;

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{cursor, event, execute, queue, terminal};

use crate::config::AppConfig;
use input::Action;
use state::StudioState;
use ui::Layout;

pub struct Studio {
    state: StudioState,
}

impl Studio {
    pub fn open(csv_path: &str, config: AppConfig) -> Self {
        Studio {
            state: StudioState::open(csv_path, config),
        }
    }

    /// Take over the terminal until the user quits, restoring it on exit
    /// (even on error).
    pub fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        let result = self.main_loop(&mut stdout);

        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();

        result
    }

    fn main_loop(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        self.full_redraw(stdout)?;

        loop {
            let event = event::read()?;
            let (term_w, term_h) = terminal::size()?;
            self.state.set_viewport(Layout::compute(term_w, term_h).viewport());

            match input::handle_event(&mut self.state, event) {
                Action::Continue => {}
                Action::Redraw => self.full_redraw(stdout)?,
                Action::Print => {
                    self.state.print_current();
                    self.full_redraw(stdout)?;
                }
                Action::Quit => break,
            }
        }

        Ok(())
    }

    fn full_redraw(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        let (term_w, term_h) = terminal::size()?;
        let layout = Layout::compute(term_w, term_h);
        self.state.set_viewport(layout.viewport());

        queue!(stdout, cursor::Hide, terminal::Clear(terminal::ClearType::All))?;

        menubar::render_menubar(stdout, &layout, &self.state)?;
        list::render_left_panel(stdout, &layout, &self.state)?;
        preview::render_preview(stdout, &layout, &self.state)?;
        menubar::render_status(stdout, &layout, &self.state)?;

        if let Some((x, y)) = dialog::render_dialog(stdout, &layout, term_h, &self.state)? {
            queue!(stdout, cursor::MoveTo(x, y), cursor::Show)?;
        }

        stdout.flush()?;
        Ok(())
    }
}
