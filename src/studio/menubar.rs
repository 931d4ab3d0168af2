use std::io::Write;

use crossterm::{cursor, queue, style, terminal};

use super::state::{Focus, Mode, StudioState};
use super::ui::Layout;

/// Key hints for the current mode, motion first and escape last.
fn mode_items(state: &StudioState) -> Vec<&'static str> {
    match (&state.mode, state.focus) {
        (Mode::Browse, Focus::Birthdays) => vec![
            "[↑][↓] birthday",
            "[PgUp][PgDn] scroll",
            "[←][→] pan",
            "[Tab] custom",
            "[Ctrl-o]pen CSV",
            "[Ctrl-p]rint",
            "[Esc] quit",
        ],
        (Mode::Browse, Focus::Custom) => vec![
            "type text",
            "[Bksp] erase",
            "[Del] clear",
            "[PgUp][PgDn] scroll",
            "[Tab] birthdays",
            "[Ctrl-p]rint",
            "[Esc] quit",
        ],
        (Mode::OpenFile { .. }, _) => {
            vec!["[←][→] cursor", "[Enter] open", "[Esc] cancel"]
        }
        (Mode::Error { .. }, _) => vec!["[any key] continue"],
    }
}

/// Print a menu item, bolding text inside `[...]` and dimming the rest.
pub fn print_menu_item(out: &mut impl Write, item: &str) -> anyhow::Result<()> {
    let mut rest = item;
    while !rest.is_empty() {
        let Some(open) = rest.find('[') else {
            queue!(
                out,
                style::SetAttribute(style::Attribute::Dim),
                style::Print(rest),
                style::SetAttribute(style::Attribute::Reset),
            )?;
            break;
        };
        if open > 0 {
            queue!(
                out,
                style::SetAttribute(style::Attribute::Dim),
                style::Print(&rest[..open]),
                style::SetAttribute(style::Attribute::Reset),
            )?;
        }
        rest = &rest[open..];
        let Some(close) = rest.find(']') else {
            queue!(out, style::Print(rest))?;
            break;
        };
        queue!(
            out,
            style::SetAttribute(style::Attribute::Bold),
            style::Print(&rest[..=close]),
            style::SetAttribute(style::Attribute::Reset),
        )?;
        rest = &rest[close + 1..];
    }
    Ok(())
}

pub fn render_menubar(
    out: &mut impl Write,
    layout: &Layout,
    state: &StudioState,
) -> anyhow::Result<()> {
    queue!(
        out,
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(" "),
    )?;

    let mut x: u16 = 1;
    for (i, item) in mode_items(state).iter().enumerate() {
        let item_w = item.chars().count() as u16;
        let sep = if i > 0 { 2 } else { 0 };
        if x + sep + item_w > layout.term_width {
            break;
        }
        if sep > 0 {
            queue!(out, style::Print("  "))?;
        }
        print_menu_item(out, item)?;
        x += sep + item_w;
    }
    Ok(())
}

/// Bottom line: the status message when there is one, otherwise a dim
/// summary of what is loaded.
pub fn render_status(
    out: &mut impl Write,
    layout: &Layout,
    state: &StudioState,
) -> anyhow::Result<()> {
    queue!(
        out,
        cursor::MoveTo(0, layout.status_y),
        terminal::Clear(terminal::ClearType::CurrentLine),
    )?;

    let width = usize::from(layout.term_width);
    if let Some(msg) = &state.status_message {
        let msg = truncate(&format!(" {msg} "), width);
        let x = width.saturating_sub(msg.chars().count()) / 2;
        queue!(
            out,
            cursor::MoveTo(x as u16, layout.status_y),
            style::SetForegroundColor(style::Color::Yellow),
            style::SetAttribute(style::Attribute::Bold),
            style::Print(msg),
            style::SetAttribute(style::Attribute::Reset),
            style::ResetColor,
        )?;
    } else {
        let mode = match state.focus {
            Focus::Birthdays => "BIRTHDAYS",
            Focus::Custom => "CUSTOM",
        };
        let summary = format!(
            " {mode} | {} | {} entries",
            state.csv_path,
            state.roster.len()
        );
        queue!(
            out,
            style::SetAttribute(style::Attribute::Dim),
            style::Print(truncate(&summary, width)),
            style::SetAttribute(style::Attribute::Reset),
        )?;
    }
    Ok(())
}

/// Cut `s` to at most `width` chars, marking the cut with `...`.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    if width <= 3 {
        return s.chars().take(width).collect();
    }
    let mut out: String = s.chars().take(width - 3).collect();
    out.push_str("...");
    out
}
