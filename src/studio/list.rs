use std::io::Write;

use crossterm::{cursor, queue, style};

use super::menubar::truncate;
use super::state::{Focus, StudioState};
use super::ui::Layout;

/// Draw the selection panel: birthday list or custom text box, plus the
/// divider separating it from the preview.
pub fn render_left_panel(
    out: &mut impl Write,
    layout: &Layout,
    state: &StudioState,
) -> anyhow::Result<()> {
    let top = layout.panel_y;
    let width = usize::from(layout.left_width).saturating_sub(2);

    for y in 0..layout.panel_height {
        queue!(
            out,
            cursor::MoveTo(layout.divider_x, top + y),
            style::Print("\u{2502}"),
        )?;
    }

    match state.focus {
        Focus::Birthdays => render_roster(out, layout, state, width),
        Focus::Custom => render_custom(out, layout, state, width),
    }
}

fn render_roster(
    out: &mut impl Write,
    layout: &Layout,
    state: &StudioState,
    width: usize,
) -> anyhow::Result<()> {
    let top = layout.panel_y;
    queue!(
        out,
        cursor::MoveTo(1, top),
        style::SetForegroundColor(style::Color::Blue),
        style::SetAttribute(style::Attribute::Bold),
        style::Print(truncate("\u{25b6} Birthday Banners", width)),
        style::SetAttribute(style::Attribute::Reset),
        style::ResetColor,
    )?;

    if state.roster.is_empty() {
        let msg = truncate(&format!("  (No {} found)", state.csv_path), width);
        queue!(
            out,
            cursor::MoveTo(1, top + 1),
            style::SetAttribute(style::Attribute::Dim),
            style::Print(msg),
            style::SetAttribute(style::Attribute::Reset),
        )?;
        return Ok(());
    }

    let visible = usize::from(layout.list_height());
    if state.roster.len() > visible {
        let counter = format!("[{}/{}]", state.selected + 1, state.roster.len());
        let x = layout
            .left_width
            .saturating_sub(counter.chars().count() as u16 + 1);
        queue!(
            out,
            cursor::MoveTo(x, top),
            style::SetAttribute(style::Attribute::Dim),
            style::Print(counter),
            style::SetAttribute(style::Attribute::Reset),
        )?;
    }

    let entries = state.roster.iter().enumerate().skip(state.list_scroll).take(visible);
    for (row, (i, entry)) in entries.enumerate() {
        let y = top + 1 + row as u16;
        queue!(out, cursor::MoveTo(1, y))?;
        if i == state.selected {
            queue!(
                out,
                style::SetAttribute(style::Attribute::Reverse),
                style::Print(format!("{:<width$}", truncate(&format!("\u{2192} {entry}"), width))),
                style::SetAttribute(style::Attribute::Reset),
            )?;
        } else {
            queue!(out, style::Print(truncate(&format!("  {entry}"), width)))?;
        }
    }
    Ok(())
}

fn render_custom(
    out: &mut impl Write,
    layout: &Layout,
    state: &StudioState,
    width: usize,
) -> anyhow::Result<()> {
    let top = layout.panel_y;
    queue!(
        out,
        cursor::MoveTo(1, top),
        style::SetForegroundColor(style::Color::Blue),
        style::SetAttribute(style::Attribute::Bold),
        style::Print(truncate("\u{25b6} Custom Banner", width)),
        style::SetAttribute(style::Attribute::Reset),
        style::ResetColor,
    )?;

    let label = "Text: ";
    let room = width.saturating_sub(label.len());
    let typed = format!("{}_", state.custom_text);
    let shown = tail(&typed, room);
    queue!(
        out,
        cursor::MoveTo(1, top + 2),
        style::SetForegroundColor(style::Color::Cyan),
        style::Print(label),
        style::SetAttribute(style::Attribute::Bold),
        style::Print(shown),
        style::SetAttribute(style::Attribute::Reset),
        style::ResetColor,
    )?;
    Ok(())
}

/// Keep the last `width` chars of `s`, marking the cut with a leading `...`.
fn tail(s: &str, width: usize) -> String {
    let n = s.chars().count();
    if n <= width {
        return s.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut out = String::from("...");
    out.extend(s.chars().skip(n - keep));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_keeps_the_end() {
        assert_eq!(tail("abc", 5), "abc");
        assert_eq!(tail("abcdefgh", 6), "...fgh");
    }
}
