use std::io::Write;

use crossterm::{cursor, queue, style};

use super::state::{Mode, StudioState};
use super::ui::Layout;

/// Widest a dialog box gets, borders included.
const DIALOG_MAX_WIDTH: u16 = 60;

/// Screen position for the text cursor when a dialog wants one.
pub type CursorPos = Option<(u16, u16)>;

/// Draw the modal overlay for the current mode, if any.
pub fn render_dialog(
    out: &mut impl Write,
    layout: &Layout,
    term_height: u16,
    state: &StudioState,
) -> anyhow::Result<CursorPos> {
    match &state.mode {
        Mode::Browse => Ok(None),
        Mode::OpenFile { buf, cursor } => render_prompt(out, layout, term_height, buf, *cursor),
        Mode::Error { message } => {
            render_error(out, layout, term_height, message)?;
            Ok(None)
        }
    }
}

fn render_prompt(
    out: &mut impl Write,
    layout: &Layout,
    term_height: u16,
    buf: &str,
    cursor_pos: usize,
) -> anyhow::Result<CursorPos> {
    let w = DIALOG_MAX_WIDTH.min(layout.term_width.saturating_sub(4)).max(12);
    let x0 = layout.term_width.saturating_sub(w) / 2;
    let y0 = (term_height / 2).saturating_sub(1);
    draw_box(out, x0, y0, w, 3, " Open CSV File ")?;

    let label = "File: ";
    let field = usize::from(w) - label.len() - 4;
    // Scroll the field so the cursor stays inside it.
    let skip = cursor_pos.saturating_sub(field.saturating_sub(1));
    let shown: String = buf.chars().skip(skip).take(field).collect();
    queue!(
        out,
        cursor::MoveTo(x0 + 2, y0 + 1),
        style::Print(label),
        style::Print(format!("{shown:<field$}")),
    )?;
    let cx = x0 + 2 + label.len() as u16 + (cursor_pos - skip) as u16;
    Ok(Some((cx, y0 + 1)))
}

fn render_error(
    out: &mut impl Write,
    layout: &Layout,
    term_height: u16,
    message: &str,
) -> anyhow::Result<()> {
    let w = DIALOG_MAX_WIDTH.min(layout.term_width.saturating_sub(4)).max(12);
    let inner = usize::from(w) - 4;
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in message.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > inner {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    let h = (lines.len() as u16 + 4).min(term_height.saturating_sub(2)).max(5);
    let x0 = layout.term_width.saturating_sub(w) / 2;
    let y0 = term_height.saturating_sub(h) / 2;
    draw_box(out, x0, y0, w, h, " Error ")?;

    for (i, line) in lines.iter().take(usize::from(h) - 4).enumerate() {
        queue!(
            out,
            cursor::MoveTo(x0 + 2, y0 + 1 + i as u16),
            style::Print(line),
        )?;
    }
    let prompt = "Press any key to continue";
    let px = x0 + (w.saturating_sub(prompt.len() as u16)) / 2;
    queue!(
        out,
        cursor::MoveTo(px, y0 + h - 2),
        style::SetAttribute(style::Attribute::Dim),
        style::Print(prompt),
        style::SetAttribute(style::Attribute::Reset),
    )?;
    Ok(())
}

/// Box-drawn frame with a bold title on the top edge; the inside is blanked.
fn draw_box(
    out: &mut impl Write,
    x0: u16,
    y0: u16,
    w: u16,
    h: u16,
    title: &str,
) -> anyhow::Result<()> {
    let inner = usize::from(w.saturating_sub(2));
    queue!(
        out,
        cursor::MoveTo(x0, y0),
        style::Print(format!("\u{250c}{}\u{2510}", "\u{2500}".repeat(inner))),
    )?;
    for y in 1..h.saturating_sub(1) {
        queue!(
            out,
            cursor::MoveTo(x0, y0 + y),
            style::Print(format!("\u{2502}{}\u{2502}", " ".repeat(inner))),
        )?;
    }
    queue!(
        out,
        cursor::MoveTo(x0, y0 + h.saturating_sub(1)),
        style::Print(format!("\u{2514}{}\u{2518}", "\u{2500}".repeat(inner))),
        cursor::MoveTo(x0 + 2, y0),
        style::SetForegroundColor(style::Color::Yellow),
        style::SetAttribute(style::Attribute::Bold),
        style::Print(title),
        style::SetAttribute(style::Attribute::Reset),
        style::ResetColor,
    )?;
    Ok(())
}
