use std::io::Write;

use crossterm::{cursor, queue, style};

use crate::output::framed;
use crate::types::{Page, Rotation};

use super::menubar::truncate;
use super::state::{framed_index, StudioState};
use super::ui::{Layout, LETTER_STRIP_WIDTH};

/// Start and end markers around the letter strip.
const STRIP_START: char = '\u{25bc}';
const STRIP_END: char = '\u{25b2}';

/// Draw the right panel: title, framed page preview, letter strip and
/// scroll indicators.
pub fn render_preview(
    out: &mut impl Write,
    layout: &Layout,
    state: &StudioState,
) -> anyhow::Result<()> {
    let text = state.current_text();
    render_title(out, layout, state, text.as_deref())?;

    let Some(result) = &state.preview else {
        return render_centered(out, layout, "No preview available", style::Color::Reset);
    };
    let page = match result {
        Ok(page) => page,
        Err(e) => {
            let msg = format!("Cannot render: {e}");
            return render_centered(out, layout, &msg, style::Color::Yellow);
        }
    };

    let lines = framed(page);
    let height = usize::from(layout.preview_height());
    let avail = usize::from(layout.preview_width());
    let framed_width = page.page_width + 2;
    let (left, width) = if avail >= framed_width {
        (layout.right_x + ((avail - framed_width) / 2) as u16, framed_width)
    } else {
        (layout.right_x, avail)
    };

    for (i, line) in lines.iter().skip(state.preview_scroll).take(height).enumerate() {
        let slice: String = line.chars().skip(state.preview_h_scroll).take(width).collect();
        let y = layout.preview_y() + i as u16;
        if line.starts_with('+') {
            queue!(
                out,
                cursor::MoveTo(left, y),
                style::SetForegroundColor(style::Color::Blue),
                style::Print(slice),
                style::ResetColor,
            )?;
        } else {
            queue!(out, cursor::MoveTo(left, y), style::Print(slice))?;
        }
    }

    if let Some(text) = &text {
        render_letter_strip(out, layout, state, page, text)?;
    }
    render_indicators(out, layout, state)
}

fn render_title(
    out: &mut impl Write,
    layout: &Layout,
    state: &StudioState,
    text: Option<&str>,
) -> anyhow::Result<()> {
    let title = match (text, &state.preview) {
        (Some(t), Some(Ok(page))) => {
            let plural = if page.pages == 1 { "" } else { "s" };
            format!(" {t} - {} page{plural} ", page.pages)
        }
        (Some(t), _) => format!(" {t} "),
        (None, _) => " Banner Preview ".to_string(),
    };
    let width = usize::from(layout.right_width);
    let title = truncate(&title, width.saturating_sub(2));
    let x = layout.right_x + (width.saturating_sub(title.chars().count()) / 2) as u16;
    queue!(
        out,
        cursor::MoveTo(x, layout.panel_y),
        style::SetForegroundColor(style::Color::White),
        style::SetBackgroundColor(style::Color::Blue),
        style::SetAttribute(style::Attribute::Bold),
        style::Print(title),
        style::SetAttribute(style::Attribute::Reset),
        style::ResetColor,
    )?;
    Ok(())
}

fn render_centered(
    out: &mut impl Write,
    layout: &Layout,
    msg: &str,
    color: style::Color,
) -> anyhow::Result<()> {
    let width = usize::from(layout.right_width).saturating_sub(2).max(1);
    let lines = wrap(msg, width);
    let mid = layout.panel_y + layout.panel_height / 2;
    let y0 = mid.saturating_sub(lines.len() as u16 / 2);
    for (i, line) in lines.iter().enumerate() {
        let x = layout.right_x + (usize::from(layout.right_width).saturating_sub(line.chars().count()) / 2) as u16;
        queue!(
            out,
            cursor::MoveTo(x, y0 + i as u16),
            style::SetForegroundColor(color),
            style::SetAttribute(style::Attribute::Dim),
            style::Print(line),
            style::SetAttribute(style::Attribute::Reset),
            style::ResetColor,
        )?;
    }
    Ok(())
}

/// Vertical list of the banner's letters with the ones currently in view
/// highlighted, so a long banner can be navigated without reading sideways.
fn render_letter_strip(
    out: &mut impl Write,
    layout: &Layout,
    state: &StudioState,
    page: &Page,
    text: &str,
) -> anyhow::Result<()> {
    let mut strip: Vec<char> = Vec::with_capacity(text.chars().count() + 2);
    strip.push(STRIP_START);
    strip.extend(text.chars());
    strip.push(STRIP_END);

    let height = usize::from(layout.preview_height());
    let highlight = visible_letters(page, text, state.preview_scroll, height, state.config.render.rotation);
    let offset = strip_offset(highlight, strip.len(), height);

    let x = layout.right_x + layout.right_width.saturating_sub(LETTER_STRIP_WIDTH - 1);
    for (row, (i, ch)) in strip.iter().enumerate().skip(offset).take(height).enumerate() {
        let shown = if *ch == ' ' { '\u{b7}' } else { *ch };
        let lit = highlight.is_some_and(|(a, b)| (a..=b).contains(&i));
        queue!(out, cursor::MoveTo(x, layout.preview_y() + row as u16))?;
        if lit {
            queue!(
                out,
                style::SetForegroundColor(style::Color::Cyan),
                style::SetAttribute(style::Attribute::Bold),
                style::Print(shown),
                style::SetAttribute(style::Attribute::Reset),
                style::ResetColor,
            )?;
        } else {
            queue!(
                out,
                style::SetAttribute(style::Attribute::Dim),
                style::Print(shown),
                style::SetAttribute(style::Attribute::Reset),
            )?;
        }
    }
    Ok(())
}

fn render_indicators(
    out: &mut impl Write,
    layout: &Layout,
    state: &StudioState,
) -> anyhow::Result<()> {
    let mut parts = Vec::new();
    if state.preview_len() > usize::from(layout.preview_height()) {
        let max = state.max_preview_scroll();
        let pct = if max == 0 { 100 } else { state.preview_scroll * 100 / max };
        parts.push(format!("[{pct}%] PgUp/PgDn"));
    }
    if state.max_h_scroll() > 0 {
        parts.push("\u{2190}/\u{2192}".to_string());
    }
    if parts.is_empty() {
        return Ok(());
    }

    let info = format!(" {} ", parts.join(" "));
    let y = layout.panel_y + layout.panel_height.saturating_sub(1);
    let x = (layout.right_x + layout.right_width).saturating_sub(info.chars().count() as u16 + 1);
    queue!(
        out,
        cursor::MoveTo(x, y),
        style::SetForegroundColor(style::Color::Yellow),
        style::Print(info),
        style::ResetColor,
    )?;
    Ok(())
}

/// Indices into the marker-wrapped letter strip (`▼` + text + `▲`) that are
/// in view when `height` framed lines are shown from `scroll`.
///
/// Returns the start marker while only blank paper above the banner is in
/// view and the end marker once it has scrolled past.
pub fn visible_letters(
    page: &Page,
    text: &str,
    scroll: usize,
    height: usize,
    rotation: Rotation,
) -> Option<(usize, usize)> {
    let letters = text.chars().count();
    let (first, last) = page.inked_rows()?;
    if letters == 0 || height == 0 {
        return None;
    }
    let start = framed_index(page, first);
    let end = framed_index(page, last);
    let view_end = scroll + height - 1;

    // Clockwise banners start at the top of the paper; counter-clockwise
    // ones start at the bottom.
    let (top_marker, bottom_marker) = match rotation {
        Rotation::Clockwise => (0, letters + 1),
        Rotation::CounterClockwise => (letters + 1, 0),
    };
    if view_end < start {
        return Some((top_marker, top_marker));
    }
    if scroll > end {
        return Some((bottom_marker, bottom_marker));
    }

    let span = (end - start + 1) as f64;
    let per_letter = span / letters as f64;
    let to_letter = |line: usize| (((line - start) as f64 / per_letter) as usize).min(letters - 1);
    let a = to_letter(scroll.max(start));
    let b = to_letter(view_end.min(end));

    Some(match rotation {
        Rotation::Clockwise => (a + 1, b + 1),
        Rotation::CounterClockwise => (letters - b, letters - a),
    })
}

/// First strip entry to draw so the highlighted range is on screen.
fn strip_offset(highlight: Option<(usize, usize)>, len: usize, height: usize) -> usize {
    let max = len.saturating_sub(height);
    match highlight {
        Some((a, b)) if b >= height => (b + 1 - height).min(a).min(max),
        _ => 0,
    }
}

/// Greedy word wrap to `width` columns.
fn wrap(msg: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in msg.split_whitespace() {
        let extra = if current.is_empty() { 0 } else { 1 };
        if !current.is_empty() && current.chars().count() + extra + word.chars().count() > width {
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
    lines
}
