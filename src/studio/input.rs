use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::matches_binding;

use super::state::{Focus, Mode, StudioState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Continue,
    Redraw,
    Print,
    Quit,
}

pub fn handle_event(state: &mut StudioState, event: Event) -> Action {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, key),
        Event::Resize(_, _) => Action::Redraw,
        _ => Action::Continue,
    }
}

fn handle_key(state: &mut StudioState, key: KeyEvent) -> Action {
    match &state.mode {
        Mode::Browse => handle_browse(state, key),
        Mode::OpenFile { .. } => handle_open_file(state, key),
        Mode::Error { .. } => {
            state.mode = Mode::Browse;
            Action::Redraw
        }
    }
}

fn handle_browse(state: &mut StudioState, key: KeyEvent) -> Action {
    state.status_message = None;
    let bindings = state.config.key_bindings.clone();

    if matches_binding(&bindings.quit, &key) {
        return Action::Quit;
    }
    if matches_binding(&bindings.toggle_mode, &key) {
        state.toggle_focus();
        return Action::Redraw;
    }
    if matches_binding(&bindings.move_up, &key) {
        state.select_prev();
        return Action::Redraw;
    }
    if matches_binding(&bindings.move_down, &key) {
        state.select_next();
        return Action::Redraw;
    }
    if matches_binding(&bindings.scroll_left, &key) {
        state.scroll_left();
        return Action::Redraw;
    }
    if matches_binding(&bindings.scroll_right, &key) {
        state.scroll_right();
        return Action::Redraw;
    }
    if matches_binding(&bindings.page_up, &key) {
        state.scroll_up();
        return Action::Redraw;
    }
    if matches_binding(&bindings.page_down, &key) {
        state.scroll_down();
        return Action::Redraw;
    }
    if matches_binding(&bindings.print, &key) {
        return Action::Print;
    }
    if matches_binding(&bindings.open_csv, &key) {
        state.mode = Mode::OpenFile {
            cursor: state.csv_path.chars().count(),
            buf: state.csv_path.clone(),
        };
        return Action::Redraw;
    }

    if state.focus == Focus::Custom {
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Backspace => {
                state.backspace();
                return Action::Redraw;
            }
            KeyCode::Delete => {
                state.clear_custom();
                return Action::Redraw;
            }
            KeyCode::Char(c) if plain && (c == ' ' || c.is_ascii_graphic()) => {
                state.type_char(c);
                return Action::Redraw;
            }
            _ => {}
        }
    }

    Action::Continue
}

fn handle_open_file(state: &mut StudioState, key: KeyEvent) -> Action {
    let bindings = &state.config.key_bindings;
    let cancel = matches_binding(&bindings.cancel, &key);
    let confirm = matches_binding(&bindings.confirm, &key);

    let Mode::OpenFile { buf, cursor } = &mut state.mode else {
        return Action::Continue;
    };

    if cancel {
        state.mode = Mode::Browse;
        return Action::Redraw;
    }
    if confirm {
        let path = buf.trim().to_string();
        state.mode = Mode::Browse;
        if !path.is_empty() {
            state.reload(&path);
        }
        return Action::Redraw;
    }

    let len = buf.chars().count();
    match key.code {
        KeyCode::Backspace if *cursor > 0 => {
            let at = char_to_byte_idx(buf, *cursor - 1);
            buf.remove(at);
            *cursor -= 1;
        }
        KeyCode::Delete if *cursor < len => {
            let at = char_to_byte_idx(buf, *cursor);
            buf.remove(at);
        }
        KeyCode::Left => *cursor = cursor.saturating_sub(1),
        KeyCode::Right => *cursor = (*cursor + 1).min(len),
        KeyCode::Home => *cursor = 0,
        KeyCode::End => *cursor = len,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let at = char_to_byte_idx(buf, *cursor);
            buf.insert(at, c);
            *cursor += 1;
        }
        _ => return Action::Continue,
    }
    Action::Redraw
}

fn char_to_byte_idx(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn press(state: &mut StudioState, code: KeyCode) -> Action {
        handle_event(state, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(state: &mut StudioState, c: char) -> Action {
        handle_event(
            state,
            Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)),
        )
    }

    fn custom_state() -> StudioState {
        let mut state = StudioState::open("/nonexistent.csv", AppConfig::default());
        state.mode = Mode::Browse;
        state.toggle_focus();
        state
    }

    #[test]
    fn any_key_dismisses_error_dialog() {
        let mut state = StudioState::open("/nonexistent.csv", AppConfig::default());
        assert!(matches!(state.mode, Mode::Error { .. }));
        assert_eq!(press(&mut state, KeyCode::Char('x')), Action::Redraw);
        assert_eq!(state.mode, Mode::Browse);
    }

    #[test]
    fn typing_builds_custom_text() {
        let mut state = custom_state();
        for c in "hi!".chars() {
            press(&mut state, KeyCode::Char(c));
        }
        assert_eq!(state.custom_text, "hi!");
        assert!(matches!(state.preview, Some(Ok(_))));

        press(&mut state, KeyCode::Backspace);
        assert_eq!(state.custom_text, "hi");
        press(&mut state, KeyCode::Delete);
        assert_eq!(state.custom_text, "");
        assert!(state.preview.is_none());
    }

    #[test]
    fn ctrl_p_prints_instead_of_typing() {
        let mut state = custom_state();
        assert_eq!(ctrl(&mut state, 'p'), Action::Print);
        assert_eq!(state.custom_text, "");
        press(&mut state, KeyCode::Char('p'));
        assert_eq!(state.custom_text, "p");
    }

    #[test]
    fn tab_switches_focus_and_esc_quits() {
        let mut state = custom_state();
        assert_eq!(state.focus, Focus::Custom);
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.focus, Focus::Birthdays);
        assert_eq!(press(&mut state, KeyCode::Esc), Action::Quit);
    }

    #[test]
    fn open_file_prompt_edits_and_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("team.csv");
        std::fs::write(&path, "First Name,Date of Birth\nDee,1999-09-09\n").unwrap();

        let mut state = custom_state();
        state.toggle_focus();
        ctrl(&mut state, 'o');
        assert!(matches!(state.mode, Mode::OpenFile { .. }));

        // Clear the prefilled path, then type the new one.
        press(&mut state, KeyCode::End);
        for _ in 0..state.csv_path.chars().count() {
            press(&mut state, KeyCode::Backspace);
        }
        for c in path.to_str().unwrap().chars() {
            press(&mut state, KeyCode::Char(c));
        }
        press(&mut state, KeyCode::Enter);

        assert_eq!(state.mode, Mode::Browse);
        assert_eq!(state.roster.len(), 1);
        assert_eq!(state.current_text().as_deref(), Some("Dee"));
        assert!(state.status_message.unwrap().starts_with("Loaded 1 birthdays"));
    }

    #[test]
    fn open_file_prompt_cancels() {
        let mut state = custom_state();
        ctrl(&mut state, 'o');
        press(&mut state, KeyCode::Char('z'));
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.mode, Mode::Browse);
        assert_eq!(state.csv_path, "/nonexistent.csv");
    }

    #[test]
    fn char_index_maps_to_bytes() {
        assert_eq!(char_to_byte_idx("aé b", 2), 3);
        assert_eq!(char_to_byte_idx("ab", 5), 2);
    }
}
