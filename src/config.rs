use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::birthdays::NAME_PLACEHOLDER;
use crate::output::SpoolConfig;
use crate::types::RenderOptions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub render: RenderOptions,
    /// Roster used when no CSV is named on the command line.
    pub csv_path: String,
    /// Banner text for a birthday; `{name}` is replaced by the display name.
    pub birthday_message: String,
    pub spool: SpoolConfig,
    pub key_bindings: KeyBindings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_up: String,
    pub move_down: String,
    pub scroll_left: String,
    pub scroll_right: String,
    pub page_up: String,
    pub page_down: String,
    pub toggle_mode: String,
    pub open_csv: String,
    pub print: String,
    pub quit: String,
    pub confirm: String,
    pub cancel: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            move_up: "Up".into(),
            move_down: "Down".into(),
            scroll_left: "Left".into(),
            scroll_right: "Right".into(),
            page_up: "PageUp".into(),
            page_down: "PageDown".into(),
            toggle_mode: "Tab".into(),
            open_csv: "Ctrl-o".into(),
            print: "Ctrl-p".into(),
            quit: "Esc".into(),
            confirm: "Enter".into(),
            cancel: "Esc".into(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            render: RenderOptions::default(),
            csv_path: "birthdays.csv".into(),
            birthday_message: NAME_PLACEHOLDER.into(),
            spool: SpoolConfig::default(),
            key_bindings: KeyBindings::default(),
        }
    }
}

impl AppConfig {
    /// Load the config from `path`, or from the default location when `None`.
    ///
    /// A missing file yields defaults; an unreadable one is reported and
    /// also yields defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let config_path = path.map_or_else(Self::config_path, Path::to_path_buf);
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    debug!(path = %config_path.display(), "loaded config");
                    config
                }
                Err(e) => {
                    warn!(path = %config_path.display(), "invalid config ({e}), using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("sideways-banner");
        path.push("config.json");
        path
    }
}

/// Check whether a crossterm `KeyEvent` matches a binding string from config.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    if let Some(rest) = binding.strip_prefix("Ctrl-") {
        if !event.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        return match rest.chars().next() {
            Some(c) => event.code == KeyCode::Char(c.to_ascii_lowercase()),
            None => false,
        };
    }

    // Plain bindings never fire with Ctrl or Alt held, so "p" stays typeable
    // while "Ctrl-p" prints.
    if event.modifiers.contains(KeyModifiers::CONTROL)
        || event.modifiers.contains(KeyModifiers::ALT)
    {
        return false;
    }

    match binding {
        "Right" => event.code == KeyCode::Right,
        "Left" => event.code == KeyCode::Left,
        "Up" => event.code == KeyCode::Up,
        "Down" => event.code == KeyCode::Down,
        "PageUp" => event.code == KeyCode::PageUp,
        "PageDown" => event.code == KeyCode::PageDown,
        "Enter" => event.code == KeyCode::Enter,
        "Esc" => event.code == KeyCode::Esc,
        "Tab" => event.code == KeyCode::Tab,
        "Backspace" => event.code == KeyCode::Backspace,
        "Delete" => event.code == KeyCode::Delete,
        "Home" => event.code == KeyCode::Home,
        "End" => event.code == KeyCode::End,
        s => {
            if let Some(rest) = s.strip_prefix('F') {
                if let Ok(n) = rest.parse::<u8>() {
                    return event.code == KeyCode::F(n);
                }
            }
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => event.code == KeyCode::Char(c),
                _ => false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn ctrl_bindings_need_control() {
        assert!(matches_binding("Ctrl-p", &key(KeyCode::Char('p'), KeyModifiers::CONTROL)));
        assert!(!matches_binding("Ctrl-p", &key(KeyCode::Char('p'), KeyModifiers::NONE)));
    }

    #[test]
    fn plain_bindings_ignore_modified_keys() {
        assert!(matches_binding("q", &key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(!matches_binding("q", &key(KeyCode::Char('q'), KeyModifiers::ALT)));
        assert!(matches_binding("PageDown", &key(KeyCode::PageDown, KeyModifiers::NONE)));
        assert!(matches_binding("F5", &key(KeyCode::F(5), KeyModifiers::NONE)));
        assert!(!matches_binding("Bogus", &key(KeyCode::Char('B'), KeyModifiers::NONE)));
    }

    #[test]
    fn partial_config_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"render": {"page_width": 132}, "spool": {"printer": "wide"}}"#,
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path));
        assert_eq!(cfg.render.page_width, 132);
        assert_eq!(cfg.render.page_height, 66);
        assert_eq!(cfg.spool.command, "lpr");
        assert_eq!(cfg.spool.printer.as_deref(), Some("wide"));
        assert_eq!(cfg.key_bindings.print, "Ctrl-p");
    }

    #[test]
    fn broken_or_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert_eq!(AppConfig::load(Some(&path)), AppConfig::default());

        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(AppConfig::load(Some(&path)), AppConfig::default());
    }
}
