//! User configuration: picker appearance, date range and keybindings.
//!
//! Settings live in a simple key-value text file at
//! `$XDG_CONFIG_HOME/wheel-picker/config.toml` (default
//! `~/.config/wheel-picker/config.toml`).  A bad line is reported and skipped;
//! the rest of the file still applies.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::date_picker::DatePickerOptions;
use crate::core::style::{PickerStyle, Rgb};

// ───────────────────────────────────────── errors ────────────

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("line {line}: expected `key = value`")]
    MissingEquals { line: usize },
    #[error("line {line}: unknown key `{key}`")]
    UnknownKey { line: usize, key: String },
    #[error("line {line}: invalid value `{value}` for `{key}`")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },
    #[error("line {line}: no usable key in `{value}` for `{key}`")]
    InvalidBinding {
        line: usize,
        key: String,
        value: String,
    },
}

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    FocusPrev,
    FocusNext,
    /// Bring the item above the centre into the selection.
    StepUp,
    /// Bring the item below the centre into the selection.
    StepDown,
    Confirm,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::FocusPrev,
        Action::FocusNext,
        Action::StepUp,
        Action::StepDown,
        Action::Confirm,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::FocusPrev => "focus_prev",
            Action::FocusNext => "focus_next",
            Action::StepUp => "step_up",
            Action::StepDown => "step_down",
            Action::Confirm => "confirm",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"↑"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::BackTab => "Shift+Tab".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            _ => {
                // Single characters keep their case so `K` and `k` differ.
                let mut chars = key_part.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                KeyCode::Char(c)
            }
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration: picker options, terminal mapping and
/// keybindings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub options: DatePickerOptions,
    /// Canvas units per terminal row.
    pub cell_height: f32,
    /// Colour that text opacity blends toward.
    pub background: Rgb,
    pub bindings: HashMap<Action, Vec<KeyBind>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            options: DatePickerOptions {
                margin_inner: 2.0,
                style: PickerStyle {
                    selected_text_size: 16.0,
                    unselected_text_size: 13.0,
                    selected_text_color: Rgb::WHITE,
                    unselected_text_color: Rgb::new(0xa0, 0xa0, 0xa0),
                    text_padding: 3.0,
                    neighbor_count: 2,
                    ..PickerStyle::default()
                },
                ..DatePickerOptions::default()
            },
            cell_height: 16.0,
            background: Rgb::BLACK,
            bindings: Self::default_bindings(),
        }
    }
}

impl AppConfig {
    /// Hard-coded default keybindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(
            FocusPrev,
            vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n), KeyBind::new(BackTab, n)],
        );
        m.insert(
            FocusNext,
            vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n), KeyBind::new(Tab, n)],
        );
        m.insert(StepUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(StepDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Confirm, vec![KeyBind::new(Enter, n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: column | {}/{}: value | {}: confirm | {}: quit",
            self.short_binding(Action::FocusPrev),
            self.short_binding(Action::FocusNext),
            self.short_binding(Action::StepUp),
            self.short_binding(Action::StepDown),
            self.short_binding(Action::Confirm),
            self.short_binding(Action::Quit),
        )
    }

    // ── loading ─────────────────────────────────────────────────

    /// Load config from `path`, or from the default location, falling back
    /// to defaults.  Problems are logged and never fatal.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        let contents = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(err) => {
                warn!(path = %path.display(), %err, "could not read config file");
                return Self::default();
            }
        };

        let (config, errors) = Self::parse(&contents);
        for err in &errors {
            warn!(path = %path.display(), "{err}");
        }
        debug!(path = %path.display(), skipped = errors.len(), "config loaded");
        config
    }

    /// Parse a whole file on top of the defaults.  Returns the resulting
    /// config together with every line that had to be skipped.
    pub fn parse(s: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut errors = Vec::new();

        for (idx, line) in s.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                errors.push(ConfigError::MissingEquals { line: line_no });
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');
            if let Err(err) = config.apply(line_no, key, value) {
                errors.push(err);
            }
        }

        (config, errors)
    }

    fn apply(&mut self, line: usize, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            line,
            key: key.to_string(),
            value: value.to_string(),
        };
        let style = &mut self.options.style;

        match key {
            "selected_text_size" => style.selected_text_size = parse_positive(value).ok_or_else(invalid)?,
            "unselected_text_size" => style.unselected_text_size = parse_positive(value).ok_or_else(invalid)?,
            "selected_text_color" => style.selected_text_color = Rgb::parse_hex(value).ok_or_else(invalid)?,
            "unselected_text_color" => style.unselected_text_color = Rgb::parse_hex(value).ok_or_else(invalid)?,
            "selected_text_alpha" => style.selected_text_alpha = parse_unit(value).ok_or_else(invalid)?,
            "unselected_text_alpha" => style.unselected_text_alpha = parse_unit(value).ok_or_else(invalid)?,
            "text_padding" => style.text_padding = parse_non_negative(value).ok_or_else(invalid)?,
            "neighbor_count" => style.neighbor_count = value.parse().map_err(|_| invalid())?,
            "recycle_data" => style.recycle = parse_bool(value).ok_or_else(invalid)?,
            "speed" => style.speed = parse_positive(value).ok_or_else(invalid)?,
            "start_year" => self.options.start_year = value.parse().map_err(|_| invalid())?,
            "end_year" => self.options.end_year = value.parse().map_err(|_| invalid())?,
            "selected_year" => self.options.selected_year = value.parse().map_err(|_| invalid())?,
            "selected_month" => {
                self.options.selected_month = value
                    .parse()
                    .ok()
                    .filter(|m| (1..=12).contains(m))
                    .ok_or_else(invalid)?
            }
            "margin_inner" => self.options.margin_inner = parse_non_negative(value).ok_or_else(invalid)?,
            "show_date" => self.options.show_date = parse_bool(value).ok_or_else(invalid)?,
            "show_time" => self.options.show_time = parse_bool(value).ok_or_else(invalid)?,
            "cell_height" => {
                self.cell_height = parse_positive(value)
                    .filter(|h| *h >= 1.0)
                    .ok_or_else(invalid)?
            }
            "background" => self.background = Rgb::parse_hex(value).ok_or_else(invalid)?,
            _ => {
                let Some(action) = Action::from_config_key(key) else {
                    return Err(ConfigError::UnknownKey {
                        line,
                        key: key.to_string(),
                    });
                };
                let parsed: Vec<KeyBind> = value
                    .split(',')
                    .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                    .collect();
                if parsed.is_empty() {
                    return Err(ConfigError::InvalidBinding {
                        line,
                        key: key.to_string(),
                        value: value.to_string(),
                    });
                }
                self.bindings.insert(action, parsed);
            }
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_non_negative(value: &str) -> Option<f32> {
    value.parse::<f32>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

fn parse_positive(value: &str) -> Option<f32> {
    parse_non_negative(value).filter(|v| *v > 0.0)
}

fn parse_unit(value: &str) -> Option<f32> {
    parse_non_negative(value).filter(|v| *v <= 1.0)
}

/// Return the config file path (`$XDG_CONFIG_HOME/wheel-picker/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("wheel-picker").join("config.toml")
}
