use std::borrow::Cow;
use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Quit,
    ToggleHelp,

    // Focus
    FocusNext,
    FocusPrevious,

    // Page scrolling
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollToTop,
    ScrollToBottom,

    // Widget navigation
    NavigateLeft,
    NavigateRight,
    NavigateUp,
    NavigateDown,
    SelectFirst,
    SelectLast,
    Activate,
    TogglePlay,

    // Text size
    IncreaseTextSize,
    DecreaseTextSize,
    ResetTextSize,

    // Sections
    JumpToSection1,
    JumpToSection2,
    JumpToSection3,
    JumpToSection4,
    JumpToSection5,
    JumpToSection6,
}

impl Action {
    /// Navigation item index for the section jump actions.
    #[must_use]
    pub const fn section_index(self) -> Option<usize> {
        match self {
            Self::JumpToSection1 => Some(0),
            Self::JumpToSection2 => Some(1),
            Self::JumpToSection3 => Some(2),
            Self::JumpToSection4 => Some(3),
            Self::JumpToSection5 => Some(4),
            Self::JumpToSection6 => Some(5),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub key: KeyEvent,
    pub action: Action,
    pub label: Cow<'static, str>,
    pub visible_in_bar: bool,
}

impl Keybind {
    pub fn new(key: KeyEvent, action: Action, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key,
            action,
            label: label.into(),
            visible_in_bar: true,
        }
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible_in_bar = false;
        self
    }

    /// Short key name for the footer, e.g. `Tab` or `Ctrl+c`.
    #[must_use]
    pub fn key_label(&self) -> String {
        format_key(&self.key)
    }
}

/// Parses a key description such as `Ctrl+q`, `Shift+Tab`, `F1` or `+`.
#[must_use]
pub fn parse_key(raw: &str) -> Option<KeyEvent> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let mut modifiers = KeyModifiers::NONE;
    let mut rest = raw;
    loop {
        let Some((prefix, tail)) = rest.split_once('+') else {
            break;
        };
        if tail.is_empty() {
            break;
        }
        match prefix.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
        rest = tail;
    }

    let code = match rest.to_ascii_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" => KeyCode::Char(' '),
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "backspace" => KeyCode::Backspace,
        lower => {
            if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                KeyCode::F(n)
            } else {
                let mut chars = rest.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        }
    };

    Some(KeyEvent::new(code, modifiers))
}

fn format_key(key: &KeyEvent) -> String {
    let mut out = String::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        out.push_str("Ctrl+");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        out.push_str("Alt+");
    }
    let code = match key.code {
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Char(c) => c.to_string(),
        _ => "?".to_string(),
    };
    out.push_str(&code);
    out
}

/// Key to action lookup with user overrides layered over the defaults.
#[derive(Debug, Clone)]
pub struct Keymap {
    binds: Vec<Keybind>,
}

impl Keymap {
    #[must_use]
    pub fn defaults() -> Self {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        let binds = vec![
            Keybind::new(key(KeyCode::Char('q')), Action::Quit, "Quit"),
            Keybind::new(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                Action::Quit,
                "Quit",
            )
            .hidden(),
            Keybind::new(key(KeyCode::Char('?')), Action::ToggleHelp, "Help"),
            Keybind::new(key(KeyCode::Tab), Action::FocusNext, "Next"),
            Keybind::new(
                KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT),
                Action::FocusPrevious,
                "Previous",
            )
            .hidden(),
            Keybind::new(key(KeyCode::Char('j')), Action::ScrollDown, "Scroll").hidden(),
            Keybind::new(key(KeyCode::Char('k')), Action::ScrollUp, "Scroll").hidden(),
            Keybind::new(key(KeyCode::Up), Action::NavigateUp, "Up").hidden(),
            Keybind::new(key(KeyCode::Down), Action::NavigateDown, "Down").hidden(),
            Keybind::new(key(KeyCode::Left), Action::NavigateLeft, "Left").hidden(),
            Keybind::new(key(KeyCode::Right), Action::NavigateRight, "Right").hidden(),
            Keybind::new(key(KeyCode::PageUp), Action::PageUp, "Page up").hidden(),
            Keybind::new(key(KeyCode::PageDown), Action::PageDown, "Page down").hidden(),
            Keybind::new(key(KeyCode::Char('g')), Action::ScrollToTop, "Top").hidden(),
            Keybind::new(key(KeyCode::Char('G')), Action::ScrollToBottom, "Bottom").hidden(),
            Keybind::new(key(KeyCode::Home), Action::SelectFirst, "First").hidden(),
            Keybind::new(key(KeyCode::End), Action::SelectLast, "Last").hidden(),
            Keybind::new(key(KeyCode::Enter), Action::Activate, "Select"),
            Keybind::new(key(KeyCode::Char(' ')), Action::TogglePlay, "Play/Pause"),
            Keybind::new(key(KeyCode::Char('+')), Action::IncreaseTextSize, "Bigger text"),
            Keybind::new(key(KeyCode::Char('=')), Action::IncreaseTextSize, "Bigger text")
                .hidden(),
            Keybind::new(key(KeyCode::Char('-')), Action::DecreaseTextSize, "Smaller text"),
            Keybind::new(key(KeyCode::Char('0')), Action::ResetTextSize, "Reset text").hidden(),
            Keybind::new(key(KeyCode::Char('1')), Action::JumpToSection1, "Section").hidden(),
            Keybind::new(key(KeyCode::Char('2')), Action::JumpToSection2, "Section").hidden(),
            Keybind::new(key(KeyCode::Char('3')), Action::JumpToSection3, "Section").hidden(),
            Keybind::new(key(KeyCode::Char('4')), Action::JumpToSection4, "Section").hidden(),
            Keybind::new(key(KeyCode::Char('5')), Action::JumpToSection5, "Section").hidden(),
            Keybind::new(key(KeyCode::Char('6')), Action::JumpToSection6, "Section").hidden(),
        ];
        Self { binds }
    }

    /// Builds the keymap from defaults plus `overrides` (key description to action).
    /// Unparseable keys are returned so the caller can report them.
    #[must_use]
    pub fn with_overrides(overrides: &HashMap<String, Action>) -> (Self, Vec<String>) {
        let mut keymap = Self::defaults();
        let mut rejected = Vec::new();

        let mut entries: Vec<_> = overrides.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        for (raw, action) in entries {
            match parse_key(raw) {
                Some(key) => {
                    keymap.binds.retain(|b| !same_key(&b.key, &key));
                    keymap
                        .binds
                        .insert(0, Keybind::new(key, *action, format!("{action:?}")).hidden());
                }
                None => rejected.push(raw.clone()),
            }
        }

        (keymap, rejected)
    }

    #[must_use]
    pub fn resolve(&self, key: &KeyEvent) -> Option<Action> {
        self.binds
            .iter()
            .find(|b| same_key(&b.key, key))
            .map(|b| b.action)
    }

    /// Bindings shown in the footer.
    pub fn visible(&self) -> impl Iterator<Item = &Keybind> {
        self.binds.iter().filter(|b| b.visible_in_bar)
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::defaults()
    }
}

fn same_key(a: &KeyEvent, b: &KeyEvent) -> bool {
    let strip = |m: KeyModifiers| m - KeyModifiers::SHIFT;
    match (a.code, b.code) {
        // Terminals disagree on whether shifted characters carry SHIFT.
        (KeyCode::Char(x), KeyCode::Char(y)) => x == y && strip(a.modifiers) == strip(b.modifiers),
        _ => a.code == b.code && a.modifiers == b.modifiers,
    }
}
