//! Keyboard mapping. Keys pressed in the input line drive editing, recall,
//! completion and cancellation; keys pressed anywhere else are global
//! shortcuts.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Tab,
    Up,
    Down,
    Escape,
    Backspace,
    F1,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    /// Cmd on macOS.
    pub meta: bool,
    pub alt: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn ctrl(c: char) -> Self {
        Self {
            key: Key::Char(c),
            modifiers: Modifiers {
                ctrl: true,
                ..Modifiers::default()
            },
        }
    }

    pub fn meta(c: char) -> Self {
        Self {
            key: Key::Char(c),
            modifiers: Modifiers {
                meta: true,
                ..Modifiers::default()
            },
        }
    }

    fn command_modifier(&self) -> bool {
        self.modifiers.ctrl || self.modifiers.meta
    }

    fn is_char(&self, wanted: char) -> bool {
        matches!(self.key, Key::Char(c) if c.eq_ignore_ascii_case(&wanted))
    }
}

/// What a key does while the input line has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Submit,
    Complete,
    RecallUp,
    RecallDown,
    Cancel,
    DismissSuggestions,
    Insert(char),
    DeleteBack,
    Ignore,
}

pub fn input_action(press: KeyPress) -> InputAction {
    if press.modifiers.ctrl && press.is_char('c') {
        return InputAction::Cancel;
    }
    match press.key {
        Key::Enter => InputAction::Submit,
        Key::Tab => InputAction::Complete,
        Key::Up => InputAction::RecallUp,
        Key::Down => InputAction::RecallDown,
        Key::Escape => InputAction::DismissSuggestions,
        Key::Backspace => InputAction::DeleteBack,
        Key::Char(c) if !press.command_modifier() && !c.is_control() => InputAction::Insert(c),
        Key::Char(_) | Key::F1 => InputAction::Ignore,
    }
}

/// What a key does when focus is outside the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalShortcut {
    ClearHistory,
    RunHelp,
    /// Move focus to the input; printable keys are then typed into it.
    FocusInput,
    Ignore,
}

pub fn global_shortcut(press: KeyPress) -> GlobalShortcut {
    if press.command_modifier() && (press.is_char('k') || press.is_char('l')) {
        return GlobalShortcut::ClearHistory;
    }
    if press.key == Key::F1 || press.key == Key::Char('?') {
        return GlobalShortcut::RunHelp;
    }
    match press.key {
        Key::Escape => GlobalShortcut::FocusInput,
        Key::Char(c) if !press.command_modifier() && !press.modifiers.alt && !c.is_control() => {
            GlobalShortcut::FocusInput
        }
        _ => GlobalShortcut::Ignore,
    }
}
