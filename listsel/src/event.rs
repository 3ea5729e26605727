//! Decoded input consumed by the selection controller.
//!
//! Hosts either build these directly or convert from `crossterm` events.

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// Anything the controller has no use for.
    Other,
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Whether the button went down or came back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    Down,
    Up,
}

/// A pointer press or release over the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub button: MouseButton,
    pub modifiers: Modifiers,
    /// The press landed on the item's checkmark rather than its label.
    pub on_checkmark: bool,
}

impl PointerEvent {
    pub fn down(modifiers: Modifiers) -> Self {
        Self {
            phase: PointerPhase::Down,
            button: MouseButton::Left,
            modifiers,
            on_checkmark: false,
        }
    }

    pub fn up(modifiers: Modifiers) -> Self {
        Self {
            phase: PointerPhase::Up,
            ..Self::down(modifiers)
        }
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn on_checkmark(mut self) -> Self {
        self.on_checkmark = true;
        self
    }

    pub fn is_down(&self) -> bool {
        self.phase == PointerPhase::Down
    }

    /// Convert a crossterm press/release. Moves, drags and scrolls give `None`.
    pub fn from_crossterm(event: &crossterm::event::MouseEvent) -> Option<Self> {
        use crossterm::event::MouseEventKind;
        let (phase, button) = match event.kind {
            MouseEventKind::Down(button) => (PointerPhase::Down, button),
            MouseEventKind::Up(button) => (PointerPhase::Up, button),
            _ => return None,
        };
        Some(Self {
            phase,
            button: button.into(),
            modifiers: event.modifiers.into(),
            on_checkmark: false,
        })
    }
}

// Conversion from crossterm types
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            _ => Key::Other,
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers, MouseEvent, MouseEventKind};

    #[test]
    fn converts_keys_and_modifiers() {
        assert_eq!(Key::from(KeyCode::PageDown), Key::PageDown);
        assert_eq!(Key::from(KeyCode::Tab), Key::Other);
        let mods: Modifiers = (KeyModifiers::SHIFT | KeyModifiers::CONTROL).into();
        assert!(mods.shift && mods.ctrl && !mods.alt);
    }

    #[test]
    fn only_press_and_release_become_pointer_events() {
        let event = MouseEvent {
            kind: MouseEventKind::Up(crossterm::event::MouseButton::Right),
            column: 3,
            row: 7,
            modifiers: KeyModifiers::CONTROL,
        };
        let pointer = PointerEvent::from_crossterm(&event).unwrap();
        assert_eq!(pointer.phase, PointerPhase::Up);
        assert_eq!(pointer.button, MouseButton::Right);
        assert!(pointer.modifiers.ctrl);

        let moved = MouseEvent {
            kind: MouseEventKind::Moved,
            ..event
        };
        assert_eq!(PointerEvent::from_crossterm(&moved), None);
    }
}
