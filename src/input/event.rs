//! Event types for input handling
//!
//! Platform-independent keys, buttons and events. Conversions from winit are
//! compiled with the `window` feature.

/// Mouse button type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keyboard key, identified by its host key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Numbers
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Special keys
    Escape,
    Tab,
    Space,
    Enter,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,

    // Arrow keys
    Left,
    Right,
    Up,
    Down,

    // Modifier keys, one per side
    LeftShift,
    RightShift,
    LeftCtrl,
    RightCtrl,
    LeftAlt,
    RightAlt,
    LeftSuper,
    RightSuper,
}

#[cfg(feature = "window")]
impl Key {
    /// Convert a winit keyboard event.
    ///
    /// Modifiers are resolved from the physical key so left and right stay
    /// distinct; everything else goes through the logical key.
    pub fn from_winit_event(event: &winit::event::KeyEvent) -> Option<Self> {
        Self::from_winit_physical(&event.physical_key)
            .or_else(|| Self::from_winit(&event.logical_key))
    }

    /// Convert a physical modifier key.
    pub fn from_winit_physical(key: &winit::keyboard::PhysicalKey) -> Option<Self> {
        use winit::keyboard::{KeyCode, PhysicalKey};

        let PhysicalKey::Code(code) = key else {
            return None;
        };
        match code {
            KeyCode::ShiftLeft => Some(Key::LeftShift),
            KeyCode::ShiftRight => Some(Key::RightShift),
            KeyCode::ControlLeft => Some(Key::LeftCtrl),
            KeyCode::ControlRight => Some(Key::RightCtrl),
            KeyCode::AltLeft => Some(Key::LeftAlt),
            KeyCode::AltRight => Some(Key::RightAlt),
            KeyCode::SuperLeft => Some(Key::LeftSuper),
            KeyCode::SuperRight => Some(Key::RightSuper),
            _ => None,
        }
    }

    /// Convert from winit logical key.
    pub fn from_winit(key: &winit::keyboard::Key) -> Option<Self> {
        use winit::keyboard::{Key as WKey, NamedKey};

        match key {
            WKey::Character(c) => {
                let c = c.chars().next()?;
                match c.to_ascii_lowercase() {
                    'a' => Some(Key::A),
                    'b' => Some(Key::B),
                    'c' => Some(Key::C),
                    'd' => Some(Key::D),
                    'e' => Some(Key::E),
                    'f' => Some(Key::F),
                    'g' => Some(Key::G),
                    'h' => Some(Key::H),
                    'i' => Some(Key::I),
                    'j' => Some(Key::J),
                    'k' => Some(Key::K),
                    'l' => Some(Key::L),
                    'm' => Some(Key::M),
                    'n' => Some(Key::N),
                    'o' => Some(Key::O),
                    'p' => Some(Key::P),
                    'q' => Some(Key::Q),
                    'r' => Some(Key::R),
                    's' => Some(Key::S),
                    't' => Some(Key::T),
                    'u' => Some(Key::U),
                    'v' => Some(Key::V),
                    'w' => Some(Key::W),
                    'x' => Some(Key::X),
                    'y' => Some(Key::Y),
                    'z' => Some(Key::Z),
                    '0' => Some(Key::Key0),
                    '1' => Some(Key::Key1),
                    '2' => Some(Key::Key2),
                    '3' => Some(Key::Key3),
                    '4' => Some(Key::Key4),
                    '5' => Some(Key::Key5),
                    '6' => Some(Key::Key6),
                    '7' => Some(Key::Key7),
                    '8' => Some(Key::Key8),
                    '9' => Some(Key::Key9),
                    _ => None,
                }
            }
            WKey::Named(named) => match named {
                NamedKey::Escape => Some(Key::Escape),
                NamedKey::Tab => Some(Key::Tab),
                NamedKey::Space => Some(Key::Space),
                NamedKey::Enter => Some(Key::Enter),
                NamedKey::Backspace => Some(Key::Backspace),
                NamedKey::Delete => Some(Key::Delete),
                NamedKey::Insert => Some(Key::Insert),
                NamedKey::Home => Some(Key::Home),
                NamedKey::End => Some(Key::End),
                NamedKey::PageUp => Some(Key::PageUp),
                NamedKey::PageDown => Some(Key::PageDown),
                NamedKey::ArrowLeft => Some(Key::Left),
                NamedKey::ArrowRight => Some(Key::Right),
                NamedKey::ArrowUp => Some(Key::Up),
                NamedKey::ArrowDown => Some(Key::Down),
                NamedKey::F1 => Some(Key::F1),
                NamedKey::F2 => Some(Key::F2),
                NamedKey::F3 => Some(Key::F3),
                NamedKey::F4 => Some(Key::F4),
                NamedKey::F5 => Some(Key::F5),
                NamedKey::F6 => Some(Key::F6),
                NamedKey::F7 => Some(Key::F7),
                NamedKey::F8 => Some(Key::F8),
                NamedKey::F9 => Some(Key::F9),
                NamedKey::F10 => Some(Key::F10),
                NamedKey::F11 => Some(Key::F11),
                NamedKey::F12 => Some(Key::F12),
                _ => None,
            },
            _ => None,
        }
    }
}

#[cfg(feature = "window")]
impl MouseButton {
    /// Convert from winit mouse button. Extra buttons are ignored.
    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(MouseButton::Left),
            winit::event::MouseButton::Right => Some(MouseButton::Right),
            winit::event::MouseButton::Middle => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

/// Modifier key state, each side folded together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub super_key: bool,
}

impl Modifiers {
    /// Read the modifier state from polled key states.
    pub fn from_keys(is_down: impl Fn(Key) -> bool) -> Self {
        Self {
            shift: is_down(Key::LeftShift) || is_down(Key::RightShift),
            ctrl: is_down(Key::LeftCtrl) || is_down(Key::RightCtrl),
            alt: is_down(Key::LeftAlt) || is_down(Key::RightAlt),
            super_key: is_down(Key::LeftSuper) || is_down(Key::RightSuper),
        }
    }

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.super_key
    }

    /// Check if no modifier is pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// Input event, in the order the host received it.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Key pressed.
    KeyPress { key: Key },

    /// Key released.
    KeyRelease { key: Key },

    /// Text produced by the keyboard or an input method.
    Text { text: String },

    /// Mouse wheel scrolled, in lines (`x` horizontal, `y` vertical).
    MouseWheel { delta: (f32, f32) },

    /// Mouse button pressed.
    MousePress {
        button: MouseButton,
        position: (f32, f32),
    },

    /// Mouse button released.
    MouseRelease {
        button: MouseButton,
        position: (f32, f32),
    },

    /// Mouse moved.
    MouseMotion {
        delta: (f32, f32),
        position: (f32, f32),
    },

    /// Surface resized.
    Resize { width: u32, height: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_fold_both_sides() {
        let right_alt = Modifiers::from_keys(|k| k == Key::RightAlt);
        assert!(right_alt.alt);
        assert!(!right_alt.shift && !right_alt.ctrl && !right_alt.super_key);

        let left_ctrl_right_shift =
            Modifiers::from_keys(|k| matches!(k, Key::LeftCtrl | Key::RightShift));
        assert!(left_ctrl_right_shift.ctrl);
        assert!(left_ctrl_right_shift.shift);
        assert!(Modifiers::from_keys(|_| false).none());
    }
}
