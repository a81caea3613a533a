//! Input translation
//!
//! Turns host input into the per-frame [`IoSnapshot`] the GUI library consumes.

use crate::input::{InputEvent, InputSource, Key, Modifiers, MouseButton};
use std::collections::BTreeSet;

/// Logical keys the GUI library needs for navigation and text editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GuiKey {
    Tab,
    LeftArrow,
    RightArrow,
    UpArrow,
    DownArrow,
    PageUp,
    PageDown,
    Home,
    End,
    Delete,
    Backspace,
    Enter,
    Escape,
    Space,
    A,
    C,
    V,
    X,
    Y,
    Z,
}

impl GuiKey {
    /// Every logical key, in declaration order.
    pub const ALL: [GuiKey; 20] = [
        GuiKey::Tab,
        GuiKey::LeftArrow,
        GuiKey::RightArrow,
        GuiKey::UpArrow,
        GuiKey::DownArrow,
        GuiKey::PageUp,
        GuiKey::PageDown,
        GuiKey::Home,
        GuiKey::End,
        GuiKey::Delete,
        GuiKey::Backspace,
        GuiKey::Enter,
        GuiKey::Escape,
        GuiKey::Space,
        GuiKey::A,
        GuiKey::C,
        GuiKey::V,
        GuiKey::X,
        GuiKey::Y,
        GuiKey::Z,
    ];
}

/// Bidirectional mapping between [`GuiKey`] and host [`Key`] codes.
///
/// Indexed by `GuiKey as usize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    hosts: [Key; GuiKey::ALL.len()],
}

impl KeyMap {
    /// Host key bound to a logical GUI key.
    pub fn host_key(&self, key: GuiKey) -> Key {
        self.hosts[key as usize]
    }

    /// Logical GUI key for a host key, if it is mapped.
    pub fn gui_key(&self, key: Key) -> Option<GuiKey> {
        self.hosts
            .iter()
            .position(|&host| host == key)
            .map(|index| GuiKey::ALL[index])
    }

    /// Iterate over all `(gui, host)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (GuiKey, Key)> + '_ {
        GuiKey::ALL.iter().copied().zip(self.hosts.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            hosts: GuiKey::ALL.map(|gui| match gui {
                GuiKey::Tab => Key::Tab,
                GuiKey::LeftArrow => Key::Left,
                GuiKey::RightArrow => Key::Right,
                GuiKey::UpArrow => Key::Up,
                GuiKey::DownArrow => Key::Down,
                GuiKey::PageUp => Key::PageUp,
                GuiKey::PageDown => Key::PageDown,
                GuiKey::Home => Key::Home,
                GuiKey::End => Key::End,
                GuiKey::Delete => Key::Delete,
                GuiKey::Backspace => Key::Backspace,
                GuiKey::Enter => Key::Enter,
                GuiKey::Escape => Key::Escape,
                GuiKey::Space => Key::Space,
                GuiKey::A => Key::A,
                GuiKey::C => Key::C,
                GuiKey::V => Key::V,
                GuiKey::X => Key::X,
                GuiKey::Y => Key::Y,
                GuiKey::Z => Key::Z,
            }),
        }
    }
}

/// Input state handed to the GUI library for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct IoSnapshot {
    /// Display size in pixels.
    pub display_size: [f32; 2],
    /// Always 1:1.
    pub framebuffer_scale: [f32; 2],
    /// Seconds since the previous frame.
    pub delta_time: f32,
    pub mouse_pos: [f32; 2],
    /// Left, right and middle button.
    pub mouse_down: [bool; 3],
    /// Wheel movement this frame as `[horizontal, vertical]`.
    pub mouse_wheel: [f32; 2],
    /// Host keys held down.
    pub keys_down: BTreeSet<Key>,
    /// Text typed this frame.
    pub input_characters: Vec<char>,
    pub modifiers: Modifiers,
}

impl Default for IoSnapshot {
    fn default() -> Self {
        Self {
            display_size: [0.0, 0.0],
            framebuffer_scale: [1.0, 1.0],
            delta_time: 0.0,
            mouse_pos: [0.0, 0.0],
            mouse_down: [false; 3],
            mouse_wheel: [0.0, 0.0],
            keys_down: BTreeSet::new(),
            input_characters: Vec::new(),
            modifiers: Modifiers::default(),
        }
    }
}

impl IoSnapshot {
    /// Whether a host key is held.
    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

/// Builds one [`IoSnapshot`] per frame from an [`InputSource`].
///
/// Key state is carried between frames since the host only reports
/// transitions. Wheel and text are per frame.
#[derive(Debug, Default)]
pub struct IoTranslator {
    keys_down: BTreeSet<Key>,
}

impl IoTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate everything the host collected since the previous call.
    ///
    /// `want_text_input` is the GUI library's current request for text
    /// capture; it is forwarded to the host before the event queue is drained.
    pub fn translate(
        &mut self,
        input: &mut impl InputSource,
        delta_time: f32,
        want_text_input: bool,
    ) -> IoSnapshot {
        let (width, height) = input.surface_size();
        let (x, y) = input.pointer_position();

        if input.text_input_enabled() != want_text_input {
            input.set_text_input(want_text_input);
        }

        let mut wheel = [0.0f32; 2];
        let mut characters = Vec::new();
        for event in input.drain_events() {
            match event {
                InputEvent::Text { text } => {
                    characters.extend(text.chars().filter(|&c| c != '\t'));
                }
                InputEvent::KeyPress { key } => {
                    self.keys_down.insert(key);
                }
                InputEvent::KeyRelease { key } => {
                    self.keys_down.remove(&key);
                }
                InputEvent::MouseWheel { delta } => {
                    wheel[0] += delta.0;
                    wheel[1] += delta.1;
                }
                _ => {}
            }
        }

        IoSnapshot {
            display_size: [width, height],
            framebuffer_scale: [1.0, 1.0],
            delta_time,
            mouse_pos: [x, y],
            mouse_down: [
                input.is_mouse_button_down(MouseButton::Left),
                input.is_mouse_button_down(MouseButton::Right),
                input.is_mouse_button_down(MouseButton::Middle),
            ],
            mouse_wheel: wheel,
            keys_down: self.keys_down.clone(),
            input_characters: characters,
            modifiers: Modifiers::from_keys(|key| input.is_key_down(key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;
    use std::collections::HashSet;

    #[test]
    fn test_key_map_is_a_bijection() {
        let map = KeyMap::default();
        assert_eq!(map.len(), GuiKey::ALL.len());

        let hosts: HashSet<Key> = map.iter().map(|(_, host)| host).collect();
        assert_eq!(hosts.len(), GuiKey::ALL.len());

        for gui in GuiKey::ALL {
            assert_eq!(map.gui_key(map.host_key(gui)), Some(gui));
        }
        for (_, host) in map.iter() {
            assert_eq!(map.host_key(map.gui_key(host).unwrap()), host);
        }
        assert_eq!(map.gui_key(Key::F1), None);
    }

    #[test]
    fn test_snapshot_of_pointer_and_buttons() {
        let mut input = InputState::new(800, 600);
        input.set_pointer_position(400.0, 300.0);
        input.push(InputEvent::MousePress {
            button: MouseButton::Left,
            position: (400.0, 300.0),
        });

        let io = IoTranslator::new().translate(&mut input, 1.0 / 60.0, false);
        assert_eq!(io.display_size, [800.0, 600.0]);
        assert_eq!(io.framebuffer_scale, [1.0, 1.0]);
        assert_eq!(io.mouse_pos, [400.0, 300.0]);
        assert_eq!(io.mouse_down, [true, false, false]);
        assert!(io.keys_down.is_empty());
        assert!(io.modifiers.none());
    }

    #[test]
    fn test_update_without_new_events_is_idempotent() {
        let mut input = InputState::new(800, 600);
        input.set_text_input(true);
        input.push(InputEvent::KeyPress { key: Key::LeftShift });
        input.push(InputEvent::Text { text: "hi".into() });
        input.push(InputEvent::MouseWheel { delta: (0.0, 1.0) });

        let mut translator = IoTranslator::new();
        let first = translator.translate(&mut input, 0.016, true);
        assert_eq!(first.input_characters, vec!['h', 'i']);
        assert_eq!(first.mouse_wheel, [0.0, 1.0]);

        let second = translator.translate(&mut input, 0.020, true);
        let third = translator.translate(&mut input, 0.033, true);
        assert_eq!(
            IoSnapshot {
                delta_time: 0.0,
                ..second.clone()
            },
            IoSnapshot {
                delta_time: 0.0,
                ..third
            }
        );
        assert!(second.is_key_down(Key::LeftShift));
        assert!(second.modifiers.shift);
        assert!(second.input_characters.is_empty());
        assert_eq!(second.mouse_wheel, [0.0, 0.0]);
    }

    #[test]
    fn test_tab_is_filtered_from_text() {
        let mut input = InputState::new(800, 600);
        input.set_text_input(true);
        input.push(InputEvent::Text { text: "a\tb".into() });
        input.push(InputEvent::Text { text: "\t".into() });

        let io = IoTranslator::new().translate(&mut input, 0.016, true);
        assert_eq!(io.input_characters, vec!['a', 'b']);
    }

    #[test]
    fn test_wheel_accumulates_within_frame() {
        let mut input = InputState::new(800, 600);
        input.push(InputEvent::MouseWheel { delta: (0.0, 1.0) });
        input.push(InputEvent::MouseWheel { delta: (0.5, 2.0) });
        input.push(InputEvent::MouseWheel { delta: (0.0, -0.5) });

        let io = IoTranslator::new().translate(&mut input, 0.016, false);
        assert_eq!(io.mouse_wheel, [0.5, 2.5]);
    }

    #[test]
    fn test_key_state_follows_press_and_release() {
        let mut input = InputState::new(800, 600);
        let mut translator = IoTranslator::new();

        input.push(InputEvent::KeyPress { key: Key::Tab });
        assert!(translator.translate(&mut input, 0.016, false).is_key_down(Key::Tab));

        input.push(InputEvent::KeyRelease { key: Key::Tab });
        assert!(!translator.translate(&mut input, 0.016, false).is_key_down(Key::Tab));
    }

    #[test]
    fn test_text_input_flag_is_forwarded() {
        let mut input = InputState::new(800, 600);
        let mut translator = IoTranslator::new();

        translator.translate(&mut input, 0.016, true);
        assert!(input.text_input_enabled());
        translator.translate(&mut input, 0.016, false);
        assert!(!input.text_input_enabled());
    }

    #[test]
    fn test_alt_reads_either_side() {
        let mut input = InputState::new(800, 600);
        input.push(InputEvent::KeyPress { key: Key::RightAlt });
        let io = IoTranslator::new().translate(&mut input, 0.016, false);
        assert!(io.modifiers.alt);
    }
}
