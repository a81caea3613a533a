//! Polled input state
//!
//! [`InputState`] accumulates host events and answers the polling queries of
//! [`InputSource`].

use super::event::{InputEvent, Key, MouseButton};
use super::InputSource;
use std::collections::{HashSet, VecDeque};

/// Input collected from the host since the last poll.
#[derive(Debug, Default)]
pub struct InputState {
    surface_size: (f32, f32),
    pointer: (f32, f32),
    buttons_down: HashSet<MouseButton>,
    keys_down: HashSet<Key>,
    events: VecDeque<InputEvent>,
    text_input: bool,
}

impl InputState {
    /// Create an empty state for a surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            surface_size: (width as f32, height as f32),
            ..Default::default()
        }
    }

    /// Record an event: update the polled state and queue it.
    ///
    /// Text arriving while text input is disabled is dropped.
    pub fn push(&mut self, event: InputEvent) {
        match &event {
            InputEvent::KeyPress { key } => {
                self.keys_down.insert(*key);
            }
            InputEvent::KeyRelease { key } => {
                self.keys_down.remove(key);
            }
            InputEvent::Text { text } => {
                if !self.text_input || text.is_empty() {
                    return;
                }
            }
            InputEvent::MousePress { button, position } => {
                self.buttons_down.insert(*button);
                self.pointer = *position;
            }
            InputEvent::MouseRelease { button, position } => {
                self.buttons_down.remove(button);
                self.pointer = *position;
            }
            InputEvent::MouseMotion { position, .. } => {
                self.pointer = *position;
            }
            InputEvent::Resize { width, height } => {
                self.surface_size = (*width as f32, *height as f32);
            }
            InputEvent::MouseWheel { .. } => {}
        }
        self.events.push_back(event);
    }

    /// Move the pointer without producing a motion delta.
    pub fn set_pointer_position(&mut self, x: f32, y: f32) {
        self.pointer = (x, y);
    }

    /// Set the surface size directly.
    pub fn set_surface_size(&mut self, width: u32, height: u32) {
        self.surface_size = (width as f32, height as f32);
    }

    /// Events queued since the last drain, without consuming them.
    pub fn pending_events(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Release every key and button, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        for key in self.keys_down.drain() {
            self.events.push_back(InputEvent::KeyRelease { key });
        }
        for button in self.buttons_down.drain() {
            self.events.push_back(InputEvent::MouseRelease {
                button,
                position: self.pointer,
            });
        }
    }
}

impl InputSource for InputState {
    fn surface_size(&self) -> (f32, f32) {
        self.surface_size
    }

    fn pointer_position(&self) -> (f32, f32) {
        self.pointer
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    fn drain_events(&mut self) -> Vec<InputEvent> {
        self.events.drain(..).collect()
    }

    fn set_text_input(&mut self, enabled: bool) {
        self.text_input = enabled;
    }

    fn text_input_enabled(&self) -> bool {
        self.text_input
    }
}
