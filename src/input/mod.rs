//! Input polling
//!
//! The host-facing input model consumed by the GUI bridge: polled surface,
//! pointer, button and key state plus an ordered queue of discrete events.

pub mod event;
pub mod state;

pub use event::{InputEvent, Key, Modifiers, MouseButton};
pub use state::InputState;

/// Input-polling service the bridge reads once per frame.
pub trait InputSource {
    /// Current surface size in pixels.
    fn surface_size(&self) -> (f32, f32);

    /// Absolute pointer position in pixels.
    fn pointer_position(&self) -> (f32, f32);

    /// Whether a mouse button is held right now.
    fn is_mouse_button_down(&self, button: MouseButton) -> bool;

    /// Whether a key is held right now.
    fn is_key_down(&self, key: Key) -> bool;

    /// Take every event received since the previous call, in arrival order.
    fn drain_events(&mut self) -> Vec<InputEvent>;

    /// Turn text capture on or off.
    fn set_text_input(&mut self, enabled: bool);

    /// Whether text capture is on.
    fn text_input_enabled(&self) -> bool;
}
