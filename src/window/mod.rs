//! Window management module
//!
//! Runs a winit window and feeds its events into an [`InputState`] that the
//! frame callback polls.

pub mod frame_io;
pub mod settings;

pub use frame_io::{FrameInput, FrameOutput, Viewport};
pub use settings::WindowSettings;

use crate::context::{self, WgpuContext};
use crate::core::RenderTarget;
use crate::input::{InputEvent, InputSource, InputState, Key, MouseButton};
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, Ime, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

/// Pixels per wheel line for devices that report pixel deltas.
const PIXELS_PER_LINE: f32 = 20.0;

/// A window with GPU rendering context.
pub struct Window {
    settings: WindowSettings,
}

impl Window {
    /// Create a new window with the given settings.
    pub fn new(settings: WindowSettings) -> anyhow::Result<Self> {
        Ok(Self { settings })
    }

    /// Run the render loop with a callback.
    ///
    /// The callback receives a `FrameInput` and should return a `FrameOutput`.
    /// After it returns, host text capture follows
    /// [`InputSource::text_input_enabled`] and the frame is presented.
    pub fn render_loop<F, S>(self, state_init: S, callback: F) -> anyhow::Result<()>
    where
        F: FnMut(&mut S, FrameInput<'_>) -> FrameOutput + 'static,
        S: 'static,
    {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let (width, height) = self.settings.size;
        let mut app = App {
            settings: self.settings,
            state: Some(state_init),
            callback: Some(callback),
            graphics: None,
            input: InputState::new(width, height),
            ime_allowed: false,
            start_time: Instant::now(),
            last_frame_time: Instant::now(),
        };

        event_loop.run_app(&mut app)?;
        Ok(())
    }
}

struct Graphics {
    window: Arc<winit::window::Window>,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    ctx: WgpuContext,
}

impl Graphics {
    fn new(event_loop: &ActiveEventLoop, settings: &WindowSettings) -> anyhow::Result<Self> {
        let window_attrs = winit::window::WindowAttributes::default()
            .with_title(&settings.title)
            .with_inner_size(winit::dpi::LogicalSize::new(settings.size.0, settings.size.1))
            .with_resizable(settings.resizable)
            .with_maximized(settings.maximized);
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(context::request_adapter(&instance, Some(&surface)))?;
        let (device, queue) = pollster::block_on(context::request_device(&adapter))?;
        let ctx = WgpuContext::new(device, queue);

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: settings.present_mode(),
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&ctx.device, &config);
        tracing::info!("surface {}x{} {:?}", config.width, config.height, format);

        Ok(Self {
            window,
            surface,
            config,
            ctx,
        })
    }
}

struct App<S, F> {
    settings: WindowSettings,
    state: Option<S>,
    callback: Option<F>,
    graphics: Option<Graphics>,
    input: InputState,
    ime_allowed: bool,
    start_time: Instant,
    last_frame_time: Instant,
}

impl<S, F> ApplicationHandler for App<S, F>
where
    F: FnMut(&mut S, FrameInput<'_>) -> FrameOutput + 'static,
    S: 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }

        let graphics = match Graphics::new(event_loop, &self.settings) {
            Ok(graphics) => graphics,
            Err(e) => {
                tracing::error!("failed to create window: {:#}", e);
                event_loop.exit();
                return;
            }
        };
        self.input
            .set_surface_size(graphics.config.width, graphics.config.height);
        self.graphics = Some(graphics);

        self.start_time = Instant::now();
        self.last_frame_time = Instant::now();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(graphics) = &mut self.graphics else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Focused(false) => {
                self.input.release_all();
            }
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    graphics.config.width = size.width;
                    graphics.config.height = size.height;
                    graphics
                        .surface
                        .configure(&graphics.ctx.device, &graphics.config);
                }
                self.input.push(InputEvent::Resize {
                    width: size.width,
                    height: size.height,
                });
            }
            WindowEvent::CursorMoved { position, .. } => {
                let old_position = self.input.pointer_position();
                let position = (position.x as f32, position.y as f32);
                self.input.push(InputEvent::MouseMotion {
                    delta: (position.0 - old_position.0, position.1 - old_position.1),
                    position,
                });
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = MouseButton::from_winit(button) else {
                    return;
                };
                let position = self.input.pointer_position();
                self.input.push(match state {
                    ElementState::Pressed => InputEvent::MousePress { button, position },
                    ElementState::Released => InputEvent::MouseRelease { button, position },
                });
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(x, y) => (x, y),
                    MouseScrollDelta::PixelDelta(pos) => (
                        pos.x as f32 / PIXELS_PER_LINE,
                        pos.y as f32 / PIXELS_PER_LINE,
                    ),
                };
                self.input.push(InputEvent::MouseWheel { delta });
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                let events = keyboard_events(
                    Key::from_winit_event(&key_event),
                    key_event.state == ElementState::Pressed,
                    key_event.text.as_deref(),
                    self.ime_allowed,
                );
                for event in events {
                    self.input.push(event);
                }
            }
            WindowEvent::Ime(Ime::Commit(text)) => {
                self.input.push(InputEvent::Text { text });
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let elapsed_time = (now - self.start_time).as_secs_f64();
                let delta_time = (now - self.last_frame_time).as_secs_f64();
                self.last_frame_time = now;

                let surface_texture = match graphics.surface.get_current_texture() {
                    Ok(texture) => texture,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        graphics
                            .surface
                            .configure(&graphics.ctx.device, &graphics.config);
                        return;
                    }
                    Err(e) => {
                        tracing::error!("Surface error: {:?}", e);
                        return;
                    }
                };

                let view = surface_texture
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                let (Some(state), Some(callback)) = (self.state.as_mut(), self.callback.as_mut())
                else {
                    return;
                };
                let frame_input = FrameInput {
                    input: &mut self.input,
                    elapsed_time,
                    delta_time,
                    viewport: Viewport::new(graphics.config.width, graphics.config.height),
                    ctx: &graphics.ctx,
                    surface_view: &view,
                    surface_format: graphics.config.format,
                };
                let output = (callback)(state, frame_input);

                let want_text_input = self.input.text_input_enabled();
                if want_text_input != self.ime_allowed {
                    graphics.window.set_ime_allowed(want_text_input);
                    self.ime_allowed = want_text_input;
                }

                surface_texture.present();

                if output.exit {
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(graphics) = &self.graphics {
            graphics.window.request_redraw();
        }
    }
}

/// Input events for one keyboard event.
///
/// While the IME is allowed, text arrives as `Ime::Commit` and the key's own
/// text is dropped, or it would be inserted twice.
fn keyboard_events(
    key: Option<Key>,
    pressed: bool,
    text: Option<&str>,
    ime_allowed: bool,
) -> Vec<InputEvent> {
    let mut events = Vec::with_capacity(2);
    if let Some(key) = key {
        events.push(if pressed {
            InputEvent::KeyPress { key }
        } else {
            InputEvent::KeyRelease { key }
        });
    }
    if let Some(text) = text.filter(|_| pressed && !ime_allowed) {
        events.push(InputEvent::Text {
            text: text.to_string(),
        });
    }
    events
}

/// Create a render target from frame input.
pub fn screen_target<'a>(input: &FrameInput<'a>) -> RenderTarget<'a> {
    RenderTarget::new(
        input.surface_view,
        input.viewport.width,
        input.viewport.height,
        input.surface_format,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_text_without_ime() {
        assert_eq!(
            keyboard_events(Some(Key::A), true, Some("a"), false),
            vec![
                InputEvent::KeyPress { key: Key::A },
                InputEvent::Text {
                    text: "a".to_string()
                },
            ]
        );
        assert_eq!(
            keyboard_events(Some(Key::A), false, Some("a"), false),
            vec![InputEvent::KeyRelease { key: Key::A }]
        );
    }

    #[test]
    fn test_key_text_dropped_while_ime_allowed() {
        assert_eq!(
            keyboard_events(Some(Key::A), true, Some("a"), true),
            vec![InputEvent::KeyPress { key: Key::A }]
        );
        assert!(keyboard_events(None, true, Some("é"), true).is_empty());
    }
}
