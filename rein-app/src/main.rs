//! GUI tools demo
//!
//! Draws a Dear ImGui tool window over a cleared scene. The clear color is
//! edited from the GUI.
//!
//! Run from this directory with: cargo run

use rein_imgui::imgui;
use rein_imgui::{
    screen_target, ClearState, EffectLibrary, FrameInput, FrameOutput, GuiBridge, GuiSettings,
    ImguiLibrary, Texture2D, TextureId, Window, WindowSettings,
};

struct State {
    effects: EffectLibrary,
    bridge: Option<GuiBridge<ImguiLibrary>>,
    checker: Option<(Texture2D, TextureId)>,
    clear_color: [f32; 3],
    note: String,
    show_demo: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let window = Window::new(WindowSettings::default().title("Rein ImGui").size(1280, 720))?;

    let state = State {
        effects: EffectLibrary::new(),
        bridge: None,
        checker: None,
        clear_color: [0.15, 0.15, 0.18],
        note: String::new(),
        show_demo: false,
    };

    window.render_loop(state, |state, frame| match run_frame(state, frame) {
        Ok(output) => output,
        Err(e) => {
            log::error!("gui bridge failed: {:#}", e);
            FrameOutput::exit()
        }
    })
}

fn run_frame(state: &mut State, mut frame: FrameInput<'_>) -> anyhow::Result<FrameOutput> {
    // Initialize on first frame, once the surface format is known
    if state.bridge.is_none() {
        let mut bridge = GuiBridge::new(
            frame.ctx,
            &mut state.effects,
            frame.surface_format,
            ImguiLibrary::new()?,
            GuiSettings::default(),
        )?;

        let checker = checker_texture(&frame);
        let id = bridge.register_texture(frame.ctx, checker.view());
        state.checker = Some((checker, id));
        state.bridge = Some(bridge);
    }
    let Some(bridge) = state.bridge.as_mut() else {
        return Ok(FrameOutput::default());
    };

    let ui: &imgui::Ui = bridge.update(&mut *frame.input, frame.delta_time as f32)?;
    ui.window("Tools")
        .size([320.0, 260.0], imgui::Condition::FirstUseEver)
        .build(|| {
            ui.text(format!("{:.1} fps", ui.io().framerate));
            ui.separator();
            ui.color_edit3("clear color", &mut state.clear_color);
            ui.input_text("note", &mut state.note).build();
            ui.checkbox("demo window", &mut state.show_demo);
            if let Some((_, id)) = &state.checker {
                imgui::Image::new(imgui::TextureId::new(id.0 as usize), [64.0, 64.0]).build(ui);
            }
        });
    if state.show_demo {
        ui.show_demo_window(&mut state.show_demo);
    }

    // Scene
    let target = screen_target(&frame);
    let [r, g, b] = state.clear_color;
    let mut encoder = frame.ctx.create_encoder(Some("scene encoder"));
    {
        let _pass = target.begin_render_pass(
            &mut encoder,
            ClearState::color([r, g, b, 1.0]),
            "scene pass",
        );
    }
    frame.ctx.submit([encoder.finish()]);

    // GUI overlay
    let stats = bridge.draw(frame.ctx, &target)?;
    if stats.vertex_buffer_grown || stats.index_buffer_grown {
        log::debug!("gui buffers grew: {:?}", stats);
    }

    Ok(FrameOutput::default())
}

fn checker_texture(frame: &FrameInput<'_>) -> Texture2D {
    const SIZE: u32 = 64;
    let pixels: Vec<u8> = (0..SIZE * SIZE)
        .flat_map(|i| {
            let (x, y) = (i % SIZE / 8, i / SIZE / 8);
            if (x + y) % 2 == 0 {
                [230, 230, 230, 255]
            } else {
                [60, 90, 160, 255]
            }
        })
        .collect();
    Texture2D::from_rgba8(
        frame.ctx,
        SIZE,
        SIZE,
        &pixels,
        wgpu::TextureFormat::Rgba8UnormSrgb,
        Some("checker"),
    )
}
