use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use horae_engine::core::{App, AppControl, FrameCtx};
use horae_engine::render::SceneRenderer;
use horae_engine::scene::DrawList;
use horae_engine::text::FontSystem;

use crate::face::render_frame;
use crate::moment::Moment;
use crate::style::FaceStyle;

/// Hosts the clock face in a horae-engine window.
///
/// Each frame samples the time once, records the face and draws it; nothing
/// else carries over between frames apart from GPU caches.
pub struct ClockApp {
    fonts: FontSystem,
    style: FaceStyle,
    draw_list: DrawList,
    renderer: SceneRenderer,
}

impl ClockApp {
    pub fn new(fonts: FontSystem, style: FaceStyle) -> Self {
        Self {
            fonts,
            style,
            draw_list: DrawList::new(),
            renderer: SceneRenderer::new(),
        }
    }
}

impl App for ClockApp {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        if is_escape_press(event) {
            log::info!("escape pressed; closing");
            return AppControl::Exit;
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let viewport = ctx.window.viewport();
        if !viewport.is_valid() {
            return AppControl::Continue;
        }

        let moment = Moment::now();
        render_frame(viewport, moment, &self.style, &mut self.draw_list);

        let Self { fonts, style, draw_list, renderer } = self;
        ctx.render(style.background, |rctx, target| {
            renderer.render(rctx, target, draw_list, fonts);
        })
    }
}

fn is_escape_press(event: &WindowEvent) -> bool {
    matches!(
        event,
        WindowEvent::KeyboardInput {
            event: KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::Escape),
                state: ElementState::Pressed,
                ..
            },
            ..
        }
    )
}
