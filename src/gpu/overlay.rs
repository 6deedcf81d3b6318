//! The control panel overlay, drawn with egui on top of the scene.

use std::sync::Arc;

use winit::window::Window;

use crate::controls::ControlEvent;
use crate::ui::{ControlPanel, PanelStats};

/// Panel input, layout and painting.
pub struct Overlay {
    ctx: egui::Context,
    input: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    panel: ControlPanel,
    /// Laid out by [`Overlay::update`], consumed by [`Overlay::paint`].
    pending: Option<LaidOut>,
    /// Freed on the next paint, once the frame that last used them is submitted.
    retired: Vec<egui::TextureId>,
}

struct LaidOut {
    primitives: Vec<egui::ClippedPrimitive>,
    textures: egui::TexturesDelta,
    pixels_per_point: f32,
}

impl Overlay {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        window: &Arc<Window>,
        panel: ControlPanel,
    ) -> Self {
        let ctx = egui::Context::default();
        let mut visuals = egui::Visuals::dark();
        visuals.window_shadow = egui::Shadow::NONE;
        ctx.set_visuals(visuals);

        let input = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window.as_ref(),
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(device, format, None, 1, false);

        Self {
            ctx,
            input,
            renderer,
            panel,
            pending: None,
            retired: Vec::new(),
        }
    }

    /// Returns true if the panel took the event (pointer over a widget).
    pub fn on_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.input.on_window_event(window, event).consumed
    }

    /// Lay out the panel for this frame and return what the user changed.
    pub fn update(&mut self, window: &Window, stats: PanelStats) -> Vec<ControlEvent> {
        let raw = self.input.take_egui_input(window);
        let (output, events) = run_panel(&self.ctx, raw, &mut self.panel, stats);
        self.input
            .handle_platform_output(window, output.platform_output);

        self.pending = Some(LaidOut {
            primitives: self.ctx.tessellate(output.shapes, output.pixels_per_point),
            textures: output.textures_delta,
            pixels_per_point: output.pixels_per_point,
        });
        events
    }

    /// Record the overlay pass drawing the last laid-out frame over `target`.
    pub fn paint(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
    ) {
        for id in self.retired.drain(..) {
            self.renderer.free_texture(&id);
        }
        let Some(frame) = self.pending.take() else {
            return;
        };

        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: frame.pixels_per_point,
        };
        for (id, delta) in &frame.textures.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
        self.renderer
            .update_buffers(device, queue, encoder, &frame.primitives, &screen);

        let mut pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Overlay Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            })
            .forget_lifetime();
        self.renderer.render(&mut pass, &frame.primitives, &screen);
        drop(pass);

        self.retired = frame.textures.free;
    }
}

/// One egui pass over the panel.
fn run_panel(
    ctx: &egui::Context,
    raw: egui::RawInput,
    panel: &mut ControlPanel,
    stats: PanelStats,
) -> (egui::FullOutput, Vec<ControlEvent>) {
    let mut events = Vec::new();
    let output = ctx.run(raw, |ctx| events = panel.show(ctx, stats));
    (output, events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::{ControlId, Params};

    #[test]
    fn test_first_pass_uploads_font_atlas() {
        let ctx = egui::Context::default();
        let mut panel = ControlPanel::new(&ControlId::ALL, &Params::default());
        let (output, events) = run_panel(&ctx, egui::RawInput::default(), &mut panel, PanelStats::default());
        assert!(events.is_empty());
        assert!(!output.textures_delta.set.is_empty());
    }

    #[test]
    fn test_panel_without_controls_draws_nothing() {
        let ctx = egui::Context::default();
        let mut panel = ControlPanel::new(&[], &Params::default());
        for _ in 0..2 {
            let (output, events) =
                run_panel(&ctx, egui::RawInput::default(), &mut panel, PanelStats::default());
            assert!(events.is_empty());
            assert!(ctx.tessellate(output.shapes, output.pixels_per_point).is_empty());
        }
    }
}
