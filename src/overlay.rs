//! egui integration for the control panel: winit input in, wgpu paint out.

use winit::event::WindowEvent;
use winit::window::Window;

use crate::panel::ControlPanel;
use crate::params::WaterParams;

/// Receiver of egui texture uploads and frees
trait TextureSink {
    fn update(&mut self, id: egui::TextureId, delta: &egui::epaint::ImageDelta);
    fn free(&mut self, id: egui::TextureId);
}

struct GpuTextures<'a> {
    renderer: &'a mut egui_wgpu::Renderer,
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
}

impl TextureSink for GpuTextures<'_> {
    fn update(&mut self, id: egui::TextureId, delta: &egui::epaint::ImageDelta) {
        self.renderer.update_texture(self.device, self.queue, id, delta);
    }

    fn free(&mut self, id: egui::TextureId) {
        self.renderer.free_texture(&id);
    }
}

/// Texture changes are applied when the panel runs, not when it paints, so a
/// skipped frame (lost surface, timeout) never drops the font atlas upload.
#[derive(Default)]
struct TextureQueue {
    /// Released by the previous frame; freed once that frame is done
    pending_free: Vec<egui::TextureId>,
}

impl TextureQueue {
    fn apply(&mut self, sink: &mut impl TextureSink, delta: egui::TexturesDelta) {
        for id in self.pending_free.drain(..) {
            sink.free(id);
        }
        for (id, image) in &delta.set {
            sink.update(*id, image);
        }
        self.pending_free = delta.free;
    }
}

/// Tessellated panel output for one frame
pub struct OverlayFrame {
    paint_jobs: Vec<egui::ClippedPrimitive>,
    screen: egui_wgpu::ScreenDescriptor,
    /// A panel widget changed a parameter this frame
    pub params_changed: bool,
}

/// egui context plus its winit and wgpu adapters
pub struct PanelOverlay {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    textures: TextureQueue,
}

impl PanelOverlay {
    pub fn new(window: &Window, device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(device.limits().max_texture_dimension_2d as usize),
        );
        let renderer = egui_wgpu::Renderer::new(device, format, None, 1, false);

        Self {
            ctx,
            state,
            renderer,
            textures: TextureQueue::default(),
        }
    }

    /// Forward a window event. Returns true if the panel consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// The pointer is over (or dragging) a panel widget
    pub fn wants_pointer(&self) -> bool {
        self.ctx.wants_pointer_input() || self.ctx.is_pointer_over_area()
    }

    /// Run the panel UI, upload texture changes and tessellate it for a
    /// surface of `surface_size` pixels
    pub fn run(
        &mut self,
        window: &Window,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        panel: &mut ControlPanel,
        params: &mut WaterParams,
        surface_size: [u32; 2],
    ) -> OverlayFrame {
        let raw_input = self.state.take_egui_input(window);
        let mut params_changed = false;
        let full_output = self.ctx.run(raw_input, |ctx| {
            params_changed |= panel.show(ctx, params);
        });
        self.state
            .handle_platform_output(window, full_output.platform_output);

        let mut sink = GpuTextures {
            renderer: &mut self.renderer,
            device,
            queue,
        };
        self.textures.apply(&mut sink, full_output.textures_delta);

        // The surface may be smaller than the window when the pixel ratio is
        // capped, so scale points to surface pixels rather than window pixels.
        let screen_width = self.ctx.screen_rect().width();
        let pixels_per_point = if screen_width > 0.0 {
            surface_size[0] as f32 / screen_width
        } else {
            full_output.pixels_per_point
        };

        let paint_jobs = self.ctx.tessellate(full_output.shapes, pixels_per_point);

        OverlayFrame {
            paint_jobs,
            screen: egui_wgpu::ScreenDescriptor {
                size_in_pixels: surface_size,
                pixels_per_point,
            },
            params_changed,
        }
    }

    /// Record the panel draw on top of `view`. Returns command buffers that
    /// must be submitted before `encoder`.
    pub fn paint(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        frame: OverlayFrame,
    ) -> Vec<wgpu::CommandBuffer> {
        let commands = self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &frame.paint_jobs,
            &frame.screen,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Control Panel Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            self.renderer
                .render(&mut render_pass, &frame.paint_jobs, &frame.screen);
        }

        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        updated: Vec<egui::TextureId>,
        freed: Vec<egui::TextureId>,
    }

    impl TextureSink for RecordingSink {
        fn update(&mut self, id: egui::TextureId, _delta: &egui::epaint::ImageDelta) {
            self.updated.push(id);
        }

        fn free(&mut self, id: egui::TextureId) {
            self.freed.push(id);
        }
    }

    #[test]
    fn test_font_atlas_is_uploaded_even_if_the_frame_is_never_painted() {
        let ctx = egui::Context::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.label("Wave Speed");
            });
        });

        let mut queue = TextureQueue::default();
        let mut sink = RecordingSink::default();
        queue.apply(&mut sink, output.textures_delta);
        // No paint call follows: the upload must already have happened
        assert!(sink.updated.contains(&egui::TextureId::default()));
        assert!(sink.freed.is_empty());
    }

    #[test]
    fn test_frees_wait_for_the_next_frame() {
        let released = egui::TextureId::User(7);
        let mut queue = TextureQueue::default();
        let mut sink = RecordingSink::default();

        queue.apply(
            &mut sink,
            egui::TexturesDelta {
                set: Vec::new(),
                free: vec![released],
            },
        );
        assert!(sink.freed.is_empty());

        // The following frame frees it, painted or skipped
        queue.apply(&mut sink, egui::TexturesDelta::default());
        assert_eq!(sink.freed, [released]);

        queue.apply(&mut sink, egui::TexturesDelta::default());
        assert_eq!(sink.freed, [released]);
    }
}
