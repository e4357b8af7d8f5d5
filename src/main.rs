//! Raging Sea - animated procedural water with a live debug panel.
//!
//! Drag to orbit, scroll to zoom, H toggles the panel, ESC quits.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use glam::Mat4;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use ragingsea::camera::{OrbitCamera, Projection};
use ragingsea::cli::Args;
use ragingsea::clock::SystemClock;
use ragingsea::driver::{RenderDriver, Renderer};
use ragingsea::overlay::{OverlayFrame, PanelOverlay};
use ragingsea::panel::ControlPanel;
use ragingsea::params::{RenderConfig, WaterParams};
use ragingsea::rendering::{InitError, RenderError, RenderSystem};
use ragingsea::uniforms::{UniformSet, WaterUniforms};
use ragingsea::viewport::Viewport;
use ragingsea::water::WaterSurface;

/// Window-bound state, created once the event loop is running
struct Gpu {
    window: Arc<Window>,
    render_system: RenderSystem,
    overlay: PanelOverlay,
    viewport: Viewport,
}

/// Main application state
struct App {
    gpu: Option<Gpu>,

    // Scene
    params: WaterParams,
    water: WaterSurface,
    camera: OrbitCamera,
    panel: ControlPanel,

    driver: RenderDriver<SystemClock>,
    render_config: RenderConfig,

    /// Set when startup or a frame failed, for the exit status
    failed: bool,
}

/// Everything one frame draws: camera update, uniform upload, water, panel
struct WaterFrame<'a> {
    render_system: &'a mut RenderSystem,
    overlay: &'a mut PanelOverlay,
    overlay_frame: Option<OverlayFrame>,
    camera: &'a mut OrbitCamera,
    model: Mat4,
}

impl Renderer for WaterFrame<'_> {
    type Error = RenderError;

    fn draw(&mut self, uniforms: &UniformSet) -> Result<(), RenderError> {
        self.camera.update();
        let gpu_uniforms = WaterUniforms::new(uniforms, self.camera.view_proj(), self.model);
        self.render_system.update_uniforms(&gpu_uniforms);

        let overlay = self
            .overlay_frame
            .take()
            .map(|frame| (&mut *self.overlay, frame));
        self.render_system.render(overlay)
    }
}

impl App {
    fn new(args: &Args) -> Self {
        let render_config = args.render_config();
        let camera = OrbitCamera::new(
            args.orbit_config(),
            Projection::from_config(&render_config),
        );

        Self {
            gpu: None,
            params: args.water_params(),
            water: WaterSurface::new(&args.surface_config()),
            camera,
            panel: ControlPanel::new(args.panel_config()),
            driver: RenderDriver::new(SystemClock::new()),
            render_config,
            failed: false,
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<Gpu, InitError> {
        let window_attributes = Window::default_attributes()
            .with_title("Raging Sea")
            .with_inner_size(LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .map_err(InitError::Window)?,
        );

        let scale_factor = window.scale_factor();
        let logical = window.inner_size().to_logical::<f64>(scale_factor);
        let viewport = Viewport::new(
            logical.width,
            logical.height,
            scale_factor,
            self.render_config.max_pixel_ratio,
        );
        let config = viewport.config();
        self.camera.set_aspect(config.aspect());

        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            (config.surface_width, config.surface_height),
            &self.water,
        ))?;
        let overlay = PanelOverlay::new(&window, render_system.device(), render_system.format());

        Ok(Gpu {
            window,
            render_system,
            overlay,
            viewport,
        })
    }

    /// Window resized or moved to a screen with another scale factor
    fn apply_resize(gpu: &mut Gpu, camera: &mut OrbitCamera, size: PhysicalSize<u32>) {
        let scale_factor = gpu.window.scale_factor();
        let logical = size.to_logical::<f64>(scale_factor);
        gpu.viewport.apply(
            logical.width,
            logical.height,
            scale_factor,
            camera,
            &mut gpu.render_system,
        );
    }

    /// One tick of the render loop
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let overlay_frame = gpu.overlay.run(
            &gpu.window,
            gpu.render_system.device(),
            gpu.render_system.queue(),
            &mut self.panel,
            &mut self.params,
            gpu.render_system.surface_size(),
        );
        if overlay_frame.params_changed {
            log::trace!("Parameters changed: {:?}", self.params);
        }

        let mut frame = WaterFrame {
            render_system: &mut gpu.render_system,
            overlay: &mut gpu.overlay,
            overlay_frame: Some(overlay_frame),
            camera: &mut self.camera,
            model: self.water.model_matrix(),
        };

        match self
            .driver
            .tick(&self.params, &mut frame, &*gpu.window)
        {
            Ok(Some(stats)) => {
                log::trace!(
                    "Frame {} at {:.3}s (+{:.1}ms)",
                    stats.frame,
                    stats.elapsed_s,
                    stats.delta_s * 1000.0
                );
                let drawn = self.driver.frames_drawn();
                if self.render_config.frame_limit.is_some_and(|limit| drawn >= limit) {
                    log::info!(
                        "Frame limit reached ({} frames, {:.2}s)",
                        drawn,
                        stats.elapsed_s
                    );
                    event_loop.exit();
                }
            }
            Ok(None) => {}
            Err(e) => {
                log::error!("Render loop stopped: {}", e);
                self.failed = true;
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return; // Already initialized
        }

        match self.init_gpu(event_loop) {
            Ok(gpu) => {
                // Clock starts with the loop, not with process startup
                self.driver = RenderDriver::new(SystemClock::new());
                self.driver.start(&*gpu.window);
                self.gpu = Some(gpu);
                log::info!("Running. Drag to orbit, scroll to zoom, H toggles panel, ESC quits");
            }
            Err(e) => {
                log::error!("Startup failed: {}", e);
                self.failed = true;
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let consumed = gpu.overlay.on_window_event(&gpu.window, &event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        repeat: false,
                        ..
                    },
                ..
            } if !consumed => match code {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::KeyH => self.panel.toggle(),
                _ => {}
            },
            WindowEvent::Resized(size) => Self::apply_resize(gpu, &mut self.camera, size),
            WindowEvent::ScaleFactorChanged { .. } => {
                let size = gpu.window.inner_size();
                Self::apply_resize(gpu, &mut self.camera, size);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let pressed = state == ElementState::Pressed;
                // Drags that start on the panel belong to the panel
                if !pressed || !(consumed || gpu.overlay.wants_pointer()) {
                    self.camera.set_dragging(pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let height = gpu.window.inner_size().height as f32;
                self.camera.cursor_moved(position.x, position.y, height);
            }
            WindowEvent::MouseWheel { delta, .. } if !consumed => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => (pos.y / 100.0) as f32,
                };
                self.camera.zoom_by(notches);
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info,wgpu_core=warn,wgpu_hal=warn,naga=warn"),
    )
    .init();

    let args = Args::parse();
    log::info!("Raging Sea - procedural water");
    log::debug!("{:?}", args);

    let mut app = App::new(&args);
    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        return ExitCode::FAILURE;
    }

    if app.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
