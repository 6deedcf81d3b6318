//! Window and event loop.
//!
//! Every `RedrawRequested` runs one [`App::tick`], draws the panel, renders
//! and asks for the next redraw. Input is handled between frames on the same
//! thread.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::app::{App, LoopState};
use crate::config::Config;
use crate::controls::{ControlEvent, ControlId};
use crate::error::AppError;
use crate::gpu::GpuState;
use crate::time::FrameStats;
use crate::ui::{ControlPanel, PanelStats};

const TITLE: &str = "Light Cone";

/// Open a window and run until it is closed.
pub fn run(config: Config) -> Result<(), AppError> {
    let app = App::new(&config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut viewer = Viewer::new(app, &config);
    event_loop.run_app(&mut viewer)?;

    match viewer.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct Viewer {
    app: App,
    controls: Vec<ControlId>,
    stats: FrameStats,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    window_size: (u32, u32),
    /// Error that ended the loop, reported after it returns.
    fatal: Option<AppError>,
}

impl Viewer {
    fn new(app: App, config: &Config) -> Self {
        Self {
            app,
            controls: config.controls.clone(),
            stats: FrameStats::new(),
            window: None,
            gpu: None,
            window_size: (config.window_width, config.window_height),
            fatal: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let (width, height) = self.window_size;
        let window_attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let size = window.inner_size();
        self.app.scene.resize(size.width, size.height);

        let panel = ControlPanel::new(&self.controls, &self.app.params);
        let gpu = pollster::block_on(GpuState::new(window.clone(), &self.app.scene, panel))?;

        self.window = Some(window);
        self.gpu = Some(gpu);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        tracing::error!("{err}");
        self.app.stop();
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        match key {
            KeyCode::Space => self.app.toggle_pause(),
            KeyCode::Escape => {
                self.app.stop();
                event_loop.exit();
            }
            _ => {}
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu)) = (self.window.as_ref(), self.gpu.as_mut()) else {
            return;
        };

        self.app.tick();

        let stats = PanelStats {
            fps: self.stats.fps(),
            time: self.app.time.elapsed(),
            particles: self.app.scene.particles().map_or(0, |p| p.len()),
            paused: self.app.state() == LoopState::Paused,
        };
        for event in gpu.overlay.update(window, stats) {
            self.app.handle(event);
        }

        match gpu.render(&mut self.app.scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface lost, reconfiguring");
                gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("GPU out of memory, stopping");
                self.app.stop();
                event_loop.exit();
                return;
            }
            Err(e) => tracing::warn!("render error: {e:?}"),
        }

        if self.stats.record_frame() {
            window.set_title(&format!("{TITLE} - {:.0} fps", self.stats.fps()));
        }
        window.request_redraw();
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.create_window(event_loop) {
                self.fail(event_loop, err);
                return;
            }
            tracing::info!("render loop running");
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let consumed = match (&self.window, &mut self.gpu) {
            (Some(window), Some(gpu)) => gpu.overlay.on_window_event(window, &event),
            _ => false,
        };

        match event {
            WindowEvent::CloseRequested => {
                self.app.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                self.app.scene.resize(physical_size.width, physical_size.height);
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
            }
            WindowEvent::CursorMoved { position, .. } if !consumed => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    self.app.handle(ControlEvent::PointerMoved {
                        x: position.x,
                        y: position.y,
                        width: size.width,
                        height: size.height,
                    });
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } if !consumed => self.handle_key(event_loop, key),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
