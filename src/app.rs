//! The animation driver.
//!
//! [`App`] bundles everything the frame loop touches: scene, parameters,
//! time and the control binder. [`App::tick`] runs one frame of CPU work; the
//! window loop follows it with a render.

use crate::config::Config;
use crate::cone::LightCone;
use crate::controls::{ControlBinder, ControlEvent, Params};
use crate::error::ConfigError;
use crate::particles::ParticleField;
use crate::scene::Scene;
use crate::time::SimTime;

/// Particle cloud spin per frame at speed 1.0, in radians.
pub const FIELD_SPIN: f32 = 0.001;

/// Loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Paused,
    Stopped,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    /// Animation clock after the tick.
    pub time: f64,
    /// Particles recycled this frame.
    pub recycled: usize,
}

/// Application state shared by the tick and the input handlers.
pub struct App {
    pub scene: Scene,
    pub params: Params,
    pub time: SimTime,
    binder: ControlBinder,
    state: LoopState,
}

impl App {
    /// Build the scene described by `config`: camera, fog, cone and particles.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let (color1, color2) = config.cone_colors()?;

        let mut scene = Scene::new(config.window_width, config.window_height, config.fog_density);
        scene.add(LightCone::new(color1, color2));
        scene.add(ParticleField::from_config(config));

        let params = Params {
            auto_rotate: config.auto_rotate,
            animation_speed: config.animation_speed,
            fog_density: config.fog_density,
            ..Params::default()
        };

        tracing::info!(
            particles = config.particle_count,
            speed = params.animation_speed,
            auto_rotate = params.auto_rotate,
            "scene built"
        );

        Ok(Self::with_scene(scene, params, ControlBinder::bind(&config.controls)))
    }

    /// Wrap an already assembled scene.
    pub fn with_scene(scene: Scene, params: Params, binder: ControlBinder) -> Self {
        Self {
            scene,
            params,
            time: SimTime::new(),
            binder,
            state: LoopState::Running,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn binder(&self) -> &ControlBinder {
        &self.binder
    }

    /// Feed a control event through the binder.
    pub fn handle(&mut self, event: ControlEvent) -> bool {
        self.binder.apply(event, &mut self.params, &mut self.scene)
    }

    /// Toggle between running and paused. Has no effect once stopped.
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            LoopState::Running => LoopState::Paused,
            LoopState::Paused => LoopState::Running,
            LoopState::Stopped => LoopState::Stopped,
        };
        tracing::debug!(state = ?self.state, "loop state changed");
    }

    /// Stop the loop for good.
    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
        tracing::info!(frames = self.time.frame(), time = self.time.elapsed(), "loop stopped");
    }

    /// Run one frame of animation. Does nothing unless running.
    ///
    /// Objects missing from the scene are skipped.
    pub fn tick(&mut self) -> TickReport {
        if self.state != LoopState::Running {
            return TickReport {
                time: self.time.elapsed(),
                recycled: 0,
            };
        }

        let speed = self.params.animation_speed;
        let time = self.time.advance(speed);
        let phase = self.time.phase();

        if let Some(cone) = self.scene.cone_mut() {
            cone.set_time(phase);
            cone.animate(phase, speed);
        }

        let mut recycled = 0;
        if let Some(field) = self.scene.particles_mut() {
            recycled = field.update();
            field.rotate(FIELD_SPIN * speed);
        }

        if self.params.auto_rotate {
            self.scene.camera.orbit(phase);
        }

        TickReport { time, recycled }
    }

    /// Run `frames` ticks, e.g. without a window.
    pub fn run_ticks(&mut self, frames: u64) -> TickReport {
        let mut report = TickReport {
            time: self.time.elapsed(),
            recycled: 0,
        };
        for _ in 0..frames {
            let tick = self.tick();
            report.time = tick.time;
            report.recycled += tick.recycled;
        }
        report
    }
}
