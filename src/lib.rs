//! # Light Cone
//!
//! Real-time generative light art: a translucent volumetric cone inside a
//! slowly drifting particle haze, viewed from an orbiting camera.
//!
//! ## Quick Start
//!
//! ```ignore
//! use lightcone::prelude::*;
//!
//! fn main() -> Result<(), AppError> {
//!     let config = Config::default()
//!         .with_particle_count(5_000)
//!         .with_animation_speed(0.5);
//!     lightcone::run(config)
//! }
//! ```
//!
//! ## Frame loop
//!
//! Each frame [`App::tick`]:
//!
//! 1. advances the animation clock by `0.01 * speed`
//! 2. pushes the time into the cone shader and spins/morphs the cone
//! 3. drifts every particle, recycling any that leave the `±15` cube
//! 4. orbits the camera when auto-rotate is on
//!
//! and the window then renders the scene and the control panel.
//!
//! ## Headless use
//!
//! Everything except the window and GPU is plain data, so the animation can
//! be stepped without a display:
//!
//! ```
//! use lightcone::{App, Config};
//!
//! let mut app = App::new(&Config::default().with_seed(1)).unwrap();
//! app.params.animation_speed = 1.0;
//! let report = app.run_ticks(100);
//! assert!((report.time - 1.0).abs() < 1e-4);
//! ```

pub mod app;
pub mod camera;
pub mod cone;
pub mod config;
pub mod controls;
pub mod error;
mod gpu;
pub mod particles;
pub mod scene;
pub mod shader;
pub mod time;
mod ui;
mod window;

pub use app::{App, LoopState, TickReport};
pub use camera::Camera;
pub use cone::{shade_fragment, ConeGeometry, ConeMaterial, LightCone, Transform};
pub use config::Config;
pub use controls::{ControlBinder, ControlEvent, ControlId, Params};
pub use error::{AppError, ConfigError, ControlError, GpuError};
pub use glam::{Vec2, Vec3, Vec4};
pub use particles::{ParticleField, ParticleStyle, SpawnVolume};
pub use scene::{Fog, Lighting, Scene, SceneObject};
pub use time::SimTime;
pub use window::run;

/// Commonly used types.
pub mod prelude {
    pub use crate::{
        App, AppError, Camera, Config, ControlEvent, ControlId, LightCone, Params,
        ParticleField, Scene, Vec2, Vec3,
    };
}
