//! Control binding.
//!
//! The panel reports raw widget values as [`ControlEvent`]s; the
//! [`ControlBinder`] turns them into [`Params`] and scene mutations. Sliders
//! are integers in `0..=100`, fog is stored as `raw / 1000` and speed as
//! `raw / 100`.
//!
//! A binder only accepts events for the controls the panel actually
//! exposes. Anything else leaves the parameter at its default.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ControlError;
use crate::scene::Scene;

/// Largest raw slider value.
pub const SLIDER_MAX: i32 = 100;

/// The user-adjustable parameter set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    pub auto_rotate: bool,
    pub animation_speed: f32,
    pub fog_density: f32,
    /// Last pointer position in normalized device coordinates.
    pub mouse: Vec2,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            auto_rotate: true,
            animation_speed: 0.3,
            fog_density: 0.05,
            mouse: Vec2::ZERO,
        }
    }
}

impl Params {
    /// Raw slider position for the current fog density.
    pub fn fog_slider(&self) -> i32 {
        (self.fog_density * 1000.0).round() as i32
    }

    /// Raw slider position for the current animation speed.
    pub fn speed_slider(&self) -> i32 {
        (self.animation_speed * 100.0).round() as i32
    }
}

/// Identifies one widget on the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlId {
    AutoRotate,
    FogDensity,
    AnimationSpeed,
}

impl ControlId {
    pub const ALL: [ControlId; 3] = [
        ControlId::AutoRotate,
        ControlId::FogDensity,
        ControlId::AnimationSpeed,
    ];
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControlId::AutoRotate => "auto-rotate",
            ControlId::FogDensity => "fog-density",
            ControlId::AnimationSpeed => "animation-speed",
        };
        f.write_str(name)
    }
}

/// An input from the panel or the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    AutoRotate(bool),
    /// Raw fog slider value.
    FogDensity(i32),
    /// Raw speed slider value.
    AnimationSpeed(i32),
    /// Pointer position in physical pixels within a viewport.
    PointerMoved { x: f64, y: f64, width: u32, height: u32 },
}

impl ControlEvent {
    /// The panel widget this event comes from, if any.
    pub fn control(&self) -> Option<ControlId> {
        match self {
            ControlEvent::AutoRotate(_) => Some(ControlId::AutoRotate),
            ControlEvent::FogDensity(_) => Some(ControlId::FogDensity),
            ControlEvent::AnimationSpeed(_) => Some(ControlId::AnimationSpeed),
            ControlEvent::PointerMoved { .. } => None,
        }
    }
}

/// Convert a pixel position to NDC, `y` pointing up.
pub fn pointer_ndc(x: f64, y: f64, width: u32, height: u32) -> Vec2 {
    let w = width.max(1) as f64;
    let h = height.max(1) as f64;
    Vec2::new(
        ((x / w) * 2.0 - 1.0).clamp(-1.0, 1.0) as f32,
        (-((y / h) * 2.0 - 1.0)).clamp(-1.0, 1.0) as f32,
    )
}

/// Routes control events into the parameter set and the scene.
#[derive(Debug, Clone)]
pub struct ControlBinder {
    bound: Vec<ControlId>,
    missing: Vec<ControlError>,
}

impl ControlBinder {
    /// Bind to the controls the panel exposes.
    ///
    /// Expected controls that are absent are logged and recorded; their
    /// parameters stay at the defaults.
    pub fn bind(available: &[ControlId]) -> Self {
        let mut bound = Vec::new();
        let mut missing = Vec::new();

        for id in ControlId::ALL {
            if available.contains(&id) {
                bound.push(id);
            } else {
                let err = ControlError::ElementMissing(id);
                tracing::warn!("{err}; keeping default");
                missing.push(err);
            }
        }

        tracing::debug!(?bound, "controls bound");
        Self { bound, missing }
    }

    pub fn is_bound(&self, id: ControlId) -> bool {
        self.bound.contains(&id)
    }

    /// Controls that were expected but absent.
    pub fn missing(&self) -> &[ControlError] {
        &self.missing
    }

    /// Apply one event. Returns `false` if it was dropped because its control
    /// is not bound.
    pub fn apply(&self, event: ControlEvent, params: &mut Params, scene: &mut Scene) -> bool {
        if let Some(id) = event.control() {
            if !self.is_bound(id) {
                return false;
            }
        }

        match event {
            ControlEvent::AutoRotate(enabled) => {
                params.auto_rotate = enabled;
                tracing::debug!(enabled, "auto-rotate");
            }
            ControlEvent::FogDensity(raw) => {
                params.fog_density = raw.clamp(0, SLIDER_MAX) as f32 / 1000.0;
                scene.fog.density = params.fog_density;
            }
            ControlEvent::AnimationSpeed(raw) => {
                params.animation_speed = raw.clamp(0, SLIDER_MAX) as f32 / 100.0;
            }
            ControlEvent::PointerMoved { x, y, width, height } => {
                params.mouse = pointer_ndc(x, y, width, height);
                if !params.auto_rotate {
                    scene.camera.follow_pointer(params.mouse);
                }
            }
        }
        true
    }
}
