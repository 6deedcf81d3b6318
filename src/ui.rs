//! The on-screen control panel.
//!
//! Shows only the widgets listed in the config and reports changes as
//! [`ControlEvent`]s with raw slider values.

use crate::controls::{ControlEvent, ControlId, Params, SLIDER_MAX};

/// Read-only figures shown under the controls.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelStats {
    pub fps: f32,
    pub time: f64,
    pub particles: usize,
    pub paused: bool,
}

/// Widget state for the control panel.
pub struct ControlPanel {
    controls: Vec<ControlId>,
    auto_rotate: bool,
    fog_raw: i32,
    speed_raw: i32,
}

impl ControlPanel {
    pub fn new(controls: &[ControlId], params: &Params) -> Self {
        Self {
            controls: controls.to_vec(),
            auto_rotate: params.auto_rotate,
            fog_raw: params.fog_slider(),
            speed_raw: params.speed_slider(),
        }
    }

    /// Draw the panel and collect the events for widgets the user changed.
    pub fn show(&mut self, ctx: &egui::Context, stats: PanelStats) -> Vec<ControlEvent> {
        let mut events = Vec::new();
        if self.controls.is_empty() {
            return events;
        }

        egui::Window::new("Controls")
            .default_pos([12.0, 12.0])
            .resizable(false)
            .show(ctx, |ui| {
                for id in &self.controls {
                    match id {
                        ControlId::AutoRotate => {
                            if ui.checkbox(&mut self.auto_rotate, "Auto rotate").changed() {
                                events.push(ControlEvent::AutoRotate(self.auto_rotate));
                            }
                        }
                        ControlId::FogDensity => {
                            let slider = egui::Slider::new(&mut self.fog_raw, 0..=SLIDER_MAX)
                                .text("Fog density");
                            if ui.add(slider).changed() {
                                events.push(ControlEvent::FogDensity(self.fog_raw));
                            }
                        }
                        ControlId::AnimationSpeed => {
                            let slider = egui::Slider::new(&mut self.speed_raw, 0..=SLIDER_MAX)
                                .text("Animation speed");
                            if ui.add(slider).changed() {
                                events.push(ControlEvent::AnimationSpeed(self.speed_raw));
                            }
                        }
                    }
                }

                ui.separator();
                ui.label(format!("{:.0} fps  |  t = {:.2}", stats.fps, stats.time));
                ui.label(format!("{} particles", stats.particles));
                if stats.paused {
                    ui.label("paused (space)");
                }
            });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_starts_from_params() {
        let params = Params {
            auto_rotate: false,
            animation_speed: 0.75,
            fog_density: 0.02,
            ..Params::default()
        };
        let panel = ControlPanel::new(&ControlId::ALL, &params);
        assert!(!panel.auto_rotate);
        assert_eq!(panel.speed_raw, 75);
        assert_eq!(panel.fog_raw, 20);
    }

    #[test]
    fn test_unchanged_panel_emits_nothing() {
        let ctx = egui::Context::default();
        let mut panel = ControlPanel::new(&ControlId::ALL, &Params::default());
        let mut events = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            events = panel.show(ctx, PanelStats::default());
        });
        assert!(events.is_empty());
    }
}
