//! Scene state: camera, fog, lights and the attached objects.

use glam::Vec3;

use crate::camera::Camera;
use crate::cone::LightCone;
use crate::particles::ParticleField;

/// Exponential-squared fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub density: f32,
    pub color: Vec3,
}

impl Default for Fog {
    fn default() -> Self {
        Self {
            density: 0.05,
            color: Vec3::ZERO,
        }
    }
}

/// Ambient and point light. Both materials in the scene are unlit, so these
/// are scene state only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient_color: Vec3,
    pub ambient_intensity: f32,
    pub point_color: Vec3,
    pub point_intensity: f32,
    pub point_position: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient_color: Vec3::splat(0x40 as f32 / 255.0),
            ambient_intensity: 1.0,
            point_color: Vec3::ONE,
            point_intensity: 1.0,
            point_position: Vec3::new(10.0, 10.0, 10.0),
        }
    }
}

/// Something that can be attached to the scene.
pub enum SceneObject {
    Cone(LightCone),
    Particles(ParticleField),
}

impl From<LightCone> for SceneObject {
    fn from(cone: LightCone) -> Self {
        SceneObject::Cone(cone)
    }
}

impl From<ParticleField> for SceneObject {
    fn from(field: ParticleField) -> Self {
        SceneObject::Particles(field)
    }
}

/// The scene graph: one camera, fog, lights, and at most one cone and one
/// particle field.
pub struct Scene {
    pub camera: Camera,
    pub fog: Fog,
    pub lighting: Lighting,
    pub background: Vec3,
    cone: Option<LightCone>,
    particles: Option<ParticleField>,
}

impl Scene {
    /// An empty scene viewed from `(0, 5, 15)`.
    pub fn new(width: u32, height: u32, fog_density: f32) -> Self {
        Self {
            camera: Camera::new(aspect_ratio(width, height)),
            fog: Fog {
                density: fog_density,
                ..Fog::default()
            },
            lighting: Lighting::default(),
            background: Vec3::ZERO,
            cone: None,
            particles: None,
        }
    }

    /// Attach an object, replacing any existing object of the same kind.
    pub fn add(&mut self, object: impl Into<SceneObject>) {
        match object.into() {
            SceneObject::Cone(cone) => self.cone = Some(cone),
            SceneObject::Particles(field) => self.particles = Some(field),
        }
    }

    pub fn cone(&self) -> Option<&LightCone> {
        self.cone.as_ref()
    }

    pub fn cone_mut(&mut self) -> Option<&mut LightCone> {
        self.cone.as_mut()
    }

    pub fn particles(&self) -> Option<&ParticleField> {
        self.particles.as_ref()
    }

    pub fn particles_mut(&mut self) -> Option<&mut ParticleField> {
        self.particles.as_mut()
    }

    /// Track a new viewport size. Zero-sized viewports are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = aspect_ratio(width, height);
        }
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::SpawnVolume;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_scene() {
        let scene = Scene::new(1600, 800, 0.05);
        assert_eq!(scene.camera.aspect, 2.0);
        assert_eq!(scene.camera.position, Vec3::new(0.0, 5.0, 15.0));
        assert_eq!(scene.fog.density, 0.05);
        assert!(scene.cone().is_none());
        assert!(scene.particles().is_none());
    }

    #[test]
    fn test_add_objects() {
        let mut scene = Scene::new(800, 600, 0.05);
        scene.add(LightCone::new(Vec3::ZERO, Vec3::ONE));
        scene.add(ParticleField::new(
            4,
            15.0,
            SpawnVolume::default(),
            0.01,
            StdRng::seed_from_u64(1),
        ));
        assert!(scene.cone().is_some());
        assert_eq!(scene.particles().map(|p| p.len()), Some(4));

        scene.add(ParticleField::new(
            8,
            15.0,
            SpawnVolume::default(),
            0.01,
            StdRng::seed_from_u64(1),
        ));
        assert_eq!(scene.particles().map(|p| p.len()), Some(8));
    }

    #[test]
    fn test_resize_ignores_zero() {
        let mut scene = Scene::new(100, 100, 0.05);
        scene.resize(0, 50);
        assert_eq!(scene.camera.aspect, 1.0);
        scene.resize(300, 100);
        assert_eq!(scene.camera.aspect, 3.0);
    }
}
