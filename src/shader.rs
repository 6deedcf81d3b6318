//! WGSL sources and the uniform blocks that feed them.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::camera::Camera;
use crate::cone::LightCone;
use crate::particles::ParticleField;
use crate::scene::Fog;

pub const CONE_SHADER: &str = include_str!("cone.wgsl");
pub const PARTICLE_SHADER: &str = include_str!("particles.wgsl");

/// Matches `ConeUniforms` in `cone.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ConeUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub color1: [f32; 4],
    pub color2: [f32; 4],
    pub time: f32,
    pub _padding: [f32; 3],
}

impl ConeUniforms {
    pub fn new(camera: &Camera, cone: &LightCone) -> Self {
        let model = cone.model_matrix();
        let normal_matrix = (camera.view_matrix() * model).inverse().transpose();
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            normal_matrix: normal_matrix.to_cols_array_2d(),
            color1: cone.material.color1.extend(1.0).to_array(),
            color2: cone.material.color2.extend(1.0).to_array(),
            time: cone.material.time,
            _padding: [0.0; 3],
        }
    }
}

/// Matches `ParticleUniforms` in `particles.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ParticleUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub fog: [f32; 4],
    /// Billboard side in view-space units.
    pub size: f32,
    pub _padding: [f32; 3],
}

impl ParticleUniforms {
    pub fn new(camera: &Camera, fog: &Fog, field: &ParticleField) -> Self {
        let style = field.style();
        Self {
            view: camera.view_matrix().to_cols_array_2d(),
            proj: camera.projection_matrix().to_cols_array_2d(),
            model: Mat4::from_rotation_y(field.rotation_y()).to_cols_array_2d(),
            color: style.color.extend(style.opacity).to_array(),
            fog: fog.color.extend(fog.density).to_array(),
            // The projection scales view-space extents by 1 / tan(fov / 2);
            // cancel it so the on-screen size depends on depth alone.
            size: style.size * (camera.fov_y.to_radians() * 0.5).tan(),
            _padding: [0.0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_uniform_sizes_match_wgsl_layout() {
        // 3 mat4 + 2 vec4 + f32 padded to 16
        assert_eq!(std::mem::size_of::<ConeUniforms>(), 240);
        assert_eq!(std::mem::size_of::<ParticleUniforms>(), 240);
    }

    #[test]
    fn test_cone_uniforms_carry_material() {
        let mut cone = LightCone::new(Vec3::new(0.1, 0.2, 0.3), Vec3::ONE);
        cone.set_time(4.5);
        let u = ConeUniforms::new(&Camera::default(), &cone);
        assert_eq!(u.time, 4.5);
        assert_eq!(u.color1, [0.1, 0.2, 0.3, 1.0]);
        assert_eq!(u.color2, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_particle_uniforms_carry_style_and_fog() {
        use crate::particles::SpawnVolume;
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let field = ParticleField::new(1, 15.0, SpawnVolume::default(), 0.01, StdRng::seed_from_u64(1));
        let fog = Fog {
            density: 0.07,
            color: Vec3::ZERO,
        };
        let u = ParticleUniforms::new(&Camera::default(), &fog, &field);
        assert_eq!(u.color, [1.0, 1.0, 1.0, 0.6]);
        assert_eq!(u.fog[3], 0.07);
        assert!((u.size - 0.1 * 0.7673).abs() < 1e-4);
    }

    #[test]
    fn test_particle_pixel_size_follows_depth_only() {
        use crate::particles::SpawnVolume;
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let field = ParticleField::new(1, 15.0, SpawnVolume::default(), 0.01, StdRng::seed_from_u64(1));
        let height = 720.0;
        for fov in [45.0, 75.0, 90.0] {
            let camera = Camera {
                fov_y: fov,
                ..Camera::default()
            };
            let u = ParticleUniforms::new(&camera, &Fog::default(), &field);
            let proj = camera.projection_matrix();
            for depth in [5.0, 15.0, 40.0] {
                let top = proj * glam::Vec4::new(0.0, u.size * 0.5, -depth, 1.0);
                let bottom = proj * glam::Vec4::new(0.0, -u.size * 0.5, -depth, 1.0);
                let pixels = (top.y / top.w - bottom.y / bottom.w) * height * 0.5;
                let expected = field.style().size * height * 0.5 / depth;
                assert!((pixels - expected).abs() < 1e-3, "fov {fov} depth {depth}");
            }
        }
    }

    #[test]
    fn test_shader_sources_embedded() {
        assert!(CONE_SHADER.contains("fn vs_main"));
        assert!(CONE_SHADER.contains("fn fs_main"));
        assert!(PARTICLE_SHADER.contains("fn vs_main"));
        assert!(PARTICLE_SHADER.contains("fn fs_main"));
    }
}
