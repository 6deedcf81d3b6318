//! The volumetric light cone.
//!
//! An open-ended cone mesh whose fragment shader fakes light scattering:
//! edges seen at grazing angles are more opaque than faces seen head-on, the
//! color runs along the cone's height, and a sine pulse travels outward from
//! the axis. The GPU version lives in `cone.wgsl`; [`shade_fragment`] is the
//! same math on the CPU.

use std::f32::consts::{PI, TAU};

use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Quat, Vec3, Vec4};

/// Base radius of the cone.
pub const CONE_RADIUS: f32 = 8.0;
/// Height of the cone; local Y spans `[-CONE_HEIGHT / 2, CONE_HEIGHT / 2]`.
pub const CONE_HEIGHT: f32 = 16.0;
/// Segments around the axis.
pub const CONE_SEGMENTS: u32 = 32;

/// A mesh vertex with position and normal.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ConeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Triangle mesh of an open cone side wall.
#[derive(Debug, Clone)]
pub struct ConeGeometry {
    pub vertices: Vec<ConeVertex>,
    pub indices: Vec<u16>,
}

impl ConeGeometry {
    /// Build an open cone with the apex at `+height / 2` and the base ring of
    /// `radius` at `-height / 2`. No caps.
    ///
    /// The seam column is duplicated so each ring has `segments + 1`
    /// vertices.
    pub fn open_cone(radius: f32, height: f32, segments: u32) -> Self {
        let half = height / 2.0;
        let slope = radius / height;
        let ring = segments + 1;

        let mut vertices = Vec::with_capacity(ring as usize * 2);
        for row in 0..=1u32 {
            let v = row as f32;
            let r = v * radius;
            let y = half - v * height;
            for col in 0..ring {
                let theta = col as f32 / segments as f32 * TAU;
                let (sin, cos) = theta.sin_cos();
                let normal = Vec3::new(sin, slope, cos).normalize();
                vertices.push(ConeVertex {
                    position: [r * sin, y, r * cos],
                    normal: normal.to_array(),
                });
            }
        }

        let mut indices = Vec::with_capacity(segments as usize * 6);
        for col in 0..segments {
            let a = col as u16;
            let b = (ring + col) as u16;
            let c = (ring + col + 1) as u16;
            let d = (col + 1) as u16;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }

        Self { vertices, indices }
    }
}

/// Shader inputs that belong to the cone itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeMaterial {
    pub time: f32,
    pub color1: Vec3,
    pub color2: Vec3,
}

/// Position, Euler rotation (XYZ order) and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// The cone entity: geometry, material and transform.
#[derive(Debug, Clone)]
pub struct LightCone {
    pub geometry: ConeGeometry,
    pub material: ConeMaterial,
    pub transform: Transform,
}

impl LightCone {
    /// Standard cone, lifted to `y = 2` and flipped about X.
    pub fn new(color1: Vec3, color2: Vec3) -> Self {
        Self {
            geometry: ConeGeometry::open_cone(CONE_RADIUS, CONE_HEIGHT, CONE_SEGMENTS),
            material: ConeMaterial {
                time: 0.0,
                color1,
                color2,
            },
            transform: Transform {
                position: Vec3::new(0.0, 2.0, 0.0),
                rotation: Vec3::new(PI, 0.0, 0.0),
                scale: Vec3::ONE,
            },
        }
    }

    /// Push the animation time into the shader uniform.
    pub fn set_time(&mut self, time: f32) {
        self.material.time = time;
    }

    /// Spin about the vertical axis and morph the horizontal scale.
    pub fn animate(&mut self, time: f32, speed: f32) {
        self.transform.rotation.y += 0.005 * speed;
        let (x, z) = morph_scale(time);
        self.transform.scale.x = x;
        self.transform.scale.z = z;
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.transform.matrix()
    }
}

/// Horizontal scale factors `(x, z)` at a given time. Both stay in `[0.9, 1.1]`.
pub fn morph_scale(time: f32) -> (f32, f32) {
    let phase = time * 0.5;
    (1.0 + phase.sin() * 0.1, 1.0 + phase.cos() * 0.1)
}

/// CPU evaluation of the cone fragment shader.
///
/// `local` is the fragment position in cone space, `view_normal` the surface
/// normal in view space. Returns straight (non-premultiplied) RGBA.
pub fn shade_fragment(local: Vec3, view_normal: Vec3, material: &ConeMaterial) -> Vec4 {
    let dist = Vec3::new(local.x, 0.0, local.z).length();
    let gradient = ((local.y + CONE_HEIGHT / 2.0) / CONE_HEIGHT).clamp(0.0, 1.0);
    let color = material.color1.lerp(material.color2, gradient);
    let pulse = (material.time * 2.0 + dist).sin() * 0.5 + 0.5;

    let facing = view_normal.normalize_or_zero().dot(Vec3::Z).abs();
    let fresnel = (1.0 - facing).powi(2);
    let alpha = (fresnel * 0.3 + 0.1) * (pulse * 0.5 + 0.5);

    color.extend(alpha)
}
