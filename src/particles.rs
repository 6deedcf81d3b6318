//! The particle haze.
//!
//! A fixed number of points drift with constant per-frame velocities inside a
//! cube. A point that leaves the cube is put back somewhere in the spawn
//! volume (a horizontal disk extruded over a height range) and keeps its
//! velocity, so the cloud never thins out.
//!
//! Positions live in one flat `Vec<f32>` (xyz per particle) which is uploaded
//! to the GPU as-is; velocities sit in a parallel `Vec<Vec3>`.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;

/// Where new and recycled particles are placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnVolume {
    /// Disk radius in the XZ plane.
    pub radius: f32,
    pub min_height: f32,
    pub max_height: f32,
}

impl SpawnVolume {
    /// Uniform angle, uniform radius (not area-uniform), uniform height.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let angle = rng.gen_range(0.0..TAU);
        let radius = rng.gen_range(0.0..=self.radius);
        let height = rng.gen_range(self.min_height..=self.max_height);
        Vec3::new(angle.cos() * radius, height, angle.sin() * radius)
    }
}

impl Default for SpawnVolume {
    fn default() -> Self {
        Self {
            radius: 12.0,
            min_height: -5.0,
            max_height: 15.0,
        }
    }
}

/// Point-sprite appearance of the haze.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleStyle {
    pub color: Vec3,
    /// Attenuated point size: a sprite at view depth `d` covers
    /// `size * (height / 2) / d` pixels.
    pub size: f32,
    pub opacity: f32,
}

impl Default for ParticleStyle {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            size: 0.1,
            opacity: 0.6,
        }
    }
}

/// A cloud of independently drifting points.
pub struct ParticleField {
    positions: Vec<f32>,
    velocities: Vec<Vec3>,
    bounds: f32,
    spawn: SpawnVolume,
    style: ParticleStyle,
    /// Rotation of the whole cloud about Y, in radians.
    rotation_y: f32,
    dirty: bool,
    rng: StdRng,
}

impl ParticleField {
    /// Create `count` particles inside `spawn`, kept within `[-bounds, bounds]³`.
    pub fn new(count: usize, bounds: f32, spawn: SpawnVolume, max_velocity: f32, rng: StdRng) -> Self {
        let mut field = Self {
            positions: Vec::with_capacity(count * 3),
            velocities: Vec::with_capacity(count),
            bounds,
            spawn,
            style: ParticleStyle::default(),
            rotation_y: 0.0,
            dirty: true,
            rng,
        };

        for _ in 0..count {
            let p = field.spawn.sample(&mut field.rng);
            field.positions.extend_from_slice(&[p.x, p.y, p.z]);

            let v = if max_velocity > 0.0 {
                Vec3::new(
                    field.rng.gen_range(-max_velocity..=max_velocity),
                    field.rng.gen_range(-max_velocity..=max_velocity),
                    field.rng.gen_range(-max_velocity..=max_velocity),
                )
            } else {
                Vec3::ZERO
            };
            field.velocities.push(v);
        }

        field
    }

    /// Build the field described by `config`.
    pub fn from_config(config: &Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let spawn = SpawnVolume {
            radius: config.spawn_radius,
            min_height: config.spawn_height[0],
            max_height: config.spawn_height[1],
        };
        Self::new(
            config.particle_count as usize,
            config.bounds,
            spawn,
            config.max_velocity,
            rng,
        )
    }

    /// Advance every particle by one frame and recycle those out of bounds.
    ///
    /// Returns how many particles were recycled.
    pub fn update(&mut self) -> usize {
        let bounds = self.bounds;
        let mut recycled = 0;

        for (pos, vel) in self.positions.chunks_exact_mut(3).zip(&self.velocities) {
            pos[0] += vel.x;
            pos[1] += vel.y;
            pos[2] += vel.z;

            if pos.iter().any(|c| c.abs() > bounds) {
                let p = self.spawn.sample(&mut self.rng);
                pos.copy_from_slice(&[p.x, p.y, p.z]);
                recycled += 1;
            }
        }

        self.dirty = true;
        recycled
    }

    /// Spin the whole cloud about the vertical axis.
    pub fn rotate(&mut self, radians: f32) {
        self.rotation_y += radians;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.velocities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.velocities.is_empty()
    }

    /// Flat xyz position buffer.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn position(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[index * 3..index * 3 + 3])
    }

    pub fn velocity(&self, index: usize) -> Vec3 {
        self.velocities[index]
    }

    /// Overwrite a particle's position, e.g. to force it out of bounds.
    pub fn set_position(&mut self, index: usize, position: Vec3) {
        self.positions[index * 3..index * 3 + 3].copy_from_slice(&position.to_array());
        self.dirty = true;
    }

    #[inline]
    pub fn bounds(&self) -> f32 {
        self.bounds
    }

    #[inline]
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    #[inline]
    pub fn style(&self) -> &ParticleStyle {
        &self.style
    }

    /// Whether positions changed since the last upload.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Take the dirty flag, returning the position buffer if it needs uploading.
    pub fn take_dirty(&mut self) -> Option<&[f32]> {
        if std::mem::take(&mut self.dirty) {
            Some(&self.positions)
        } else {
            None
        }
    }
}
