use crate::color::{color_at, to_rgba};
use crate::error::ConfigError;
use crate::particle::{Particle, ParticleField};
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Initial layout: a `grid × grid` sheet of particles on the z = 0 plane.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDesc {
    /// Particles per axis.
    pub grid: u32,
    pub spacing: f32,
    pub origin: Vec3,
    /// Half-width of the uniform x/y jitter applied to each grid point.
    pub jitter: f32,
    pub mass: f32,
}

impl Default for SceneDesc {
    fn default() -> Self {
        Self {
            grid: 20,
            spacing: 1.0,
            origin: Vec3::ZERO,
            jitter: 0.0,
            mass: 1.0,
        }
    }
}

impl SceneDesc {
    pub fn grid(n: u32) -> Self {
        Self {
            grid: n,
            ..Default::default()
        }
    }

    /// `grid²`, or `None` when it does not fit the `u32` particle ids.
    pub fn particle_count(&self) -> Option<u32> {
        self.grid.checked_mul(self.grid)
    }

    /// Populate the field. Particles start at rest, ids follow row-major order
    /// with the first grid axis outermost.
    pub fn build(&self, seed: u64) -> Result<ParticleField, ConfigError> {
        if self.grid == 0 {
            return Err(ConfigError::EmptyField);
        }
        let count = self.particle_count().ok_or(ConfigError::InvalidParameter {
            name: "grid",
            value: self.grid as f32,
        })?;
        if !self.spacing.is_finite() {
            return Err(ConfigError::InvalidParameter { name: "spacing", value: self.spacing });
        }
        if !(self.jitter >= 0.0 && self.jitter.is_finite()) {
            return Err(ConfigError::InvalidParameter { name: "jitter", value: self.jitter });
        }

        let mut rng = SmallRng::seed_from_u64(seed);
        let mut particles = Vec::with_capacity(count as usize);
        let mut id = 0u32;
        for i in 0..self.grid {
            for j in 0..self.grid {
                let mut pos = self.origin + Vec3::new(i as f32, j as f32, 0.0) * self.spacing;
                if self.jitter > 0.0 {
                    pos.x += rng.gen_range(-self.jitter..self.jitter);
                    pos.y += rng.gen_range(-self.jitter..self.jitter);
                }
                let color = to_rgba(color_at(pos.length()), 1.0);
                particles.push(Particle::new(pos, self.mass, color, id)?);
                id += 1;
            }
        }
        ParticleField::from_particles(particles)
    }
}
