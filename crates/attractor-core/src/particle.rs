use crate::error::ConfigError;
use glam::{Vec3, Vec4};

/// A point mass advanced by position Verlet.
///
/// Velocity is implicit in `curr_pos - prev_pos` and is never stored.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub curr_pos: Vec3,
    /// Position at the end of the previous step (or the spawn position).
    pub prev_pos: Vec3,
    /// Latest applied force divided by mass. Overwritten, never accumulated.
    pub acceleration: Vec3,
    mass: f32,
    pub color: Vec4,
    id: u32,
}

impl Particle {
    /// Create a particle at rest at `position`.
    pub fn new(position: Vec3, mass: f32, color: Vec4, id: u32) -> Result<Self, ConfigError> {
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(ConfigError::InvalidMass { id, mass });
        }
        Ok(Self {
            curr_pos: position,
            prev_pos: position,
            acceleration: Vec3::ZERO,
            mass,
            color,
            id,
        })
    }

    /// Give the particle an initial displacement per step of `velocity`.
    pub fn with_initial_velocity(mut self, velocity: Vec3) -> Self {
        self.prev_pos = self.curr_pos - velocity;
        self
    }

    pub fn with_acceleration(mut self, acceleration: Vec3) -> Self {
        self.acceleration = acceleration;
        self
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Displacement over the last completed step.
    #[inline]
    pub fn displacement(&self) -> Vec3 {
        self.curr_pos - self.prev_pos
    }

    /// Set acceleration to `force / mass`.
    #[inline]
    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration = force / self.mass;
    }

    /// Verlet update: `p' = p + (p - p*) + a * dt²`.
    ///
    /// A jump in `dt` produces a matching jump in position. Non-finite `dt`
    /// turns the position non-finite without panicking.
    #[inline]
    pub fn step(&mut self, dt: f32) {
        let next = self.curr_pos + (self.curr_pos - self.prev_pos) + self.acceleration * (dt * dt);
        self.prev_pos = self.curr_pos;
        self.curr_pos = next;
    }
}

/// Ordered particle collection plus the flat arrays handed to a renderer.
///
/// `positions` holds 3 floats per particle and `colors` holds 4, both in
/// particle order.
pub struct ParticleField {
    particles: Vec<Particle>,
    positions: Vec<f32>,
    colors: Vec<f32>,
}

impl ParticleField {
    pub fn from_particles(particles: Vec<Particle>) -> Result<Self, ConfigError> {
        if particles.is_empty() {
            return Err(ConfigError::EmptyField);
        }
        let count = particles.len();
        let mut field = Self {
            particles,
            positions: vec![0.0; count * 3],
            colors: vec![0.0; count * 4],
        };
        field.write_outputs();
        Ok(field)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    /// Flat `[x, y, z, x, y, z, ...]` positions.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Flat `[r, g, b, a, ...]` colors.
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Rewrite both output arrays from the particle state.
    pub fn write_outputs(&mut self) {
        let (particles, positions, colors) = self.split_mut();
        for ((p, pos), col) in particles
            .iter()
            .zip(positions.chunks_exact_mut(3))
            .zip(colors.chunks_exact_mut(4))
        {
            write_particle(p, pos, col);
        }
    }

    pub(crate) fn split_mut(&mut self) -> (&mut [Particle], &mut [f32], &mut [f32]) {
        (&mut self.particles, &mut self.positions, &mut self.colors)
    }
}

#[inline]
pub(crate) fn write_particle(p: &Particle, pos: &mut [f32], col: &mut [f32]) {
    pos.copy_from_slice(&p.curr_pos.to_array());
    col.copy_from_slice(&p.color.to_array());
}
