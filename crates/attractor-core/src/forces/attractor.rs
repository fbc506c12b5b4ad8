use crate::config::SimulationConfig;
use crate::particle::Particle;
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which way the field pushes particles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceMode {
    #[default]
    Attract,
    Repel,
    /// No force on any particle.
    Idle,
}

/// Where each particle's target comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSource {
    /// One shared point derived from pointer input.
    #[default]
    Pointer,
    /// Per-particle targets read from the loaded mesh's vertices.
    Mesh,
}

/// Constants of the clamped inverse-square law.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceParams {
    /// Force constant while attracting.
    pub g: f32,
    /// Force constant while repelling.
    pub g_repel: f32,
    /// Near clamp, and the radius the edge policy tests against.
    pub bounds: f32,
    /// Far clamp.
    pub far_threshold: f32,
    pub mass_scale_attract: f32,
    pub mass_scale_repel: f32,
    pub mass_scale_mesh: f32,
    /// Offsets shorter than this are replaced by a random jitter vector.
    pub degenerate_epsilon: f32,
    /// Jitter components are drawn from `[0, jitter_extent)`.
    pub jitter_extent: f32,
}

impl ForceParams {
    /// Force-law constant for `mode`.
    pub fn force_constant(&self, mode: ForceMode) -> f32 {
        match mode {
            ForceMode::Repel => self.g_repel,
            ForceMode::Attract | ForceMode::Idle => self.g,
        }
    }

    /// Attractor mass as a multiple of the particle's mass.
    pub fn mass_scale(&self, mode: ForceMode, source: TargetSource) -> f32 {
        match (mode, source) {
            (ForceMode::Attract, TargetSource::Mesh) => self.mass_scale_mesh,
            (ForceMode::Attract, TargetSource::Pointer) => self.mass_scale_attract,
            (ForceMode::Repel, _) | (ForceMode::Idle, _) => self.mass_scale_repel,
        }
    }
}

impl Default for ForceParams {
    fn default() -> Self {
        ForceParams::from(&SimulationConfig::default())
    }
}

impl From<&SimulationConfig> for ForceParams {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            g: config.g,
            g_repel: config.g_repel,
            bounds: config.bounds_radius,
            far_threshold: config.far_threshold,
            mass_scale_attract: config.mass_scale_attract,
            mass_scale_repel: config.mass_scale_repel,
            mass_scale_mesh: config.mass_scale_mesh,
            degenerate_epsilon: config.degenerate_epsilon,
            jitter_extent: config.jitter_extent,
        }
    }
}

/// Force on `particle` from an attractor (or repeller) at `target`.
///
/// Magnitude is `G * m1 * m2 / d²`, `G` picked per mode, with `d` clamped to
/// `[bounds, far_threshold]`. The edge policy uses the unclamped distance:
/// attraction is zero once the particle is inside `bounds`, repulsion is zero
/// once it is outside. Neither case reverses the force.
///
/// `rng` is only drawn from when the particle sits on the target.
pub fn force_on<R: Rng + ?Sized>(
    particle: &Particle,
    target: Vec3,
    mode: ForceMode,
    source: TargetSource,
    params: &ForceParams,
    rng: &mut R,
) -> Vec3 {
    if mode == ForceMode::Idle {
        return Vec3::ZERO;
    }

    let mut offset = target - particle.curr_pos;
    let mut distance = offset.length();
    if distance < params.degenerate_epsilon {
        let extent = params.jitter_extent;
        offset = Vec3::new(
            rng.gen::<f32>() * extent,
            rng.gen::<f32>() * extent,
            rng.gen::<f32>() * extent,
        );
        distance = offset.length();
    }

    let clamped = distance.max(params.bounds).min(params.far_threshold);
    // All-zero jitter draws leave no direction; the force is then zero.
    let direction = offset.normalize_or_zero();

    let mass1 = particle.mass();
    let mass2 = params.mass_scale(mode, source) * mass1;
    let magnitude = params.force_constant(mode) * mass1 * mass2 / (clamped * clamped);

    match mode {
        ForceMode::Attract if distance >= params.bounds => direction * magnitude,
        ForceMode::Repel if distance <= params.bounds => -direction * magnitude,
        _ => Vec3::ZERO,
    }
}
