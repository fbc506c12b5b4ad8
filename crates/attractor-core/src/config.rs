use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunable constants of the force law and the tick loop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Force-law constant while attracting. A tuning knob, not the physical G.
    pub g: f32,
    /// Force-law constant while repelling.
    pub g_repel: f32,
    pub bounds_radius: f32,
    pub far_threshold: f32,
    pub mass_scale_attract: f32,
    pub mass_scale_repel: f32,
    pub mass_scale_mesh: f32,
    pub degenerate_epsilon: f32,
    pub jitter_extent: f32,
    /// Forces are divided by this before being applied.
    pub force_damping: f32,
    /// Recolor every N ticks. 0 never recolors.
    pub recolor_period: u32,
    pub color_alpha: f32,
    /// Radius, as a fraction of `bounds_radius`, of the random offset added
    /// to the pointer target for each particle.
    pub pointer_spread: f32,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            g: 1.0,
            g_repel: 0.05,
            bounds_radius: 15.0,
            far_threshold: 20.0,
            mass_scale_attract: 10.0,
            mass_scale_repel: 3.0,
            mass_scale_mesh: 20.0,
            degenerate_epsilon: 1.0e-4,
            jitter_extent: 0.01,
            force_damping: 1000.0,
            recolor_period: 0,
            color_alpha: 1.0,
            pointer_spread: 0.0,
            seed: 0,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("bounds_radius", self.bounds_radius)?;
        positive("far_threshold", self.far_threshold)?;
        if self.far_threshold < self.bounds_radius {
            return Err(ConfigError::InvalidRange {
                near: self.bounds_radius,
                far: self.far_threshold,
            });
        }
        positive("force_damping", self.force_damping)?;
        positive("degenerate_epsilon", self.degenerate_epsilon)?;
        positive("jitter_extent", self.jitter_extent)?;
        non_negative("g", self.g)?;
        non_negative("g_repel", self.g_repel)?;
        non_negative("mass_scale_attract", self.mass_scale_attract)?;
        non_negative("mass_scale_repel", self.mass_scale_repel)?;
        non_negative("mass_scale_mesh", self.mass_scale_mesh)?;
        non_negative("pointer_spread", self.pointer_spread)?;
        non_negative("color_alpha", self.color_alpha)?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}
