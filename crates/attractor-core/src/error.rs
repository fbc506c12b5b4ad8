//! Error types for scene and configuration setup.
//!
//! Only setup can fail. Once a [`Simulation`](crate::simulation::Simulation)
//! exists, ticking it never returns an error.

use std::fmt;

/// Errors raised while building or reconfiguring a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A particle was given a zero, negative or non-finite mass.
    InvalidMass { id: u32, mass: f32 },
    /// A tunable constant is outside its allowed range.
    InvalidParameter { name: &'static str, value: f32 },
    /// The far clamp is closer than the near clamp.
    InvalidRange { near: f32, far: f32 },
    /// The mesh buffer length is not a multiple of the vertex stride.
    MeshStride { len: usize, stride: usize },
    /// Mesh attraction was requested without a loaded, non-empty mesh.
    MissingMesh,
    /// The scene would contain no particles.
    EmptyField,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMass { id, mass } => {
                write!(f, "particle {} has invalid mass {} (must be positive and finite)", id, mass)
            }
            ConfigError::InvalidParameter { name, value } => {
                write!(f, "invalid value {} for `{}`", value, name)
            }
            ConfigError::InvalidRange { near, far } => write!(
                f,
                "far threshold {} is smaller than the bounds radius {}",
                far, near
            ),
            ConfigError::MeshStride { len, stride } => write!(
                f,
                "mesh buffer has {} floats, expected a multiple of {}",
                len, stride
            ),
            ConfigError::MissingMesh => {
                write!(f, "mesh attraction requested but no mesh vertices are loaded")
            }
            ConfigError::EmptyField => write!(f, "scene contains no particles"),
        }
    }
}

impl std::error::Error for ConfigError {}
