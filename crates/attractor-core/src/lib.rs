//! Verlet particle field driven by a clamped inverse-square attractor.
//!
//! The crate has no rendering dependency: a host feeds it `dt` and a
//! pointer-derived world target each frame and uploads the flat position
//! and color arrays it produces.

pub mod camera;
pub mod color;
pub mod config;
pub mod error;
pub mod forces;
pub mod math;
pub mod mesh;
pub mod particle;
pub mod scene;
pub mod simulation;

pub use config::SimulationConfig;
pub use error::ConfigError;
pub use forces::attractor::{ForceMode, TargetSource};
pub use simulation::{Simulation, TickInput};
