use crate::color::{color_at, to_rgba};
use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::forces::attractor::{force_on, ForceMode, ForceParams, TargetSource};
use crate::math::particle_rng;
use crate::mesh::MeshTargets;
use crate::particle::{write_particle, Particle, ParticleField};
use crate::scene::SceneDesc;
use glam::Vec3;
use log::{debug, info, warn};
use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Per-tick input supplied by the host loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickInput {
    /// Elapsed time since the previous tick.
    pub dt: f32,
    /// Pointer-derived world target. Zero until the user has interacted.
    pub pointer_target: Vec3,
}

impl TickInput {
    pub fn new(dt: f32, pointer_target: Vec3) -> Self {
        Self { dt, pointer_target }
    }
}

pub struct Simulation {
    field: ParticleField,
    initial: Vec<Particle>,
    config: SimulationConfig,
    params: ForceParams,
    mode: ForceMode,
    source: TargetSource,
    mesh: Option<MeshTargets>,
    tick: u64,
}

impl Simulation {
    /// Populate `scene` and validate `config`.
    pub fn new(scene: &SceneDesc, config: SimulationConfig) -> Result<Self, ConfigError> {
        let field = scene.build(config.seed)?;
        Self::from_field(field, config)
    }

    pub fn from_field(field: ParticleField, config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            "simulation created: {} particles, bounds {}..{}",
            field.len(),
            config.bounds_radius,
            config.far_threshold
        );
        Ok(Self {
            initial: field.particles().to_vec(),
            field,
            params: ForceParams::from(&config),
            config,
            mode: ForceMode::default(),
            source: TargetSource::default(),
            mesh: None,
            tick: 0,
        })
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn positions(&self) -> &[f32] {
        self.field.positions()
    }

    pub fn colors(&self) -> &[f32] {
        self.field.colors()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of completed ticks since construction or the last reinitialize.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn mode(&self) -> ForceMode {
        self.mode
    }

    pub fn target_source(&self) -> TargetSource {
        self.source
    }

    pub fn mesh(&self) -> Option<&MeshTargets> {
        self.mesh.as_ref()
    }

    pub fn set_config(&mut self, config: SimulationConfig) -> Result<(), ConfigError> {
        config.validate()?;
        debug!("config replaced: {:?}", config);
        self.params = ForceParams::from(&config);
        self.config = config;
        Ok(())
    }

    pub fn set_mode(&mut self, mode: ForceMode) {
        if mode != self.mode {
            debug!("force mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// Switch target source. Mesh mode needs a loaded mesh.
    pub fn set_target_source(&mut self, source: TargetSource) -> Result<(), ConfigError> {
        if source == TargetSource::Mesh && self.mesh.is_none() {
            return Err(ConfigError::MissingMesh);
        }
        if source != self.source {
            debug!("target source {:?} -> {:?}", self.source, source);
        }
        self.source = source;
        Ok(())
    }

    /// Load mesh vertices from a flat `[x, y, z, w, ...]` buffer.
    pub fn load_mesh(&mut self, buffer: &[f32]) -> Result<(), ConfigError> {
        let mesh = MeshTargets::from_flat(buffer)?;
        self.set_mesh(mesh);
        Ok(())
    }

    pub fn set_mesh(&mut self, mesh: MeshTargets) {
        debug!("mesh loaded: {} vertices", mesh.vertex_count());
        self.mesh = Some(mesh);
    }

    /// Drop the mesh. Mesh attraction falls back to the pointer target.
    pub fn clear_mesh(&mut self) {
        self.mesh = None;
        if self.source == TargetSource::Mesh {
            debug!("mesh cleared, target source -> Pointer");
            self.source = TargetSource::Pointer;
        }
    }

    /// Restore the particles to their state at construction.
    pub fn reinitialize(&mut self) {
        let (particles, _, _) = self.field.split_mut();
        particles.clone_from_slice(&self.initial);
        self.field.write_outputs();
        self.tick = 0;
    }

    /// Advance every particle by one step and rewrite both output arrays.
    pub fn tick(&mut self, input: &TickInput) {
        if !input.dt.is_finite() {
            warn!("non-finite dt {} at tick {}", input.dt, self.tick);
        }

        let period = u64::from(self.config.recolor_period);
        let ctx = TickContext {
            params: &self.params,
            mode: self.mode,
            source: self.source,
            mesh: match self.source {
                TargetSource::Mesh => self.mesh.as_ref(),
                TargetSource::Pointer => None,
            },
            pointer: input.pointer_target,
            spread: self.config.pointer_spread * self.config.bounds_radius,
            dt: input.dt,
            damping: self.config.force_damping,
            recolor: period > 0 && (self.tick + 1) % period == 0,
            alpha: self.config.color_alpha,
            seed: self.config.seed,
            tick: self.tick,
            count: self.field.len(),
        };

        let (particles, positions, colors) = self.field.split_mut();

        #[cfg(feature = "parallel")]
        particles
            .par_iter_mut()
            .zip(positions.par_chunks_exact_mut(3))
            .zip(colors.par_chunks_exact_mut(4))
            .enumerate()
            .for_each(|(i, ((p, pos), col))| ctx.advance(i, p, pos, col));

        #[cfg(not(feature = "parallel"))]
        particles
            .iter_mut()
            .zip(positions.chunks_exact_mut(3))
            .zip(colors.chunks_exact_mut(4))
            .enumerate()
            .for_each(|(i, ((p, pos), col))| ctx.advance(i, p, pos, col));

        self.tick += 1;
    }
}

/// Everything one particle update reads, snapshotted at the start of a tick.
struct TickContext<'a> {
    params: &'a ForceParams,
    mode: ForceMode,
    source: TargetSource,
    mesh: Option<&'a MeshTargets>,
    pointer: Vec3,
    spread: f32,
    dt: f32,
    damping: f32,
    recolor: bool,
    alpha: f32,
    seed: u64,
    tick: u64,
    count: usize,
}

impl TickContext<'_> {
    fn advance(&self, index: usize, p: &mut Particle, pos: &mut [f32], col: &mut [f32]) {
        let mut rng = particle_rng(self.seed, self.tick, index);
        let target = self.target_for(index, &mut rng);

        let force = force_on(p, target, self.mode, self.source, self.params, &mut rng);
        p.apply_force(force / self.damping);
        p.step(self.dt);

        if self.recolor {
            p.color = to_rgba(color_at(p.curr_pos.distance(target)), self.alpha);
        }
        write_particle(p, pos, col);
    }

    fn target_for<R: Rng>(&self, index: usize, rng: &mut R) -> Vec3 {
        if let Some(mesh) = self.mesh {
            return mesh.target_for(index, self.count);
        }
        if self.spread > 0.0 {
            let dir = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            )
            .normalize_or_zero();
            self.pointer + dir * self.spread
        } else {
            self.pointer
        }
    }
}
