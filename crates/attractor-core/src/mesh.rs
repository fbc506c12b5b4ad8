//! Read-only view of a loaded mesh's vertex positions.
//!
//! Vertices are stored the way mesh loaders hand them over for upload:
//! four floats each (x, y, z, w), where `w` is padding and ignored here.

use crate::error::ConfigError;
use crate::math::remap;
use glam::Vec3;

pub struct MeshTargets {
    vertices: Vec<[f32; 4]>,
}

impl MeshTargets {
    /// Build from a flat `[x, y, z, w, ...]` buffer.
    pub fn from_flat(buffer: &[f32]) -> Result<Self, ConfigError> {
        let vertices: &[[f32; 4]] = bytemuck::try_cast_slice(buffer)
            .map_err(|_| ConfigError::MeshStride { len: buffer.len(), stride: 4 })?;
        Self::from_vertices(vertices.to_vec())
    }

    /// Build from a flat `[x, y, z, ...]` buffer, padding each vertex with `w = 1`.
    pub fn from_xyz(buffer: &[f32]) -> Result<Self, ConfigError> {
        if buffer.len() % 3 != 0 {
            return Err(ConfigError::MeshStride { len: buffer.len(), stride: 3 });
        }
        let vertices = buffer
            .chunks_exact(3)
            .map(|v| [v[0], v[1], v[2], 1.0])
            .collect();
        Self::from_vertices(vertices)
    }

    fn from_vertices(vertices: Vec<[f32; 4]>) -> Result<Self, ConfigError> {
        if vertices.is_empty() {
            return Err(ConfigError::MissingMesh);
        }
        Ok(Self { vertices })
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// The stored buffer, 4 floats per vertex.
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Vertex index used as the target of particle `index`.
    ///
    /// Particles map one-to-one onto vertices while the mesh is large
    /// enough. Past the end of the mesh, the particle range is squeezed onto
    /// the vertex range instead, so every lookup lands in bounds.
    pub fn vertex_index(&self, index: usize, particle_count: usize) -> usize {
        let count = self.vertices.len();
        if index < count {
            return index;
        }
        let mapped = remap(0.0, particle_count as f32, 0.0, count as f32, index as f32).floor();
        (mapped.max(0.0) as usize).min(count - 1)
    }

    /// World-space target for particle `index` in a field of `particle_count`.
    pub fn target_for(&self, index: usize, particle_count: usize) -> Vec3 {
        let [x, y, z, _] = self.vertices[self.vertex_index(index, particle_count)];
        Vec3::new(x, y, z)
    }
}
