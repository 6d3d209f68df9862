//! # Mesh Buffers and OBJ Loading
//!
//! CPU-side mesh data (positions, normals, UVs, index triples) plus the
//! material record, loaded from OBJ/MTL files or built procedurally, and
//! uploaded to the backend once.

use thiserror::Error;

use crate::gfx::backend::{MeshHandle, RasterBackend, TextureId};

/// Reflectivity triples, shininess exponent and optional surface texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
    pub texture: Option<TextureId>,
}

impl Default for Material {
    /// Fallback used when no MTL record is present.
    fn default() -> Self {
        Self {
            ambient: [0.5, 0.5, 0.5],
            diffuse: [0.3, 0.3, 0.3],
            specular: [0.2, 0.2, 0.2],
            shininess: 2.0,
            texture: None,
        }
    }
}

/// Mesh load failure.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read OBJ file: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("OBJ file `{0}` contains no models")]
    Empty(String),
}

/// CPU-side mesh arrays; read-only per frame once uploaded.
#[derive(Debug, Clone)]
pub struct MeshBuffers {
    /// Flat xyz triples.
    pub positions: Vec<f32>,
    /// Flat xyz triples, one normal per vertex.
    pub normals: Vec<f32>,
    /// Flat uv pairs; may be empty for untextured meshes.
    pub uvs: Vec<f32>,
    /// Triangle index triples.
    pub indices: Vec<u32>,
    pub material: Material,
}

impl MeshBuffers {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Loads the first model from an OBJ file, with MTL materials mapped
    /// onto the viewer's reflectivity record when present.
    pub fn load_obj(path: &str) -> Result<Self, LoadError> {
        let (models, materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )?;

        let model = models
            .into_iter()
            .next()
            .ok_or_else(|| LoadError::Empty(path.to_string()))?;

        let material = match materials {
            Ok(mtls) => model
                .mesh
                .material_id
                .and_then(|id| mtls.get(id).map(material_from_mtl))
                .unwrap_or_default(),
            Err(_) => {
                log::warn!("no MTL file for `{}`, using the default material", path);
                Material::default()
            }
        };

        let mut buffers = Self {
            positions: model.mesh.positions,
            normals: model.mesh.normals,
            uvs: model.mesh.texcoords,
            indices: model.mesh.indices,
            material,
        };
        buffers.recenter_vertically();
        Ok(buffers)
    }

    /// Shifts the mesh so the vertical midpoint of its bounding range sits
    /// at y = 0.
    pub fn recenter_vertically(&mut self) {
        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;
        for chunk in self.positions.chunks_exact(3) {
            min_y = min_y.min(chunk[1]);
            max_y = max_y.max(chunk[1]);
        }
        if min_y > max_y {
            return; // no vertices
        }
        let mid_y = (min_y + max_y) / 2.0;
        for chunk in self.positions.chunks_exact_mut(3) {
            chunk[1] -= mid_y;
        }
    }

    /// Uploads the arrays to the backend, returning the draw handle.
    pub fn upload(&self, backend: &mut dyn RasterBackend) -> MeshHandle {
        let positions = backend.create_vertex_buffer(&self.positions);
        let normals = backend.create_vertex_buffer(&self.normals);
        let uvs = if self.uvs.is_empty() {
            None
        } else {
            Some(backend.create_vertex_buffer(&self.uvs))
        };
        let indices = backend.create_index_buffer(&self.indices);
        MeshHandle {
            positions,
            normals,
            uvs,
            indices,
            index_count: self.indices.len() as u32,
        }
    }
}

fn material_from_mtl(mtl: &tobj::Material) -> Material {
    Material {
        ambient: mtl.ambient.unwrap_or([0.5, 0.5, 0.5]),
        diffuse: mtl.diffuse.unwrap_or([0.3, 0.3, 0.3]),
        specular: mtl.specular.unwrap_or([0.2, 0.2, 0.2]),
        shininess: mtl.shininess.unwrap_or(2.0),
        texture: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::primitives::cube;

    #[test]
    fn test_recenter_vertically() {
        let mut buffers = cube();
        for chunk in buffers.positions.chunks_exact_mut(3) {
            chunk[1] += 3.0;
        }
        buffers.recenter_vertically();
        let max_y = buffers
            .positions
            .chunks_exact(3)
            .map(|c| c[1])
            .fold(f32::MIN, f32::max);
        let min_y = buffers
            .positions
            .chunks_exact(3)
            .map(|c| c[1])
            .fold(f32::MAX, f32::min);
        assert!((max_y + min_y).abs() < 1e-6);
    }

    #[test]
    fn test_default_material_constants() {
        let material = Material::default();
        assert_eq!(material.ambient, [0.5, 0.5, 0.5]);
        assert_eq!(material.diffuse, [0.3, 0.3, 0.3]);
        assert_eq!(material.specular, [0.2, 0.2, 0.2]);
        assert_eq!(material.shininess, 2.0);
        assert!(material.texture.is_none());
    }

    #[test]
    fn test_upload_produces_complete_handle() {
        use crate::gfx::backend::RecordingBackend;

        let buffers = cube();
        let mut backend = RecordingBackend::new();
        let handle = buffers.upload(&mut backend);
        assert_eq!(handle.index_count, buffers.indices.len() as u32);
        assert!(handle.uvs.is_some());
    }
}
