//! # Scene Management
//!
//! Named mesh storage with a single active selection. One mesh renders at a
//! time (arbitrary mesh counts are out of scope); meshes load asynchronously
//! from the render loop's point of view, so a frame drawn before upload
//! completes simply renders nothing.

pub mod mesh;
pub mod primitives;

use std::collections::HashMap;

pub use mesh::{LoadError, Material, MeshBuffers};

use crate::gfx::backend::{MeshHandle, RasterBackend};

struct MeshEntry {
    buffers: MeshBuffers,
    handle: Option<MeshHandle>,
}

/// Mesh container with one active selection.
pub struct Scene {
    meshes: HashMap<String, MeshEntry>,
    active: Option<String>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            meshes: HashMap::new(),
            active: None,
        }
    }

    /// Registers a mesh; the first registered mesh becomes active.
    pub fn add_mesh(&mut self, name: &str, buffers: MeshBuffers) {
        if self.active.is_none() {
            self.active = Some(name.to_string());
        }
        self.meshes.insert(
            name.to_string(),
            MeshEntry {
                buffers,
                handle: None,
            },
        );
    }

    /// Loads an OBJ file and registers it under `name`.
    pub fn load_obj(&mut self, name: &str, path: &str) -> Result<(), LoadError> {
        let buffers = MeshBuffers::load_obj(path)?;
        log::info!(
            "loaded `{}` from {}: {} triangles",
            name,
            path,
            buffers.triangle_count()
        );
        self.add_mesh(name, buffers);
        Ok(())
    }

    /// Switches the active mesh. Returns false (and changes nothing) for an
    /// unknown name.
    pub fn select(&mut self, name: &str) -> bool {
        if self.meshes.contains_key(name) {
            self.active = Some(name.to_string());
            true
        } else {
            false
        }
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn mesh_names(&self) -> Vec<&str> {
        self.meshes.keys().map(String::as_str).collect()
    }

    /// Uploads any meshes that do not yet have backend buffers.
    pub fn upload_pending(&mut self, backend: &mut dyn RasterBackend) {
        for entry in self.meshes.values_mut() {
            if entry.handle.is_none() {
                entry.handle = Some(entry.buffers.upload(backend));
            }
        }
    }

    /// Draw handle and material of the active mesh, if it is both selected
    /// and uploaded.
    pub fn active_mesh(&self) -> Option<(&MeshHandle, &Material)> {
        let name = self.active.as_ref()?;
        let entry = self.meshes.get(name)?;
        let handle = entry.handle.as_ref()?;
        Some((handle, &entry.buffers.material))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
