use glam::Vec4;
use slotmap::SlotMap;

use crate::scene::{Mesh, MeshKey};

/// Flat mesh container.
///
/// Pure data: the compositor reads it, the stage and registry mutate it.
/// `background: None` renders the surface transparent over the host page.
pub struct Scene {
    meshes: SlotMap<MeshKey, Mesh>,
    pub background: Option<Vec4>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            meshes: SlotMap::with_key(),
            background: None,
        }
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshKey {
        self.meshes.insert(mesh)
    }

    pub fn remove_mesh(&mut self, key: MeshKey) -> Option<Mesh> {
        self.meshes.remove(key)
    }

    #[must_use]
    pub fn get_mesh(&self, key: MeshKey) -> Option<&Mesh> {
        self.meshes.get(key)
    }

    pub fn get_mesh_mut(&mut self, key: MeshKey) -> Option<&mut Mesh> {
        self.meshes.get_mut(key)
    }

    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn iter_meshes(&self) -> impl Iterator<Item = (MeshKey, &Mesh)> {
        self.meshes.iter()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
