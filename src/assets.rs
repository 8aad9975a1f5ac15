//! Asset Store
//!
//! Central storage for geometry and material data, addressed by slotmap
//! keys. Meshes hold keys, never the data itself, so the same geometry can
//! back any number of meshes.
//!
//! The store is created with the shared unit quad already inserted; image
//! meshes reuse it for their whole lifetime and element resizes never create
//! geometry.

use slotmap::{SlotMap, new_key_type};

use crate::resources::{Geometry, ImageMaterial, Material};

new_key_type! {
    pub struct GeometryKey;
    pub struct MaterialKey;
}

pub struct Assets {
    geometries: SlotMap<GeometryKey, Geometry>,
    materials: SlotMap<MaterialKey, Material>,
    quad: GeometryKey,
}

impl Assets {
    #[must_use]
    pub fn new() -> Self {
        let mut geometries = SlotMap::with_key();
        let quad = geometries.insert(Geometry::unit_quad());
        Self {
            geometries,
            materials: SlotMap::with_key(),
            quad,
        }
    }

    /// The shared unit-quad geometry.
    #[inline]
    #[must_use]
    pub fn quad(&self) -> GeometryKey {
        self.quad
    }

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryKey {
        self.geometries.insert(geometry)
    }

    #[must_use]
    pub fn get_geometry(&self, key: GeometryKey) -> Option<&Geometry> {
        self.geometries.get(key)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialKey {
        self.materials.insert(material)
    }

    #[must_use]
    pub fn get_material(&self, key: MaterialKey) -> Option<&Material> {
        self.materials.get(key)
    }

    pub fn get_material_mut(&mut self, key: MaterialKey) -> Option<&mut Material> {
        self.materials.get_mut(key)
    }

    pub fn remove_material(&mut self, key: MaterialKey) -> Option<Material> {
        self.materials.remove(key)
    }

    #[must_use]
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// All live image materials, for the per-frame `time` write.
    pub fn image_materials_mut(&mut self) -> impl Iterator<Item = &mut ImageMaterial> {
        self.materials.values_mut().filter_map(Material::as_image_mut)
    }

    /// All live image materials, read-only.
    pub fn image_materials(&self) -> impl Iterator<Item = &ImageMaterial> {
        self.materials.values().filter_map(Material::as_image)
    }
}

impl Default for Assets {
    fn default() -> Self {
        Self::new()
    }
}
