use glam::{Vec2, Vec3};

use crate::assets::{GeometryKey, MaterialKey};

/// A renderable quad standing in for one host image (or the curtain).
///
/// Position is in viewport-centered world units (one unit per CSS pixel at
/// the z = 0 plane); `scale` carries the element's pixel size, applied to
/// the shared unit-quad geometry.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,

    // === Resource references ===
    pub geometry: GeometryKey,
    pub material: MaterialKey,

    // === Instance state ===
    pub position: Vec3,
    pub scale: Vec2,
    pub visible: bool,

    /// Draw order; hovered meshes are raised above their neighbors.
    pub render_order: i32,
}

impl Mesh {
    #[must_use]
    pub fn new(geometry: GeometryKey, material: MaterialKey) -> Self {
        Self {
            name: "Mesh".to_string(),
            geometry,
            material,
            position: Vec3::ZERO,
            scale: Vec2::ONE,
            visible: true,
            render_order: 0,
        }
    }
}
