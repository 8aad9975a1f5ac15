//! Scene module
//!
//! A deliberately flat scene: a keyed set of quad meshes plus one camera.
//! There is no hierarchy; every mesh lives in viewport-centered screen
//! space. String identities (and everything else about the backing host
//! elements) live in the image registry, not here.

pub mod camera;
pub mod mesh;
pub mod scene;

pub use camera::Camera;
pub use mesh::Mesh;
pub use scene::Scene;

use slotmap::new_key_type;

new_key_type! {
    pub struct MeshKey;
}
