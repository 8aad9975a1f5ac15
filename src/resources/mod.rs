//! Resource data types
//!
//! CPU-side descriptions of everything the compositor consumes:
//! - Geometry: plain vertex data (the shared unit quad)
//! - Materials: shader variant + named uniform blocks
//! - ScreenEffect: the full-screen post-process pass

pub mod geometry;
pub mod material;
pub mod uniforms;

pub use geometry::{Geometry, PlaneOptions};
pub use material::{FlatMaterial, ImageMaterial, Material, ScreenEffect, ShaderVariant, TextureSource, UniformChannel};
pub use uniforms::{ImageUniforms, ScreenUniforms};
