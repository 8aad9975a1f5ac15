//! Materials
//!
//! A material pairs a shader variant (opaque to the stage, compiled and
//! selected by the compositor) with the named uniforms the shader consumes.

use std::borrow::Cow;

use glam::{Vec2, Vec4};

use crate::resources::uniforms::{ImageUniforms, ScreenUniforms};

// ---------------------------------------------------------------------------
// ShaderVariant
// ---------------------------------------------------------------------------

/// Selects one of the compiled shader pairs the compositor ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShaderVariant {
    /// The per-image reveal/hover effect.
    #[default]
    Default,
    /// The scroll-speed distortion effect (also the post-process pass).
    Scroll,
}

impl ShaderVariant {
    /// Stable name the compositor resolves to a compiled effect.
    #[must_use]
    pub fn shader_name(self) -> &'static str {
        match self {
            Self::Default => "image_default",
            Self::Scroll => "image_scroll",
        }
    }

    /// Short form used in generated mesh identities.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Scroll => "scroll",
        }
    }
}

/// Opaque texture reference (an image URL or asset path). Decoding and
/// upload are the compositor's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureSource(pub Cow<'static, str>);

impl From<String> for TextureSource {
    fn from(src: String) -> Self {
        Self(Cow::Owned(src))
    }
}

impl From<&'static str> for TextureSource {
    fn from(src: &'static str) -> Self {
        Self(Cow::Borrowed(src))
    }
}

// ---------------------------------------------------------------------------
// Tweenable channels
// ---------------------------------------------------------------------------

/// The two uniform scalars that ramp under tween control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformChannel {
    Hover,
    Activation,
}

// ---------------------------------------------------------------------------
// ImageMaterial
// ---------------------------------------------------------------------------

/// Shader-driven material backing one image mesh.
#[derive(Debug, Clone)]
pub struct ImageMaterial {
    pub name: String,
    pub variant: ShaderVariant,
    pub uniforms: ImageUniforms,
    pub map: Option<TextureSource>,
    pub transparent: bool,
}

impl ImageMaterial {
    #[must_use]
    pub fn new(variant: ShaderVariant, map: Option<TextureSource>, name: &str, noise: Vec2) -> Self {
        Self {
            name: name.to_string(),
            variant,
            uniforms: ImageUniforms { noise, ..Default::default() },
            map,
            transparent: true,
        }
    }

    #[inline]
    #[must_use]
    pub fn channel(&self, channel: UniformChannel) -> f32 {
        match channel {
            UniformChannel::Hover => self.uniforms.hover_state,
            UniformChannel::Activation => self.uniforms.activation_state,
        }
    }

    #[inline]
    pub fn set_channel(&mut self, channel: UniformChannel, value: f32) {
        match channel {
            UniformChannel::Hover => self.uniforms.hover_state = value,
            UniformChannel::Activation => self.uniforms.activation_state = value,
        }
    }
}

// ---------------------------------------------------------------------------
// FlatMaterial
// ---------------------------------------------------------------------------

/// Solid-color material (the curtain).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatMaterial {
    pub color: Vec4,
}

impl FlatMaterial {
    #[must_use]
    pub fn new(color: Vec4) -> Self {
        Self { color }
    }
}

// ---------------------------------------------------------------------------
// Material
// ---------------------------------------------------------------------------

/// Any material the scene can reference.
#[derive(Debug, Clone)]
pub enum Material {
    Image(ImageMaterial),
    Flat(FlatMaterial),
}

impl Material {
    #[must_use]
    pub fn as_image(&self) -> Option<&ImageMaterial> {
        match self {
            Self::Image(m) => Some(m),
            Self::Flat(_) => None,
        }
    }

    pub fn as_image_mut(&mut self) -> Option<&mut ImageMaterial> {
        match self {
            Self::Image(m) => Some(m),
            Self::Flat(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ScreenEffect
// ---------------------------------------------------------------------------

/// The full-screen post-process pass at the end of the composite chain.
///
/// Its input color attachment is wired up by the compositor; the stage only
/// owns the named uniforms.
#[derive(Debug, Clone)]
pub struct ScreenEffect {
    pub variant: ShaderVariant,
    pub uniforms: ScreenUniforms,
}

impl ScreenEffect {
    #[must_use]
    pub fn new() -> Self {
        Self {
            variant: ShaderVariant::Scroll,
            uniforms: ScreenUniforms::default(),
        }
    }
}

impl Default for ScreenEffect {
    fn default() -> Self {
        Self::new()
    }
}
