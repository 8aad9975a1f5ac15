//! Named per-material uniform blocks.
//!
//! Plain structs, one field per named uniform. The compositor maps the
//! fields onto whatever binding layout its compiled effects expect.

use glam::Vec2;

/// Uniforms consumed by every image shader variant.
///
/// `time` is the shared animation clock (not wall-clock); it is written into
/// every live material each frame to drive continuous idle motion.
/// `hover_state` and `activation_state` ramp between 0 and 1 under tween
/// control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageUniforms {
    pub time: f32,
    pub hover_state: f32,
    pub activation_state: f32,
    /// Noise vector constant; never animated.
    pub noise: Vec2,
}

impl Default for ImageUniforms {
    fn default() -> Self {
        Self {
            time: 0.0,
            hover_state: 0.0,
            activation_state: 0.0,
            noise: Vec2::new(1.5, 1.5),
        }
    }
}

/// Uniforms of the full-screen post-process pass.
///
/// `scroll_speed` is global: it is written only while the scroll position is
/// actually moving, and only onto this effect, never per-mesh.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenUniforms {
    pub scroll_speed: f32,
}
