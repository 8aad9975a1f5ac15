//! Stage Settings
//!
//! Global configuration for stage construction, consumed once by
//! [`Stage::new`](crate::stage::Stage::new).
//!
//! # Fields
//!
//! | Field                 | Description                                | Default      |
//! |-----------------------|--------------------------------------------|--------------|
//! | `camera_distance`     | Camera z position in CSS pixels            | `600.0`      |
//! | `camera_near` / `far` | Clip planes                                | `100/2000`   |
//! | `max_pixel_ratio`     | Device pixel ratio clamp                   | `2.0`        |
//! | `clock_step`          | Fixed per-frame animation clock increment  | `0.05`       |
//! | `hover_duration`      | Hover-state ramp length in clock units     | `0.5`        |
//! | `activation_duration` | Activation-state ramp length               | `1.25`       |
//! | `noise`               | Per-material noise vector constant         | `(1.5, 1.5)` |
//! | `curtain_color`       | Curtain mesh color                         | `#172d4a`    |
//! | `curtain_dwell`       | Fraction of the run spent fully covering   | `0.3`        |

use std::borrow::Cow;

use glam::{Vec2, Vec4};

/// Global stage configuration.
///
/// The camera constants are chosen so that one world unit equals one CSS
/// pixel on the z = 0 plane, which is what makes the mesh/element mirroring
/// exact: a mesh scaled to the element's pixel size covers the element.
#[derive(Debug, Clone)]
pub struct StageSettings {
    // === Camera ===
    pub camera_distance: f32,
    pub camera_near: f32,
    pub camera_far: f32,

    // === Surface ===
    /// Device pixel ratios above this are clamped before reaching the
    /// compositor.
    pub max_pixel_ratio: f32,

    // === Animation ===
    /// Fixed increment of the shared animation clock, applied once per frame
    /// regardless of the actual frame duration.
    pub clock_step: f32,
    /// Hover-state ramp length, in clock units.
    pub hover_duration: f32,
    /// Activation-state ramp length, in clock units.
    pub activation_duration: f32,
    /// Noise vector constant handed to every image material.
    pub noise: Vec2,

    // === Curtain ===
    pub curtain_color: Vec4,
    /// Fraction (0..1) of the curtain run spent fully covering the screen.
    pub curtain_dwell: f32,

    // === Host class toggling ===
    /// Viewports narrower than this ignore `navigation_to_small`.
    pub nav_small_min_width: f32,
    pub nav_small_class: Cow<'static, str>,
    pub nav_light_class: Cow<'static, str>,
    pub dark_class: Cow<'static, str>,
    pub title_overflow_class: Cow<'static, str>,

    // === Scroll descriptors ===
    /// Margin applied to pinned (fixed) speed elements.
    pub fixed_element_margin: f32,
}

impl Default for StageSettings {
    fn default() -> Self {
        Self {
            camera_distance: 600.0,
            camera_near: 100.0,
            camera_far: 2000.0,
            max_pixel_ratio: 2.0,
            clock_step: 0.05,
            hover_duration: 0.5,
            activation_duration: 1.25,
            noise: Vec2::new(1.5, 1.5),
            // #172d4a
            curtain_color: Vec4::new(0x17 as f32 / 255.0, 0x2d as f32 / 255.0, 0x4a as f32 / 255.0, 1.0),
            curtain_dwell: 0.3,
            nav_small_min_width: 768.0,
            nav_small_class: Cow::Borrowed("nav-small"),
            nav_light_class: Cow::Borrowed("navigation-light"),
            dark_class: Cow::Borrowed("dark"),
            title_overflow_class: Cow::Borrowed("title-overflow"),
            fixed_element_margin: 60.0,
        }
    }
}
