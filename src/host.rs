//! Host Integration Traits
//!
//! The stage is a pure coordinator without any document, windowing or GPU
//! logic, allowing it to be driven by different frontends (browser bindings,
//! native preview harnesses, tests). The host supplies three capabilities:
//!
//! - [`LayoutProvider`]: bounding-box and viewport queries plus class toggling
//! - [`Compositor`]: the composited scene + post-process render, once per frame
//! - [`FrameScheduler`]: the per-frame rescheduling primitive
//!
//! All three are handed to [`Stage::new`](crate::stage::Stage::new) once and
//! owned by the stage for its whole lifetime.

use thiserror::Error;

use crate::assets::Assets;
use crate::resources::ScreenEffect;
use crate::scene::{Camera, Scene};

/// Opaque handle to a host element.
///
/// The stage never owns host element lifecycle; it only keys layout queries
/// and class toggles by this handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Viewport-relative bounding box of a host element, in CSS pixels.
///
/// Same convention as a DOM `getBoundingClientRect()`: `top`/`left` move as
/// the document scrolls, the origin is the viewport's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ElementRect {
    #[must_use]
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Host viewport dimensions in CSS pixels plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self { width, height, device_pixel_ratio }
    }

    /// Width over height; `1.0` for a degenerate zero-height viewport.
    #[inline]
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 { self.width / self.height } else { 1.0 }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1280.0, height: 720.0, device_pixel_ratio: 1.0 }
    }
}

/// Layout and class-toggling access to the host document.
pub trait LayoutProvider {
    /// Current viewport-relative bounding box of `element`, or `None` when
    /// the element is gone or not laid out yet.
    fn element_rect(&self, element: ElementId) -> Option<ElementRect>;

    /// Current viewport dimensions.
    fn viewport(&self) -> Viewport;

    /// Image source of `element` (used as the opaque texture reference of the
    /// mirroring mesh). Defaults to `None` for hosts without image elements.
    fn image_source(&self, _element: ElementId) -> Option<String> {
        None
    }

    fn add_class(&mut self, element: ElementId, class: &str);
    fn remove_class(&mut self, element: ElementId, class: &str);
    fn has_class(&self, element: ElementId, class: &str) -> bool;
}

/// The composited render target: scene pass plus the screen-space
/// post-process chain. Called exactly once per frame.
///
/// Shader programs are opaque at this level; the compositor selects compiled
/// effects by [`ShaderVariant`](crate::resources::ShaderVariant) and feeds
/// them the named uniforms carried by the materials and [`ScreenEffect`].
pub trait Compositor {
    /// Surface size changed. `pixel_ratio` is already clamped to the
    /// configured maximum.
    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32);

    /// Render one composited frame.
    fn render(&mut self, scene: &Scene, camera: &Camera, assets: &Assets, effect: &ScreenEffect);
}

/// The per-frame scheduling primitive is unavailable in this host context.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("frame scheduling primitive unavailable")]
pub struct ScheduleError;

/// Per-frame callback scheduling.
///
/// Loop continuity is a hard invariant: when [`request_frame`] fails the
/// stage falls back to [`request_immediate`], which must not fail.
///
/// [`request_frame`]: FrameScheduler::request_frame
/// [`request_immediate`]: FrameScheduler::request_immediate
pub trait FrameScheduler {
    /// Request a callback on the next display frame.
    fn request_frame(&mut self) -> Result<(), ScheduleError>;

    /// Infallible fallback: schedule the callback as soon as possible,
    /// without display synchronization.
    fn request_immediate(&mut self);
}
