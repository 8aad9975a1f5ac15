//! Scroll Source
//!
//! The damped scroll position is produced outside the frame loop's core:
//! the stage only asks it to advance once per frame, then reads the
//! render-ready position and speed. Descriptor registration (elements whose
//! motion or active state couples to scroll) is push-only from the stage's
//! side; evaluating descriptors against the current position is the
//! source's job.
//!
//! [`InertialScroll`] is the reference implementation: exponential ease
//! toward a target with hundredth-of-a-pixel settling, which is what makes
//! the "scroll moved this frame" comparison in the frame loop terminate.

use bitflags::bitflags;

use crate::host::{ElementId, ElementRect};

bitflags! {
    /// Behavior options carried by host element descriptors.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ElementFlags: u32 {
        /// Pinned inside a container while it scrolls past.
        const FIXED              = 1 << 0;
        const HEADER             = 1 << 1;
        const CONTENT            = 1 << 2;
        const LINE               = 1 << 3;
        const FOOTER             = 1 << 4;
        const ROTATE             = 1 << 5;
        /// Active range measured from the viewport top.
        const TOP                = 1 << 6;
        /// Activates once and never deactivates.
        const ONCE               = 1 << 7;
        const NAVIGATION_BG_DARK = 1 << 8;
        const APP_BG_DARK        = 1 << 9;
    }
}

/// Descriptor for an element whose motion couples to scroll speed.
#[derive(Debug, Clone)]
pub struct SpeedElement {
    pub element: ElementId,
    pub flags: ElementFlags,
    pub speed: f32,
    /// Pinning container, for [`ElementFlags::FIXED`] elements.
    pub container: Option<ElementId>,

    // Resolved by the stage at the layout pass following registration;
    // `None` until then.
    pub bounds: Option<ElementRect>,
    pub container_bottom: Option<f32>,
    pub margin: f32,
}

impl SpeedElement {
    #[must_use]
    pub fn new(element: ElementId, flags: ElementFlags, speed: f32) -> Self {
        Self {
            element,
            flags,
            speed,
            container: None,
            bounds: None,
            container_bottom: None,
            margin: 0.0,
        }
    }

    /// Builder-style pinning container for FIXED elements.
    #[must_use]
    pub fn with_container(mut self, container: ElementId) -> Self {
        self.container = Some(container);
        self
    }
}

/// Descriptor for an element with a scroll-dependent active range.
#[derive(Debug, Clone)]
pub struct ActiveElement {
    pub element: ElementId,
    pub flags: ElementFlags,
    /// Identity of the contained image mesh, when one is associated. An
    /// associated mesh is activated by range entry instead of the default
    /// post-insertion activation.
    pub mesh_id: Option<String>,
    pub range_from_top: bool,
    pub activate_once: bool,
    /// Class-toggle target for [`ElementFlags::APP_BG_DARK`].
    pub bg_container: Option<ElementId>,
}

impl ActiveElement {
    #[must_use]
    pub fn new(element: ElementId, flags: ElementFlags) -> Self {
        Self {
            element,
            flags,
            mesh_id: None,
            range_from_top: false,
            activate_once: false,
            bg_container: None,
        }
    }

    #[must_use]
    pub fn with_mesh_id(mut self, mesh_id: impl Into<String>) -> Self {
        self.mesh_id = Some(mesh_id.into());
        self
    }
}

/// The smoothed scroll position, advanced once per frame.
///
/// Mutation is one-directional: the source writes, the stage reads only.
pub trait ScrollSource {
    /// Recompute the render-ready position for this frame.
    fn advance(&mut self);

    /// The damped position used for visual placement.
    fn rendered_position(&self) -> f32;

    /// The smoothed scroll speed, written into the post-process effect
    /// while scrolling is in progress.
    fn speed(&self) -> f32;

    /// Jump both target and rendered position (scroll-to-top).
    fn jump_to(&mut self, position: f32);

    fn push_speed_element(&mut self, descriptor: SpeedElement);
    fn remove_speed_element(&mut self, element: ElementId);
    fn push_active_element(&mut self, descriptor: ActiveElement);
    fn remove_active_element(&mut self, element: ElementId) -> Option<ActiveElement>;
}

/// Reference scroll source: exponential ease-out toward a target.
///
/// Each advance moves the rendered position by `ease` of the remaining
/// distance and rounds it to hundredths of a pixel so the motion settles in
/// finite frames: visible deceleration, then exact equality with the
/// target.
#[derive(Debug, Clone)]
pub struct InertialScroll {
    target: f32,
    rendered: f32,
    speed: f32,
    ease: f32,

    speed_elements: Vec<SpeedElement>,
    active_elements: Vec<ActiveElement>,
}

impl InertialScroll {
    #[must_use]
    pub fn new(ease: f32) -> Self {
        Self {
            target: 0.0,
            rendered: 0.0,
            speed: 0.0,
            ease: ease.clamp(0.01, 1.0),
            speed_elements: Vec::new(),
            active_elements: Vec::new(),
        }
    }

    /// Feed the raw scroll offset (the instantaneous document scroll).
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[must_use]
    pub fn speed_elements(&self) -> &[SpeedElement] {
        &self.speed_elements
    }

    #[must_use]
    pub fn active_elements(&self) -> &[ActiveElement] {
        &self.active_elements
    }
}

impl Default for InertialScroll {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl ScrollSource for InertialScroll {
    fn advance(&mut self) {
        let before = self.rendered;
        self.rendered += (self.target - self.rendered) * self.ease;
        // Sub-hundredth motion is invisible; rounding makes the position
        // reach the target exactly instead of approaching it forever.
        self.rendered = (self.rendered * 100.0).round() / 100.0;
        self.speed = self.rendered - before;
    }

    fn rendered_position(&self) -> f32 {
        self.rendered
    }

    fn speed(&self) -> f32 {
        self.speed
    }

    fn jump_to(&mut self, position: f32) {
        self.target = position;
        self.rendered = position;
        self.speed = 0.0;
    }

    fn push_speed_element(&mut self, descriptor: SpeedElement) {
        self.speed_elements.push(descriptor);
    }

    fn remove_speed_element(&mut self, element: ElementId) {
        if let Some(pos) = self.speed_elements.iter().position(|d| d.element == element) {
            self.speed_elements.remove(pos);
        }
    }

    fn push_active_element(&mut self, descriptor: ActiveElement) {
        self.active_elements.push(descriptor);
    }

    fn remove_active_element(&mut self, element: ElementId) -> Option<ActiveElement> {
        let pos = self.active_elements.iter().position(|d| d.element == element)?;
        Some(self.active_elements.remove(pos))
    }
}
