//! Shared host doubles for the integration tests: a scriptable layout, a
//! counting compositor, a fallible scheduler and a scripted scroll source.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use scrollstage::{
    ActiveElement, Assets, Camera, Compositor, ElementId, ElementRect, FrameScheduler,
    LayoutProvider, ScheduleError, Scene, ScreenEffect, ScrollSource, SpeedElement, Stage,
    StageSettings, Viewport,
};

pub const CONTAINER: ElementId = ElementId(1);
pub const ROOT: ElementId = ElementId(2);
pub const NAVIGATION: ElementId = ElementId(3);
pub const APP: ElementId = ElementId(4);

// ============================================================================
// FakeLayout
// ============================================================================

#[derive(Default)]
pub struct LayoutState {
    pub rects: HashMap<ElementId, ElementRect>,
    pub viewport: Viewport,
    pub classes: HashMap<ElementId, Vec<String>>,
    pub sources: HashMap<ElementId, String>,
}

/// Scriptable layout; clones share state so tests can mutate rects while
/// the stage owns its own handle.
#[derive(Clone)]
pub struct FakeLayout {
    inner: Rc<RefCell<LayoutState>>,
}

impl FakeLayout {
    pub fn new(viewport: Viewport) -> Self {
        let mut state = LayoutState {
            viewport,
            ..Default::default()
        };
        // The canvas container fills the viewport.
        state.rects.insert(
            CONTAINER,
            ElementRect::new(0.0, 0.0, viewport.width, viewport.height),
        );
        Self {
            inner: Rc::new(RefCell::new(state)),
        }
    }

    pub fn set_rect(&self, element: ElementId, rect: ElementRect) {
        self.inner.borrow_mut().rects.insert(element, rect);
    }

    pub fn remove_rect(&self, element: ElementId) {
        self.inner.borrow_mut().rects.remove(&element);
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        let mut state = self.inner.borrow_mut();
        state.viewport = viewport;
        state.rects.insert(
            CONTAINER,
            ElementRect::new(0.0, 0.0, viewport.width, viewport.height),
        );
    }

    pub fn set_source(&self, element: ElementId, src: &str) {
        self.inner.borrow_mut().sources.insert(element, src.to_string());
    }

    pub fn classes_of(&self, element: ElementId) -> Vec<String> {
        self.inner
            .borrow()
            .classes
            .get(&element)
            .cloned()
            .unwrap_or_default()
    }
}

impl LayoutProvider for FakeLayout {
    fn element_rect(&self, element: ElementId) -> Option<ElementRect> {
        self.inner.borrow().rects.get(&element).copied()
    }

    fn viewport(&self) -> Viewport {
        self.inner.borrow().viewport
    }

    fn image_source(&self, element: ElementId) -> Option<String> {
        self.inner.borrow().sources.get(&element).cloned()
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        let mut state = self.inner.borrow_mut();
        let classes = state.classes.entry(element).or_default();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        let mut state = self.inner.borrow_mut();
        if let Some(classes) = state.classes.get_mut(&element) {
            classes.retain(|c| c != class);
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.inner
            .borrow()
            .classes
            .get(&element)
            .is_some_and(|classes| classes.iter().any(|c| c == class))
    }
}

// ============================================================================
// CountingCompositor
// ============================================================================

#[derive(Default)]
pub struct CompositorState {
    pub renders: usize,
    pub resizes: Vec<(u32, u32, f32)>,
    pub last_scroll_speed: f32,
}

#[derive(Clone, Default)]
pub struct CountingCompositor {
    inner: Rc<RefCell<CompositorState>>,
}

impl CountingCompositor {
    pub fn renders(&self) -> usize {
        self.inner.borrow().renders
    }

    pub fn resizes(&self) -> Vec<(u32, u32, f32)> {
        self.inner.borrow().resizes.clone()
    }

    pub fn last_scroll_speed(&self) -> f32 {
        self.inner.borrow().last_scroll_speed
    }
}

impl Compositor for CountingCompositor {
    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        self.inner.borrow_mut().resizes.push((width, height, pixel_ratio));
    }

    fn render(&mut self, _scene: &Scene, _camera: &Camera, _assets: &Assets, effect: &ScreenEffect) {
        let mut state = self.inner.borrow_mut();
        state.renders += 1;
        state.last_scroll_speed = effect.uniforms.scroll_speed;
    }
}

// ============================================================================
// TestScheduler
// ============================================================================

#[derive(Default)]
pub struct SchedulerState {
    pub frame_requests: usize,
    pub immediate_requests: usize,
    pub fail: bool,
}

#[derive(Clone, Default)]
pub struct TestScheduler {
    inner: Rc<RefCell<SchedulerState>>,
}

impl TestScheduler {
    pub fn frame_requests(&self) -> usize {
        self.inner.borrow().frame_requests
    }

    pub fn immediate_requests(&self) -> usize {
        self.inner.borrow().immediate_requests
    }

    pub fn set_fail(&self, fail: bool) {
        self.inner.borrow_mut().fail = fail;
    }
}

impl FrameScheduler for TestScheduler {
    fn request_frame(&mut self) -> Result<(), ScheduleError> {
        let mut state = self.inner.borrow_mut();
        if state.fail {
            return Err(ScheduleError);
        }
        state.frame_requests += 1;
        Ok(())
    }

    fn request_immediate(&mut self) {
        self.inner.borrow_mut().immediate_requests += 1;
    }
}

// ============================================================================
// ScriptedScroll
// ============================================================================

#[derive(Default)]
pub struct ScrollState {
    pub positions: Vec<f32>,
    pub cursor: usize,
    pub rendered: f32,
    pub speed: f32,
    pub speed_elements: Vec<SpeedElement>,
    pub active_elements: Vec<ActiveElement>,
}

/// Plays back a fixed sequence of rendered positions, one per advance; the
/// last value repeats once the script runs out.
#[derive(Clone, Default)]
pub struct ScriptedScroll {
    inner: Rc<RefCell<ScrollState>>,
}

impl ScriptedScroll {
    pub fn new(positions: &[f32]) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ScrollState {
                positions: positions.to_vec(),
                ..Default::default()
            })),
        }
    }

    pub fn set_speed(&self, speed: f32) {
        self.inner.borrow_mut().speed = speed;
    }

    pub fn speed_elements(&self) -> Vec<SpeedElement> {
        self.inner.borrow().speed_elements.clone()
    }

    pub fn active_elements(&self) -> Vec<ActiveElement> {
        self.inner.borrow().active_elements.clone()
    }
}

impl ScrollSource for ScriptedScroll {
    fn advance(&mut self) {
        let mut state = self.inner.borrow_mut();
        if state.cursor < state.positions.len() {
            state.rendered = state.positions[state.cursor];
            state.cursor += 1;
        }
    }

    fn rendered_position(&self) -> f32 {
        self.inner.borrow().rendered
    }

    fn speed(&self) -> f32 {
        self.inner.borrow().speed
    }

    fn jump_to(&mut self, position: f32) {
        let mut state = self.inner.borrow_mut();
        state.rendered = position;
        state.cursor = state.positions.len();
    }

    fn push_speed_element(&mut self, descriptor: SpeedElement) {
        self.inner.borrow_mut().speed_elements.push(descriptor);
    }

    fn remove_speed_element(&mut self, element: ElementId) {
        let mut state = self.inner.borrow_mut();
        if let Some(pos) = state.speed_elements.iter().position(|d| d.element == element) {
            state.speed_elements.remove(pos);
        }
    }

    fn push_active_element(&mut self, descriptor: ActiveElement) {
        self.inner.borrow_mut().active_elements.push(descriptor);
    }

    fn remove_active_element(&mut self, element: ElementId) -> Option<ActiveElement> {
        let mut state = self.inner.borrow_mut();
        let pos = state.active_elements.iter().position(|d| d.element == element)?;
        Some(state.active_elements.remove(pos))
    }
}

// ============================================================================
// Stage fixture
// ============================================================================

pub struct Fixture {
    pub stage: Stage,
    pub layout: FakeLayout,
    pub compositor: CountingCompositor,
    pub scheduler: TestScheduler,
    pub scroll: ScriptedScroll,
}

/// A stage over a 1000×800 viewport, initialized and ready to tick.
pub fn stage_with_scroll(positions: &[f32]) -> Fixture {
    let viewport = Viewport::new(1000.0, 800.0, 1.0);
    let layout = FakeLayout::new(viewport);
    let compositor = CountingCompositor::default();
    let scheduler = TestScheduler::default();
    let scroll = ScriptedScroll::new(positions);

    let mut stage = Stage::new(
        StageSettings::default(),
        Box::new(scroll.clone()),
        Box::new(layout.clone()),
        Box::new(compositor.clone()),
        Box::new(scheduler.clone()),
    );
    stage.init(CONTAINER, ROOT).expect("init");

    Fixture {
        stage,
        layout,
        compositor,
        scheduler,
        scroll,
    }
}

pub fn stage_fixture() -> Fixture {
    stage_with_scroll(&[])
}
