//! Stage Core Module
//!
//! This module contains [`Stage`], the render-loop coordinator. It is an
//! explicit context object, constructed once by the host, owning the
//! scroll source, image registry, tween system, curtain controller and the
//! render/composite targets. There is no hidden global state, and
//! multiple independent stages can coexist (and be tested).
//!
//! # Architecture
//!
//! - **`ScrollSource`**: damped scroll position, advanced once per frame
//! - **`ImageRegistry`**: identity → mesh mapping synced to host elements
//! - **`TweenSystem`**: hover/activation uniform ramps
//! - **`CurtainController`**: the one-shot full-screen transition
//! - **`Compositor`** / **`FrameScheduler`**: host-supplied render and
//!   scheduling primitives
//!
//! # Frame tick
//!
//! The host drives [`Stage::frame`] once per display frame. Each tick
//! drains the event queue, advances the clock and scroll, repositions
//! meshes when the scroll moved, pushes uniforms, steps the curtain,
//! triggers exactly one composited render, and reschedules itself. The
//! whole body sits behind a defensive boundary: one bad frame is logged
//! and cannot stop future frames.

use std::collections::VecDeque;

use glam::{Vec2, Vec3};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::animation::{CurtainController, TweenSystem};
use crate::assets::Assets;
use crate::errors::{Result, StageError};
use crate::events::StageEvent;
use crate::host::{Compositor, ElementId, FrameScheduler, LayoutProvider, Viewport};
use crate::registry::ImageRegistry;
use crate::resources::{FlatMaterial, Material, ScreenEffect, ShaderVariant};
use crate::scene::{Camera, Mesh, MeshKey, Scene};
use crate::scroll::{ActiveElement, ElementFlags, ScrollSource, SpeedElement};
use crate::settings::StageSettings;

/// Externally-registered per-frame hook (custom pointer/cursor logic).
pub type FrameHook = Box<dyn FnMut()>;
/// Host hook fired when an active-range element changes state.
pub type ActiveHook = Box<dyn FnMut(&ActiveElement, bool)>;
/// Host hook fired per speed element as the scroll source evaluates it;
/// receives the descriptor, the rendered scroll position and the speed.
pub type ScrollHook = Box<dyn FnMut(&SpeedElement, f32, f32)>;

/// The scroll-synchronized render stage.
///
/// # Lifecycle
///
/// 1. Create with [`Stage::new`]
/// 2. Initialize once with [`Stage::init`]
/// 3. Drive with [`Stage::frame`] from the host's frame callback
///
/// There is no graceful shutdown: dropping the stage is teardown.
pub struct Stage {
    settings: StageSettings,

    // === Host collaborators ===
    scroll: Box<dyn ScrollSource>,
    layout: Box<dyn LayoutProvider>,
    compositor: Box<dyn Compositor>,
    scheduler: Box<dyn FrameScheduler>,

    // === Owned state ===
    assets: Assets,
    scene: Scene,
    camera: Camera,
    registry: ImageRegistry,
    tweens: TweenSystem,
    curtain: CurtainController,
    screen_effect: ScreenEffect,

    events: VecDeque<StageEvent>,
    pending_fixed: Vec<SpeedElement>,
    active_elements: FxHashMap<ElementId, ActiveElement>,
    /// Identities whose activation is range-driven, exempt from the
    /// default post-insertion activation.
    scroll_driven: FxHashSet<String>,

    frame_hook: Option<FrameHook>,
    active_hook: Option<ActiveHook>,
    scroll_hook: Option<ScrollHook>,

    // === Lifecycle ===
    initialized: bool,
    viewport: Viewport,
    container: Option<ElementId>,
    scrollable_root: Option<ElementId>,
    navigation: Option<ElementId>,
    app_container: Option<ElementId>,
    curtain_mesh: Option<MeshKey>,

    // === Per-frame state ===
    clock: f32,
    current_scroll: f32,
    scroll_in_progress: bool,
    frame_count: u64,
    schedule_fallback_active: bool,
}

impl Stage {
    /// Creates a stage around the host's collaborators.
    ///
    /// No layout is queried and no frame is scheduled until
    /// [`init`](Self::init).
    #[must_use]
    pub fn new(
        settings: StageSettings,
        scroll: Box<dyn ScrollSource>,
        layout: Box<dyn LayoutProvider>,
        compositor: Box<dyn Compositor>,
        scheduler: Box<dyn FrameScheduler>,
    ) -> Self {
        let viewport = Viewport::default();
        let camera = Camera::fitted(
            &viewport,
            settings.camera_distance,
            settings.camera_near,
            settings.camera_far,
        );
        let curtain = CurtainController::new(settings.curtain_dwell);

        Self {
            settings,
            scroll,
            layout,
            compositor,
            scheduler,
            assets: Assets::new(),
            scene: Scene::new(),
            camera,
            registry: ImageRegistry::new(),
            tweens: TweenSystem::new(),
            curtain,
            screen_effect: ScreenEffect::new(),
            events: VecDeque::new(),
            pending_fixed: Vec::new(),
            active_elements: FxHashMap::default(),
            scroll_driven: FxHashSet::default(),
            frame_hook: None,
            active_hook: None,
            scroll_hook: None,
            initialized: false,
            viewport,
            container: None,
            scrollable_root: None,
            navigation: None,
            app_container: None,
            curtain_mesh: None,
            clock: 0.0,
            current_scroll: 0.0,
            scroll_in_progress: false,
            frame_count: 0,
            schedule_fallback_active: false,
        }
    }

    /// One-time setup: sizes camera and compositor to `container`, builds
    /// the curtain mesh, and requests the first frame.
    ///
    /// Must complete before any other entry point is called.
    pub fn init(&mut self, container: ElementId, scrollable_root: ElementId) -> Result<()> {
        if self.initialized {
            log::warn!("stage already initialized, ignoring init()");
            return Ok(());
        }

        self.container = Some(container);
        self.scrollable_root = Some(scrollable_root);
        self.viewport = self.measure_viewport();

        self.camera = Camera::fitted(
            &self.viewport,
            self.settings.camera_distance,
            self.settings.camera_near,
            self.settings.camera_far,
        );
        self.compositor.resize(
            self.viewport.width as u32,
            self.viewport.height as u32,
            self.pixel_ratio(),
        );

        self.init_curtain();
        self.initialized = true;

        log::info!(
            "stage initialized ({}x{} @ {:.2}x)",
            self.viewport.width,
            self.viewport.height,
            self.pixel_ratio()
        );

        self.request_next_frame();
        Ok(())
    }

    fn init_curtain(&mut self) {
        let material = self
            .assets
            .add_material(Material::Flat(FlatMaterial::new(self.settings.curtain_color)));
        let mut mesh = Mesh::new(self.assets.quad(), material);
        mesh.name = "curtain".to_string();
        mesh.position = Vec3::new(0.0, -self.viewport.height / 2.0, 0.0);
        mesh.scale = Vec2::new(self.viewport.width, 1.0);
        self.curtain_mesh = Some(self.scene.add_mesh(mesh));
    }

    // ========================================================================
    // Public surface
    // ========================================================================

    /// Mirrors a host image element into the scene, returning the mesh
    /// identity (explicit or generated).
    pub fn add_image_as_mesh(
        &mut self,
        element: ElementId,
        variant: ShaderVariant,
        id: Option<&str>,
        hover_listeners: bool,
    ) -> Result<String> {
        self.ensure_init()?;
        self.registry.add_image(
            &mut self.scene,
            &mut self.assets,
            self.layout.as_ref(),
            &self.settings,
            self.current_scroll,
            element,
            variant,
            id,
            hover_listeners,
        )
    }

    /// Removes an image mesh; unknown identities are a silent no-op.
    pub fn remove_image_mesh(&mut self, id: &str) {
        self.registry.remove_image(&mut self.scene, &mut self.assets, id);
        self.scroll_driven.remove(id);
    }

    /// Ramps the hover state of the named mesh; unknown identities no-op.
    pub fn hover_image(&mut self, id: &str, hovering: bool) {
        self.registry
            .set_hover(&mut self.tweens, &mut self.assets, &self.settings, id, hovering);
    }

    /// Ramps the activation state of the named mesh; unknown identities
    /// no-op.
    pub fn activate_image(&mut self, id: &str, active: bool) {
        self.registry
            .set_activation(&mut self.tweens, &mut self.assets, &self.settings, id, active);
    }

    /// Starts (or restarts) the curtain transition over `total_duration`
    /// seconds.
    pub fn curtain_animation(&mut self, total_duration: f64) {
        if !self.initialized {
            log::warn!("curtain_animation before init ignored");
            return;
        }
        self.curtain.start(total_duration, self.viewport.height);
    }

    /// Pass-through class toggling on the navigation element. Not core:
    /// kept on the stage because the host drives it from the same scroll
    /// callbacks. Viewports narrower than the configured minimum ignore it.
    pub fn navigation_to_small(&mut self, small: bool) {
        let Some(nav) = self.navigation else { return };
        if self.viewport.width < self.settings.nav_small_min_width {
            return;
        }
        let class = self.settings.nav_small_class.clone();
        if small {
            if !self.layout.has_class(nav, &class) {
                self.layout.add_class(nav, &class);
            }
        } else if self.layout.has_class(nav, &class) {
            self.layout.remove_class(nav, &class);
        }
    }

    /// Jumps the scroll source back to the top.
    pub fn scroll_to_top(&mut self) {
        self.scroll.jump_to(0.0);
    }

    /// Queues a host event for the next frame tick.
    pub fn enqueue(&mut self, event: StageEvent) {
        self.events.push_back(event);
    }

    pub fn set_navigation(&mut self, element: ElementId) {
        self.navigation = Some(element);
    }

    pub fn set_app_container(&mut self, element: ElementId) {
        self.app_container = Some(element);
    }

    /// Registers the per-frame hook invoked at the top of every tick.
    pub fn set_frame_hook(&mut self, hook: FrameHook) {
        self.frame_hook = Some(hook);
    }

    /// Registers the hook fired when an active-range element changes state.
    pub fn set_active_hook(&mut self, hook: ActiveHook) {
        self.active_hook = Some(hook);
    }

    /// Registers the hook fired per evaluated speed element.
    pub fn set_scroll_hook(&mut self, hook: ScrollHook) {
        self.scroll_hook = Some(hook);
    }

    /// Forwarded by the scroll source for each speed element it evaluates.
    /// The stage itself does no proximity math; it only relays.
    pub fn speed_element_scrolled(&mut self, descriptor: &SpeedElement, position: f32, speed: f32) {
        if let Some(hook) = self.scroll_hook.as_mut() {
            hook(descriptor, position, speed);
        }
    }

    // ========================================================================
    // Scroll element descriptors
    // ========================================================================

    /// Registers an element whose motion couples to scroll speed.
    ///
    /// FIXED descriptors are held until the start of the next frame so the
    /// host layout has settled, then resolved (bounds, container bottom,
    /// margin, unit speed) and pushed to the scroll source.
    pub fn add_speed_element(&mut self, descriptor: SpeedElement) {
        if descriptor.flags.contains(ElementFlags::FIXED) {
            self.pending_fixed.push(descriptor);
            return;
        }
        self.scroll.push_speed_element(descriptor);
    }

    /// Unregisters a speed element; unknown elements are a no-op.
    pub fn remove_speed_element(&mut self, element: ElementId) {
        self.pending_fixed.retain(|d| d.element != element);
        self.scroll.remove_speed_element(element);
    }

    /// Registers an element with a scroll-dependent active range, applying
    /// its flag-driven setup, and fires the state hook once as inactive.
    pub fn add_active_element(&mut self, mut descriptor: ActiveElement) {
        if descriptor.flags.contains(ElementFlags::HEADER) {
            let class = self.settings.title_overflow_class.clone();
            self.layout.add_class(descriptor.element, &class);
        }
        if descriptor.flags.contains(ElementFlags::TOP) {
            descriptor.range_from_top = true;
        }
        if descriptor.flags.contains(ElementFlags::ONCE) {
            descriptor.activate_once = true;
        }
        if descriptor.flags.contains(ElementFlags::APP_BG_DARK) {
            descriptor.bg_container = self.app_container;
        }
        if let Some(mesh_id) = &descriptor.mesh_id {
            // Range-driven activation replaces the default one.
            self.scroll_driven.insert(mesh_id.clone());
            self.registry.clear_pending_activation(mesh_id);
        }

        self.active_elements.insert(descriptor.element, descriptor.clone());
        self.scroll.push_active_element(descriptor.clone());
        self.apply_active_change(&descriptor, false);
    }

    /// Unregisters an active-range element, clearing any dark class it set.
    pub fn remove_active_element(&mut self, element: ElementId) {
        if let Some(descriptor) = self.active_elements.remove(&element) {
            if descriptor.flags.contains(ElementFlags::APP_BG_DARK)
                && let Some(bg) = descriptor.bg_container
            {
                let class = self.settings.dark_class.clone();
                self.layout.remove_class(bg, &class);
            }
            if let Some(mesh_id) = descriptor.mesh_id {
                self.scroll_driven.remove(&mesh_id);
            }
        }
        self.scroll.remove_active_element(element);
    }

    fn apply_active_change(&mut self, descriptor: &ActiveElement, active: bool) {
        if descriptor.flags.contains(ElementFlags::NAVIGATION_BG_DARK)
            && let Some(nav) = self.navigation
        {
            let class = self.settings.nav_light_class.clone();
            if active {
                self.layout.add_class(nav, &class);
            } else {
                self.layout.remove_class(nav, &class);
            }
        }
        if descriptor.flags.contains(ElementFlags::APP_BG_DARK)
            && let Some(bg) = descriptor.bg_container
        {
            let class = self.settings.dark_class.clone();
            if active {
                self.layout.add_class(bg, &class);
            } else {
                self.layout.remove_class(bg, &class);
            }
        }
        if let Some(hook) = self.active_hook.as_mut() {
            hook(descriptor, active);
        }
    }

    // ========================================================================
    // Frame loop
    // ========================================================================

    /// One coordinator tick. The host calls this from its frame callback
    /// with the frame's timestamp in seconds.
    ///
    /// A failed body is logged and discarded; the next frame is requested
    /// unconditionally: the loop must never silently die.
    pub fn frame(&mut self, timestamp: f64) {
        if !self.initialized {
            log::warn!("frame before init ignored");
            return;
        }

        if let Err(err) = self.frame_body(timestamp) {
            log::error!("frame {} failed: {err}", self.frame_count);
        }

        self.frame_count += 1;
        self.request_next_frame();
    }

    fn frame_body(&mut self, timestamp: f64) -> Result<()> {
        self.drain_events();
        self.resolve_pending_layout();

        if let Some(hook) = self.frame_hook.as_mut() {
            hook();
        }

        // Deterministic step, independent of the actual frame duration.
        self.clock += self.settings.clock_step;

        self.scroll.advance();
        let rendered = self.scroll.rendered_position();
        self.scroll_in_progress = rendered != self.current_scroll;
        self.current_scroll = rendered;

        if self.scroll_in_progress {
            self.screen_effect.uniforms.scroll_speed = self.scroll.speed();
            self.registry
                .reposition_all(&mut self.scene, self.layout.as_ref(), self.current_scroll);
        }

        // The clock reaches every live material whether or not anything
        // moved; idle shader motion depends on it.
        let clock = self.clock;
        for material in self.assets.image_materials_mut() {
            material.uniforms.time = clock;
        }

        self.tweens.update(self.settings.clock_step, &mut self.assets);

        if self.curtain.is_running() {
            let frame = self.curtain.step(timestamp);
            let travel = self.curtain.travel();
            if let Some(key) = self.curtain_mesh
                && let Some(mesh) = self.scene.get_mesh_mut(key)
            {
                mesh.position.y = frame.offset - travel / 2.0;
                mesh.scale = Vec2::new(self.viewport.width, frame.scale_y);
            }
        }

        self.compositor
            .render(&self.scene, &self.camera, &self.assets, &self.screen_effect);

        Ok(())
    }

    fn drain_events(&mut self) {
        while let Some(event) = self.events.pop_front() {
            match event {
                StageEvent::HoverEnter { id } => self.apply_hover_event(&id, true),
                StageEvent::HoverExit { id } => self.apply_hover_event(&id, false),
                StageEvent::Resize => self.apply_resize(),
                StageEvent::ActiveChanged { element, active } => {
                    let Some(descriptor) = self.active_elements.get(&element).cloned() else {
                        log::debug!("active change for unregistered element {element:?}");
                        continue;
                    };
                    if !active && descriptor.activate_once {
                        continue;
                    }
                    self.apply_active_change(&descriptor, active);
                    if let Some(mesh_id) = &descriptor.mesh_id {
                        self.registry.set_activation(
                            &mut self.tweens,
                            &mut self.assets,
                            &self.settings,
                            mesh_id,
                            active,
                        );
                    }
                }
            }
        }
    }

    fn apply_hover_event(&mut self, id: &str, hovering: bool) {
        let Some(entry) = self.registry.get(id) else {
            log::debug!("hover event for unknown identity {id:?}");
            return;
        };
        if !entry.hover_listening {
            return;
        }
        let mesh_key = entry.mesh;
        if let Some(mesh) = self.scene.get_mesh_mut(mesh_key) {
            mesh.render_order = i32::from(hovering);
        }
        self.registry
            .set_hover(&mut self.tweens, &mut self.assets, &self.settings, id, hovering);
    }

    /// Deferred work resolved deterministically at the start of a frame:
    /// default activations from the previous tick's insertions, and FIXED
    /// speed descriptors waiting for host layout.
    fn resolve_pending_layout(&mut self) {
        for identity in self.registry.take_pending_activations() {
            if self.scroll_driven.contains(&identity) {
                continue;
            }
            self.registry.set_activation(
                &mut self.tweens,
                &mut self.assets,
                &self.settings,
                &identity,
                true,
            );
        }

        if self.pending_fixed.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.pending_fixed);
        for mut descriptor in pending {
            let Some(rect) = self.layout.element_rect(descriptor.element) else {
                // Layout still unavailable; retry next frame.
                self.pending_fixed.push(descriptor);
                continue;
            };
            descriptor.bounds = Some(rect);
            descriptor.container_bottom = descriptor
                .container
                .and_then(|c| self.layout.element_rect(c))
                .map(|r| r.bottom());
            descriptor.margin = self.settings.fixed_element_margin;
            descriptor.speed = 1.0;
            self.scroll.push_speed_element(descriptor);
        }
    }

    /// Re-derives viewport, camera, compositor size and curtain scale, then
    /// resizes every image mesh. A no-op before initialization.
    pub fn apply_resize(&mut self) {
        if !self.initialized {
            log::warn!("resize before init ignored");
            return;
        }
        self.viewport = self.measure_viewport();
        self.camera.fit_viewport(&self.viewport);
        self.compositor.resize(
            self.viewport.width as u32,
            self.viewport.height as u32,
            self.pixel_ratio(),
        );

        if let Some(key) = self.curtain_mesh
            && let Some(mesh) = self.scene.get_mesh_mut(key)
        {
            mesh.scale = Vec2::new(self.viewport.width, 0.0);
        }

        self.registry
            .resize_all(&mut self.scene, self.layout.as_ref(), self.current_scroll);
    }

    fn request_next_frame(&mut self) {
        if self.scheduler.request_frame().is_ok() {
            self.schedule_fallback_active = false;
            return;
        }
        if !self.schedule_fallback_active {
            log::warn!("frame scheduling primitive unavailable, using immediate rescheduling");
            self.schedule_fallback_active = true;
        }
        self.scheduler.request_immediate();
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    fn ensure_init(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(StageError::NotInitialized)
        }
    }

    fn measure_viewport(&self) -> Viewport {
        let dpr = self.layout.viewport().device_pixel_ratio;
        match self.container.and_then(|c| self.layout.element_rect(c)) {
            Some(rect) => Viewport::new(rect.width, rect.height, dpr),
            None => self.layout.viewport(),
        }
    }

    fn pixel_ratio(&self) -> f32 {
        self.viewport.device_pixel_ratio.min(self.settings.max_pixel_ratio)
    }

    #[inline]
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[inline]
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    #[must_use]
    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &ImageRegistry {
        &self.registry
    }

    #[inline]
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    #[must_use]
    pub fn screen_effect(&self) -> &ScreenEffect {
        &self.screen_effect
    }

    #[inline]
    #[must_use]
    pub fn curtain(&self) -> &CurtainController {
        &self.curtain
    }

    #[inline]
    #[must_use]
    pub fn curtain_mesh(&self) -> Option<MeshKey> {
        self.curtain_mesh
    }

    #[inline]
    #[must_use]
    pub fn tweens(&self) -> &TweenSystem {
        &self.tweens
    }

    /// The shared animation clock.
    #[inline]
    #[must_use]
    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// The rendered scroll position cached from the last frame.
    #[inline]
    #[must_use]
    pub fn current_scroll(&self) -> f32 {
        self.current_scroll
    }

    /// Whether the rendered scroll position changed on the last frame.
    #[inline]
    #[must_use]
    pub fn scroll_in_progress(&self) -> bool {
        self.scroll_in_progress
    }

    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Mutable access to the scroll source (to feed the raw scroll target).
    pub fn scroll_mut(&mut self) -> &mut dyn ScrollSource {
        self.scroll.as_mut()
    }

    /// Events queued and not yet drained.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }
}
