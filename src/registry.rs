//! Image Registry
//!
//! The mapping from stable string identities to the meshes mirroring host
//! images. Lookups for hover/activation go straight through this map
//! (no scene scan, no name ambiguity), and every miss is a benign no-op,
//! because the backing element may have been torn down in the same frame.
//!
//! Screen placement: mesh space has its origin at the viewport center,
//! host space at the viewport's top-left. The conversion
//! `x = left − viewport_w/2 + w/2`, `y = viewport_h/2 − top − h/2`
//! is re-derived on every scroll change and window resize.

use glam::Vec2;
use rustc_hash::FxHashMap;

use crate::animation::TweenSystem;
use crate::assets::{Assets, MaterialKey};
use crate::errors::{Result, StageError};
use crate::host::{ElementId, LayoutProvider};
use crate::resources::{ImageMaterial, Material, ShaderVariant, TextureSource, UniformChannel};
use crate::scene::{Mesh, MeshKey, Scene};
use crate::settings::StageSettings;

/// Last-known layout of the backing element.
///
/// `top` is page-absolute (viewport top plus the scroll offset at refresh
/// time), so stored entries stay meaningful while the document scrolls.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CachedLayout {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

/// One host image mirrored into the scene.
#[derive(Debug, Clone)]
pub struct ImageEntry {
    pub identity: String,
    pub element: ElementId,
    pub mesh: MeshKey,
    pub material: MaterialKey,
    pub layout: CachedLayout,
    /// Host hover events drive the hover ramp (and raise draw order).
    pub hover_listening: bool,
    /// Default activation deferred to the next frame tick.
    pub pending_activation: bool,
}

/// Identity → entry map plus the insertion order used by bulk passes.
#[derive(Default)]
pub struct ImageRegistry {
    entries: FxHashMap<String, ImageEntry>,
    order: Vec<String>,
    next_sequence: u64,
}

impl ImageRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, identity: &str) -> bool {
        self.entries.contains_key(identity)
    }

    #[must_use]
    pub fn get(&self, identity: &str) -> Option<&ImageEntry> {
        self.entries.get(identity)
    }

    /// Identities in insertion order.
    #[must_use]
    pub fn identities(&self) -> &[String] {
        &self.order
    }

    /// Mirrors a host image into the scene and returns its identity.
    ///
    /// The mesh reuses the shared unit-quad geometry, scaled to the
    /// element's pixel size; a fresh material is created per entry. The
    /// cached layout records the page-absolute top so later repositioning
    /// is scroll-invariant. Reusing an explicit identity replaces the
    /// previous entry. The new entry is marked for default activation on
    /// the next frame; all mesh positions are recomputed before returning.
    pub fn add_image(
        &mut self,
        scene: &mut Scene,
        assets: &mut Assets,
        layout: &dyn LayoutProvider,
        settings: &StageSettings,
        current_scroll: f32,
        element: ElementId,
        variant: ShaderVariant,
        explicit_id: Option<&str>,
        hover_listeners: bool,
    ) -> Result<String> {
        let rect = layout.element_rect(element).ok_or(StageError::ElementLayout(element))?;

        let identity = match explicit_id {
            Some(id) => {
                if self.entries.contains_key(id) {
                    log::warn!("image identity {id:?} reused, replacing previous entry");
                    self.remove_image(scene, assets, id);
                }
                id.to_string()
            }
            None => format!("image_{}_{}", variant.slug(), self.next_sequence),
        };
        self.next_sequence += 1;

        let map = layout.image_source(element).map(TextureSource::from);
        let material = assets.add_material(Material::Image(ImageMaterial::new(
            variant,
            map,
            &identity,
            settings.noise,
        )));

        let mut mesh = Mesh::new(assets.quad(), material);
        mesh.name = identity.clone();
        mesh.scale = Vec2::new(rect.width, rect.height);
        let mesh_key = scene.add_mesh(mesh);

        let entry = ImageEntry {
            identity: identity.clone(),
            element,
            mesh: mesh_key,
            material,
            layout: CachedLayout {
                top: rect.top + current_scroll,
                left: rect.left,
                width: rect.width,
                height: rect.height,
            },
            hover_listening: hover_listeners,
            pending_activation: true,
        };
        self.entries.insert(identity.clone(), entry);
        self.order.push(identity.clone());

        // Insertion order affects nothing, but a fresh position pass is
        // cheap and keeps every mesh placed against current layout.
        self.reposition_all(scene, layout, current_scroll);

        Ok(identity)
    }

    /// Removes the entry, detaching its mesh and releasing its material.
    ///
    /// Safe to call for identities that were never added (or were already
    /// removed): the miss is logged at debug level and nothing changes.
    pub fn remove_image(&mut self, scene: &mut Scene, assets: &mut Assets, identity: &str) {
        let Some(entry) = self.entries.remove(identity) else {
            log::debug!("remove_image: unknown identity {identity:?}");
            return;
        };
        self.order.retain(|id| id != identity);

        scene.remove_mesh(entry.mesh);
        assets.remove_material(entry.material);
    }

    /// Re-reads every backing element's bounding box, updating cached sizes
    /// and mesh scales, then repositions everything.
    pub fn resize_all(
        &mut self,
        scene: &mut Scene,
        layout: &dyn LayoutProvider,
        current_scroll: f32,
    ) {
        for identity in &self.order {
            let Some(entry) = self.entries.get_mut(identity) else { continue };
            let Some(rect) = layout.element_rect(entry.element) else { continue };

            entry.layout.width = rect.width;
            entry.layout.height = rect.height;
            if let Some(mesh) = scene.get_mesh_mut(entry.mesh) {
                mesh.scale = Vec2::new(rect.width, rect.height);
            }
        }
        self.reposition_all(scene, layout, current_scroll);
    }

    /// Recomputes every mesh's screen-space position from the current
    /// element layout. Idempotent for a fixed layout and viewport.
    pub fn reposition_all(
        &mut self,
        scene: &mut Scene,
        layout: &dyn LayoutProvider,
        current_scroll: f32,
    ) {
        if self.entries.is_empty() {
            return;
        }
        let viewport = layout.viewport();

        for identity in &self.order {
            let Some(entry) = self.entries.get_mut(identity) else { continue };
            let Some(rect) = layout.element_rect(entry.element) else { continue };

            entry.layout.top = rect.top + current_scroll;
            entry.layout.left = rect.left;

            if let Some(mesh) = scene.get_mesh_mut(entry.mesh) {
                mesh.position.x = rect.left - viewport.width / 2.0 + entry.layout.width / 2.0;
                mesh.position.y = viewport.height / 2.0 - rect.top - entry.layout.height / 2.0;
            }
        }
    }

    /// Ramps the entry's activation uniform toward 1 (active) or 0.
    pub fn set_activation(
        &self,
        tweens: &mut TweenSystem,
        assets: &mut Assets,
        settings: &StageSettings,
        identity: &str,
        active: bool,
    ) {
        let Some(entry) = self.entries.get(identity) else {
            log::debug!("set_activation: unknown identity {identity:?}");
            return;
        };
        tweens.drive(
            assets,
            entry.material,
            UniformChannel::Activation,
            if active { 1.0 } else { 0.0 },
            settings.activation_duration,
        );
    }

    /// Ramps the entry's hover uniform toward 1 (hovering) or 0.
    pub fn set_hover(
        &self,
        tweens: &mut TweenSystem,
        assets: &mut Assets,
        settings: &StageSettings,
        identity: &str,
        hovering: bool,
    ) {
        let Some(entry) = self.entries.get(identity) else {
            log::debug!("set_hover: unknown identity {identity:?}");
            return;
        };
        tweens.drive(
            assets,
            entry.material,
            UniformChannel::Hover,
            if hovering { 1.0 } else { 0.0 },
            settings.hover_duration,
        );
    }

    /// Drains identities still marked for default activation.
    pub fn take_pending_activations(&mut self) -> Vec<String> {
        let mut pending = Vec::new();
        for identity in &self.order {
            if let Some(entry) = self.entries.get_mut(identity)
                && entry.pending_activation
            {
                entry.pending_activation = false;
                pending.push(identity.clone());
            }
        }
        pending
    }

    /// Cancels the deferred default activation (the entry became
    /// scroll-driven before the next frame resolved it).
    pub fn clear_pending_activation(&mut self, identity: &str) {
        if let Some(entry) = self.entries.get_mut(identity) {
            entry.pending_activation = false;
        }
    }
}
