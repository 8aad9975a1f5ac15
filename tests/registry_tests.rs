//! Image Registry Integration Tests
//!
//! Tests for:
//! - add/remove lifecycle: registry size arithmetic, identity uniqueness
//! - generated identities and explicit-id replacement
//! - screen-space placement math and reposition idempotency
//! - resize: cached size, mesh scale and recomputed positions
//! - cached page-absolute layout

mod common;

use common::{stage_fixture, stage_with_scroll, Fixture};
use scrollstage::{ElementId, ElementRect, ShaderVariant};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

const IMG_A: ElementId = ElementId(10);
const IMG_B: ElementId = ElementId(11);

fn add_rect(fixture: &Fixture, element: ElementId, left: f32, top: f32, width: f32, height: f32) {
    fixture
        .layout
        .set_rect(element, ElementRect::new(left, top, width, height));
}

// ============================================================================
// Lifecycle: add / remove
// ============================================================================

#[test]
fn registry_size_tracks_adds_and_removes() {
    let mut f = stage_fixture();
    add_rect(&f, IMG_A, 0.0, 0.0, 100.0, 50.0);
    add_rect(&f, IMG_B, 0.0, 100.0, 100.0, 50.0);

    let a = f
        .stage
        .add_image_as_mesh(IMG_A, ShaderVariant::Default, Some("a"), false)
        .unwrap();
    let b = f
        .stage
        .add_image_as_mesh(IMG_B, ShaderVariant::Default, Some("b"), false)
        .unwrap();
    assert_eq!(a, "a");
    assert_eq!(b, "b");
    assert_eq!(f.stage.registry().len(), 2);

    f.stage.remove_image_mesh("a");
    assert_eq!(f.stage.registry().len(), 1);
    assert!(!f.stage.registry().contains("a"));
    assert!(f.stage.registry().contains("b"));

    // Removing an identity twice must not affect the survivor.
    f.stage.remove_image_mesh("a");
    assert_eq!(f.stage.registry().len(), 1);
    assert!(f.stage.registry().contains("b"));
}

#[test]
fn remove_never_added_identity_is_noop() {
    let mut f = stage_fixture();
    f.stage.remove_image_mesh("ghost");
    assert!(f.stage.registry().is_empty());
}

#[test]
fn generated_identities_are_unique() {
    let mut f = stage_fixture();
    add_rect(&f, IMG_A, 0.0, 0.0, 100.0, 50.0);
    add_rect(&f, IMG_B, 0.0, 100.0, 100.0, 50.0);

    let a = f
        .stage
        .add_image_as_mesh(IMG_A, ShaderVariant::Default, None, false)
        .unwrap();
    let b = f
        .stage
        .add_image_as_mesh(IMG_B, ShaderVariant::Scroll, None, false)
        .unwrap();

    assert_ne!(a, b);
    assert!(a.starts_with("image_default_"));
    assert!(b.starts_with("image_scroll_"));
}

#[test]
fn generated_identities_survive_removals() {
    // A monotonic counter means a generated id can never collide with a
    // live entry, no matter how many removals happened in between.
    let mut f = stage_fixture();
    add_rect(&f, IMG_A, 0.0, 0.0, 100.0, 50.0);
    add_rect(&f, IMG_B, 0.0, 100.0, 100.0, 50.0);

    let a = f
        .stage
        .add_image_as_mesh(IMG_A, ShaderVariant::Default, None, false)
        .unwrap();
    f.stage.remove_image_mesh(&a);
    let b = f
        .stage
        .add_image_as_mesh(IMG_B, ShaderVariant::Default, None, false)
        .unwrap();
    assert_ne!(a, b);
}

#[test]
fn explicit_id_reuse_replaces_entry() {
    let mut f = stage_fixture();
    add_rect(&f, IMG_A, 0.0, 0.0, 100.0, 50.0);
    add_rect(&f, IMG_B, 0.0, 100.0, 200.0, 80.0);

    f.stage
        .add_image_as_mesh(IMG_A, ShaderVariant::Default, Some("hero"), false)
        .unwrap();
    f.stage
        .add_image_as_mesh(IMG_B, ShaderVariant::Default, Some("hero"), false)
        .unwrap();

    assert_eq!(f.stage.registry().len(), 1);
    let entry = f.stage.registry().get("hero").unwrap();
    assert_eq!(entry.element, IMG_B);

    // One image mesh plus the curtain.
    assert_eq!(f.stage.scene().mesh_count(), 2);
}

#[test]
fn removal_releases_material() {
    let mut f = stage_fixture();
    add_rect(&f, IMG_A, 0.0, 0.0, 100.0, 50.0);

    f.stage
        .add_image_as_mesh(IMG_A, ShaderVariant::Default, Some("a"), false)
        .unwrap();
    // Image material plus the curtain's flat material.
    assert_eq!(f.stage.assets().material_count(), 2);

    f.stage.remove_image_mesh("a");
    assert_eq!(f.stage.assets().material_count(), 1);
    assert_eq!(f.stage.scene().mesh_count(), 1);
}

#[test]
fn add_image_reads_texture_source() {
    let mut f = stage_fixture();
    add_rect(&f, IMG_A, 0.0, 0.0, 100.0, 50.0);
    f.layout.set_source(IMG_A, "hero.webp");

    f.stage
        .add_image_as_mesh(IMG_A, ShaderVariant::Default, Some("a"), false)
        .unwrap();

    let entry = f.stage.registry().get("a").unwrap();
    let material = f.stage.assets().get_material(entry.material).unwrap();
    let image = material.as_image().unwrap();
    assert_eq!(image.map.as_ref().unwrap().0.as_ref(), "hero.webp");
}

// ============================================================================
// Placement math
// ============================================================================

#[test]
fn mesh_position_is_viewport_centered() {
    let mut f = stage_fixture();
    add_rect(&f, IMG_A, 100.0, 200.0, 50.0, 30.0);

    f.stage
        .add_image_as_mesh(IMG_A, ShaderVariant::Default, Some("a"), false)
        .unwrap();

    let entry = f.stage.registry().get("a").unwrap();
    let mesh = f.stage.scene().get_mesh(entry.mesh).unwrap();

    // x = left - vw/2 + w/2, y = vh/2 - top - h/2, for a 1000x800 viewport
    assert!(approx(mesh.position.x, -375.0));
    assert!(approx(mesh.position.y, 185.0));
    assert!(approx(mesh.scale.x, 50.0));
    assert!(approx(mesh.scale.y, 30.0));
}

#[test]
fn reposition_is_idempotent_for_fixed_layout() {
    // Each scroll frame runs a full reposition pass; with the element
    // layout and viewport unchanged, the positions must not drift.
    let mut f = stage_with_scroll(&[1.0, 2.0]);
    add_rect(&f, IMG_A, 100.0, 200.0, 50.0, 30.0);
    f.stage
        .add_image_as_mesh(IMG_A, ShaderVariant::Default, Some("a"), false)
        .unwrap();

    let mesh_key = f.stage.registry().get("a").unwrap().mesh;

    f.stage.frame(0.0);
    assert!(f.stage.scroll_in_progress());
    let first = f.stage.scene().get_mesh(mesh_key).unwrap().position;

    f.stage.frame(0.016);
    assert!(f.stage.scroll_in_progress());
    let second = f.stage.scene().get_mesh(mesh_key).unwrap().position;

    assert_eq!(first, second);
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn resize_updates_scale_and_position() {
    let mut f = stage_fixture();
    add_rect(&f, IMG_A, 100.0, 200.0, 100.0, 50.0);
    f.stage
        .add_image_as_mesh(IMG_A, ShaderVariant::Default, Some("a"), false)
        .unwrap();

    // The element grew; the host fires a resize.
    add_rect(&f, IMG_A, 100.0, 200.0, 200.0, 80.0);
    f.stage.enqueue(scrollstage::StageEvent::Resize);
    f.stage.frame(0.0);

    let entry = f.stage.registry().get("a").unwrap();
    assert!(approx(entry.layout.width, 200.0));
    assert!(approx(entry.layout.height, 80.0));

    let mesh = f.stage.scene().get_mesh(entry.mesh).unwrap();
    assert!(approx(mesh.scale.x, 200.0));
    assert!(approx(mesh.scale.y, 80.0));
    // Recomputed with the new half extents.
    assert!(approx(mesh.position.x, 100.0 - 500.0 + 100.0));
    assert!(approx(mesh.position.y, 400.0 - 200.0 - 40.0));
}

#[test]
fn resize_with_empty_registry_is_noop() {
    let mut f = stage_fixture();
    f.stage.enqueue(scrollstage::StageEvent::Resize);
    f.stage.frame(0.0);
    assert!(f.stage.registry().is_empty());
}

// ============================================================================
// Cached layout
// ============================================================================

#[test]
fn cached_top_is_page_absolute() {
    let mut f = stage_with_scroll(&[120.0]);
    f.stage.frame(0.0);
    assert!(approx(f.stage.current_scroll(), 120.0));

    // The element sits 40px below the viewport top while scrolled to 120.
    add_rect(&f, IMG_A, 0.0, 40.0, 100.0, 50.0);
    f.stage
        .add_image_as_mesh(IMG_A, ShaderVariant::Default, Some("a"), false)
        .unwrap();

    let entry = f.stage.registry().get("a").unwrap();
    assert!(approx(entry.layout.top, 160.0));
}

#[test]
fn vanished_element_keeps_last_position() {
    let mut f = stage_with_scroll(&[0.0, 5.0]);
    add_rect(&f, IMG_A, 100.0, 200.0, 50.0, 30.0);
    f.stage
        .add_image_as_mesh(IMG_A, ShaderVariant::Default, Some("a"), false)
        .unwrap();
    let mesh_key = f.stage.registry().get("a").unwrap().mesh;
    let placed = f.stage.scene().get_mesh(mesh_key).unwrap().position;

    // The backing element disappears mid-teardown; the reposition pass on
    // the next scroll frame must skip it, not fail.
    f.layout.remove_rect(IMG_A);
    f.stage.frame(0.0);
    f.stage.frame(0.016);

    let after = f.stage.scene().get_mesh(mesh_key).unwrap().position;
    assert_eq!(placed, after);
}
