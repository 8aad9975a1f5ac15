//! Between-Frame Events
//!
//! Host callbacks (pointer hover, window resize, scroll-range activity) do
//! not mutate the stage directly. They are enqueued as [`StageEvent`]s and
//! drained once at the start of the next frame tick, so registry mutation
//! never races the per-frame read pass.

use crate::host::ElementId;

/// An event funneled from the host into the next frame tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageEvent {
    /// Pointer entered the backing element of the named image mesh.
    HoverEnter { id: String },
    /// Pointer left the backing element of the named image mesh.
    HoverExit { id: String },
    /// The host window was resized.
    Resize,
    /// The scroll source reported an active-range element entering or
    /// leaving its range.
    ActiveChanged { element: ElementId, active: bool },
}
