//! Error Types
//!
//! This module defines the error types used throughout the stage.
//!
//! # Overview
//!
//! The main error type [`StageError`] covers the few failure modes the stage
//! can actually hit:
//! - calling an entry point before `init` has completed
//! - asking the host for layout it cannot provide
//! - frame scheduling faults
//!
//! Missing-entity lookups (an image identity that was already removed) are
//! deliberately *not* errors: they are benign races between host teardown and
//! render-loop catch-up, and every such lookup is a silent no-op.
//!
//! All fallible public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, StageError>`.

use thiserror::Error;

use crate::host::{ElementId, ScheduleError};

/// The main error type for the stage.
#[derive(Error, Debug)]
pub enum StageError {
    // ========================================================================
    // Lifecycle Errors
    // ========================================================================
    /// An entry point was called before `init` completed.
    #[error("stage is not initialized: call init() before any other entry point")]
    NotInitialized,

    // ========================================================================
    // Host Layout Errors
    // ========================================================================
    /// The host could not produce a bounding box for the element.
    #[error("no layout available for element {0:?}")]
    ElementLayout(ElementId),

    // ========================================================================
    // Scheduling Errors
    // ========================================================================
    /// The per-frame scheduling primitive failed.
    #[error("frame scheduling failed: {0}")]
    Schedule(#[from] ScheduleError),
}

/// Alias for `Result<T, StageError>`.
pub type Result<T> = std::result::Result<T, StageError>;
