//! Animation module
//!
//! Two small time-based systems share this module:
//! - [`TweenSystem`]: scalar uniform ramps (hover/activation), advanced on
//!   the shared animation clock
//! - [`CurtainController`]: the one-shot full-screen curtain transition,
//!   advanced on frame timestamps

pub mod curtain;
pub mod tween;

pub use curtain::{CurtainController, CurtainFrame, CurtainPhase};
pub use tween::TweenSystem;
