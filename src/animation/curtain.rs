//! Curtain Transition
//!
//! A one-shot, time-based state machine for the full-screen reveal effect:
//! an opaque quad grows from the bottom edge until it covers the viewport,
//! dwells there, then shrinks back out through the top edge.
//!
//! Progress is computed from elapsed frame time, not frame count, so the
//! run self-terminates after its configured duration regardless of frame
//! rate variance. Only one run is active at a time; starting while running
//! restarts the schedule and discards the old run entirely.

/// Idle → Running → Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurtainPhase {
    #[default]
    Idle,
    Running,
}

/// Output of one controller step, applied to the curtain mesh by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurtainFrame {
    /// Shaped progress in 0..=1 (0.5 = fully covering).
    pub render_progress: f32,
    /// Vertical offset from the resting position below the viewport.
    pub offset: f32,
    /// Vertical scale of the covering quad. Negative while retracting,
    /// which flips the quad so it shrinks out through the opposite edge.
    pub scale_y: f32,
}

/// The curtain state machine.
///
/// The raw linear progress is mapped through a three-segment piecewise
/// curve parameterized by the dwell fraction: a linear ramp to 0.5, a
/// plateau held at exactly 0.5 while the curtain covers the screen, and a
/// linear ramp to 1. This gives a fast cover, a dwell, and a fast reveal
/// instead of a single linear wipe.
#[derive(Debug, Clone)]
pub struct CurtainController {
    phase: CurtainPhase,
    dwell_fraction: f32,
    duration: f64,
    /// Captured lazily on the first step, from the frame's timestamp;
    /// capturing at `start()` would skip the first frame.
    start_time: Option<f64>,
    /// Total travel distance: the viewport height at start time.
    travel: f32,
    offset: f32,
}

impl CurtainController {
    #[must_use]
    pub fn new(dwell_fraction: f32) -> Self {
        Self {
            phase: CurtainPhase::Idle,
            dwell_fraction: dwell_fraction.clamp(0.0, 0.95),
            duration: 0.0,
            start_time: None,
            travel: 0.0,
            offset: 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> CurtainPhase {
        self.phase
    }

    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == CurtainPhase::Running
    }

    /// Travel distance of the current (or last) run.
    #[inline]
    #[must_use]
    pub fn travel(&self) -> f32 {
        self.travel
    }

    /// Starts (or restarts) a run.
    ///
    /// Half the total duration is spent covering, half revealing, with the
    /// dwell band carved out of the middle. Any run already in flight is
    /// discarded: there is no queuing and no blending.
    pub fn start(&mut self, total_duration: f64, travel: f32) {
        self.duration = total_duration / 2.0;
        self.start_time = None;
        self.travel = travel;
        self.offset = 0.0;
        self.phase = CurtainPhase::Running;
    }

    /// Advances the run to `timestamp` and returns the frame to apply.
    ///
    /// Calling this while idle is a caller bug (the frame loop gates on
    /// [`is_running`](Self::is_running)); it is tolerated as a retracted
    /// no-op frame.
    pub fn step(&mut self, timestamp: f64) -> CurtainFrame {
        debug_assert!(self.is_running(), "curtain step() while idle");
        if !self.is_running() {
            return CurtainFrame { render_progress: 1.0, offset: self.travel, scale_y: 0.0 };
        }

        let start = *self.start_time.get_or_insert(timestamp);
        let elapsed = timestamp - start;

        // A zero-length run completes on its first step.
        let linear = if self.duration > 0.0 {
            ((elapsed / self.duration).clamp(0.0, 1.0)) as f32
        } else {
            1.0
        };

        let ramp = 0.5 - self.dwell_fraction / 2.0;
        let dwell_end = 0.5 + self.dwell_fraction / 2.0;

        let render_progress = if linear <= ramp {
            linear / ramp * 0.5
        } else if linear < dwell_end {
            0.5
        } else {
            (linear - dwell_end) / ramp * 0.5 + 0.5
        };

        self.offset = render_progress * self.travel;

        let mut frame = CurtainFrame {
            render_progress,
            offset: self.offset,
            scale_y: if render_progress < 0.5 {
                2.0 * self.offset
            } else {
                2.0 * (self.offset - self.travel)
            },
        };

        if render_progress >= 1.0 {
            // Force the fully retracted end state and go idle.
            frame = CurtainFrame { render_progress: 1.0, offset: self.travel, scale_y: 0.0 };
            self.offset = self.travel;
            self.phase = CurtainPhase::Idle;
            self.start_time = None;
        }

        frame
    }
}
