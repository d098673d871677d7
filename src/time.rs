//! Frame timing for driving the simulation.
//!
//! [`FrameClock`] turns wall-clock frame intervals into simulation time steps.
//! Every step is capped at `max_delta` so a stalled frame (window drag,
//! debugger break) cannot launch particles across the scene in one jump.
//!
//! # Example
//!
//! ```ignore
//! let mut clock = FrameClock::new(0.05);
//!
//! // In your event loop:
//! let dt = clock.tick();
//! simulation.update(dt);
//! ```

use std::time::{Duration, Instant};

/// Per-frame delta source with an upper bound on each step.
#[derive(Debug)]
pub struct FrameClock {
    /// When the last frame occurred.
    last_frame: Instant,
    /// Cap applied to every delta, in seconds.
    max_delta: f32,
    /// Most recent (capped) delta.
    delta_secs: f32,
    /// Sum of all deltas handed out.
    simulated_secs: f64,
    /// Total frames ticked.
    frame_count: u64,
    /// Fixed delta for deterministic stepping (optional).
    fixed_delta: Option<f32>,
    /// Frames per second, refreshed every `fps_update_interval`.
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl FrameClock {
    /// Create a clock starting now, capping deltas at `max_delta` seconds.
    pub fn new(max_delta: f32) -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            max_delta: max_delta.max(0.0),
            delta_secs: 0.0,
            simulated_secs: 0.0,
            frame_count: 0,
            fixed_delta: None,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Use a fixed delta instead of wall-clock time. `None` restores real timing.
    ///
    /// The fixed delta is still subject to the cap.
    pub fn with_fixed_delta(mut self, delta: Option<f32>) -> Self {
        self.fixed_delta = delta;
        self
    }

    /// Mark a new frame and return the capped time step in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.delta_secs = self.clamp(self.fixed_delta.unwrap_or(raw));
        self.simulated_secs += self.delta_secs as f64;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta_secs
    }

    /// Bound a raw delta to `[0, max_delta]`. NaN maps to zero.
    #[inline]
    pub fn clamp(&self, delta: f32) -> f32 {
        if delta.is_nan() {
            0.0
        } else {
            delta.clamp(0.0, self.max_delta)
        }
    }

    /// Step returned by the last [`tick`](Self::tick).
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Upper bound on any single step.
    #[inline]
    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    /// Total simulated seconds handed out so far.
    #[inline]
    pub fn simulated(&self) -> f64 {
        self.simulated_secs
    }

    /// Frames ticked since creation.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Measured frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.05)
    }
}
