//! # Frame Pacing
//!
//! Fixed-rate frame limiter for the real-time loop. Sleeps off the
//! remainder of each frame budget and reports the measured delta.

use std::time::{Duration, Instant};

/// Upper bound on the reported delta. A long stall (debugger, suspend)
/// otherwise produces one enormous simulation step.
const MAX_DELTA: f32 = 0.1;

/// Paces a loop to a target frame rate.
#[derive(Debug)]
pub struct FrameLimiter {
    target: Duration,
    prev: Instant,
}

impl FrameLimiter {
    /// Creates a limiter for the given target rate.
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        Self {
            target: Duration::from_secs(1) / target_fps.max(1),
            prev: Instant::now(),
        }
    }

    /// Sleeps out the rest of the current frame budget and returns the
    /// elapsed time since the previous tick, in seconds, clamped to
    /// [`MAX_DELTA`].
    pub fn tick(&mut self) -> f32 {
        let worked = self.prev.elapsed();
        if worked < self.target {
            std::thread::sleep(self.target - worked);
        }
        let now = Instant::now();
        let delta = (now - self.prev).as_secs_f32();
        self.prev = now;
        if delta > MAX_DELTA {
            tracing::warn!(delta, "frame ran long, clamping simulation step");
        }
        delta.min(MAX_DELTA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_reports_positive_clamped_delta() {
        let mut limiter = FrameLimiter::new(240);
        let first = limiter.tick();
        let second = limiter.tick();
        assert!(first > 0.0);
        assert!(second > 0.0);
        assert!(second <= MAX_DELTA);
    }

    #[test]
    fn test_zero_fps_does_not_divide_by_zero() {
        // Clamped to 1 fps internally; just ensure construction works.
        let limiter = FrameLimiter::new(0);
        assert_eq!(limiter.target, Duration::from_secs(1));
    }
}
