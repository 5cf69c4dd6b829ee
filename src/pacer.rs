//! Frame pacing against a target refresh interval.
//!
//! The surface presents without a swap-interval knob, so the pacer is the
//! only rate bound: at each frame boundary it sleeps for whatever remains of
//! the target interval, clamped to zero. Pacing only applies while the frame
//! rate is locked; unlocked frames run free.

use std::time::{Duration, Instant};

pub const DEFAULT_TARGET_FPS: f64 = 60.0;

/// Remaining sleep for a frame that took `elapsed` of a `target` interval.
/// Never negative; a frame over budget sleeps zero.
pub fn sleep_needed(target: Duration, elapsed: Duration) -> Duration {
    target.saturating_sub(elapsed)
}

#[derive(Debug)]
pub struct FramePacer {
    locked: bool,
    target: Duration,
    last: Option<Instant>,
}

impl FramePacer {
    pub fn new(target_fps: f64, locked: bool) -> Self {
        Self {
            locked,
            target: Self::interval(target_fps),
            last: None,
        }
    }

    fn interval(target_fps: f64) -> Duration {
        let fps = if target_fps > 0.0 {
            target_fps
        } else {
            DEFAULT_TARGET_FPS
        };
        Duration::from_secs_f64(1.0 / fps)
    }

    pub fn set_target_fps(&mut self, target_fps: f64) {
        self.target = Self::interval(target_fps);
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        if !locked {
            self.last = None;
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn target_interval(&self) -> Duration {
        self.target
    }

    /// Mark a frame boundary, sleeping out the remainder of the interval.
    /// Returns the time slept.
    pub fn pace(&mut self) -> Duration {
        if !self.locked {
            return Duration::ZERO;
        }
        let now = Instant::now();
        let sleep = match self.last {
            Some(last) => sleep_needed(self.target, now.duration_since(last)),
            None => Duration::ZERO,
        };
        if !sleep.is_zero() {
            std::thread::sleep(sleep);
        }
        self.last = Some(Instant::now());
        sleep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_frame_sleeps_most_of_the_interval() {
        let target = Duration::from_secs_f64(1.0 / 60.0);
        let sleep = sleep_needed(target, Duration::from_millis(5));
        assert!(sleep >= Duration::from_millis(10));
        assert!(sleep < target);
    }

    #[test]
    fn slow_frame_never_sleeps_negative() {
        let target = Duration::from_secs_f64(1.0 / 60.0);
        assert_eq!(sleep_needed(target, Duration::from_millis(40)), Duration::ZERO);
        assert_eq!(sleep_needed(target, target), Duration::ZERO);
    }

    #[test]
    fn unlocked_pacer_is_a_no_op() {
        let mut pacer = FramePacer::new(60.0, false);
        assert_eq!(pacer.pace(), Duration::ZERO);
        assert_eq!(pacer.pace(), Duration::ZERO);
    }

    #[test]
    fn zero_fps_falls_back_to_default() {
        let pacer = FramePacer::new(0.0, true);
        assert_eq!(
            pacer.target_interval(),
            Duration::from_secs_f64(1.0 / DEFAULT_TARGET_FPS)
        );
    }

    #[test]
    fn first_paced_frame_does_not_sleep() {
        let mut pacer = FramePacer::new(1000.0, true);
        assert_eq!(pacer.pace(), Duration::ZERO);
    }
}
