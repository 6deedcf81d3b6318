//! Time facilities for the animation loop.
//!
//! The animation clock is not wall-clock time: it advances a fixed
//! `0.01 * speed` per frame, so everything driven by it (cone pulse,
//! morph, camera orbit) is frame-rate coupled. Wall-clock time is only used
//! for the FPS readout.
//!
//! The accumulator is `f64` so a long session keeps advancing even at the
//! smallest slider speed. Consumers read it narrowed through
//! [`SimTime::phase`], wrapped to [`PHASE_PERIOD`].
//!
//! # Example
//!
//! ```
//! use lightcone::time::SimTime;
//!
//! let mut time = SimTime::new();
//! time.advance(1.0);
//! assert!((time.elapsed() - 0.01).abs() < 1e-9);
//! ```

use std::time::{Duration, Instant};

/// Amount the accumulator advances per frame at speed 1.0.
pub const TIME_STEP: f64 = 0.01;

/// Common period of every time-driven motion: the cone pulse (`pi`), the
/// morph (`4 pi`) and the camera orbit (`10 pi` and `20 pi`).
pub const PHASE_PERIOD: f64 = 20.0 * std::f64::consts::PI;

/// The global time accumulator.
#[derive(Debug, Clone, Default)]
pub struct SimTime {
    elapsed: f64,
    frame_count: u64,
}

impl SimTime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame at the given animation speed.
    ///
    /// Negative speeds are treated as zero so the accumulator never runs
    /// backwards. Returns the new elapsed value.
    pub fn advance(&mut self, speed: f32) -> f64 {
        self.elapsed += TIME_STEP * f64::from(speed.max(0.0));
        self.frame_count += 1;
        self.elapsed
    }

    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Elapsed time wrapped to [`PHASE_PERIOD`], for shaders and transforms.
    ///
    /// Equal to `elapsed` for the first `20 pi` units; after that it keeps
    /// full `f32` resolution where the raw value would not.
    #[inline]
    pub fn phase(&self) -> f32 {
        self.elapsed.rem_euclid(PHASE_PERIOD) as f32
    }

    /// Frames advanced since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }
}

/// Wall-clock frame rate tracking for the window title.
#[derive(Debug)]
pub struct FrameStats {
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: Instant::now(),
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Record a presented frame. Returns `true` when the FPS value changed.
    pub fn record_frame(&mut self) -> bool {
        self.frame_count += 1;

        let now = Instant::now();
        let since = now.duration_since(self.fps_update_time);
        if since >= self.fps_update_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / since.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            return true;
        }
        false
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_advance_scales_with_speed() {
        let mut time = SimTime::new();
        time.advance(0.3);
        assert!((time.elapsed() - 0.003).abs() < 1e-9);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_long_sessions_keep_advancing() {
        for (start, speed) in [(2048.0, 0.01), (65536.0, 0.3), (1.0e6, 0.01)] {
            let mut time = SimTime {
                elapsed: start,
                frame_count: 0,
            };
            let mut last_phase = time.phase();
            let mut phase_moves = 0;
            for _ in 0..1000 {
                time.advance(speed);
                if time.phase() != last_phase {
                    phase_moves += 1;
                }
                last_phase = time.phase();
            }
            let expected = start + 1000.0 * TIME_STEP * f64::from(speed);
            assert!((time.elapsed() - expected).abs() < 1e-6, "stalled at {start}");
            assert_eq!(phase_moves, 1000, "phase stalled at {start}");
        }
    }

    #[test]
    fn test_phase_matches_elapsed_then_wraps() {
        let mut time = SimTime::new();
        for _ in 0..500 {
            time.advance(1.0);
        }
        assert!((time.phase() - 5.0).abs() < 1e-5);

        let wrapped = SimTime {
            elapsed: PHASE_PERIOD + 1.5,
            frame_count: 0,
        };
        assert!((wrapped.phase() - 1.5).abs() < 1e-5);
        // Every motion is periodic in PHASE_PERIOD, so wrapping is invisible.
        let raw = wrapped.elapsed();
        let p = f64::from(wrapped.phase());
        assert!(((raw * 2.0).sin() - (p * 2.0).sin()).abs() < 1e-5);
        assert!(((raw * 0.5).sin() - (p * 0.5).sin()).abs() < 1e-5);
        assert!(((raw * 0.2).cos() - (p * 0.2).cos()).abs() < 1e-5);
        assert!(((raw * 0.1).sin() - (p * 0.1).sin()).abs() < 1e-5);
    }

    #[test]
    fn test_zero_speed_is_frozen() {
        let mut time = SimTime::new();
        time.advance(1.0);
        let before = time.elapsed();
        for _ in 0..50 {
            time.advance(0.0);
        }
        assert_eq!(time.elapsed(), before);
    }

    #[test]
    fn test_negative_speed_does_not_rewind() {
        let mut time = SimTime::new();
        time.advance(1.0);
        let before = time.elapsed();
        time.advance(-5.0);
        assert_eq!(time.elapsed(), before);
    }

    #[test]
    fn test_frame_stats() {
        let mut stats = FrameStats::new();
        assert!(!stats.record_frame());
        thread::sleep(Duration::from_millis(550));
        assert!(stats.record_frame());
        assert!(stats.fps() > 0.0);
        assert_eq!(stats.frames(), 2);
    }
}
