//! Frame timing utilities.
//!
//! Frame logs carry monotonic timestamps relative to the first frame plus
//! a wall-clock stamp of when the log was produced. This module provides:
//! - Mapping frame indices to timestamps at a nominal frame rate
//! - Converting between nanoseconds and seconds

/// Monotonic timestamp in nanoseconds since the first frame.
pub type TimestampNs = u64;

/// A frame clock anchored at a wall-clock epoch.
#[derive(Debug, Clone)]
pub struct FrameClock {
    fps: u32,
    frame_interval_ns: u64,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl FrameClock {
    /// Create a clock for the given frame rate, anchored to now.
    ///
    /// A rate of zero is treated as 1 fps.
    pub fn start(fps: u32) -> Self {
        Self::from_epoch(fps, chrono::Utc::now().to_rfc3339())
    }

    /// Create a clock from a known wall-clock epoch.
    pub fn from_epoch(fps: u32, wall: String) -> Self {
        let fps = fps.max(1);
        Self {
            fps,
            frame_interval_ns: 1_000_000_000 / fps as u64,
            epoch_wall: wall,
        }
    }

    /// Timestamp of the frame at `index`.
    pub fn timestamp_ns(&self, index: u64) -> TimestampNs {
        index.saturating_mul(self.frame_interval_ns)
    }

    /// Nominal frame rate.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Interval between frames in nanoseconds.
    pub fn frame_interval_ns(&self) -> u64 {
        self.frame_interval_ns
    }

    /// Wall-clock time at epoch.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// Convert an elapsed nanosecond value to seconds.
    pub fn ns_to_secs(ns: u64) -> f64 {
        ns as f64 / 1_000_000_000.0
    }

    /// Convert seconds to nanoseconds.
    pub fn secs_to_ns(secs: f64) -> u64 {
        (secs * 1_000_000_000.0) as u64
    }
}
