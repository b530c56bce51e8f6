//! Scoring module - line-clear points and the descent speed curve
//!
//! Scoring is linear: every cleared line is worth the same, however many clear
//! at once. Speed depends only on elapsed play time.

/// Points for clearing `lines` rows in a single lock.
pub fn line_clear_points(lines: u32, points_per_line: u32) -> u32 {
    lines.saturating_mul(points_per_line)
}

/// Display-only "blocks per minute" for a descent interval.
pub fn blocks_per_minute(interval_ms: u32) -> u32 {
    if interval_ms == 0 {
        return 0;
    }
    60_000 / interval_ms
}

/// Descent interval as a function of elapsed play time
///
/// The interval starts at `initial_ms`, loses `step_ms` at every whole
/// `every_ms` of elapsed time, and never drops below `min_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedCurve {
    pub initial_ms: u32,
    pub min_ms: u32,
    pub step_ms: u32,
    pub every_ms: u64,
}

impl SpeedCurve {
    /// Number of speed-ups reached after `elapsed_ms`.
    pub fn steps_at(&self, elapsed_ms: u64) -> u64 {
        if self.every_ms == 0 {
            return 0;
        }
        elapsed_ms / self.every_ms
    }

    pub fn interval_at(&self, elapsed_ms: u64) -> u32 {
        let steps = u32::try_from(self.steps_at(elapsed_ms)).unwrap_or(u32::MAX);
        let reduction = steps.saturating_mul(self.step_ms);
        self.initial_ms.saturating_sub(reduction).max(self.min_ms)
    }
}
