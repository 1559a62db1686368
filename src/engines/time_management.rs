//! Per-move time budgets.
//!
//! A search gets one wall-clock deadline shared by every iterative-deepening
//! pass. Callers choose how that deadline is derived.

use std::time::{Duration, Instant};

/// Longest budget honored; larger requests are clamped.
pub const MAX_BUDGET: Duration = Duration::from_secs(60 * 60 * 24);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBudget {
    /// Whole seconds of thinking time; the classic difficulty knob.
    Difficulty(u32),
    /// Exact duration.
    Fixed(Duration),
    /// Spend a fraction of the remaining game clock.
    ClockFraction { remaining: Duration, moves_left: u32 },
}

impl Default for TimeBudget {
    fn default() -> Self {
        TimeBudget::Difficulty(1)
    }
}

impl TimeBudget {
    pub fn duration(&self) -> Duration {
        let raw = match *self {
            TimeBudget::Difficulty(seconds) => Duration::from_secs(u64::from(seconds)),
            TimeBudget::Fixed(duration) => duration,
            TimeBudget::ClockFraction {
                remaining,
                moves_left,
            } => remaining / moves_left.max(1),
        };
        raw.min(MAX_BUDGET)
    }

    /// Deadline for a search started at `start`.
    pub fn deadline_from(&self, start: Instant) -> Instant {
        start.checked_add(self.duration()).unwrap_or(start)
    }
}
