use std::time::Duration;

use kcol_core::Color;
use serde::{Deserialize, Serialize};

/// Outcome of a single coloring run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatTracker {
    /// Wall-clock time spent coloring, in nanoseconds.
    pub duration_ns: u64,
    /// Highest color assigned, which equals the number of distinct colors used.
    pub colors_used: Color,
    /// Whether the verifier accepted the coloring.
    pub correct: bool,
}

impl StatTracker {
    /// Builds a tracker from a measured duration.
    pub fn new(duration: Duration, colors_used: Color, correct: bool) -> Self {
        Self {
            duration_ns: u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX),
            colors_used,
            correct,
        }
    }

    /// Elapsed coloring time.
    pub fn duration(&self) -> Duration {
        Duration::from_nanos(self.duration_ns)
    }

    /// Colors used beyond the planted `k`; `0` means the planted bound was met.
    pub fn k_correctness(&self, k: usize) -> i64 {
        i64::from(self.colors_used) - k as i64
    }
}

/// Running totals over repeated trials of one policy.
///
/// Only sums are kept; averages are derived on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsCollector {
    /// Number of trackers merged so far.
    pub trials: u64,
    /// Sum of durations in nanoseconds.
    pub total_duration_ns: u64,
    /// Sum of colors used.
    pub total_colors_used: u64,
    /// Number of trials whose coloring was rejected.
    pub failures: u64,
}

impl StatsCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one trial into the totals.
    pub fn add_tracker(&mut self, tracker: &StatTracker) {
        self.trials += 1;
        self.total_duration_ns = self.total_duration_ns.saturating_add(tracker.duration_ns);
        self.total_colors_used += u64::from(tracker.colors_used);
        if !tracker.correct {
            self.failures += 1;
        }
    }

    /// Folds another collector into this one.
    pub fn merge(&mut self, other: &StatsCollector) {
        self.trials += other.trials;
        self.total_duration_ns = self.total_duration_ns.saturating_add(other.total_duration_ns);
        self.total_colors_used += other.total_colors_used;
        self.failures += other.failures;
    }

    /// True while no contributing trial failed.
    pub fn is_correct(&self) -> bool {
        self.failures == 0
    }

    /// Mean duration in nanoseconds, `None` before the first trial.
    pub fn mean_duration_ns(&self) -> Option<u64> {
        (self.trials > 0).then(|| self.total_duration_ns / self.trials)
    }

    /// Mean number of colors used, `None` before the first trial.
    pub fn mean_colors_used(&self) -> Option<f64> {
        (self.trials > 0).then(|| self.total_colors_used as f64 / self.trials as f64)
    }
}
