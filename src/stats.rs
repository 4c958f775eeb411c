//! Poll timing statistics

use std::collections::VecDeque;
use std::time::Duration;

/// Rolling-window timing for update polls.
///
/// Display code uses this to show how long each poll takes; only the most
/// recent samples are kept.
#[derive(Debug)]
pub struct PollStats {
    samples: VecDeque<Duration>,
    max_samples: usize,
    total_polls: u64,
}

impl PollStats {
    /// Default number of samples kept.
    const DEFAULT_WINDOW: usize = 120;

    /// Create a tracker with the default window.
    #[must_use]
    pub fn new() -> Self {
        Self::with_window(Self::DEFAULT_WINDOW)
    }

    /// Create a tracker keeping the last `window` samples.
    #[must_use]
    pub fn with_window(window: usize) -> Self {
        let window = window.max(1);
        Self {
            samples: VecDeque::with_capacity(window),
            max_samples: window,
            total_polls: 0,
        }
    }

    /// Record one poll duration.
    pub fn record(&mut self, elapsed: Duration) {
        self.total_polls += 1;
        if self.samples.len() >= self.max_samples {
            self.samples.pop_front();
        }
        self.samples.push_back(elapsed);
    }

    /// Total polls recorded since creation.
    #[must_use]
    pub fn total_polls(&self) -> u64 {
        self.total_polls
    }

    /// Duration of the most recent poll.
    #[must_use]
    pub fn last(&self) -> Option<Duration> {
        self.samples.back().copied()
    }

    /// Average poll time over the window, in milliseconds.
    #[must_use]
    pub fn average_ms(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let total: Duration = self.samples.iter().sum();
        total.as_secs_f32() * 1000.0 / self.samples.len() as f32
    }

    /// Slowest poll in the window, in milliseconds.
    #[must_use]
    pub fn max_ms(&self) -> f32 {
        self.samples
            .iter()
            .max()
            .map_or(0.0, |d| d.as_secs_f32() * 1000.0)
    }
}

impl Default for PollStats {
    fn default() -> Self {
        Self::new()
    }
}
