// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Periodic reporting of update and draw counts.

use std::fmt;
use std::time::Duration;

/// Update/draw counts observed over one reporting interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateReport {
    /// Simulation updates performed during the interval.
    pub updates: u32,
    /// Frames rendered during the interval.
    pub draws: u32,
    /// Length of the interval.
    pub interval: Duration,
}

impl fmt::Display for RateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Updates: {} | Draws: {}", self.updates, self.draws)
    }
}

/// Counts loop activity and emits a [`RateReport`] once per interval.
///
/// Time is fed in by the caller as frame durations, so the monitor follows
/// whatever clock drives the loop.
#[derive(Debug, Clone)]
pub struct RateMonitor {
    interval: Duration,
    elapsed: Duration,
    updates: u32,
    draws: u32,
}

impl RateMonitor {
    /// Creates a monitor reporting every `interval`. A zero interval falls
    /// back to one second.
    pub fn new(interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            Duration::from_secs(1)
        } else {
            interval
        };
        Self {
            interval,
            elapsed: Duration::ZERO,
            updates: 0,
            draws: 0,
        }
    }

    /// Records the activity of one loop iteration.
    pub fn record(&mut self, updates: u32, rendered: bool) {
        self.updates = self.updates.saturating_add(updates);
        if rendered {
            self.draws = self.draws.saturating_add(1);
        }
    }

    /// Advances the monitor by `frame_time`.
    ///
    /// Returns a report and resets the counters once a full interval has
    /// elapsed. Leftover time carries into the next interval.
    pub fn tick(&mut self, frame_time: Duration) -> Option<RateReport> {
        self.elapsed = self.elapsed.saturating_add(frame_time);
        if self.elapsed < self.interval {
            return None;
        }

        // A very long frame spans several intervals; only one report is emitted.
        let leftover = self.elapsed.as_nanos() % self.interval.as_nanos();
        self.elapsed = Duration::from_nanos(u64::try_from(leftover).unwrap_or(u64::MAX));
        let report = RateReport {
            updates: self.updates,
            draws: self.draws,
            interval: self.interval,
        };
        self.updates = 0;
        self.draws = 0;
        Some(report)
    }
}

impl Default for RateMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_after_full_interval() {
        let mut monitor = RateMonitor::default();
        for _ in 0..59 {
            monitor.record(1, true);
            assert!(monitor.tick(Duration::from_millis(16)).is_none());
        }
        monitor.record(2, false);
        let report = monitor
            .tick(Duration::from_millis(100))
            .expect("interval should have elapsed");
        assert_eq!(report.updates, 61);
        assert_eq!(report.draws, 59);
        assert_eq!(report.to_string(), "Updates: 61 | Draws: 59");
    }

    #[test]
    fn test_counters_reset_after_report() {
        let mut monitor = RateMonitor::new(Duration::from_millis(100));
        monitor.record(3, true);
        assert!(monitor.tick(Duration::from_millis(100)).is_some());

        monitor.record(1, false);
        let report = monitor.tick(Duration::from_millis(100)).unwrap();
        assert_eq!(report.updates, 1);
        assert_eq!(report.draws, 0);
    }

    #[test]
    fn test_leftover_time_carries_over() {
        let mut monitor = RateMonitor::new(Duration::from_millis(100));
        assert!(monitor.tick(Duration::from_millis(150)).is_some());
        assert!(monitor.tick(Duration::from_millis(40)).is_none());
        assert!(monitor.tick(Duration::from_millis(10)).is_some());
    }

    #[test]
    fn test_long_frame_emits_single_report() {
        let mut monitor = RateMonitor::new(Duration::from_millis(100));
        assert!(monitor.tick(Duration::from_millis(350)).is_some());
        assert!(monitor.tick(Duration::from_millis(40)).is_none());
        assert!(monitor.tick(Duration::from_millis(10)).is_some());
    }

    #[test]
    fn test_clock_jump_keeps_only_leftover() {
        let mut monitor = RateMonitor::new(Duration::from_millis(1));
        let year = Duration::from_secs(365 * 24 * 3600) + Duration::from_micros(400);
        assert!(monitor.tick(year).is_some());
        assert!(monitor.tick(Duration::from_micros(500)).is_none());
        assert!(monitor.tick(Duration::from_micros(100)).is_some());
    }

    #[test]
    fn test_zero_interval_falls_back_to_one_second() {
        let mut monitor = RateMonitor::new(Duration::ZERO);
        assert!(monitor.tick(Duration::from_millis(999)).is_none());
        assert!(monitor.tick(Duration::from_millis(1)).is_some());
    }
}
