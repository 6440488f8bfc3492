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

//! Time sources for the loop.
//!
//! The loop only ever asks a [`Clock`] for "now" and differences consecutive
//! readings, so swapping [`SystemClock`] for one of the simulated clocks makes
//! every loop run fully deterministic.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A monotonic time source.
pub trait Clock: Send + 'static {
    /// Time elapsed since an arbitrary, fixed origin.
    fn now(&self) -> Duration;
}

/// Wall-clock time backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Creates a clock whose origin is the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same reading, so a test can keep one clone and advance
/// the time seen by a loop running on another thread.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock reading zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.nanos.fetch_add(duration_nanos(by), Ordering::AcqRel);
    }

    /// Sets the absolute reading.
    pub fn set(&self, at: Duration) {
        self.nanos.store(duration_nanos(at), Ordering::Release);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Acquire))
    }
}

/// A clock that advances by a fixed step every time it is read.
///
/// The first reading is zero. A loop reads the clock once per iteration, so
/// each iteration observes a frame time of exactly `step`.
#[derive(Debug)]
pub struct SteppedClock {
    step: Duration,
    reads: AtomicU64,
}

impl SteppedClock {
    /// Creates a clock advancing by `step` per reading.
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            reads: AtomicU64::new(0),
        }
    }

    /// A clock stepping at `hz` readings per simulated second.
    pub fn from_hz(hz: u32) -> Self {
        Self::new(Duration::from_secs(1) / hz.max(1))
    }
}

impl Clock for SteppedClock {
    fn now(&self) -> Duration {
        let reads = self.reads.fetch_add(1, Ordering::AcqRel);
        self.step.saturating_mul(u32::try_from(reads).unwrap_or(u32::MAX))
    }
}

fn duration_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now();
        std::thread::sleep(Duration::from_millis(5));
        assert!(clock.now() > first);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let remote = clock.clone();
        assert_eq!(clock.now(), Duration::ZERO);

        remote.advance(Duration::from_millis(16));
        remote.advance(Duration::from_millis(4));
        assert_eq!(clock.now(), Duration::from_millis(20));

        clock.set(Duration::from_secs(3));
        assert_eq!(remote.now(), Duration::from_secs(3));
    }

    #[test]
    fn test_stepped_clock_advances_per_read() {
        let clock = SteppedClock::new(Duration::from_millis(10));
        assert_eq!(clock.now(), Duration::ZERO);
        assert_eq!(clock.now(), Duration::from_millis(10));
        assert_eq!(clock.now(), Duration::from_millis(20));
    }

    #[test]
    fn test_stepped_clock_from_hz() {
        let clock = SteppedClock::from_hz(50);
        clock.now();
        assert_eq!(clock.now(), Duration::from_millis(20));
    }
}
