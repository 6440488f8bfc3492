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

use crate::clock::{Clock, SystemClock};
use std::time::Duration;

/// Measures elapsed time and frame-to-frame laps against a [`Clock`].
#[derive(Debug, Clone)]
pub struct Stopwatch<C: Clock = SystemClock> {
    clock: C,
    start_time: Duration,
    last_lap: Duration,
}

impl Stopwatch<SystemClock> {
    /// Creates a new Stopwatch on the system clock, started now.
    /// ## Returns
    /// A new instance of the Stopwatch struct.
    #[inline]
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl<C: Clock> Stopwatch<C> {
    /// Creates a Stopwatch reading `clock`, started at its current time.
    /// ## Arguments
    /// * `clock` - The time source to measure against.
    pub fn with_clock(clock: C) -> Self {
        let now = clock.now();
        Self {
            clock,
            start_time: now,
            last_lap: now,
        }
    }

    /// Restarts both the total and the lap measurement.
    pub fn restart(&mut self) {
        let now = self.clock.now();
        self.start_time = now;
        self.last_lap = now;
    }

    /// Returns the time since the previous lap (or since start) and begins a new lap.
    /// ## Returns
    /// The lap length. A clock that moved backwards yields `Duration::ZERO`.
    pub fn lap(&mut self) -> Duration {
        let now = self.clock.now();
        let lap = now.saturating_sub(self.last_lap);
        self.last_lap = now;
        lap
    }

    /// Returns the elapsed time since the stopwatch was started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_sub(self.start_time)
    }

    /// Returns the elapsed time since the stopwatch was started in milliseconds.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    /// Returns the elapsed time since the stopwatch was started in seconds as f64.
    #[inline]
    pub fn elapsed_secs_f64(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    /// Returns a reference to the underlying clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl Default for Stopwatch<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}
