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

//! Fixed-timestep accumulator.
//!
//! Wall-clock frame times are converted into a whole number of simulation
//! steps plus a fractional interpolant for rendering. Both accumulators are
//! kept in exact integer arithmetic: one owed step is worth
//! `NANOS_PER_SEC` units, and every nanosecond of frame time adds `rate`
//! units. The step count after any sequence of frames summing to `T` is
//! therefore exactly `floor(T * rate)`, with no floating-point drift.

use std::time::Duration;
use tempo_core::{Game, Tick};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Largest `f32` strictly below 1.0.
const MAX_INTERPOLANT: f32 = 1.0 - f32::EPSILON / 2.0;

/// How rendering is gated for one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawPolicy {
    /// When set, every iteration renders.
    pub vsync: bool,
    /// Draw cap in frames per second while vsync is off. 0 means uncapped.
    pub max_draw_rate: u32,
}

impl DrawPolicy {
    fn is_capped(self) -> bool {
        !self.vsync && self.max_draw_rate > 0
    }
}

/// What happened during one call to [`FixedTimestep::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    /// Number of `update` calls made.
    pub updates: u32,
    /// Whether `render` was called.
    pub rendered: bool,
    /// Whether `on_running_slowly` was called.
    pub running_slowly: bool,
}

/// Converts frame times into fixed simulation steps and gated renders.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    update_rate: u32,
    step_secs: f32,
    update_acc: u128,
    draw_acc: u128,
    next_tick: u64,
}

impl FixedTimestep {
    /// Creates a timestep running `update_rate` steps per second.
    ///
    /// The rate must already be normalized; 0 is treated as 1.
    pub fn new(update_rate: u32) -> Self {
        let update_rate = update_rate.max(1);
        Self {
            update_rate,
            step_secs: 1.0 / update_rate as f32,
            update_acc: 0,
            draw_acc: 0,
            next_tick: 0,
        }
    }

    /// Steps per second.
    pub fn update_rate(&self) -> u32 {
        self.update_rate
    }

    /// Length of one step, rounded to the nanosecond.
    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(1) / self.update_rate
    }

    /// Number of steps taken since creation.
    pub fn ticks(&self) -> u64 {
        self.next_tick
    }

    /// Fraction of a step currently banked, in `[0, 1)` between iterations.
    pub fn interpolant(&self) -> f32 {
        let fraction = self.update_acc as f64 / NANOS_PER_SEC as f64;
        (fraction as f32).clamp(0.0, MAX_INTERPOLANT)
    }

    /// Feeds one iteration's frame time and runs the owed hooks on `game`.
    ///
    /// In order: `on_running_slowly` once if two or more steps are owed,
    /// `update` once per whole owed step, then `render` if the draw policy
    /// allows it.
    pub fn advance<G: Game + ?Sized>(
        &mut self,
        frame_time: Duration,
        policy: DrawPolicy,
        game: &mut G,
    ) -> FrameOutcome {
        let nanos = frame_time.as_nanos();
        self.update_acc += nanos * u128::from(self.update_rate);
        if policy.is_capped() {
            self.draw_acc += nanos * u128::from(policy.max_draw_rate);
        } else {
            // The draw budget only banks while a cap is in force.
            self.draw_acc = 0;
        }

        let mut outcome = FrameOutcome::default();

        if self.update_acc >= 2 * NANOS_PER_SEC {
            log::trace!(
                "Running slowly: {:.2} steps owed",
                self.update_acc as f64 / NANOS_PER_SEC as f64
            );
            game.on_running_slowly();
            outcome.running_slowly = true;
        }

        while self.update_acc >= NANOS_PER_SEC {
            let tick = Tick {
                index: self.next_tick,
                delta: self.step_secs,
            };
            game.update(&tick);
            self.update_acc -= NANOS_PER_SEC;
            self.next_tick += 1;
            outcome.updates += 1;
        }

        let render = if policy.is_capped() {
            let due = self.draw_acc > NANOS_PER_SEC;
            if due {
                self.draw_acc -= NANOS_PER_SEC;
            }
            due
        } else {
            true
        };

        if render {
            game.render(self.interpolant());
            outcome.rendered = true;
        }

        outcome
    }

    /// Drops any banked time.
    pub fn reset(&mut self) {
        self.update_acc = 0;
        self.draw_acc = 0;
    }
}
