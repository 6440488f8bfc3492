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

//! Ready-made processes for common chain building blocks.

use super::{Process, ProcessHandle};
use std::time::Duration;

/// Waits for a span of simulated time, then succeeds.
///
/// Time is summed from the `delta` passed by the scheduler, so a `Delay`
/// follows simulation time and pauses with its process.
#[derive(Debug, Clone)]
pub struct Delay {
    duration: f32,
    elapsed: f32,
}

impl Delay {
    /// Creates a delay lasting `duration` of simulated time.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration: duration.as_secs_f32(),
            elapsed: 0.0,
        }
    }

    /// Simulated seconds accumulated so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl Process for Delay {
    fn initialize(&mut self, handle: &ProcessHandle) {
        self.elapsed = 0.0;
        if self.duration <= 0.0 {
            handle.succeed();
        }
    }

    fn update(&mut self, delta: f32, handle: &ProcessHandle) {
        self.elapsed += delta;
        if self.elapsed >= self.duration {
            handle.succeed();
        }
    }
}

/// A process whose update is a closure.
///
/// The closure decides when the process ends by calling
/// [`ProcessHandle::succeed`] or [`ProcessHandle::fail`].
pub struct Callback<F> {
    update: F,
}

impl<F> Callback<F>
where
    F: FnMut(f32, &ProcessHandle) + Send,
{
    /// Wraps `update`.
    pub fn new(update: F) -> Self {
        Self { update }
    }
}

/// A callback that runs `action` on its first tick and succeeds.
pub fn once<A>(mut action: A) -> Callback<impl FnMut(f32, &ProcessHandle) + Send>
where
    A: FnMut() + Send,
{
    Callback::new(move |_: f32, handle: &ProcessHandle| {
        action();
        handle.succeed();
    })
}

impl<F> Process for Callback<F>
where
    F: FnMut(f32, &ProcessHandle) + Send,
{
    fn initialize(&mut self, _: &ProcessHandle) {}

    fn update(&mut self, delta: f32, handle: &ProcessHandle) {
        (self.update)(delta, handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ProcessNode, ProcessScheduler, ProcessState};
    use approx::assert_relative_eq;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_delay_succeeds_after_duration() {
        let node = ProcessNode::new(Delay::new(Duration::from_millis(100)));
        let handle = node.handle();
        let mut scheduler = ProcessScheduler::new();
        scheduler.add_process(node).unwrap();

        for _ in 0..3 {
            scheduler.update(0.03);
            assert_ne!(handle.state(), ProcessState::Succeeded);
        }
        scheduler.update(0.03);
        assert_eq!(handle.state(), ProcessState::Succeeded);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_delay_tracks_elapsed_time() {
        let mut delay = Delay::new(Duration::from_secs(1));
        let handle = ProcessNode::new(Delay::new(Duration::ZERO)).handle();
        delay.initialize(&handle);
        delay.update(0.25, &handle);
        delay.update(0.25, &handle);
        assert_relative_eq!(delay.elapsed(), 0.5);
    }

    #[test]
    fn test_zero_delay_succeeds_on_first_tick() {
        let node = ProcessNode::new(Delay::new(Duration::ZERO));
        let handle = node.handle();
        let mut scheduler = ProcessScheduler::new();
        scheduler.add_process(node).unwrap();
        scheduler.update(0.016);
        assert_eq!(handle.state(), ProcessState::Succeeded);
    }

    #[test]
    fn test_callback_once_runs_a_single_time() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let mut scheduler = ProcessScheduler::new();
        scheduler
            .add_process(ProcessNode::new(once(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })))
            .unwrap();

        for _ in 0..3 {
            scheduler.update(0.016);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(scheduler.is_empty());
    }
}
