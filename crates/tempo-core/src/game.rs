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

//! The hook surface a game implements to be driven by the loop.

/// One fixed simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Zero-based index of this step since the loop started.
    pub index: u64,
    /// Length of the step in seconds. Constant for the loop's lifetime.
    pub delta: f32,
}

/// Application hooks invoked by the game loop.
///
/// Every hook runs sequentially on the loop's worker thread, so a game never
/// has to guard its own state against the loop.
pub trait Game: Send + 'static {
    /// Called once on the worker thread, after the platform surface exists and
    /// before the first tick.
    fn initialize(&mut self);

    /// Called once per fixed simulation step.
    ///
    /// A game that owns a [`ProcessScheduler`](crate::ProcessScheduler) forwards
    /// `tick.delta` to it from here.
    fn update(&mut self, tick: &Tick);

    /// Called whenever a frame may be drawn.
    ///
    /// `interpolant` lies in `[0, 1)` and is the fraction of a step that has
    /// elapsed since the last update, for blending the last two states.
    fn render(&mut self, interpolant: f32);

    /// Called exactly once when the loop exits.
    fn on_exiting(&mut self) {}

    /// Called when the platform surface gains focus.
    fn on_activated(&mut self) {}

    /// Called when the platform surface loses focus.
    fn on_deactivated(&mut self) {}

    /// Called when at least two steps are owed in a single iteration, i.e. the
    /// simulation is falling behind real time. Updates are not skipped.
    fn on_running_slowly(&mut self) {}
}
