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

//! Contract between the loop and its windowing/graphics collaborator.
//!
//! The loop never talks to a window system directly. It creates the surface,
//! asks whether a close was requested, presents, and polls focus events through
//! the [`Platform`] trait. [`HeadlessPlatform`] implements it without a display.

mod headless;

pub use headless::HeadlessPlatform;

use crate::error::PlatformError;
use serde::{Deserialize, Serialize};

/// Parameters for creating the renderable surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Window title.
    pub title: String,
    /// Initial width in pixels.
    pub width: u32,
    /// Initial height in pixels.
    pub height: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            title: "Tempo".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// An event raised by the platform and consumed by the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// The surface gained (`true`) or lost (`false`) focus.
    Focus(bool),
    /// The user asked to close the surface.
    CloseRequested,
}

/// A windowing/graphics backend driven by the loop's worker thread.
///
/// All methods are called from the worker thread only.
pub trait Platform: Send + 'static {
    /// Creates the renderable surface. An error aborts startup before any game
    /// hook runs.
    fn create_surface(&mut self, config: &SurfaceConfig) -> Result<(), PlatformError>;

    /// Whether the surface asked to be closed. Polled once per iteration.
    fn should_close(&self) -> bool;

    /// Drains the events received since the previous call.
    fn poll_events(&mut self) -> Vec<PlatformEvent>;

    /// Presents the frame (buffer swap).
    fn present(&mut self);

    /// Synchronizes presentation with the display refresh, or stops doing so.
    fn set_vsync(&mut self, enabled: bool);

    /// Releases the surface. Called once, after the game's exit hook.
    fn release(&mut self);
}
