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

use super::{Platform, PlatformEvent, SurfaceConfig};
use crate::error::PlatformError;
use crossbeam_channel::{Receiver, Sender};

/// A platform without a display.
///
/// Events are injected through [`event_sender`](Self::event_sender) from any
/// thread. The platform requests a close when it receives
/// [`PlatformEvent::CloseRequested`] or, when configured, after a fixed number
/// of presented frames.
#[derive(Debug)]
pub struct HeadlessPlatform {
    event_tx: Sender<PlatformEvent>,
    event_rx: Receiver<PlatformEvent>,
    frame_limit: Option<u64>,
    fail_surface: bool,
    surface: Option<SurfaceConfig>,
    close_requested: bool,
    presents: u64,
    vsync_changes: Vec<bool>,
    released: bool,
}

impl HeadlessPlatform {
    /// A headless platform that runs until a close is requested.
    pub fn new() -> Self {
        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        Self {
            event_tx,
            event_rx,
            frame_limit: None,
            fail_surface: false,
            surface: None,
            close_requested: false,
            presents: 0,
            vsync_changes: Vec::new(),
            released: false,
        }
    }

    /// Requests a close once `frames` frames were presented.
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// A platform whose surface creation always fails.
    pub fn failing() -> Self {
        Self {
            fail_surface: true,
            ..Self::new()
        }
    }

    /// Returns a sender to inject events.
    pub fn event_sender(&self) -> Sender<PlatformEvent> {
        self.event_tx.clone()
    }

    /// The surface configuration, once created.
    pub fn surface(&self) -> Option<&SurfaceConfig> {
        self.surface.as_ref()
    }

    /// Number of frames presented so far.
    pub fn presents(&self) -> u64 {
        self.presents
    }

    /// Every vsync setting applied, in order.
    pub fn vsync_changes(&self) -> &[bool] {
        &self.vsync_changes
    }

    /// Whether [`Platform::release`] was called.
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for HeadlessPlatform {
    fn create_surface(&mut self, config: &SurfaceConfig) -> Result<(), PlatformError> {
        if self.fail_surface {
            return Err(PlatformError::SurfaceCreation {
                title: config.title.clone(),
                reason: "headless surface configured to fail".to_string(),
            });
        }
        log::debug!(
            "Headless surface '{}' created ({}x{})",
            config.title,
            config.width,
            config.height
        );
        self.surface = Some(config.clone());
        Ok(())
    }

    fn should_close(&self) -> bool {
        self.close_requested
            || self
                .frame_limit
                .is_some_and(|limit| self.presents >= limit)
    }

    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        let events: Vec<_> = self.event_rx.try_iter().collect();
        if events.contains(&PlatformEvent::CloseRequested) {
            self.close_requested = true;
        }
        events
    }

    fn present(&mut self) {
        self.presents += 1;
    }

    fn set_vsync(&mut self, enabled: bool) {
        self.vsync_changes.push(enabled);
    }

    fn release(&mut self) {
        self.released = true;
    }
}
