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

//! Loop settings shared between the owner and the worker thread.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Draw cap and vsync flag, adjustable while the loop runs.
///
/// The worker reads both at the top of every iteration.
#[derive(Debug)]
pub struct LoopSettings {
    max_draw_rate: AtomicU32,
    vsync: AtomicBool,
}

impl LoopSettings {
    /// Creates settings with the given draw cap (0 = uncapped) and vsync flag.
    pub fn new(max_draw_rate: u32, vsync: bool) -> Self {
        Self {
            max_draw_rate: AtomicU32::new(max_draw_rate),
            vsync: AtomicBool::new(vsync),
        }
    }

    /// Draw cap in frames per second, 0 when uncapped.
    pub fn max_draw_rate(&self) -> u32 {
        self.max_draw_rate.load(Ordering::Acquire)
    }

    /// Sets the draw cap. 0 removes it.
    pub fn set_max_draw_rate(&self, rate: u32) {
        self.max_draw_rate.store(rate, Ordering::Release);
    }

    /// Whether vsync is requested.
    pub fn vsync(&self) -> bool {
        self.vsync.load(Ordering::Acquire)
    }

    /// Requests vsync on or off.
    pub fn set_vsync(&self, enabled: bool) {
        self.vsync.store(enabled, Ordering::Release);
    }
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self::new(0, true)
    }
}
