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

//! Loop configuration.

use crate::error::LoopError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tempo_core::SurfaceConfig;

/// Update rate used when the configured one is not positive.
pub const DEFAULT_UPDATE_RATE: u32 = 60;

/// Configuration of a [`GameLoop`](crate::GameLoop).
///
/// Every field has a default, so a JSON document only needs the fields it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Name of the loop; also the worker thread name.
    pub name: String,
    /// Simulation updates per second. Non-positive values mean
    /// [`DEFAULT_UPDATE_RATE`].
    pub update_rate: i64,
    /// Draw cap in frames per second while vsync is off. Non-positive values
    /// remove the cap.
    pub max_draw_rate: i64,
    /// Whether presentation is synchronized with the display refresh.
    pub vsync: bool,
    /// How often update/draw counts are logged, in milliseconds.
    pub report_interval_ms: u64,
    /// Surface handed to the platform at startup.
    pub surface: SurfaceConfig,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            name: "tempo".to_string(),
            update_rate: DEFAULT_UPDATE_RATE as i64,
            max_draw_rate: 0,
            vsync: true,
            report_interval_ms: 1000,
            surface: SurfaceConfig::default(),
        }
    }
}

impl LoopConfig {
    /// Parses a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, LoopError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoopError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(LoopError::ConfigIo)?;
        log::info!("Loaded loop configuration from {}", path.display());
        Self::from_json_str(&json)
    }

    /// The normalized update rate.
    pub fn effective_update_rate(&self) -> u32 {
        match u32::try_from(self.update_rate) {
            Ok(rate) if rate > 0 => rate,
            _ => {
                log::warn!(
                    "Update rate {} is not positive, using {} updates per second",
                    self.update_rate,
                    DEFAULT_UPDATE_RATE
                );
                DEFAULT_UPDATE_RATE
            }
        }
    }

    /// The normalized draw cap, 0 meaning uncapped.
    pub fn effective_max_draw_rate(&self) -> u32 {
        u32::try_from(self.max_draw_rate.max(0)).unwrap_or(u32::MAX)
    }

    /// The reporting interval.
    pub fn report_interval(&self) -> Duration {
        Duration::from_millis(self.report_interval_ms)
    }
}
