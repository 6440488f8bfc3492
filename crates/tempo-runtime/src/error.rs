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

//! Errors raised while configuring, starting or running the loop.

use std::io;
use tempo_core::PlatformError;
use thiserror::Error;

/// Errors produced by the [`GameLoop`](crate::GameLoop).
#[derive(Debug, Error)]
pub enum LoopError {
    /// The worker thread could not be spawned.
    #[error("failed to spawn loop thread: {0}")]
    Spawn(#[source] io::Error),
    /// The platform failed during startup.
    #[error(transparent)]
    Platform(#[from] PlatformError),
    /// The worker thread panicked.
    #[error("loop thread '{0}' panicked")]
    WorkerPanicked(String),
    /// The loop was never started, so there is no outcome to collect.
    #[error("loop was never started")]
    NotStarted,
    /// A configuration file could not be read.
    #[error("failed to read loop configuration: {0}")]
    ConfigIo(#[source] io::Error),
    /// A configuration document could not be parsed.
    #[error("invalid loop configuration: {0}")]
    Config(#[from] serde_json::Error),
}
