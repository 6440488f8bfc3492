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

//! Error types shared by the scheduler and the platform contract.

use crate::process::{ProcessId, ProcessState};
use thiserror::Error;

/// An error returned when the scheduler refuses a process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// The process already finished and can no longer be scheduled.
    #[error("process {id} is already {state:?} and cannot be scheduled")]
    TerminalProcess {
        /// The rejected process.
        id: ProcessId,
        /// The terminal state it was found in.
        state: ProcessState,
    },
}

/// An error raised by a [`Platform`](crate::platform::Platform) collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// The renderable surface could not be created. This is fatal for startup.
    #[error("failed to create surface '{title}': {reason}")]
    SurfaceCreation {
        /// Title of the surface that was requested.
        title: String,
        /// Backend-specific reason.
        reason: String,
    },
}
