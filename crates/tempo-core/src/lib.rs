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

//! # Tempo Core
//!
//! Foundational crate containing the process state machine, the cooperative
//! process scheduler, and the contracts the game loop is built on: the
//! [`Game`] hook trait, the [`Platform`] collaborator trait and [`Clock`]
//! time sources.

#![warn(missing_docs)]

pub mod clock;
pub mod error;
pub mod game;
pub mod platform;
pub mod process;
pub mod scheduler;
pub mod utils;

pub use clock::{Clock, ManualClock, SteppedClock, SystemClock};
pub use error::{PlatformError, SchedulerError};
pub use game::{Game, Tick};
pub use platform::{HeadlessPlatform, Platform, PlatformEvent, SurfaceConfig};
pub use process::{Process, ProcessHandle, ProcessId, ProcessNode, ProcessState};
pub use scheduler::ProcessScheduler;
pub use utils::timer::Stopwatch;
