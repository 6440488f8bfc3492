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

//! # Tempo Runtime
//!
//! The fixed-timestep accumulator and the threaded [`GameLoop`] that drives a
//! [`Game`](tempo_core::Game) against a [`Platform`](tempo_core::Platform).

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod game_loop;
pub mod settings;
pub mod timestep;

pub use config::LoopConfig;
pub use error::LoopError;
pub use game_loop::{GameLoop, LoopOutcome, LoopStats};
pub use settings::LoopSettings;
pub use timestep::{DrawPolicy, FixedTimestep, FrameOutcome};
