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

//! Chainable units of work advanced by the [`ProcessScheduler`](crate::ProcessScheduler).
//!
//! A process is split in three pieces:
//! * [`Process`]: the behaviour hooks an application implements,
//! * [`ProcessNode`]: the owned node that carries the behaviour and its queued child,
//! * [`ProcessHandle`]: a cloneable view over the lifecycle state, usable after the
//!   node itself moved into a chain or into a scheduler.
//!
//! # Example
//!
//! A timed bomb is a [`Delay`](builtin::Delay) followed by an explosion:
//!
//! ```
//! use std::time::Duration;
//! use tempo_core::process::builtin::{Callback, Delay};
//! use tempo_core::{ProcessNode, ProcessScheduler};
//!
//! let mut fuse = ProcessNode::new(Delay::new(Duration::from_millis(50)));
//! fuse.attach_child(ProcessNode::new(Callback::new(|_, handle| {
//!     handle.succeed();
//! })));
//!
//! let mut scheduler = ProcessScheduler::new();
//! scheduler.add_process(fuse).unwrap();
//! while !scheduler.is_empty() {
//!     scheduler.update(0.016);
//! }
//! ```

pub mod builtin;
mod handle;
mod node;
mod state;

pub use handle::{ProcessHandle, ProcessId};
pub use node::{Process, ProcessNode};
pub use state::ProcessState;
