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

use super::state::{ProcessState, StateCell};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_PROCESS_ID: AtomicU64 = AtomicU64::new(1);

/// A process-wide unique identifier, assigned at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId(u64);

impl ProcessId {
    pub(crate) fn next() -> Self {
        Self(NEXT_PROCESS_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
struct Shared {
    id: ProcessId,
    state: StateCell,
}

/// A cloneable, thread-safe view over the lifecycle of one process.
///
/// Handles are passed to every [`Process`](super::Process) hook so a process can
/// finish or pause itself, and can be kept by application code to drive a
/// process that is queued in a chain or owned by a scheduler.
///
/// All transition methods return `true` when the transition happened and
/// `false` when it was not permitted from the current state.
#[derive(Clone)]
pub struct ProcessHandle {
    shared: Arc<Shared>,
}

impl ProcessHandle {
    pub(crate) fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                id: ProcessId::next(),
                state: StateCell::default(),
            }),
        }
    }

    /// The identifier of the process.
    pub fn id(&self) -> ProcessId {
        self.shared.id
    }

    /// The current lifecycle state.
    pub fn state(&self) -> ProcessState {
        self.shared.state.load()
    }

    /// `true` while running or paused.
    pub fn is_alive(&self) -> bool {
        self.state().is_alive()
    }

    /// `true` once succeeded, failed or aborted.
    pub fn is_dead(&self) -> bool {
        self.state().is_dead()
    }

    /// Running -> Paused.
    pub fn pause(&self) -> bool {
        self.shared
            .state
            .transition(|s| s == ProcessState::Running, ProcessState::Paused)
    }

    /// Paused -> Running.
    pub fn resume(&self) -> bool {
        self.shared
            .state
            .transition(|s| s == ProcessState::Paused, ProcessState::Running)
    }

    /// Ends the process as a success.
    pub fn succeed(&self) -> bool {
        self.shared.state.transition(|_| true, ProcessState::Succeeded)
    }

    /// Ends the process as a failure.
    pub fn fail(&self) -> bool {
        self.shared.state.transition(|_| true, ProcessState::Failed)
    }

    /// Cancels the process. Its chain will not run.
    pub fn abort(&self) -> bool {
        self.shared.state.transition(|_| true, ProcessState::Aborted)
    }

    /// Uninitialized -> Running, performed by the scheduler after `initialize`.
    pub(crate) fn mark_running(&self) -> bool {
        self.shared
            .state
            .transition(|s| s == ProcessState::Uninitialized, ProcessState::Running)
    }
}

impl PartialEq for ProcessHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl Eq for ProcessHandle {}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("id", &self.id())
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> ProcessHandle {
        let handle = ProcessHandle::new();
        assert!(handle.mark_running());
        handle
    }

    #[test]
    fn test_ids_are_unique() {
        let a = ProcessHandle::new();
        let b = ProcessHandle::new();
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_pause_only_from_running() {
        let handle = ProcessHandle::new();
        assert!(!handle.pause());
        assert_eq!(handle.state(), ProcessState::Uninitialized);

        let handle = running();
        assert!(handle.pause());
        assert_eq!(handle.state(), ProcessState::Paused);
        assert!(!handle.pause());
    }

    #[test]
    fn test_resume_only_from_paused() {
        let handle = running();
        assert!(!handle.resume());
        handle.pause();
        assert!(handle.resume());
        assert_eq!(handle.state(), ProcessState::Running);
    }

    #[test]
    fn test_succeed_and_fail_tolerated_from_uninitialized() {
        let handle = ProcessHandle::new();
        assert!(handle.succeed());
        assert_eq!(handle.state(), ProcessState::Succeeded);

        let handle = ProcessHandle::new();
        assert!(handle.fail());
        assert_eq!(handle.state(), ProcessState::Failed);
    }

    #[test]
    fn test_terminal_states_are_sticky() {
        let handle = running();
        assert!(handle.succeed());
        assert!(!handle.fail());
        assert!(!handle.abort());
        assert!(!handle.resume());
        assert!(!handle.mark_running());
        assert_eq!(handle.state(), ProcessState::Succeeded);

        let handle = running();
        handle.pause();
        assert!(handle.abort());
        assert!(!handle.succeed());
        assert_eq!(handle.state(), ProcessState::Aborted);
    }

    #[test]
    fn test_alive_and_dead_are_exclusive() {
        let handle = running();
        assert!(handle.is_alive() && !handle.is_dead());
        handle.pause();
        assert!(handle.is_alive() && !handle.is_dead());
        handle.fail();
        assert!(!handle.is_alive() && handle.is_dead());
    }

    #[test]
    fn test_handle_is_shared_across_threads() {
        let handle = running();
        let remote = handle.clone();
        std::thread::spawn(move || {
            remote.pause();
        })
        .join()
        .expect("Thread join failed");
        assert_eq!(handle.state(), ProcessState::Paused);
    }
}
