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

//! Cooperative scheduler for process chains.

use crate::error::SchedulerError;
use crate::process::{ProcessHandle, ProcessNode, ProcessState};

/// Owns the active processes and drives their lifecycle once per tick.
///
/// Processes are updated in insertion order. When a process succeeds, its
/// child is appended to the active set after the current pass, so it is
/// initialized on the *next* call to [`update`](Self::update). When a process
/// fails or is aborted, its whole chain is dropped.
///
/// The scheduler is single-threaded: it is meant to be owned by whatever runs
/// the simulation tick, usually a [`Game`](crate::Game) implementation.
#[derive(Debug, Default)]
pub struct ProcessScheduler {
    processes: Vec<ProcessNode>,
}

impl ProcessScheduler {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a process to the active set.
    ///
    /// Only uninitialized or alive processes are accepted. A process that
    /// already reached a terminal state is rejected and dropped.
    pub fn add_process(&mut self, process: ProcessNode) -> Result<ProcessHandle, SchedulerError> {
        let state = process.state();
        if state != ProcessState::Uninitialized && !state.is_alive() {
            log::debug!("Rejecting process {}: already {:?}", process.id(), state);
            return Err(SchedulerError::TerminalProcess {
                id: process.id(),
                state,
            });
        }

        log::trace!("Scheduling process {}", process.id());
        let handle = process.handle();
        self.processes.push(process);
        Ok(handle)
    }

    /// Advances every active process by one tick of `delta` seconds.
    ///
    /// Processes stay in place until they are visited, so a panicking hook
    /// leaves the rest of the set untouched.
    pub fn update(&mut self, delta: f32) {
        let mut promoted = Vec::new();
        let mut index = 0;

        while index < self.processes.len() {
            let process = &mut self.processes[index];
            if process.state() == ProcessState::Uninitialized {
                process.initialize();
                log::debug!("Process {} initialized", process.id());
            }

            if process.state() == ProcessState::Running {
                process.update(delta);
            }

            if !process.is_dead() {
                index += 1;
                continue;
            }

            let process = self.processes.remove(index);
            let id = process.id();
            log::debug!("Process {} finished as {:?}", id, process.state());
            if let Some(child) = process.finish() {
                log::debug!("Promoting process {} after {}", child.id(), id);
                promoted.push(child);
            }
        }

        for child in promoted {
            // A queued child may have been ended through its handle; that
            // rejection is already logged by `add_process`.
            let _ = self.add_process(child);
        }
    }

    /// Aborts every active process and empties the scheduler.
    ///
    /// Each process receives exactly one terminal hook. Processes that already
    /// ended but were not yet observed keep their own terminal state.
    pub fn abort_all(&mut self) {
        for process in self.processes.drain(..) {
            process.abort();
            // Chains of aborted processes never run.
            let _ = process.finish();
        }
    }

    /// Number of active processes.
    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    /// `true` when no process is active.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Process;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct Counters {
        updates: AtomicU32,
        aborts: AtomicU32,
    }

    struct Counting(Arc<Counters>);

    impl Process for Counting {
        fn initialize(&mut self, _: &ProcessHandle) {}
        fn update(&mut self, _: f32, _: &ProcessHandle) {
            self.0.updates.fetch_add(1, Ordering::SeqCst);
        }
        fn on_abort(&mut self) {
            self.0.aborts.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn counting() -> (ProcessNode, Arc<Counters>) {
        let counters = Arc::new(Counters::default());
        (ProcessNode::new(Counting(Arc::clone(&counters))), counters)
    }

    #[test]
    fn test_add_rejects_terminal_process() {
        let mut scheduler = ProcessScheduler::new();
        let (node, _) = counting();
        let id = node.id();
        node.succeed();

        let err = scheduler.add_process(node).unwrap_err();
        assert_eq!(
            err,
            SchedulerError::TerminalProcess {
                id,
                state: ProcessState::Succeeded
            }
        );
        assert_eq!(scheduler.process_count(), 0);
    }

    #[test]
    fn test_add_accepts_alive_process() {
        let mut scheduler = ProcessScheduler::new();
        let (mut node, _) = counting();
        node.initialize();
        node.pause();
        assert!(scheduler.add_process(node).is_ok());
        assert_eq!(scheduler.process_count(), 1);
    }

    #[test]
    fn test_paused_process_is_skipped_but_kept() {
        let mut scheduler = ProcessScheduler::new();
        let (node, counters) = counting();
        let handle = scheduler.add_process(node).unwrap();

        scheduler.update(0.016);
        assert_eq!(counters.updates.load(Ordering::SeqCst), 1);

        handle.pause();
        scheduler.update(0.016);
        scheduler.update(0.016);
        assert_eq!(counters.updates.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.process_count(), 1);

        handle.resume();
        scheduler.update(0.016);
        assert_eq!(counters.updates.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_abort_all_fires_hooks_and_empties() {
        let mut scheduler = ProcessScheduler::new();
        let (first, first_counters) = counting();
        let (second, second_counters) = counting();
        let (child, child_counters) = counting();
        let first_handle = scheduler.add_process(first.then(child)).unwrap();
        scheduler.add_process(second).unwrap();
        scheduler.update(0.016);

        scheduler.abort_all();

        assert!(scheduler.is_empty());
        assert_eq!(first_handle.state(), ProcessState::Aborted);
        assert_eq!(first_counters.aborts.load(Ordering::SeqCst), 1);
        assert_eq!(second_counters.aborts.load(Ordering::SeqCst), 1);
        assert_eq!(child_counters.aborts.load(Ordering::SeqCst), 0);
    }

    struct Exploding;

    impl Process for Exploding {
        fn initialize(&mut self, _: &ProcessHandle) {}
        fn update(&mut self, _: f32, _: &ProcessHandle) {
            panic!("update hook failed");
        }
    }

    #[test]
    fn test_panicking_hook_keeps_unvisited_processes() {
        let mut scheduler = ProcessScheduler::new();
        let (first, first_counters) = counting();
        let (last, last_counters) = counting();
        scheduler.add_process(first).unwrap();
        scheduler.add_process(ProcessNode::new(Exploding)).unwrap();
        scheduler.add_process(last).unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            scheduler.update(0.016);
        }));

        assert!(result.is_err());
        assert_eq!(scheduler.process_count(), 3);
        assert_eq!(first_counters.updates.load(Ordering::SeqCst), 1);
        assert_eq!(last_counters.updates.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_update_on_empty_scheduler_is_noop() {
        let mut scheduler = ProcessScheduler::new();
        scheduler.update(0.016);
        assert!(scheduler.is_empty());
    }
}
