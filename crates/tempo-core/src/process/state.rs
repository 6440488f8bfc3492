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

use std::sync::atomic::{AtomicU8, Ordering};

/// The lifecycle state of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ProcessState {
    /// Created but not yet seen by a scheduler.
    #[default]
    Uninitialized = 0,
    /// Initialized and updated once per tick.
    Running = 1,
    /// Kept by the scheduler but not updated.
    Paused = 2,
    /// Finished successfully. Its child gets promoted.
    Succeeded = 3,
    /// Finished with a failure. Its chain is dropped.
    Failed = 4,
    /// Cancelled from the outside. Its chain is dropped.
    Aborted = 5,
}

impl ProcessState {
    /// `true` for [`Running`](Self::Running) and [`Paused`](Self::Paused).
    #[inline]
    pub fn is_alive(self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }

    /// `true` for the three terminal states.
    #[inline]
    pub fn is_dead(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Aborted)
    }

    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Uninitialized,
            1 => Self::Running,
            2 => Self::Paused,
            3 => Self::Succeeded,
            4 => Self::Failed,
            _ => Self::Aborted,
        }
    }
}

/// Atomic storage for a [`ProcessState`].
///
/// Every write goes through [`StateCell::transition`], which only commits when
/// the current state satisfies the guard. Terminal states are never left.
#[derive(Debug, Default)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    pub(crate) fn load(&self) -> ProcessState {
        ProcessState::from_raw(self.0.load(Ordering::Acquire))
    }

    /// Moves to `to` if `allowed(current)` holds. Returns whether it moved.
    pub(crate) fn transition(
        &self,
        allowed: impl Fn(ProcessState) -> bool,
        to: ProcessState,
    ) -> bool {
        self.0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |raw| {
                let current = ProcessState::from_raw(raw);
                (!current.is_dead() && allowed(current)).then_some(to as u8)
            })
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ProcessState; 6] = [
        ProcessState::Uninitialized,
        ProcessState::Running,
        ProcessState::Paused,
        ProcessState::Succeeded,
        ProcessState::Failed,
        ProcessState::Aborted,
    ];

    #[test]
    fn test_alive_and_dead_partition_states() {
        for state in ALL {
            if state == ProcessState::Uninitialized {
                assert!(!state.is_alive() && !state.is_dead());
            } else {
                assert_ne!(state.is_alive(), state.is_dead(), "{state:?}");
            }
        }
    }

    #[test]
    fn test_raw_round_trip() {
        for state in ALL {
            assert_eq!(ProcessState::from_raw(state as u8), state);
        }
    }

    #[test]
    fn test_transition_respects_guard() {
        let cell = StateCell::default();
        assert!(!cell.transition(|s| s == ProcessState::Running, ProcessState::Paused));
        assert_eq!(cell.load(), ProcessState::Uninitialized);

        assert!(cell.transition(|s| s == ProcessState::Uninitialized, ProcessState::Running));
        assert_eq!(cell.load(), ProcessState::Running);
    }

    #[test]
    fn test_terminal_state_is_never_left() {
        let cell = StateCell::default();
        assert!(cell.transition(|_| true, ProcessState::Failed));
        assert!(!cell.transition(|_| true, ProcessState::Running));
        assert!(!cell.transition(|_| true, ProcessState::Succeeded));
        assert_eq!(cell.load(), ProcessState::Failed);
    }
}
