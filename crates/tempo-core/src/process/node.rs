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

use super::handle::{ProcessHandle, ProcessId};
use super::state::ProcessState;
use std::fmt;

/// The behaviour of a chainable unit of work.
///
/// Lifecycle transitions are driven through the [`ProcessHandle`] passed to the
/// hooks; the scheduler decides when each hook runs.
pub trait Process: Send {
    /// Called once, right before the first call to [`update`](Self::update).
    fn initialize(&mut self, handle: &ProcessHandle);

    /// Called once per scheduler tick while the process is running.
    ///
    /// `delta` is the fixed simulation step in seconds, not wall-clock time.
    fn update(&mut self, delta: f32, handle: &ProcessHandle);

    /// Called once when the scheduler observes that the process succeeded.
    fn on_success(&mut self) {}

    /// Called once when the scheduler observes that the process failed.
    fn on_fail(&mut self) {}

    /// Called once when the scheduler observes that the process was aborted.
    fn on_abort(&mut self) {}
}

/// An owned process together with the chain of processes queued after it.
///
/// The chain is a singly linked list: every node has at most one child, and a
/// child only starts once its parent succeeded. Children are moved in by
/// value, so a node can never be attached to itself or form a cycle.
pub struct ProcessNode {
    handle: ProcessHandle,
    process: Box<dyn Process>,
    child: Option<Box<ProcessNode>>,
}

impl ProcessNode {
    /// Wraps a process in a fresh, uninitialized node.
    pub fn new<P: Process + 'static>(process: P) -> Self {
        Self::from_boxed(Box::new(process))
    }

    /// Wraps an already boxed process.
    pub fn from_boxed(process: Box<dyn Process>) -> Self {
        Self {
            handle: ProcessHandle::new(),
            process,
            child: None,
        }
    }

    /// Appends `child` to the end of this node's chain.
    pub fn attach_child(&mut self, child: ProcessNode) {
        let mut slot = &mut self.child;
        while let Some(node) = slot {
            slot = &mut node.child;
        }
        *slot = Some(Box::new(child));
    }

    /// Builder form of [`attach_child`](Self::attach_child).
    pub fn then(mut self, child: ProcessNode) -> Self {
        self.attach_child(child);
        self
    }

    /// Returns a handle sharing this node's lifecycle state.
    pub fn handle(&self) -> ProcessHandle {
        self.handle.clone()
    }

    /// The identifier of the process.
    pub fn id(&self) -> ProcessId {
        self.handle.id()
    }

    /// The current lifecycle state.
    pub fn state(&self) -> ProcessState {
        self.handle.state()
    }

    /// `true` while running or paused.
    pub fn is_alive(&self) -> bool {
        self.handle.is_alive()
    }

    /// `true` once succeeded, failed or aborted.
    pub fn is_dead(&self) -> bool {
        self.handle.is_dead()
    }

    /// See [`ProcessHandle::pause`].
    pub fn pause(&self) -> bool {
        self.handle.pause()
    }

    /// See [`ProcessHandle::resume`].
    pub fn resume(&self) -> bool {
        self.handle.resume()
    }

    /// See [`ProcessHandle::succeed`].
    pub fn succeed(&self) -> bool {
        self.handle.succeed()
    }

    /// See [`ProcessHandle::fail`].
    pub fn fail(&self) -> bool {
        self.handle.fail()
    }

    /// See [`ProcessHandle::abort`].
    pub fn abort(&self) -> bool {
        self.handle.abort()
    }

    /// `true` if a successor is queued.
    pub fn has_child(&self) -> bool {
        self.child.is_some()
    }

    /// The number of nodes in the chain, this one included.
    pub fn chain_len(&self) -> usize {
        let mut len = 1;
        let mut cursor = self.child.as_deref();
        while let Some(node) = cursor {
            len += 1;
            cursor = node.child.as_deref();
        }
        len
    }

    pub(crate) fn initialize(&mut self) {
        self.process.initialize(&self.handle);
        // `initialize` may already have ended the process.
        self.handle.mark_running();
    }

    pub(crate) fn update(&mut self, delta: f32) {
        self.process.update(delta, &self.handle);
    }

    /// Dispatches the terminal hook and hands back the child on success.
    ///
    /// Must only be called once the node is dead.
    pub(crate) fn finish(mut self) -> Option<ProcessNode> {
        match self.state() {
            ProcessState::Succeeded => {
                self.process.on_success();
                self.child.take().map(|child| *child)
            }
            ProcessState::Failed => {
                self.process.on_fail();
                self.drop_chain();
                None
            }
            ProcessState::Aborted => {
                self.process.on_abort();
                self.drop_chain();
                None
            }
            state => {
                log::warn!("Process {} finished while {:?}", self.id(), state);
                None
            }
        }
    }

    fn drop_chain(&mut self) {
        if let Some(child) = self.child.take() {
            log::debug!(
                "Process {} ended as {:?}, dropping {} chained process(es)",
                self.id(),
                self.state(),
                child.chain_len()
            );
        }
    }
}

impl fmt::Debug for ProcessNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessNode")
            .field("id", &self.id())
            .field("state", &self.state())
            .field("chain_len", &self.chain_len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Idle;

    impl Process for Idle {
        fn initialize(&mut self, _: &ProcessHandle) {}
        fn update(&mut self, _: f32, _: &ProcessHandle) {}
    }

    struct EndsDuringInit;

    impl Process for EndsDuringInit {
        fn initialize(&mut self, handle: &ProcessHandle) {
            handle.fail();
        }
        fn update(&mut self, _: f32, _: &ProcessHandle) {
            panic!("update must not run after a failed initialize");
        }
    }

    #[test]
    fn test_attach_child_appends_to_tail() {
        let mut head = ProcessNode::new(Idle);
        let second = ProcessNode::new(Idle);
        let third = ProcessNode::new(Idle);
        let second_id = second.id();
        let third_id = third.id();

        head.attach_child(second);
        head.attach_child(third);

        assert_eq!(head.chain_len(), 3);
        let child = head.child.as_deref().expect("child should be attached");
        assert_eq!(child.id(), second_id);
        let grandchild = child.child.as_deref().expect("grandchild should be attached");
        assert_eq!(grandchild.id(), third_id);
        assert!(!grandchild.has_child());
    }

    #[test]
    fn test_then_builds_chain() {
        let node = ProcessNode::new(Idle)
            .then(ProcessNode::new(Idle))
            .then(ProcessNode::new(Idle).then(ProcessNode::new(Idle)));
        assert_eq!(node.chain_len(), 4);
    }

    #[test]
    fn test_initialize_moves_to_running() {
        let mut node = ProcessNode::new(Idle);
        node.initialize();
        assert_eq!(node.state(), ProcessState::Running);
    }

    #[test]
    fn test_initialize_keeps_terminal_state() {
        let mut node = ProcessNode::new(EndsDuringInit);
        node.initialize();
        assert_eq!(node.state(), ProcessState::Failed);
    }

    #[test]
    fn test_finish_hands_back_child_only_on_success() {
        let node = ProcessNode::new(Idle).then(ProcessNode::new(Idle));
        node.succeed();
        assert!(node.finish().is_some());

        let node = ProcessNode::new(Idle).then(ProcessNode::new(Idle));
        node.fail();
        assert!(node.finish().is_none());

        let node = ProcessNode::new(Idle).then(ProcessNode::new(Idle));
        node.abort();
        assert!(node.finish().is_none());
    }
}
