// Register of canonical states.
//
// A bidirectional handle <-> content index over the states currently taken
// as canonical, plus the free list of discarded handles. Content keys are
// snapshots taken when a state is registered; a state must be removed from
// the register before its content changes so the content index never holds
// a stale key.

use std::collections::BTreeSet;

use hashbrown::HashMap;

use crate::state::{Handle, StateKey, StateView};

/// Canonical state index and handle free list.
#[derive(Debug, Clone, Default)]
pub struct Register {
    by_handle: HashMap<Handle, StateKey>,
    by_key: HashMap<StateKey, Handle>,
    /// Handles free for reuse, handed out smallest first.
    discarded: BTreeSet<Handle>,
}

impl Register {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handle` as the canonical state for `key`.
    pub fn add(&mut self, handle: Handle, key: StateKey) {
        self.by_key.insert(key.clone(), handle);
        self.by_handle.insert(handle, key);
    }

    /// Unregister `handle`. A no-op if it is not registered.
    pub fn remove(&mut self, handle: Handle) {
        if let Some(key) = self.by_handle.remove(&handle) {
            if self.by_key.get(&key) == Some(&handle) {
                self.by_key.remove(&key);
            }
        }
    }

    /// Mark `handle` as reusable.
    pub fn discard(&mut self, handle: Handle) {
        self.discarded.insert(handle);
    }

    /// Pop the smallest reusable handle.
    pub fn next_discarded(&mut self) -> Option<Handle> {
        self.discarded.pop_first()
    }

    pub fn discarded_count(&self) -> usize {
        self.discarded.len()
    }

    pub fn registered_count(&self) -> usize {
        self.by_handle.len()
    }

    pub fn is_registered(&self, handle: Handle) -> bool {
        self.by_handle.contains_key(&handle)
    }

    pub fn is_discarded(&self, handle: Handle) -> bool {
        self.discarded.contains(&handle)
    }

    /// Find the canonical state for `handle` with content `view`.
    ///
    /// A registered `handle` is its own canonical state, whatever its content
    /// looks like now. Otherwise returns the handle registered under equal
    /// content, or `None`.
    pub fn lookup(&self, handle: Handle, view: &StateView<'_>) -> Option<Handle> {
        if self.by_handle.contains_key(&handle) {
            return Some(handle);
        }
        self.by_key.get(view).copied()
    }
}
