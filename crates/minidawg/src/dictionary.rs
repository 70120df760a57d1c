// Read-only automaton: a flattened transition table.
//
// All labels and targets live in two contiguous arrays; state `s` owns the
// range `offsets[s]..offsets[s + 1]`. No inbound counts, origin labels or
// register are kept, so a dictionary can answer queries but not accept new
// words.

use std::io::{Read, Write};

use crate::search::Search;
use crate::state::{Handle, Label, State};
use crate::{DawgError, codec};

/// Compact search-only automaton.
#[derive(Clone, PartialEq, Eq)]
pub struct Dictionary {
    terminal: Vec<bool>,
    /// `state_count + 1` entries; the last one is the total edge count.
    offsets: Vec<u32>,
    labels: Vec<Label>,
    targets: Vec<Handle>,
}

impl std::fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dictionary")
            .field("state_count", &self.terminal.len())
            .field("edge_count", &self.labels.len())
            .finish()
    }
}

impl Dictionary {
    /// Empty table sized for `state_count` states.
    pub(crate) fn with_capacity(state_count: usize) -> Self {
        let mut offsets = Vec::with_capacity(state_count + 1);
        offsets.push(0);
        Self {
            terminal: Vec::with_capacity(state_count),
            offsets,
            labels: Vec::new(),
            targets: Vec::new(),
        }
    }

    /// Append the next state. Labels must be strictly ascending.
    pub(crate) fn push_state(&mut self, terminal: bool, labels: &[Label], targets: &[Handle]) {
        debug_assert_eq!(labels.len(), targets.len());
        self.terminal.push(terminal);
        self.labels.extend_from_slice(labels);
        self.targets.extend_from_slice(targets);
        self.offsets.push(self.labels.len() as u32);
    }

    /// Flatten editable states, slot for slot.
    pub(crate) fn from_states(states: &[State]) -> Self {
        let mut dict = Self::with_capacity(states.len());
        for state in states {
            dict.push_state(state.is_terminal(), state.labels(), state.targets());
        }
        dict
    }

    /// Total number of transitions stored.
    pub fn edge_count(&self) -> usize {
        self.labels.len()
    }

    /// Load from a stream written in either format. Per-state editing data
    /// in an editable stream is skipped.
    pub fn load<R: Read>(reader: R) -> Result<Self, DawgError> {
        codec::read_dictionary(reader)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, DawgError> {
        Self::load(data)
    }

    /// Save in the read-only format.
    pub fn save<W: Write>(&self, writer: W) -> Result<(), DawgError> {
        codec::write_dictionary(self, writer)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DawgError> {
        let mut buf = Vec::new();
        self.save(&mut buf)?;
        Ok(buf)
    }
}

impl Search for Dictionary {
    #[inline]
    fn state_count(&self) -> usize {
        self.terminal.len()
    }

    #[inline]
    fn is_terminal(&self, state: Handle) -> bool {
        self.terminal[state as usize]
    }

    #[inline]
    fn edges(&self, state: Handle) -> (&[Label], &[Handle]) {
        let start = self.offsets[state as usize] as usize;
        let end = self.offsets[state as usize + 1] as usize;
        (&self.labels[start..end], &self.targets[start..end])
    }
}
