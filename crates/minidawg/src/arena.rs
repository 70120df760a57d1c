// Handle-indexed storage of automaton states.
//
// Slots are appended or overwritten in place; nothing is ever removed, so a
// handle stays valid for the lifetime of the arena. Which slots are free for
// reuse is tracked by the register, not here.

use std::ops::{Index, IndexMut};

use crate::ROOT;
use crate::search::Search;
use crate::state::{Handle, Label, State};

/// Arena of automaton states addressed by [`Handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateArena {
    states: Vec<State>,
}

impl StateArena {
    /// Create an arena holding only the root state (origin NUL, non-terminal).
    pub fn new() -> Self {
        Self {
            states: vec![State::new(0)],
        }
    }

    /// Wrap already decoded states. The first state is the root.
    pub(crate) fn from_states(states: Vec<State>) -> Self {
        debug_assert!(!states.is_empty(), "arena needs a root state");
        Self { states }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[inline]
    pub fn get(&self, handle: Handle) -> Option<&State> {
        self.states.get(handle as usize)
    }

    /// All slots in handle order, including discarded ones.
    #[inline]
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Append a state and return its handle.
    pub fn push(&mut self, state: State) -> Handle {
        let handle = self.states.len() as Handle;
        self.states.push(state);
        handle
    }

    /// Overwrite the slot at `handle`.
    pub fn replace(&mut self, handle: Handle, state: State) {
        self.states[handle as usize] = state;
    }

    /// Walk from the root along `word` as far as transitions exist.
    ///
    /// `path` must hold `word.len() + 1` entries. On return `path[0]` is the
    /// root and `path[i + 1]` is the state reached after `word[i]`, for every
    /// position the walk got through; later entries are left as the root.
    ///
    /// Returns the number of valid path entries: `1 + i` where `word[i]` is
    /// the first label without a transition, or `word.len() + 1` if the
    /// whole word is already a path.
    pub fn common_prefix(&self, word: &[Label], path: &mut [Handle]) -> usize {
        debug_assert_eq!(path.len(), word.len() + 1);
        path.fill(ROOT);
        let mut current = ROOT;
        for (i, &label) in word.iter().enumerate() {
            match self[current].transition(label) {
                Some(next) => {
                    path[i + 1] = next;
                    current = next;
                }
                None => return i + 1,
            }
        }
        path.len()
    }
}

impl Default for StateArena {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Handle> for StateArena {
    type Output = State;

    #[inline]
    fn index(&self, handle: Handle) -> &State {
        &self.states[handle as usize]
    }
}

impl IndexMut<Handle> for StateArena {
    #[inline]
    fn index_mut(&mut self, handle: Handle) -> &mut State {
        &mut self.states[handle as usize]
    }
}

impl Search for StateArena {
    #[inline]
    fn state_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn is_terminal(&self, state: Handle) -> bool {
        self[state].is_terminal()
    }

    #[inline]
    fn edges(&self, state: Handle) -> (&[Label], &[Handle]) {
        let state = &self[state];
        (state.labels(), state.targets())
    }

    #[inline]
    fn transition(&self, state: Handle, label: Label) -> Option<Handle> {
        self[state].transition(label)
    }
}
