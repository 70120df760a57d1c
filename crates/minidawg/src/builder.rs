// Editable automaton and incremental minimizing insertion.
//
// Each insertion runs four phases over the path of states spelled by the
// new word:
//
// 1. Common prefix: follow existing transitions as far as they go.
// 2. Confluence cloning: from the first state on that prefix reached by
//    more than one edge, clone every prefix state so the word's tail is
//    private to it.
// 3. Suffix extension: append fresh states for the rest of the word and
//    mark the last one terminal.
// 4. Replace or register: walking back from the end, merge each path state
//    into an equivalent registered state, or register it as canonical.
//
// Words must arrive in ascending order of their UTF-16 code units. The
// order is not checked; out-of-order input gives unspecified (but memory
// safe) results.

use std::io::{Read, Write};

use smallvec::{SmallVec, smallvec};

use crate::arena::StateArena;
use crate::dictionary::Dictionary;
use crate::register::Register;
use crate::search::{DEFAULT_STACK_CAPACITY, Search, to_units};
use crate::state::{Handle, Label, State};
use crate::{DawgError, ROOT, codec};

/// State path for one insertion: `path[i]` is the state after `i` labels.
type Path = SmallVec<[Handle; DEFAULT_STACK_CAPACITY]>;

/// Insertion-capable automaton.
///
/// Owns the state arena and the register of canonical states. After every
/// [`insert`](Self::insert) the automaton is minimal under state
/// equivalence: no two live states share terminal flag, origin label and
/// transition table.
#[derive(Debug, Clone, Default)]
pub struct Automaton {
    arena: StateArena,
    register: Register,
}

impl Automaton {
    /// Create an automaton holding only the root state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from words in iteration order.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut automaton = Self::new();
        for word in words {
            automaton.insert(word.as_ref());
        }
        automaton
    }

    /// Rebuild register state for a decoded arena.
    ///
    /// Every non-root state reached by some edge is registered as canonical;
    /// states nothing points at are discarded slots and go on the free list.
    pub(crate) fn from_arena(arena: StateArena) -> Self {
        let mut register = Register::new();
        for (handle, state) in arena.states().iter().enumerate().skip(1) {
            let handle = handle as Handle;
            if state.inbound() == 0 {
                register.discard(handle);
            } else {
                register.add(handle, state.key());
            }
        }
        Self { arena, register }
    }

    /// Number of handles free for reuse by later insertions.
    pub fn discarded_count(&self) -> usize {
        self.register.discarded_count()
    }

    /// All state slots in handle order, including discarded ones.
    pub fn states(&self) -> &[State] {
        self.arena.states()
    }

    /// Whether `handle` is currently on the free list.
    pub fn is_discarded(&self, handle: Handle) -> bool {
        self.register.is_discarded(handle)
    }

    /// Flatten into a read-only dictionary, keeping handles unchanged.
    pub fn to_dictionary(&self) -> Dictionary {
        Dictionary::from_states(self.arena.states())
    }

    // -----------------------------------------------------------------------
    // Insertion
    // -----------------------------------------------------------------------

    /// Insert `word`.
    ///
    /// Inserting a word that is already present leaves the stored set and
    /// the live states unchanged. Clones made on the way are merged back,
    /// but when the free list runs short the arena grows and the extra slot
    /// ends up discarded, so `state_count` and `discarded_count` may both
    /// rise by the same amount.
    pub fn insert(&mut self, word: &str) {
        self.insert_units(&to_units(word));
    }

    /// Insert a word given as UTF-16 code units.
    pub fn insert_units(&mut self, word: &[Label]) {
        let mut path: Path = smallvec![ROOT; word.len() + 1];
        let common = self.arena.common_prefix(word, &mut path);
        self.clone_if_confluence(word, &mut path, common);
        self.add_suffix(word, &mut path, common);
        self.replace_or_register(word, &mut path);
    }

    /// Clone the prefix from its first confluence state onwards.
    fn clone_if_confluence(&mut self, word: &[Label], path: &mut Path, common: usize) {
        let Some(confluence) = path[..common]
            .iter()
            .position(|&state| self.arena[state].is_confluence())
        else {
            return;
        };
        // The root has no inbound edges, so it is never the confluence state.
        debug_assert!(confluence > 0);

        self.register.remove(path[confluence - 1]);
        for i in confluence..common {
            let clone = self.clone_state(path[i]);
            log::trace!("cloned confluence state {} into {clone}", path[i]);
            path[i] = clone;
            self.set_transition(path[i - 1], word[i - 1], clone);
        }
    }

    /// Append new states for `word[common - 1..]` and mark the end terminal.
    fn add_suffix(&mut self, word: &[Label], path: &mut Path, common: usize) {
        self.register.remove(path[common - 1]);
        for i in common - 1..word.len() {
            let next = self.new_state(word[i]);
            path[i + 1] = next;
            self.set_transition(path[i], word[i], next);
        }

        let last = path[word.len()];
        self.register.remove(last);
        self.arena[last].set_terminal(true);
    }

    /// Walk the path backwards, merging each state into an equivalent
    /// registered one or registering it.
    fn replace_or_register(&mut self, word: &[Label], path: &mut Path) {
        for i in (1..path.len()).rev() {
            let state = path[i];
            let found = self.register.lookup(state, &self.arena[state].view());
            match found {
                None => {
                    let key = self.arena[state].key();
                    self.register.add(state, key);
                }
                Some(canonical) if canonical != state => {
                    log::trace!("merged state {state} into {canonical}");
                    self.register.remove(path[i - 1]);
                    self.set_transition(path[i - 1], word[i - 1], canonical);
                    self.release_edges(state);
                    self.register.remove(state);
                    self.register.discard(state);
                    path[i] = canonical;
                }
                Some(_) => {}
            }
        }
    }

    // -----------------------------------------------------------------------
    // State bookkeeping
    // -----------------------------------------------------------------------

    /// Place `state` in the smallest discarded slot, or append it.
    fn allocate(&mut self, state: State) -> Handle {
        match self.register.next_discarded() {
            Some(handle) => {
                log::trace!("reusing discarded state {handle}");
                self.arena.replace(handle, state);
                handle
            }
            None => self.arena.push(state),
        }
    }

    fn new_state(&mut self, origin: Label) -> Handle {
        self.allocate(State::new(origin))
    }

    /// Copy terminal flag, origin and transitions of `source` into a new
    /// state. Every target gains one inbound edge.
    fn clone_state(&mut self, source: Handle) -> Handle {
        let mut copy = self.arena[source].clone();
        copy.reset_inbound();
        let clone = self.allocate(copy);
        for i in 0..self.arena[clone].out_degree() {
            let target = self.arena[clone].targets()[i];
            self.arena[target].increment_inbound();
        }
        clone
    }

    /// Point `state`'s transition on `label` at `target`, moving one inbound
    /// edge from the old target (if any) to the new one.
    fn set_transition(&mut self, state: Handle, label: Label, target: Handle) {
        if let Some(old) = self.arena[state].transition(label) {
            self.arena[old].decrement_inbound();
        }
        self.arena[target].increment_inbound();
        self.arena[state].set_transition(label, target);
    }

    /// Drop the inbound edges contributed by `state`'s transitions.
    fn release_edges(&mut self, state: Handle) {
        for i in 0..self.arena[state].out_degree() {
            let target = self.arena[state].targets()[i];
            self.arena[target].decrement_inbound();
        }
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Save to `writer`. With `editable` the stream can be loaded back with
    /// [`Automaton::load`]; without it only [`Dictionary::load`] accepts it.
    pub fn save<W: Write>(&self, writer: W, editable: bool) -> Result<(), DawgError> {
        codec::write_automaton(self, editable, writer)
    }

    pub fn to_bytes(&self, editable: bool) -> Result<Vec<u8>, DawgError> {
        let mut buf = Vec::new();
        self.save(&mut buf, editable)?;
        Ok(buf)
    }

    /// Load an automaton saved with `editable = true`.
    pub fn load<R: Read>(reader: R) -> Result<Self, DawgError> {
        codec::read_automaton(reader)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, DawgError> {
        Self::load(data)
    }
}

impl Search for Automaton {
    #[inline]
    fn state_count(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    fn is_terminal(&self, state: Handle) -> bool {
        self.arena.is_terminal(state)
    }

    #[inline]
    fn edges(&self, state: Handle) -> (&[Label], &[Handle]) {
        self.arena.edges(state)
    }

    #[inline]
    fn transition(&self, state: Handle, label: Label) -> Option<Handle> {
        self.arena[state].transition(label)
    }
}
