// State record: terminal flag, origin label, inbound count and a sorted,
// label-unique transition table stored as two parallel arrays.

/// Index of a state in the arena.
pub type Handle = u32;

/// Transition label: one UTF-16 code unit.
pub type Label = u16;

/// Return a copy of `source` with `value` inserted at `index`.
///
/// The result has exactly `source.len() + 1` elements: everything before
/// `index` is unchanged, `value` sits at `index`, and everything from
/// `index` on is shifted right by one.
///
/// # Panics
///
/// Panics if `index > source.len()`.
pub fn insert_at<T: Copy>(source: &[T], index: usize, value: T) -> Box<[T]> {
    assert!(index <= source.len(), "insertion index {index} past end");
    let mut target = Vec::with_capacity(source.len() + 1);
    target.extend_from_slice(&source[..index]);
    target.push(value);
    target.extend_from_slice(&source[index..]);
    target.into_boxed_slice()
}

/// A single automaton state.
///
/// Transition tables are sparse and sized exactly to the out-degree. Labels
/// are strictly ascending, and `targets[i]` is the destination of `labels[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    terminal: bool,
    /// Label of the transition that created this state (NUL for the root).
    origin: Label,
    /// Number of edges anywhere in the automaton pointing at this state.
    inbound: u32,
    labels: Box<[Label]>,
    targets: Box<[Handle]>,
}

impl State {
    /// Create a non-terminal state with no transitions.
    pub fn new(origin: Label) -> Self {
        Self {
            terminal: false,
            origin,
            inbound: 0,
            labels: Box::default(),
            targets: Box::default(),
        }
    }

    /// Assemble a state from decoded parts. Labels must already be sorted.
    pub(crate) fn from_parts(
        terminal: bool,
        origin: Label,
        inbound: u32,
        labels: Box<[Label]>,
        targets: Box<[Handle]>,
    ) -> Self {
        debug_assert_eq!(labels.len(), targets.len());
        debug_assert!(labels.windows(2).all(|w| w[0] < w[1]));
        Self {
            terminal,
            origin,
            inbound,
            labels,
            targets,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    #[inline]
    pub fn set_terminal(&mut self, terminal: bool) {
        self.terminal = terminal;
    }

    #[inline]
    pub fn origin(&self) -> Label {
        self.origin
    }

    #[inline]
    pub fn inbound(&self) -> u32 {
        self.inbound
    }

    /// A state reachable along more than one path. Must be cloned, never
    /// mutated in place.
    #[inline]
    pub fn is_confluence(&self) -> bool {
        self.inbound > 1
    }

    #[inline]
    pub fn increment_inbound(&mut self) {
        self.inbound += 1;
    }

    #[inline]
    pub fn decrement_inbound(&mut self) {
        debug_assert!(self.inbound > 0, "inbound count underflow");
        self.inbound = self.inbound.saturating_sub(1);
    }

    /// Clear the inbound count (used for freshly cloned states).
    pub(crate) fn reset_inbound(&mut self) {
        self.inbound = 0;
    }

    /// Number of outgoing transitions.
    #[inline]
    pub fn out_degree(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    #[inline]
    pub fn targets(&self) -> &[Handle] {
        &self.targets
    }

    /// Follow the transition on `label`, if any.
    #[inline]
    pub fn transition(&self, label: Label) -> Option<Handle> {
        self.labels
            .binary_search(&label)
            .ok()
            .map(|index| self.targets[index])
    }

    /// Add or overwrite the transition on `label`.
    ///
    /// An existing label has its target replaced in place; a new label grows
    /// both arrays by one at the position that keeps labels sorted. Inbound
    /// counts of the targets are the caller's responsibility.
    pub fn set_transition(&mut self, label: Label, target: Handle) {
        match self.labels.binary_search(&label) {
            Ok(index) => self.targets[index] = target,
            Err(index) => {
                self.labels = insert_at(&self.labels, index, label);
                self.targets = insert_at(&self.targets, index, target);
            }
        }
    }

    /// Borrowed view of the fields that decide equivalence.
    #[inline]
    pub fn view(&self) -> StateView<'_> {
        StateView {
            terminal: self.terminal,
            origin: self.origin,
            labels: &self.labels,
            targets: &self.targets,
        }
    }

    /// Owned snapshot of the fields that decide equivalence.
    pub fn key(&self) -> StateKey {
        StateKey {
            terminal: self.terminal,
            origin: self.origin,
            labels: self.labels.clone(),
            targets: self.targets.clone(),
        }
    }
}

/// Content of a state as seen by the register.
///
/// Two states are equivalent iff their keys are equal: same terminal flag,
/// same origin label, same labels and same targets. The inbound count is not
/// part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey {
    terminal: bool,
    origin: Label,
    labels: Box<[Label]>,
    targets: Box<[Handle]>,
}

/// Borrowed counterpart of [`StateKey`].
///
/// Hashes identically to the owned key (same field order, slices hash like
/// boxed slices), so the register can be probed without allocating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateView<'a> {
    terminal: bool,
    origin: Label,
    labels: &'a [Label],
    targets: &'a [Handle],
}

impl hashbrown::Equivalent<StateKey> for StateView<'_> {
    fn equivalent(&self, key: &StateKey) -> bool {
        self.terminal == key.terminal
            && self.origin == key.origin
            && self.labels == &*key.labels
            && self.targets == &*key.targets
    }
}
