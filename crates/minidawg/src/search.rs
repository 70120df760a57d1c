// Read-only capability shared by the editable automaton and the compact
// dictionary: membership tests and prefix-rooted suffix enumeration.
//
// Enumeration is an iterative depth-first walk over an explicit stack, so
// long words cannot overflow the call stack. Visiting order is pre-order
// with labels ascending, which yields suffixes in lexicographic order of
// their code units.

use crate::ROOT;
use crate::state::{Handle, Label};

/// Initial capacity of the traversal stack and suffix buffer.
pub const DEFAULT_STACK_CAPACITY: usize = 32;

/// Encode a string as transition labels.
#[inline]
pub(crate) fn to_units(s: &str) -> smallvec::SmallVec<[Label; DEFAULT_STACK_CAPACITY]> {
    s.encode_utf16().collect()
}

/// Receiver for suffixes produced by [`Search::list_suffixes_with`].
///
/// Implemented for any `FnMut(&str)` closure.
pub trait SuffixCollector {
    fn collect(&mut self, suffix: &str);
}

impl<F: FnMut(&str)> SuffixCollector for F {
    fn collect(&mut self, suffix: &str) {
        self(suffix)
    }
}

/// Read access to an acyclic deterministic automaton rooted at [`ROOT`].
///
/// Implementors supply the per-state primitives; lookups and enumeration
/// are provided on top of them.
pub trait Search {
    /// Number of state slots, including discarded ones.
    fn state_count(&self) -> usize;

    fn is_terminal(&self, state: Handle) -> bool;

    /// Outgoing transitions of `state`: labels strictly ascending, with
    /// `targets[i]` the destination of `labels[i]`.
    fn edges(&self, state: Handle) -> (&[Label], &[Handle]);

    /// Follow the transition on `label` from `state`.
    fn transition(&self, state: Handle, label: Label) -> Option<Handle> {
        let (labels, targets) = self.edges(state);
        labels.binary_search(&label).ok().map(|i| targets[i])
    }

    /// State reached from the root by reading `word`, or `None` if the path
    /// breaks. The empty word reaches the root.
    fn word_last_state_units(&self, word: &[Label]) -> Option<Handle> {
        word.iter()
            .try_fold(ROOT, |state, &label| self.transition(state, label))
    }

    fn word_last_state(&self, prefix: &str) -> Option<Handle> {
        self.word_last_state_units(&to_units(prefix))
    }

    fn contains_units(&self, word: &[Label]) -> bool {
        self.word_last_state_units(word)
            .is_some_and(|state| self.is_terminal(state))
    }

    /// Whether `word` is stored.
    fn contains(&self, word: &str) -> bool {
        self.contains_units(&to_units(word))
    }

    /// Lazy iterator over every stored completion of `prefix`, minus the
    /// prefix itself. Each call starts a fresh traversal.
    fn suffixes(&self, prefix: &str) -> Suffixes<'_, Self>
    where
        Self: Sized,
    {
        Suffixes::new(self, self.word_last_state(prefix))
    }

    /// Push every completion of `prefix` into `collector`, in order.
    fn list_suffixes_with<C>(&self, prefix: &str, collector: &mut C)
    where
        Self: Sized,
        C: SuffixCollector + ?Sized,
    {
        let mut suffixes = self.suffixes(prefix);
        let mut buffer = String::new();
        while let Some(units) = suffixes.next_units() {
            buffer.clear();
            buffer.extend(
                char::decode_utf16(units.iter().copied())
                    .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER)),
            );
            collector.collect(&buffer);
        }
    }

    /// Every completion of `prefix`, in lexicographic order without
    /// duplicates. Empty if no stored word starts with `prefix`.
    fn list_suffixes(&self, prefix: &str) -> Vec<String>
    where
        Self: Sized,
    {
        self.suffixes(prefix).collect()
    }
}

/// One level of the traversal stack.
#[derive(Debug, Clone, Copy)]
struct Frame {
    state: Handle,
    next_edge: usize,
}

/// Depth-first, label-ordered enumeration of the suffixes below a state.
///
/// The iterator owns its own stack and suffix buffer; two iterators over the
/// same automaton never share traversal state.
#[derive(Debug)]
pub struct Suffixes<'a, S: Search + ?Sized> {
    search: &'a S,
    stack: Vec<Frame>,
    /// Labels along the current path from the start state.
    buffer: Vec<Label>,
    /// State just descended into, not yet pushed or checked for terminality.
    entered: Option<Handle>,
}

impl<'a, S: Search + ?Sized> Suffixes<'a, S> {
    /// Start a traversal at `start`. `None` yields nothing.
    pub fn new(search: &'a S, start: Option<Handle>) -> Self {
        Self {
            search,
            stack: Vec::with_capacity(DEFAULT_STACK_CAPACITY),
            buffer: Vec::with_capacity(DEFAULT_STACK_CAPACITY),
            entered: start,
        }
    }

    /// Advance to the next suffix and borrow its code units.
    ///
    /// The slice is valid until the next call.
    pub fn next_units(&mut self) -> Option<&[Label]> {
        loop {
            if let Some(state) = self.entered.take() {
                self.stack.push(Frame {
                    state,
                    next_edge: 0,
                });
                if self.search.is_terminal(state) {
                    return Some(&self.buffer);
                }
            }

            let frame = self.stack.last_mut()?;
            let (labels, targets) = self.search.edges(frame.state);
            if frame.next_edge < labels.len() {
                let i = frame.next_edge;
                frame.next_edge += 1;
                self.buffer.push(labels[i]);
                self.entered = Some(targets[i]);
            } else {
                self.stack.pop();
                // The start frame was not entered through a label.
                if !self.stack.is_empty() {
                    self.buffer.pop();
                }
            }
        }
    }
}

impl<S: Search + ?Sized> Iterator for Suffixes<'_, S> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.next_units().map(String::from_utf16_lossy)
    }
}
