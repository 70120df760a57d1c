//! Minimal acyclic word automaton (DAWG) with incremental construction.
//!
//! This crate stores a finite set of strings in a deterministic acyclic
//! automaton that shares both common prefixes and common suffixes. Words are
//! inserted one at a time, in ascending lexicographic order of their UTF-16
//! code units, and the automaton is re-minimized after every insertion.
//!
//! Two representations share one read interface ([`Search`]):
//!
//! - [`Automaton`] -- the editable form. Keeps per-state inbound counts,
//!   origin labels and a register of canonical states so that more words can
//!   be inserted at any time, including after a save/load round trip.
//! - [`Dictionary`] -- the compact read-only form. A flat transition table
//!   supporting membership tests and prefix enumeration only.
//!
//! # Architecture
//!
//! - [`state`] -- State record: terminal flag, origin label, sorted transitions
//! - [`arena`] -- Handle-indexed state storage
//! - [`register`] -- Canonical state index and free list of reusable handles
//! - [`builder`] -- Incremental insertion with confluence cloning and
//!   backward minimization
//! - [`search`] -- Membership test and suffix enumeration (explicit DFS stack)
//! - [`dictionary`] -- Read-only flattened automaton
//! - [`codec`] -- Binary save/load for both variants
//!
//! # Example
//!
//! ```
//! use minidawg::{Automaton, Search};
//!
//! let mut dawg = Automaton::new();
//! for word in ["bake", "cake", "caked", "make"] {
//!     dawg.insert(word);
//! }
//! assert!(dawg.contains("cake"));
//! assert!(!dawg.contains("ake"));
//! assert_eq!(dawg.list_suffixes("ca"), vec!["ke", "ked"]);
//!
//! let bytes = dawg.to_bytes(false).unwrap();
//! let dict = minidawg::Dictionary::from_bytes(&bytes).unwrap();
//! assert_eq!(dict.list_suffixes(""), dawg.list_suffixes(""));
//! ```

pub mod arena;
pub mod builder;
pub mod codec;
pub mod dictionary;
pub mod register;
pub mod search;
pub mod state;

pub use builder::Automaton;
pub use dictionary::Dictionary;
pub use search::{Search, SuffixCollector, Suffixes};
pub use state::{Handle, Label, State};

/// Handle of the root state. Always present, never discarded.
pub const ROOT: Handle = 0;

/// Error type for saving and loading automata.
///
/// Construction and search are infallible; every variant here comes from the
/// binary codec.
#[derive(Debug, thiserror::Error)]
pub enum DawgError {
    #[error("stream holds a read-only dictionary, not an editable automaton")]
    NotEditable,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("stream declares no states")]
    EmptyAutomaton,
    #[error("invalid state count: {0}")]
    InvalidStateCount(i32),
    #[error("state {state}: invalid transition count {count}")]
    InvalidTransitionCount { state: Handle, count: i16 },
    #[error("state {state}: invalid inbound count {count}")]
    InvalidInboundCount { state: Handle, count: i16 },
    #[error("state {state}: transition labels are not strictly ascending")]
    UnsortedLabels { state: Handle },
    #[error("state {state}: transition target {target} out of range")]
    InvalidTarget { state: Handle, target: i32 },
    #[error("cycle detected through state {state}")]
    CyclicGraph { state: Handle },
    #[error("state {state}: stored inbound count {actual}, live edges give {expected}")]
    InboundMismatch {
        state: Handle,
        expected: u32,
        actual: u32,
    },
    #[error("{what} {count} does not fit the binary format")]
    CountOverflow { what: &'static str, count: usize },
}
