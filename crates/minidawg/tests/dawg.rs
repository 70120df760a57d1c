// End-to-end behaviour of the builder, search and codec together.

use std::collections::BTreeSet;
use std::io::ErrorKind;

use minidawg::{Automaton, DawgError, Dictionary, Search};

const SAMPLE: [&str; 7] = [
    "abcxyz",
    "abc0xyz",
    "abcxyz0",
    "0abcxyz",
    "0abcxyz0",
    "0abc0xyz0",
    "abcxyz",
];

fn sample() -> Automaton {
    Automaton::from_words(SAMPLE)
}

fn distinct_sample() -> BTreeSet<String> {
    SAMPLE.iter().map(|w| w.to_string()).collect()
}

/// Every string over `alphabet` up to `max_len` characters whose character
/// sum is not divisible by 3, sorted.
fn generated_words(alphabet: &str, max_len: usize) -> Vec<String> {
    let mut words = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for word in &frontier {
            for c in alphabet.chars() {
                let mut w = word.clone();
                w.push(c);
                next.push(w);
            }
        }
        words.extend(next.iter().cloned());
        frontier = next;
    }
    let mut words: Vec<String> = words
        .into_iter()
        .filter(|w| w.chars().map(|c| c as u32).sum::<u32>() % 3 != 0)
        .collect();
    words.sort();
    words
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn sample_counts() {
    let automaton = sample();
    assert_eq!(automaton.state_count(), 23);
    assert_eq!(automaton.discarded_count(), 3);
}

#[test]
fn sample_suffixes_are_the_distinct_words() {
    let automaton = sample();
    let all = automaton.list_suffixes("");
    assert_eq!(all.len(), 6);
    let as_set: BTreeSet<String> = all.iter().cloned().collect();
    assert_eq!(as_set, distinct_sample());
    let mut sorted = all.clone();
    sorted.sort();
    assert_eq!(all, sorted);
}

#[test]
fn sample_membership() {
    let automaton = sample();
    for word in SAMPLE {
        assert!(automaton.contains(word), "{word}");
    }
    for word in ["", "a", "abc", "abcxy", "0abc0xyz", "0"] {
        assert!(!automaton.contains(word), "prefix {word:?}");
    }
    for word in ["q", "zyx", "abcxyz00", "1abcxyz"] {
        assert!(!automaton.contains(word), "stranger {word:?}");
    }
}

#[test]
fn prefix_completions() {
    let automaton = sample();
    assert_eq!(automaton.list_suffixes("abc"), vec!["0xyz", "xyz", "xyz0"]);
    assert_eq!(automaton.list_suffixes("0abc0"), vec!["xyz0"]);
    assert_eq!(automaton.list_suffixes("abcxyz"), vec!["", "0"]);
    assert!(automaton.list_suffixes("nothing").is_empty());
}

#[test]
fn generated_set_is_reproduced() {
    let words = generated_words("abcd", 5);
    let automaton = Automaton::from_words(&words);
    assert_eq!(automaton.list_suffixes(""), words);
    assert!(automaton.state_count() < words.len());
    for word in &words {
        assert!(automaton.contains(word));
    }
}

#[test]
fn reinsertion_changes_nothing_observable() {
    let mut automaton = sample();
    let before = automaton.list_suffixes("");
    let live = automaton.state_count() - automaton.discarded_count();
    let live_states: Vec<_> = automaton
        .states()
        .iter()
        .enumerate()
        .filter(|&(h, _)| !automaton.is_discarded(h as u32))
        .map(|(h, s)| (h, s.clone()))
        .collect();

    for word in SAMPLE {
        automaton.insert(word);
    }

    assert_eq!(automaton.list_suffixes(""), before);
    assert_eq!(automaton.state_count() - automaton.discarded_count(), live);
    let after: Vec<_> = automaton
        .states()
        .iter()
        .enumerate()
        .filter(|&(h, _)| !automaton.is_discarded(h as u32))
        .map(|(h, s)| (h, s.clone()))
        .collect();
    assert_eq!(after, live_states);
    for word in SAMPLE {
        assert!(automaton.contains(word));
    }
}

// ---------------------------------------------------------------------------
// Enumeration
// ---------------------------------------------------------------------------

#[test]
fn suffix_iterators_restart() {
    let automaton = sample();
    let first: Vec<String> = automaton.suffixes("0").collect();
    let second: Vec<String> = automaton.suffixes("0").collect();
    assert_eq!(first, second);
    assert_eq!(first, automaton.list_suffixes("0"));
}

#[test]
fn push_collector_sees_the_eager_list() {
    let automaton = sample();
    let mut pushed = Vec::new();
    automaton.list_suffixes_with("", &mut |s: &str| pushed.push(s.to_owned()));
    assert_eq!(pushed, automaton.list_suffixes(""));
}

#[test]
fn raw_units_enumeration() {
    let automaton = Automaton::from_words(["ab", "ac"]);
    let mut suffixes = automaton.suffixes("a");
    assert_eq!(suffixes.next_units(), Some(&[b'b' as u16][..]));
    assert_eq!(suffixes.next_units(), Some(&[b'c' as u16][..]));
    assert_eq!(suffixes.next_units(), None);
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn editable_round_trip() {
    let automaton = sample();
    let bytes = automaton.to_bytes(true).unwrap();
    let reloaded = Automaton::from_bytes(&bytes).unwrap();

    assert_eq!(reloaded.state_count(), automaton.state_count());
    assert_eq!(reloaded.discarded_count(), automaton.discarded_count());
    assert_eq!(reloaded.list_suffixes(""), automaton.list_suffixes(""));
    assert_eq!(reloaded.states(), automaton.states());
}

#[test]
fn inserting_after_reload_matches_inserting_before_save() {
    let mut original = sample();
    let mut reloaded = Automaton::from_bytes(&original.to_bytes(true).unwrap()).unwrap();

    for word in ["x", "xa", "xab", "zz", "zzabcxyz"] {
        original.insert(word);
        reloaded.insert(word);
    }

    assert_eq!(reloaded.states(), original.states());
    assert_eq!(reloaded.discarded_count(), original.discarded_count());
    assert!(reloaded.contains("zzabcxyz"));
    assert!(reloaded.contains("abc0xyz"));
}

#[test]
fn save_to_writer_matches_to_bytes() {
    let automaton = sample();
    let mut buf = Vec::new();
    automaton.save(&mut buf, true).unwrap();
    assert_eq!(buf, automaton.to_bytes(true).unwrap());
}

#[test]
fn read_only_round_trip() {
    let automaton = sample();
    let bytes = automaton.to_bytes(false).unwrap();
    let dict = Dictionary::from_bytes(&bytes).unwrap();

    assert_eq!(dict.state_count(), 23);
    assert_eq!(dict.list_suffixes(""), automaton.list_suffixes(""));
    for word in SAMPLE {
        assert!(dict.contains(word));
    }
}

#[test]
fn read_only_stream_refuses_editable_load() {
    let bytes = sample().to_bytes(false).unwrap();
    assert!(matches!(
        Automaton::from_bytes(&bytes),
        Err(DawgError::NotEditable)
    ));
}

#[test]
fn dictionary_accepts_editable_stream() {
    let automaton = sample();
    let dict = Dictionary::from_bytes(&automaton.to_bytes(true).unwrap()).unwrap();
    assert_eq!(dict, automaton.to_dictionary());
    assert_eq!(dict.to_bytes().unwrap(), automaton.to_bytes(false).unwrap());
}

#[test]
fn truncated_stream_is_an_io_error() {
    let bytes = sample().to_bytes(true).unwrap();
    for len in [0, 3, bytes.len() / 2, bytes.len() - 1] {
        match Automaton::from_bytes(&bytes[..len]) {
            Err(DawgError::Io(e)) => assert_eq!(e.kind(), ErrorKind::UnexpectedEof, "len {len}"),
            other => panic!("len {len}: expected EOF, got {other:?}"),
        }
    }
}

#[test]
fn generated_set_survives_both_formats() {
    let words = generated_words("xyz", 6);
    let automaton = Automaton::from_words(&words);

    let dict = Dictionary::from_bytes(&automaton.to_bytes(false).unwrap()).unwrap();
    assert_eq!(dict.list_suffixes(""), words);

    let reloaded = Automaton::from_bytes(&automaton.to_bytes(true).unwrap()).unwrap();
    assert_eq!(reloaded.list_suffixes("x"), automaton.list_suffixes("x"));
}
