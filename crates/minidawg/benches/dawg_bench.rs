// Criterion benchmarks for minidawg.
//
// Uses a word list from MINIDAWG_BENCH_WORDS (one word per line) when set;
// otherwise a generated list of every string over "etaoins" up to six
// characters long.
//
// Run:
//   cargo bench -p minidawg
//   MINIDAWG_BENCH_WORDS=/usr/share/dict/words cargo bench -p minidawg

use criterion::{Criterion, criterion_group, criterion_main};
use minidawg::{Automaton, Dictionary, Search};

// ---------------------------------------------------------------------------
// Word list
// ---------------------------------------------------------------------------

fn generated_words() -> Vec<String> {
    let alphabet: Vec<char> = "etaoins".chars().collect();
    let mut words = Vec::new();
    let mut frontier = vec![String::new()];
    for _ in 0..6 {
        let mut next = Vec::with_capacity(frontier.len() * alphabet.len());
        for word in &frontier {
            for &c in &alphabet {
                let mut w = word.clone();
                w.push(c);
                next.push(w);
            }
        }
        words.extend(next.iter().cloned());
        frontier = next;
    }
    words
}

/// Sorted, deduplicated by UTF-16 code units.
fn load_words() -> Vec<String> {
    let mut words = match std::env::var("MINIDAWG_BENCH_WORDS") {
        Ok(path) => std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read {path}: {e}"))
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| l.to_string())
            .collect(),
        Err(_) => generated_words(),
    };
    words.sort_by(|a, b| a.encode_utf16().cmp(b.encode_utf16()));
    words.dedup();
    words
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_build(c: &mut Criterion) {
    let words = load_words();
    eprintln!("[bench_build] {} words", words.len());

    c.bench_function("build", |b| {
        b.iter(|| std::hint::black_box(Automaton::from_words(&words)));
    });
}

fn bench_contains(c: &mut Criterion) {
    let words = load_words();
    let automaton = Automaton::from_words(&words);
    let dict = automaton.to_dictionary();
    let sample: Vec<&String> = words.iter().step_by(7).take(1000).collect();

    c.bench_function("contains_automaton", |b| {
        b.iter(|| {
            for word in &sample {
                std::hint::black_box(automaton.contains(word));
            }
        });
    });

    c.bench_function("contains_dictionary", |b| {
        b.iter(|| {
            for word in &sample {
                std::hint::black_box(dict.contains(word));
            }
        });
    });
}

fn bench_suffixes(c: &mut Criterion) {
    let words = load_words();
    let dict = Automaton::from_words(&words).to_dictionary();
    let prefix: String = words.first().map(|w| w.chars().take(2).collect()).unwrap_or_default();

    c.bench_function("list_suffixes", |b| {
        b.iter(|| std::hint::black_box(dict.list_suffixes(&prefix)));
    });

    c.bench_function("suffix_count_push", |b| {
        b.iter(|| {
            let mut count = 0usize;
            dict.list_suffixes_with("", &mut |_: &str| count += 1);
            std::hint::black_box(count)
        });
    });
}

fn bench_codec(c: &mut Criterion) {
    let automaton = Automaton::from_words(load_words());
    let editable = automaton.to_bytes(true).expect("save editable");
    let compact = automaton.to_bytes(false).expect("save read-only");

    c.bench_function("save_editable", |b| {
        b.iter(|| std::hint::black_box(automaton.to_bytes(true).expect("save")));
    });

    c.bench_function("load_editable", |b| {
        b.iter(|| std::hint::black_box(Automaton::from_bytes(&editable).expect("load")));
    });

    c.bench_function("load_read_only", |b| {
        b.iter(|| std::hint::black_box(Dictionary::from_bytes(&compact).expect("load")));
    });
}

criterion_group!(
    benches,
    bench_build,
    bench_contains,
    bench_suffixes,
    bench_codec,
);
criterion_main!(benches);
