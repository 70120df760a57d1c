// minidawg-build: Build a dictionary from words on stdin.
//
// Reads words from stdin (one per line), inserts them in input order and
// writes the minimized automaton. Words must arrive sorted by UTF-16 code
// units; an out-of-order word is reported and still inserted.
//
// Usage:
//   minidawg-build [-d OUT] [OPTIONS]
//
// Options:
//   -d, --dict PATH   Output file (default: $MINIDAWG_DICT or words.dawg)
//   --read-only       Write the compact search-only format
//   -v, --verbose     Debug logging
//   -h, --help        Print help

use minidawg::{Automaton, Label, Search};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) =
        minidawg_cli::parse_dict_path(&args).unwrap_or_else(|e| minidawg_cli::fatal(&e));

    if minidawg_cli::wants_help(&args) {
        println!("minidawg-build: Build a dictionary from words on stdin.");
        println!();
        println!("Usage: minidawg-build [-d OUT] [OPTIONS]");
        println!();
        println!("Reads sorted words from stdin (one per line) and writes the dictionary.");
        println!();
        println!("Options:");
        println!("  -d, --dict PATH   Output file (default: $MINIDAWG_DICT or words.dawg)");
        println!("  --read-only       Write the compact search-only format");
        println!("  -v, --verbose     Debug logging");
        println!("  -h, --help        Print this help");
        return;
    }

    minidawg_cli::init_logging(minidawg_cli::wants_verbose(&args));
    let read_only = minidawg_cli::has_flag(&args, &["--read-only"]);
    let path = minidawg_cli::resolve_dict_path(dict_path.as_deref());

    let mut automaton = Automaton::new();
    let mut previous: Vec<Label> = Vec::new();
    let mut words = 0usize;

    for word in minidawg_cli::stdin_lines() {
        let units: Vec<Label> = word.encode_utf16().collect();
        if units < previous {
            log::warn!("word {}: {word:?} is out of order; the result may not be minimal", words + 1);
        }
        automaton.insert_units(&units);
        previous = units;
        words += 1;
    }

    minidawg_cli::save_automaton(&automaton, &path, !read_only)
        .unwrap_or_else(|e| minidawg_cli::fatal(&e));

    eprintln!(
        "{}: {words} words, {} states, {} discarded",
        path.display(),
        automaton.state_count(),
        automaton.discarded_count()
    );
}
