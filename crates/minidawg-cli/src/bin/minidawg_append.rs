// minidawg-append: Add words from stdin to an editable dictionary.
//
// Loads a dictionary saved in the editable format, inserts each word read
// from stdin and writes it back in place. New words must sort after every
// word already stored.
//
// Usage:
//   minidawg-append [-d DICT] [OPTIONS]
//
// Options:
//   -d, --dict PATH   Dictionary file (default: $MINIDAWG_DICT or words.dawg)
//   -v, --verbose     Debug logging
//   -h, --help        Print help

use minidawg::Search;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) =
        minidawg_cli::parse_dict_path(&args).unwrap_or_else(|e| minidawg_cli::fatal(&e));

    if minidawg_cli::wants_help(&args) {
        println!("minidawg-append: Add words from stdin to an editable dictionary.");
        println!();
        println!("Usage: minidawg-append [-d DICT] [OPTIONS]");
        println!();
        println!("The dictionary must have been built without --read-only.");
        println!();
        println!("Options:");
        println!("  -d, --dict PATH   Dictionary file (default: $MINIDAWG_DICT or words.dawg)");
        println!("  -v, --verbose     Debug logging");
        println!("  -h, --help        Print this help");
        return;
    }

    minidawg_cli::init_logging(minidawg_cli::wants_verbose(&args));
    let path = minidawg_cli::resolve_dict_path(dict_path.as_deref());
    let mut automaton =
        minidawg_cli::load_automaton(&path).unwrap_or_else(|e| minidawg_cli::fatal(&e));

    let mut added = 0usize;
    for word in minidawg_cli::stdin_lines() {
        if !automaton.contains(&word) {
            added += 1;
        }
        automaton.insert(&word);
    }

    minidawg_cli::save_automaton(&automaton, &path, true)
        .unwrap_or_else(|e| minidawg_cli::fatal(&e));

    eprintln!(
        "{}: {added} new words, {} states, {} discarded",
        path.display(),
        automaton.state_count(),
        automaton.discarded_count()
    );
}
