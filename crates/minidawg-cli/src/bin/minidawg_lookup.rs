// minidawg-lookup: Check words from stdin against a dictionary.
//
// Output format:
//   C: word    (stored)
//   W: word    (not stored)
//
// Usage:
//   minidawg-lookup [-d DICT] [OPTIONS]
//
// Options:
//   -d, --dict PATH   Dictionary file (default: $MINIDAWG_DICT or words.dawg)
//   -v, --verbose     Debug logging
//   -h, --help        Print help

use std::io::{self, Write};

use minidawg::Search;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) =
        minidawg_cli::parse_dict_path(&args).unwrap_or_else(|e| minidawg_cli::fatal(&e));

    if minidawg_cli::wants_help(&args) {
        println!("minidawg-lookup: Check words from stdin against a dictionary.");
        println!();
        println!("Usage: minidawg-lookup [-d DICT] [OPTIONS]");
        println!();
        println!("Reads words from stdin (one per line). Prints:");
        println!("  C: word    (stored)");
        println!("  W: word    (not stored)");
        println!();
        println!("Options:");
        println!("  -d, --dict PATH   Dictionary file (default: $MINIDAWG_DICT or words.dawg)");
        println!("  -v, --verbose     Debug logging");
        println!("  -h, --help        Print this help");
        return;
    }

    minidawg_cli::init_logging(minidawg_cli::wants_verbose(&args));
    let path = minidawg_cli::resolve_dict_path(dict_path.as_deref());
    let dict = minidawg_cli::load_dictionary(&path).unwrap_or_else(|e| minidawg_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for word in minidawg_cli::stdin_lines() {
        let tag = if dict.contains(&word) { 'C' } else { 'W' };
        let _ = writeln!(out, "{tag}: {word}");
    }
}
