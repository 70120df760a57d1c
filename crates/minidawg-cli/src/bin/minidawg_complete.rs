// minidawg-complete: List stored words starting with each prefix on stdin.
//
// For every prefix read, prints each stored word that begins with it, one
// per line, in code unit order. A prefix that is itself stored is printed
// first.
//
// Usage:
//   minidawg-complete [-d DICT] [OPTIONS]
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
        println!("minidawg-complete: List stored words starting with each prefix on stdin.");
        println!();
        println!("Usage: minidawg-complete [-d DICT] [OPTIONS]");
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

    for prefix in minidawg_cli::stdin_lines() {
        let mut matches = 0usize;
        dict.list_suffixes_with(&prefix, &mut |suffix: &str| {
            let _ = writeln!(out, "{prefix}{suffix}");
            matches += 1;
        });
        log::debug!("{prefix:?}: {matches} completions");
    }
}
