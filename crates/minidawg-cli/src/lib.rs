// minidawg-cli: shared utilities for CLI tools.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process;

use minidawg::{Automaton, DawgError, Dictionary};

/// Dictionary file used when neither `-d` nor the environment names one.
pub const DEFAULT_DICT: &str = "words.dawg";

/// Environment variable consulted for the dictionary path.
pub const DICT_ENV: &str = "MINIDAWG_DICT";

/// Parse a `--dict=PATH`, `--dict PATH` or `-d PATH` argument from command
/// line args.
///
/// Returns `(dict_path, remaining_args)`, or an error if the flag has no
/// value.
pub fn parse_dict_path(args: &[String]) -> Result<(Option<String>, Vec<String>), String> {
    let mut dict_path = None;
    let mut remaining = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix("--dict=") {
            dict_path = Some(val.to_string());
        } else if arg == "--dict" || arg == "-d" {
            match iter.next() {
                Some(val) => dict_path = Some(val.clone()),
                None => return Err(format!("{arg} requires a value")),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    Ok((dict_path, remaining))
}

/// Pick the dictionary path.
///
/// Search order:
/// 1. `dict_path` argument (if provided)
/// 2. `MINIDAWG_DICT` environment variable
/// 3. `words.dawg` in the current directory
pub fn resolve_dict_path(dict_path: Option<&str>) -> PathBuf {
    pick_dict_path(dict_path, std::env::var(DICT_ENV).ok())
}

fn pick_dict_path(dict_path: Option<&str>, env_path: Option<String>) -> PathBuf {
    if let Some(p) = dict_path {
        return PathBuf::from(p);
    }
    match env_path {
        Some(p) if !p.is_empty() => PathBuf::from(p),
        _ => PathBuf::from(DEFAULT_DICT),
    }
}

/// Install the `env_logger` backend. `RUST_LOG` wins; otherwise the filter
/// is `debug` when `verbose` and `warn` when not.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

/// Open a dictionary for searching. Either save format is accepted.
pub fn load_dictionary(path: &Path) -> Result<Dictionary, String> {
    let file = open(path)?;
    Dictionary::load(BufReader::new(file)).map_err(|e| describe(path, e))
}

/// Open a dictionary for further insertion. Only the editable format is
/// accepted.
pub fn load_automaton(path: &Path) -> Result<Automaton, String> {
    let file = open(path)?;
    Automaton::load(BufReader::new(file)).map_err(|e| describe(path, e))
}

/// Write `automaton` to `path`, replacing any existing file.
///
/// The stream is built in memory first, so a save that fails to encode
/// leaves the existing file untouched.
pub fn save_automaton(automaton: &Automaton, path: &Path, editable: bool) -> Result<(), String> {
    let bytes = automaton.to_bytes(editable).map_err(|e| describe(path, e))?;
    std::fs::write(path, &bytes)
        .map_err(|e| format!("failed to write {}: {e}", path.display()))
}

fn open(path: &Path) -> Result<File, String> {
    File::open(path).map_err(|e| format!("failed to open {}: {e}", path.display()))
}

fn describe(path: &Path, err: DawgError) -> String {
    match err {
        DawgError::NotEditable => format!(
            "{} was saved read-only and cannot be extended; rebuild it without --read-only",
            path.display()
        ),
        other => format!("{}: {other}", path.display()),
    }
}

/// Non-empty, trimmed lines of `input`. Stops at the first read error.
pub fn input_lines<R: BufRead>(input: R) -> impl Iterator<Item = String> {
    input
        .lines()
        .map_while(|line| match line {
            Ok(l) => Some(l),
            Err(e) => {
                log::error!("error reading stdin: {e}");
                None
            }
        })
        .filter_map(|line| {
            let word = line.trim();
            (!word.is_empty()).then(|| word.to_string())
        })
}

/// Lines of stdin, as [`input_lines`].
pub fn stdin_lines() -> impl Iterator<Item = String> {
    input_lines(io::stdin().lock())
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    has_flag(args, &["--help", "-h"])
}

/// Check if `--verbose` or `-v` is in the args.
pub fn wants_verbose(args: &[String]) -> bool {
    has_flag(args, &["--verbose", "-v"])
}

pub fn has_flag(args: &[String], names: &[&str]) -> bool {
    args.iter().any(|a| names.contains(&a.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dict_flag_forms() {
        let (path, rest) = parse_dict_path(&args(&["-d", "a.dawg", "-v"])).unwrap();
        assert_eq!(path.as_deref(), Some("a.dawg"));
        assert_eq!(rest, args(&["-v"]));

        let (path, _) = parse_dict_path(&args(&["--dict", "b.dawg"])).unwrap();
        assert_eq!(path.as_deref(), Some("b.dawg"));

        let (path, rest) = parse_dict_path(&args(&["--read-only", "--dict=c.dawg"])).unwrap();
        assert_eq!(path.as_deref(), Some("c.dawg"));
        assert_eq!(rest, args(&["--read-only"]));
    }

    #[test]
    fn dict_flag_without_value() {
        assert!(parse_dict_path(&args(&["-d"])).is_err());
        let (path, rest) = parse_dict_path(&args(&[])).unwrap();
        assert!(path.is_none());
        assert!(rest.is_empty());
    }

    #[test]
    fn dict_path_precedence() {
        let env = Some("env.dawg".to_string());
        assert_eq!(pick_dict_path(Some("arg.dawg"), env.clone()), PathBuf::from("arg.dawg"));
        assert_eq!(pick_dict_path(None, env), PathBuf::from("env.dawg"));
        assert_eq!(pick_dict_path(None, Some(String::new())), PathBuf::from(DEFAULT_DICT));
        assert_eq!(pick_dict_path(None, None), PathBuf::from(DEFAULT_DICT));
    }

    #[test]
    fn flags() {
        let a = args(&["-v", "--read-only"]);
        assert!(wants_verbose(&a));
        assert!(!wants_help(&a));
        assert!(has_flag(&a, &["--read-only"]));
        assert!(wants_help(&args(&["--help"])));
    }

    #[test]
    fn lines_are_trimmed_and_blank_lines_skipped() {
        let input = "  cat \n\n\tdog\n   \nemu";
        let lines: Vec<String> = input_lines(input.as_bytes()).collect();
        assert_eq!(lines, vec!["cat", "dog", "emu"]);
    }

    #[test]
    fn save_and_load_through_files() {
        let dir = std::env::temp_dir().join(format!("minidawg-cli-{}", process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let editable = dir.join("editable.dawg");
        let compact = dir.join("compact.dawg");

        let automaton = Automaton::from_words(["car", "cart", "cat"]);
        save_automaton(&automaton, &editable, true).unwrap();
        save_automaton(&automaton, &compact, false).unwrap();

        let dict = load_dictionary(&compact).unwrap();
        assert!(minidawg::Search::contains(&dict, "cart"));
        let reloaded = load_automaton(&editable).unwrap();
        assert!(minidawg::Search::contains(&reloaded, "cat"));

        let err = load_automaton(&compact).unwrap_err();
        assert!(err.contains("read-only"), "{err}");
        assert!(load_dictionary(&dir.join("missing.dawg")).is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn failed_save_keeps_existing_file() {
        let dir = std::env::temp_dir().join(format!("minidawg-cli-keep-{}", process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("words.dawg");

        save_automaton(&Automaton::from_words(["keep"]), &path, true).unwrap();
        let before = std::fs::read(&path).unwrap();

        // One more root transition than the format can count.
        let mut automaton = load_automaton(&path).unwrap();
        for label in 0..=i16::MAX as u16 {
            automaton.insert_units(&[label]);
        }
        let err = save_automaton(&automaton, &path, true).unwrap_err();
        assert!(err.contains("does not fit"), "{err}");

        assert_eq!(std::fs::read(&path).unwrap(), before);
        let reloaded = load_automaton(&path).unwrap();
        assert!(minidawg::Search::contains(&reloaded, "keep"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
