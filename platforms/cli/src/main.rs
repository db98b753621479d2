use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process;
use swipe::{
    Action, KeyActionDispatcher, KeyActionMap, Marker, MemoryDocument, SwipeCollector, SwipeError,
};
use tracing_subscriber::filter::LevelFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Key identifiers to press, in order (e.g. Enter ArrowLeft Right)
    keys: Vec<String>,

    /// Read key identifiers from a file, one per line
    #[clap(short, long, conflicts_with = "keys")]
    file: Option<PathBuf>,

    /// Output format
    #[clap(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Collect and clear markers after every key press
    #[clap(short, long)]
    collect: bool,

    /// Print the key table and exit
    #[clap(short, long)]
    list: bool,

    /// Log at debug level
    #[clap(short = 'd', long)]
    debug: bool,
}

/// Reads one key identifier per line. Only the line terminator is stripped, so an empty line is
/// the empty key identifier.
fn read_keys(reader: impl BufRead) -> Result<Vec<String>, SwipeError> {
    reader
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| SwipeError::Io(format!("Failed to read keys: {}", e)))
}

fn read_keys_from_file(path: &Path) -> Result<Vec<String>, SwipeError> {
    let file = File::open(path).map_err(|e| {
        SwipeError::Io(format!("Failed to open {}: {}", path.display(), e))
    })?;

    read_keys(BufReader::new(file))
}

/// Presses every key against an empty in-memory document.
///
/// Without `collect`, returns the actions recorded by the markers left in the document. With
/// `collect`, the collector runs after each press and the returned actions are the ones it
/// consumed.
fn replay(keys: &[String], collect: bool) -> Result<Vec<Action>, SwipeError> {
    let mut dispatcher = KeyActionDispatcher::new(MemoryDocument::new());
    let mut collected = Vec::new();

    for key in keys {
        dispatcher.handle_key(key)?;

        if collect {
            if let Some(action) = SwipeCollector::collect(dispatcher.sink_mut())? {
                collected.push(action);
            }
        }
    }

    if collect {
        Ok(collected)
    } else {
        Ok(dispatcher.sink().recorded_actions())
    }
}

fn render(actions: &[Action], format: Format) -> Result<String, SwipeError> {
    match format {
        Format::Text => Ok(actions
            .iter()
            .map(|action| action.to_string())
            .collect::<Vec<_>>()
            .join("\n")),
        Format::Json => {
            let markers: Vec<Marker> = actions.iter().copied().map(Marker::for_action).collect();
            serde_json::to_string_pretty(&markers)
                .map_err(|e| SwipeError::Io(format!("Failed to serialize markers: {}", e)))
        }
    }
}

/// One line per action, listing the keys mapped to it.
fn render_table() -> String {
    Action::ALL
        .into_iter()
        .map(|action| {
            let keys = KeyActionMap::keys_for(action)
                .into_iter()
                .map(|key| {
                    if KeyActionMap::is_legacy_alias(key) {
                        format!("{} (legacy)", key)
                    } else {
                        key.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("{:<10} {}", action.as_str(), keys)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn run(cli: &Cli) -> Result<String, SwipeError> {
    if cli.list {
        return Ok(render_table());
    }

    let keys = if !cli.keys.is_empty() {
        cli.keys.clone()
    } else if let Some(path) = &cli.file {
        read_keys_from_file(path)?
    } else {
        read_keys(io::stdin().lock())?
    };

    let actions = replay(&keys, cli.collect)?;
    render(&actions, cli.format)
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn keys(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|key| key.to_string()).collect()
    }

    #[test]
    fn test_replay_sequence() {
        let actions = replay(&keys(&["ArrowRight", "ArrowRight", "Enter"]), false).unwrap();
        assert_eq!(actions, vec![Action::Like, Action::Like, Action::Superlike]);
    }

    #[test]
    fn test_replay_ignores_unmapped_keys() {
        let actions = replay(&keys(&["Escape", "a", "", "ArrowUp"]), false).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_replay_with_collect() {
        let actions = replay(&keys(&["Left", "Tab", "Enter"]), true).unwrap();
        assert_eq!(actions, vec![Action::Dislike, Action::Superlike]);
    }

    #[test]
    fn test_read_keys_keeps_empty_lines() {
        let input = Cursor::new("Enter\r\n\nRight\n");
        assert_eq!(read_keys(input).unwrap(), keys(&["Enter", "", "Right"]));
    }

    #[test]
    fn test_run_with_key_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "ArrowLeft").unwrap();
        writeln!(file, "ArrowDown").unwrap();
        writeln!(file, "Right").unwrap();

        let cli = Cli::parse_from(["swipe-cli", "--file", file.path().to_str().unwrap()]);

        assert_eq!(run(&cli).unwrap(), "dislike\nlike");
    }

    #[test]
    fn test_run_with_missing_file() {
        let cli = Cli::parse_from(["swipe-cli", "--file", "/nonexistent/keys.txt"]);

        let error = run(&cli).unwrap_err();
        assert!(matches!(error, SwipeError::Io(_)));
    }

    #[test]
    fn test_run_json_output() {
        let cli = Cli::parse_from(["swipe-cli", "--format", "json", "Enter"]);
        let output = run(&cli).unwrap();

        let markers: Vec<Marker> = serde_json::from_str(&output).unwrap();
        assert_eq!(markers, vec![Marker::for_action(Action::Superlike)]);
        assert!(output.contains("\"class\": \"userSwipeAction\""));
        assert!(output.contains("\"display\": \"none\""));
    }

    #[test]
    fn test_list_table() {
        let cli = Cli::parse_from(["swipe-cli", "--list"]);
        let table = run(&cli).unwrap();

        assert_eq!(
            table.lines().collect::<Vec<_>>(),
            vec![
                "like       ArrowRight, Right (legacy)",
                "dislike    ArrowLeft, Left (legacy)",
                "superlike  Enter",
            ]
        );
    }
}
