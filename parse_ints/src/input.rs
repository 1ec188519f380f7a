use anyhow::Context;
use std::path::Path;

type Error = anyhow::Error;

/// Reads the puzzle from `path` when one is given, otherwise falls back to the
/// input bundled into the binary. Trailing whitespace is trimmed either way.
pub fn read_puzzle(path: Option<&Path>, bundled: &str) -> Result<String, Error> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read puzzle input from {}", path.display()))?,
        None => bundled.to_string(),
    };
    Ok(raw.trim_end().to_string())
}

/// Reads the puzzle named by the first command line argument, if any.
pub fn read_puzzle_from_args(bundled: &str) -> Result<String, Error> {
    let path = std::env::args_os().nth(1);
    read_puzzle(path.as_deref().map(Path::new), bundled)
}
