//! Reading prefix lists from files or stdin.
//!
//! Text input holds whitespace-separated tokens; `#` starts a comment that runs
//! to the end of the line. Files ending in `.json` hold an array of prefix strings.

use crate::models::Prefix;
use crate::parser::{is_delimiter, PrefixScanner};
use std::error::Error;
use std::io::Read;
use std::path::Path;

/// Read prefixes from `path`, or from stdin when `path` is `None` or `-`.
pub fn read_prefix_file(path: Option<&str>) -> Result<Vec<Prefix>, Box<dyn Error>> {
    match path {
        None | Some("-") => {
            log::info!("Reading prefixes from stdin");
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| format!("Error reading stdin: {e}"))?;
            prefixes_from_text(&text)
        }
        Some(file) => {
            if !Path::new(file).exists() {
                return Err(format!("Input file does not exist: {file}").into());
            }
            log::info!("Reading prefixes from file: {file}");
            let text = std::fs::read_to_string(file)
                .map_err(|e| format!("Error reading input file {file}: {e}"))?;
            if file.ends_with(".json") {
                prefixes_from_json(&text)
            } else {
                prefixes_from_text(&text)
            }
        }
    }
}

/// Parse whitespace-separated prefix tokens, one or more per line.
pub fn prefixes_from_text(text: &str) -> Result<Vec<Prefix>, Box<dyn Error>> {
    let mut prefixes = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or_default();
        let mut scanner = PrefixScanner::new(content);
        let found = scanner.read_all().map_err(|e| {
            let token = scanner
                .remaining()
                .trim_start_matches(is_delimiter)
                .split(is_delimiter)
                .next()
                .unwrap_or_default();
            format!("line {}: bad prefix {token:?}: {e}", n + 1)
        })?;
        prefixes.extend(found);
    }
    log::debug!("Parsed {} prefix(es) from text", prefixes.len());
    Ok(prefixes)
}

/// Parse a JSON array of prefix strings.
pub fn prefixes_from_json(text: &str) -> Result<Vec<Prefix>, Box<dyn Error>> {
    let de = &mut serde_json::Deserializer::from_str(text);
    let prefixes: Vec<Prefix> = serde_path_to_error::deserialize(de)
        .map_err(|e| format!("Error parsing JSON at {}: {}", e.path(), e.inner()))?;
    log::debug!("Parsed {} prefix(es) from JSON", prefixes.len());
    Ok(prefixes)
}
