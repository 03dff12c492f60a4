//! Dictionary file loading.
//!
//! Format: one `<word> <priority>` pair per line, whitespace-separated,
//! UTF-8. Blank lines and runs of spaces are tolerated; a line whose
//! priority does not parse is skipped with a warning and never aborts the
//! load. Words are lowercased before they reach the index.
//!
//! The loaded list is shuffled with a non-deterministic RNG before it is
//! handed to the tree builder. Dictionaries ship sorted, and inserting
//! sorted words into a BK-tree degenerates it into a spine under
//! edit-distance metrics; a shuffled insertion order produces a
//! well-branched tree.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rand::seq::SliceRandom;
use tracing::{info, warn};

use crate::error::{CorrectorError, Result};

/// A dictionary word with its accumulated frequency priority.
pub type Entry = (String, u32);

/// Parse `<word> <priority>` records from a reader.
///
/// Extra tokens after the priority are ignored. Returns entries in file
/// order; shuffling is the caller's (or [`load`]'s) concern.
pub fn parse<R: BufRead>(reader: R) -> std::io::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let mut tokens = line.split_whitespace();
        let Some(word) = tokens.next() else {
            continue; // blank line
        };
        match tokens.next().map(str::parse::<u32>) {
            Some(Ok(priority)) => entries.push((word.to_lowercase(), priority)),
            _ => warn!(line = number + 1, "skipping malformed dictionary record"),
        }
    }
    Ok(entries)
}

/// Load a dictionary file and shuffle the entries for insertion.
///
/// A missing or unreadable file is a hard error; malformed records are not.
pub fn load(path: &Path) -> Result<Vec<Entry>> {
    info!(path = %path.display(), "reading dictionary");
    let file = File::open(path).map_err(|err| CorrectorError::io(path, err))?;
    let mut entries =
        parse(BufReader::new(file)).map_err(|err| CorrectorError::io(path, err))?;
    info!(words = entries.len(), "dictionary read");

    entries.shuffle(&mut rand::thread_rng());
    Ok(entries)
}
