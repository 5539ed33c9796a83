//! Parsers for git's plain-text reports
//!
//! The formats consumed here are git's stable porcelain outputs:
//! `status --porcelain -z`, `diff --name-only -z` and `stash list`.
//! With `-z` paths are NUL-terminated and never quoted, so names with
//! spaces or non-ASCII characters come through verbatim.

use std::collections::HashSet;

/// Width of the `XY ` status prefix in porcelain v1 output
const STATUS_PREFIX_WIDTH: usize = 3;

/// Terminator of every record in `-z` output
const RECORD_TERMINATOR: char = '\0';

/// One changed path from `git status --porcelain -z`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Path as it is now
    pub path: String,
    /// Source path of a rename or copy
    pub origin: Option<String>,
}

impl StatusEntry {
    fn new(path: &str, origin: Option<&str>) -> Self {
        Self {
            path: path.to_string(),
            origin: origin.map(String::from),
        }
    }
}

/// Parse `git status --porcelain -z` output into changed entries
///
/// Returns an empty list when nothing changed. Input order is preserved.
/// A rename or copy record is followed by a record holding its source
/// path, which is folded into the entry instead of listed.
pub fn parse_status(output: &str) -> Vec<StatusEntry> {
    let mut records = output.split(RECORD_TERMINATOR);
    let mut entries = Vec::new();

    while let Some(record) = records.next() {
        let Some(path) = record.get(STATUS_PREFIX_WIDTH..) else {
            continue;
        };
        if path.is_empty() {
            continue;
        }

        let code = record.get(..2).unwrap_or_default();
        let origin = if code.contains(['R', 'C']) {
            records.next().filter(|origin| !origin.is_empty())
        } else {
            None
        };

        entries.push(StatusEntry::new(path, origin));
    }

    entries
}

/// Parse `git diff --name-only -z` output into paths
pub fn parse_name_list(output: &str) -> Vec<String> {
    output
        .split(RECORD_TERMINATOR)
        .filter(|path| !path.is_empty())
        .map(String::from)
        .collect()
}

/// Select the staged paths that are present in `files`
///
/// Staged paths missing from `files` are ignored.
pub fn staged_subset(files: &[String], staged_output: &str) -> HashSet<String> {
    parse_name_list(staged_output)
        .into_iter()
        .filter(|path| files.contains(path))
        .collect()
}

/// Parse `git stash list` output into session descriptors, most recent first
///
/// The position of a descriptor is the stash index used to pop or drop it.
pub fn parse_stash_list(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(String::from)
        .collect()
}
