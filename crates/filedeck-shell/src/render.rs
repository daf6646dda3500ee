//! Text rendering of listings.

use std::cmp::Ordering;
use std::fmt::Write as _;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use filedeck_core::{DirectoryListing, Entry, EntryKind};
use itertools::Itertools;

/// Format size in human-readable form.
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Format a modification time in local time.
pub fn format_modified(modified: Option<SystemTime>) -> String {
    match modified {
        Some(time) => DateTime::<Local>::from(time)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => "-".to_string(),
    }
}

/// Entries in display order: optionally directories first, then by name
/// ignoring case.
pub fn display_order(listing: &DirectoryListing, dirs_first: bool) -> Vec<&Entry> {
    listing
        .iter()
        .sorted_by(|a, b| {
            let by_kind = if dirs_first {
                b.is_dir().cmp(&a.is_dir())
            } else {
                Ordering::Equal
            };
            by_kind
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
                .then_with(|| a.name.cmp(&b.name))
        })
        .collect()
}

/// One listing line for an entry.
pub fn format_entry(entry: &Entry, selected: bool) -> String {
    let marker = if selected { '*' } else { ' ' };
    let (kind, size, suffix) = match &entry.kind {
        EntryKind::Directory => ('d', "-".to_string(), "/".to_string()),
        EntryKind::File { executable } => {
            let suffix = if *executable { "*" } else { "" };
            ('-', format_size(entry.size), suffix.to_string())
        }
        EntryKind::Symlink { target, broken } => {
            let note = if *broken { " (broken)" } else { "" };
            ('l', format_size(entry.size), format!(" -> {target}{note}"))
        }
        EntryKind::Other => ('?', format_size(entry.size), String::new()),
    };

    format!(
        "{marker} {kind} {size:>10}  {}  {}{suffix}",
        format_modified(entry.modified),
        entry.name
    )
}

/// Render a whole listing with a header line.
pub fn render_listing(
    listing: &DirectoryListing,
    dirs_first: bool,
    selection: Option<&Path>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({} entries)", listing.dir.display(), listing.len());

    if listing.is_empty() {
        out.push_str("  (empty)\n");
        return out;
    }

    for entry in display_order(listing, dirs_first) {
        let selected = selection.is_some_and(|path| path == entry.path);
        out.push_str(&format_entry(entry, selected));
        out.push('\n');
    }
    out
}
