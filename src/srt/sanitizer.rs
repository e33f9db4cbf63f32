/*!
 * Sorting, filtering and renumbering of subtitle entries.
 */

use std::fmt;

use log::warn;

use crate::subtitle_processor::SubtitleEntry;

/// Why an entry was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoContent,
    NegativeStart,
    StartNotBeforeEnd,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoContent => write!(f, "No content"),
            SkipReason::NegativeStart => write!(f, "Start time < 0 seconds"),
            SkipReason::StartNotBeforeEnd => write!(f, "Subtitle start time >= end time"),
        }
    }
}

/// An entry removed during sanitizing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSubtitle {
    pub entry: SubtitleEntry,
    pub reason: SkipReason,
}

/// Result of a sanitizing pass
#[derive(Debug, Clone, Default)]
pub struct Sanitized {
    pub entries: Vec<SubtitleEntry>,
    pub skipped: Vec<SkippedSubtitle>,
}

/// First rule the entry breaks, checked in a fixed order
pub fn skip_reason(entry: &SubtitleEntry) -> Option<SkipReason> {
    if entry.text.trim().is_empty() {
        Some(SkipReason::NoContent)
    } else if entry.start.is_negative() {
        Some(SkipReason::NegativeStart)
    } else if entry.start >= entry.end {
        Some(SkipReason::StartNotBeforeEnd)
    } else {
        None
    }
}

/// Sort by `(start, end)`, drop invalid entries and renumber the rest from
/// `start_index` without gaps. Takes ownership so entries are reused as is.
pub fn sanitize(mut entries: Vec<SubtitleEntry>, start_index: usize) -> Sanitized {
    entries.sort_by(SubtitleEntry::timing_cmp);

    let mut result = Sanitized {
        entries: Vec::with_capacity(entries.len()),
        skipped: Vec::new(),
    };

    for mut entry in entries {
        if let Some(reason) = skip_reason(&entry) {
            warn!("Skipped subtitle at index {}: {}", entry.seq_num, reason);
            result.skipped.push(SkippedSubtitle { entry, reason });
            continue;
        }
        entry.seq_num = start_index + result.entries.len();
        result.entries.push(entry);
    }

    result
}

/// Sorted, renumbered copy of `entries`; the input is left untouched
pub fn sort_and_reindex(entries: &[SubtitleEntry], start_index: usize) -> Vec<SubtitleEntry> {
    sanitize(entries.to_vec(), start_index).entries
}

/// Same as [`sort_and_reindex`] but consumes the input
pub fn sort_and_reindex_owned(entries: Vec<SubtitleEntry>, start_index: usize) -> Vec<SubtitleEntry> {
    sanitize(entries, start_index).entries
}
