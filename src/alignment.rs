/*!
 * Bilingual alignment of two subtitle tracks.
 *
 * Every entry of the first track is compared with every entry of the second
 * track. Each pair whose time spans overlap by more than zero yields one
 * aligned record covering exactly the common span. Records are produced in
 * traversal order (first track outer, second track inner) and are neither
 * sorted nor merged, so one long line facing several short ones produces
 * several records.
 *
 * Inputs are expected to have passed through the sanitizer; invalid spans
 * do not panic but give meaningless overlaps.
 */

use crate::subtitle_processor::SubtitleEntry;
use crate::timecode::Timecode;

/// One merged bilingual caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedEntry {
    pub start: Timecode,
    pub end: Timecode,
    pub first_text: String,
    pub second_text: String,
}

impl AlignedEntry {
    pub fn duration(&self) -> Timecode {
        self.end - self.start
    }

    /// Turn into a subtitle entry showing the first text above the second
    pub fn into_entry(self, seq_num: usize) -> SubtitleEntry {
        SubtitleEntry::new(
            seq_num,
            self.start,
            self.end,
            format!("{}\n{}", self.first_text, self.second_text),
        )
    }
}

/// Common span of two entries, if it is not empty
pub fn overlap(first: &SubtitleEntry, second: &SubtitleEntry) -> Option<(Timecode, Timecode)> {
    let start = first.start.max(second.start);
    let end = first.end.min(second.end);
    (start < end).then_some((start, end))
}

/// Lazily walk the full cross product of both tracks
pub fn overlaps<'a>(
    first: &'a [SubtitleEntry],
    second: &'a [SubtitleEntry],
) -> impl Iterator<Item = AlignedEntry> + 'a {
    first.iter().flat_map(move |f| {
        second.iter().filter_map(move |s| {
            overlap(f, s).map(|(start, end)| AlignedEntry {
                start,
                end,
                first_text: f.text.clone(),
                second_text: s.text.clone(),
            })
        })
    })
}

/// All overlapping pairs, in traversal order
pub fn align_tracks(first: &[SubtitleEntry], second: &[SubtitleEntry]) -> Vec<AlignedEntry> {
    overlaps(first, second).collect()
}

/// Number aligned records in emission order, starting at `start_index`
pub fn number_aligned(records: Vec<AlignedEntry>, start_index: usize) -> Vec<SubtitleEntry> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| record.into_entry(start_index + i))
        .collect()
}
