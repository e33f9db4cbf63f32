/*!
 * Lazy SRT block scanner.
 *
 * Each block is `INDEX`, a timing line `START --> END [PROPRIETARY]`, and the
 * content, terminated by a blank line or the end of input. The scanner also
 * recovers two common authoring defects:
 *
 * - a missing blank line between blocks, when the next lines are clearly an
 *   index followed by a timestamp;
 * - blank lines inside content, as long as a block header eventually follows.
 *
 * Blocks must tile the input exactly. Content is the shortest text that can
 * be followed by a valid terminator, so plain text after a block is folded
 * into its content; what cannot be folded (a header with a broken timing
 * line, leading junk) is reported with its offsets instead of being skipped.
 */

use std::ops::Range;

use crate::errors::SubtitleError;
use crate::subtitle_processor::SubtitleEntry;
use crate::timecode::Timecode;

const ARROW: &[u8] = b" --> ";

/// Byte ranges of one matched block
#[derive(Debug, Clone)]
struct BlockMatch {
    index: Range<usize>,
    start_ts: Range<usize>,
    end_ts: Range<usize>,
    proprietary: Range<usize>,
    content: Range<usize>,
    end: usize,
}

/// Forward-only cursor yielding one entry per SRT block.
///
/// Iteration stops after the first error. Create a new parser to scan the
/// same text again.
#[derive(Debug, Clone)]
pub struct SrtParser<'a> {
    text: &'a str,
    pos: usize,
    finished: bool,
}

/// Start scanning `text`. No work happens until the first `next()`.
pub fn parse(text: &str) -> SrtParser<'_> {
    SrtParser::new(text)
}

impl<'a> SrtParser<'a> {
    pub fn new(text: &'a str) -> Self {
        SrtParser {
            text,
            pos: 0,
            finished: false,
        }
    }

    /// Byte offset where the next block is expected
    pub fn offset(&self) -> usize {
        self.pos
    }

    fn bytes(&self) -> &'a [u8] {
        self.text.as_bytes()
    }

    fn digits_end(&self, mut p: usize) -> usize {
        let b = self.bytes();
        while p < b.len() && b[p].is_ascii_digit() {
            p += 1;
        }
        p
    }

    /// ASCII whitespace only, vertical tab included
    fn whitespace_end(&self, mut p: usize) -> usize {
        let b = self.bytes();
        while p < b.len() && matches!(b[p], b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c) {
            p += 1;
        }
        p
    }

    /// `\r\n` or `\n` at `p`
    fn newline_end(&self, p: usize) -> Option<usize> {
        let b = self.bytes();
        match b.get(p) {
            Some(b'\n') => Some(p + 1),
            Some(b'\r') if b.get(p + 1) == Some(&b'\n') => Some(p + 2),
            _ => None,
        }
    }

    /// Four digit groups joined by `,`, `.` or `:`
    fn timestamp_end(&self, p: usize) -> Option<usize> {
        let b = self.bytes();
        let mut q = p;
        for group in 0..4 {
            let end = self.digits_end(q);
            if end == q {
                return None;
            }
            q = end;
            if group < 3 {
                match b.get(q) {
                    Some(b',' | b'.' | b':') => q += 1,
                    _ => return None,
                }
            }
        }
        Some(q)
    }

    /// Index digits, whitespace ending in a newline, then the start of a
    /// timestamp. Returns the end of the index and where the timestamp begins.
    fn header_at(&self, p: usize) -> Option<(usize, usize)> {
        let index_end = self.digits_end(p);
        if index_end == p {
            return None;
        }
        let ts_start = self.whitespace_end(index_end);
        if ts_start == index_end || self.bytes()[ts_start - 1] != b'\n' {
            return None;
        }
        self.timestamp_end(ts_start)?;
        Some((index_end, ts_start))
    }

    fn is_header(&self, p: usize) -> bool {
        self.header_at(p).is_some()
    }

    /// Where a block whose content stops at `c` ends, if it can stop there.
    ///
    /// Content must be followed by a line break or end of input, then by a
    /// blank line, end of input, or the next header directly.
    fn terminator_end(&self, c: usize) -> Option<usize> {
        let len = self.text.len();
        let after_content = match self.newline_end(c) {
            Some(p) => p,
            None if c == len => c,
            None => return None,
        };

        if let Some(after_blank) = self.newline_end(after_content) {
            if after_blank == len || self.is_header(after_blank) {
                return Some(after_blank);
            }
        }
        if after_content == len || self.is_header(after_content) {
            return Some(after_content);
        }
        None
    }

    fn match_block(&self, p: usize) -> Option<BlockMatch> {
        let b = self.bytes();
        let len = b.len();

        let (index_end, start_ts) = self.header_at(p)?;
        let start_ts_end = self.timestamp_end(start_ts)?;
        if !b[start_ts_end..].starts_with(ARROW) {
            return None;
        }
        let end_ts = start_ts_end + ARROW.len();
        let end_ts_end = self.timestamp_end(end_ts)?;

        let prop_start = if b.get(end_ts_end) == Some(&b' ') {
            end_ts_end + 1
        } else {
            end_ts_end
        };
        let prop_end = b[prop_start..]
            .iter()
            .position(|&c| c == b'\r' || c == b'\n')
            .map_or(len, |off| prop_start + off);
        let content_start = self.newline_end(prop_end)?;

        // Shortest content wins.
        let mut c = content_start;
        loop {
            if let Some(end) = self.terminator_end(c) {
                return Some(BlockMatch {
                    index: p..index_end,
                    start_ts: start_ts..start_ts_end,
                    end_ts: end_ts..end_ts_end,
                    proprietary: prop_start..prop_end,
                    content: content_start..c,
                    end,
                });
            }
            if c >= len {
                return None;
            }
            c += 1;
        }
    }

    /// First offset after `from` where a block matches
    fn next_block_start(&self, from: usize) -> Option<usize> {
        let b = self.bytes();
        (from..b.len()).find(|&p| b[p].is_ascii_digit() && self.match_block(p).is_some())
    }

    fn build_entry(&self, m: &BlockMatch) -> Result<SubtitleEntry, SubtitleError> {
        let raw_index = &self.text[m.index.clone()];
        let seq_num = raw_index
            .parse::<usize>()
            .map_err(|_| SubtitleError::InvalidIndex(raw_index.to_string()))?;
        let start = Timecode::parse(&self.text[m.start_ts.clone()])?;
        let end = Timecode::parse(&self.text[m.end_ts.clone()])?;

        Ok(SubtitleEntry {
            seq_num,
            start,
            end,
            text: self.text[m.content.clone()].replace("\r\n", "\n"),
            proprietary: self.text[m.proprietary.clone()].to_string(),
        })
    }

    fn gap_error(&self, expected_start: usize, actual_start: usize) -> SubtitleError {
        SubtitleError::ParseError {
            expected_start,
            actual_start,
            unmatched_content: self.text[expected_start..actual_start].to_string(),
        }
    }
}

impl Iterator for SrtParser<'_> {
    type Item = Result<SubtitleEntry, SubtitleError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.pos == self.text.len() {
            self.finished = true;
            return None;
        }

        let Some(m) = self.match_block(self.pos) else {
            self.finished = true;
            let actual_start = self
                .next_block_start(self.pos + 1)
                .unwrap_or(self.text.len());
            return Some(Err(self.gap_error(self.pos, actual_start)));
        };

        self.pos = m.end;
        let entry = self.build_entry(&m);
        if entry.is_err() {
            self.finished = true;
        }
        Some(entry)
    }
}

impl std::iter::FusedIterator for SrtParser<'_> {}
