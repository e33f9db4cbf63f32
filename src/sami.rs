/*!
 * SAMI (`.smi`) to subtitle entry conversion.
 *
 * SAMI is an HTML-like format where each caption starts at a
 * `<SYNC Start=ms>` tag and lasts until the next one. Conversion keeps only
 * the caption text: line-break tags become newlines, named character
 * references are dropped, and every other tag is removed while the text it
 * wraps is kept.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;
use crate::subtitle_processor::SubtitleEntry;
use crate::timecode::Timecode;

// @const: Sync tag with its start time and the text following it
static SYNC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<sync\s+start\s*=\s*(\d+)>(.*)$").unwrap()
});

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static ENTITY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"&[a-z]{2,5};").unwrap());

static BREAK_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(<br>)+").unwrap());

// @const: One tag and the plain text up to the next tag
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^</?([a-z]+)[^>]*>([^<>]*)").unwrap()
});

/// A caption closes this many milliseconds before the next one starts
const CUE_GAP_MS: i64 = 10;

#[derive(Debug)]
struct Cue {
    start_ms: i64,
    end_ms: i64,
    raw: String,
}

fn find_sync_tag(line: &str) -> Option<usize> {
    line.to_ascii_uppercase().find("<SYNC")
}

fn parse_start(value: &str, line_no: usize) -> Result<i64, SubtitleError> {
    value
        .parse::<i64>()
        .map_err(|_| SubtitleError::InvalidSami(format!("start time out of range in line {}: {}", line_no, value)))
}

/// Split the document into cues. The final sync point only closes the cue
/// before it, so it never becomes a cue of its own.
fn collect_cues(text: &str) -> Result<Vec<Cue>, SubtitleError> {
    let body_start = find_sync_tag(text)
        .ok_or_else(|| SubtitleError::InvalidSami("no <SYNC> tag found".to_string()))?;

    let mut cues = Vec::new();
    let mut open: Option<i64> = None;
    let mut pending = String::new();

    for (line_no, line) in text[body_start..].split('\n').enumerate() {
        let Some(tag_pos) = find_sync_tag(line) else {
            pending.push_str(line);
            continue;
        };

        let caps = SYNC_REGEX.captures(line).ok_or_else(|| {
            SubtitleError::InvalidSami(format!(
                "invalid <SYNC Start=nnnn> tag in line {}: {:?}",
                line_no + 1,
                line
            ))
        })?;
        let start_ms = parse_start(&caps[1], line_no + 1)?;

        pending.push_str(&line[..tag_pos]);
        if let Some(prev_start) = open {
            cues.push(Cue {
                start_ms: prev_start,
                end_ms: start_ms,
                raw: std::mem::take(&mut pending),
            });
        }
        pending = caps[2].to_string();
        open = Some(start_ms);
    }

    Ok(cues)
}

/// Remove markup tags, keeping the text between them. Stops at the first
/// `<` that does not open a well-formed tag.
fn strip_tags(text: &str) -> String {
    let Some(first) = text.find('<') else {
        return text.to_string();
    };

    let mut out = text[..first].to_string();
    let mut rest = &text[first..];
    while let Some(caps) = TAG_REGEX.captures(rest) {
        let Some(inner) = caps.get(2) else { break };
        out.push_str(inner.as_str());
        rest = &rest[inner.end()..];
    }
    out
}

/// Reduce raw cue markup to plain caption text
pub fn clean_cue_text(raw: &str) -> String {
    let text = WHITESPACE_REGEX.replace_all(raw, " ");
    let text = ENTITY_REGEX.replace_all(&text, "");
    let text = BREAK_REGEX.replace_all(&text, "\n");
    strip_tags(&text).trim().to_string()
}

/// Convert a SAMI document into subtitle entries.
///
/// Consecutive cues share display indexes in pairs (1, 2, 2, 3, 3, ...) and
/// cues that are empty after cleaning are dropped, so the result should be
/// sanitized before use.
pub fn parse_sami(text: &str) -> Result<Vec<SubtitleEntry>, SubtitleError> {
    let cues = collect_cues(text)?;
    let total = cues.len();

    let entries: Vec<SubtitleEntry> = cues
        .into_iter()
        .enumerate()
        .filter_map(|(i, cue)| {
            let content = clean_cue_text(&cue.raw);
            if content.is_empty() {
                return None;
            }
            Some(SubtitleEntry::new(
                (i + 1) / 2 + 1,
                Timecode::from_millis(cue.start_ms),
                Timecode::from_millis(cue.end_ms - CUE_GAP_MS),
                content,
            ))
        })
        .collect();

    debug!("SAMI: {} cues, {} with text", total, entries.len());
    Ok(entries)
}
