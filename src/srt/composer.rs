/*!
 * Serialization of subtitle entries back into SRT text.
 */

use std::borrow::Cow;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::srt::sanitizer;
use crate::subtitle_processor::SubtitleEntry;

/// Options for [`compose`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeOptions {
    /// Sort, drop invalid entries and renumber before writing
    #[serde(default = "default_true")]
    pub reindex: bool,

    /// First index used when reindexing
    #[serde(default = "default_start_index")]
    pub start_index: usize,

    /// Remove blank lines from content
    #[serde(default = "default_true")]
    pub strict: bool,

    /// Line terminator; `None` writes `\n` and leaves content untouched
    #[serde(default)]
    pub eol: Option<String>,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            reindex: true,
            start_index: default_start_index(),
            strict: true,
            eol: None,
        }
    }
}

impl ComposeOptions {
    /// Write entries as given, keeping their order and indexes
    pub fn verbatim() -> Self {
        Self {
            reindex: false,
            ..Self::default()
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_start_index() -> usize {
    1
}

/// Drop every empty line, which also removes leading and trailing newlines.
///
/// Splits on `\n` only; other control characters are content.
pub fn make_legal_content(content: &str) -> String {
    let legal = content
        .split('\n')
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    if legal != content {
        warn!("Legalised content {:?} to {:?}", content, legal);
    }
    legal
}

/// Concatenate the SRT blocks of `entries`
pub fn compose(entries: &[SubtitleEntry], options: &ComposeOptions) -> String {
    let entries: Cow<'_, [SubtitleEntry]> = if options.reindex {
        Cow::Owned(sanitizer::sort_and_reindex(entries, options.start_index))
    } else {
        Cow::Borrowed(entries)
    };

    entries
        .iter()
        .map(|entry| entry.to_srt(options.strict, options.eol.as_deref()))
        .collect()
}
