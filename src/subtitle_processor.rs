use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use log::{debug, warn};

use crate::file_utils::{FileManager, FileType};
use crate::sami;
use crate::srt::{self, ComposeOptions};
use crate::timecode::Timecode;

// @module: Subtitle entries and loaded subtitle tracks

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubtitleEntry {
    // @field: Display index, only meaningful after reindexing
    pub seq_num: usize,

    // @field: Start time
    pub start: Timecode,

    // @field: End time
    pub end: Timecode,

    // @field: Subtitle text, may span several lines
    pub text: String,

    // @field: Trailing metadata from the timing line, empty when absent
    pub proprietary: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry without proprietary metadata
    pub fn new(seq_num: usize, start: Timecode, end: Timecode, text: impl Into<String>) -> Self {
        SubtitleEntry {
            seq_num,
            start,
            end,
            text: text.into(),
            proprietary: String::new(),
        }
    }

    /// Convenience constructor taking millisecond offsets
    pub fn from_millis(seq_num: usize, start_ms: i64, end_ms: i64, text: impl Into<String>) -> Self {
        Self::new(seq_num, Timecode::from_millis(start_ms), Timecode::from_millis(end_ms), text)
    }

    // @creates: Entry from timestamp text, as produced by format converters
    pub fn from_timestamps(seq_num: usize, start: &str, end: &str, text: impl Into<String>) -> Result<Self, crate::errors::SubtitleError> {
        Ok(Self::new(seq_num, Timecode::parse(start)?, Timecode::parse(end)?, text))
    }

    pub fn with_proprietary(mut self, proprietary: impl Into<String>) -> Self {
        self.proprietary = proprietary.into();
        self
    }

    /// Order by start time, then end time. The index never takes part.
    pub fn timing_cmp(&self, other: &Self) -> Ordering {
        (self.start, self.end).cmp(&(other.start, other.end))
    }

    pub fn duration(&self) -> Timecode {
        self.end - self.start
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        self.start.format()
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        self.end.format()
    }

    /// Render this entry as one SRT block.
    ///
    /// With `strict` the text is legalized first, since blank lines inside a
    /// block end it early in most players. A custom `eol` also replaces the
    /// newlines inside the text.
    pub fn to_srt(&self, strict: bool, eol: Option<&str>) -> String {
        let mut text = if strict {
            srt::make_legal_content(&self.text)
        } else {
            self.text.clone()
        };

        let eol = match eol {
            Some(eol) => {
                text = text.replace('\n', eol);
                eol
            }
            None => "\n",
        };

        let proprietary = if self.proprietary.is_empty() {
            String::new()
        } else {
            format!(" {}", self.proprietary)
        };

        format!(
            "{idx}{eol}{start} --> {end}{prop}{eol}{text}{eol}{eol}",
            idx = self.seq_num,
            start = self.start,
            end = self.end,
            prop = proprietary,
            text = text,
            eol = eol,
        )
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_srt(false, None))
    }
}

/// A loaded subtitle track with metadata
#[derive(Debug, Clone)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,

    /// Language tag of the track, empty when unknown
    pub language: String,
}

impl SubtitleCollection {
    /// Create an empty collection
    pub fn new(source_file: PathBuf, language: String) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
            language,
        }
    }

    /// Load a subtitle file, picking the decoder from its type
    pub fn load<P: AsRef<Path>>(path: P, language: &str) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_subtitle_text(path)?;

        let entries = match FileManager::detect_file_type(path)? {
            FileType::Srt => Self::parse_srt_string(&content)
                .with_context(|| format!("Failed to parse SRT file: {}", path.display()))?,
            FileType::Sami => sami::parse_sami(&content)
                .with_context(|| format!("Failed to convert SAMI file: {}", path.display()))?,
            FileType::Unknown => {
                return Err(anyhow::anyhow!("Unsupported subtitle file: {}", path.display()));
            }
        };

        if entries.is_empty() {
            warn!("No subtitle entries found in {}", path.display());
        } else {
            debug!("Loaded {} entries from {}", entries.len(), path.display());
        }

        Ok(SubtitleCollection {
            source_file: path.to_path_buf(),
            entries,
            language: language.to_string(),
        })
    }

    /// Parse SRT format string into subtitle entries, failing on the first bad block
    pub fn parse_srt_string(content: &str) -> Result<Vec<SubtitleEntry>> {
        let entries = srt::parse(content).collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Drop invalid entries, sort and renumber from 1
    pub fn sanitize(&mut self) -> usize {
        let entries = std::mem::take(&mut self.entries);
        let report = srt::sanitize(entries, 1);
        self.entries = report.entries;
        report.skipped.len()
    }

    /// Render the whole track as SRT text
    pub fn to_srt_string(&self, options: &ComposeOptions) -> String {
        srt::compose(&self.entries, options)
    }

    /// Write subtitles to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P, options: &ComposeOptions) -> Result<()> {
        FileManager::write_to_file(path, &self.to_srt_string(options))
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Language: {}", self.language)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
