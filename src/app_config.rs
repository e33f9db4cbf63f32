use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::errors::AppError;
use crate::language_utils;
use crate::srt::ComposeOptions;

/// Application configuration module
/// This module handles loading, validating and saving the settings that
/// control how tracks are read and how merged subtitles are written.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Language of the track shown on top (ISO 639 code)
    pub first_language: String,

    /// Language of the track shown below (ISO 639 code)
    pub second_language: String,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Line terminator written to output files
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }
}

/// Configuration for writing subtitles
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Remove blank lines from subtitle text when writing
    #[serde(default = "default_true")]
    pub strict: bool,

    /// Line terminator for written files
    #[serde(default)]
    pub line_ending: LineEnding,

    /// Index given to the first written subtitle
    #[serde(default = "default_start_index")]
    pub start_index: usize,

    /// Sort tracks and drop invalid entries before aligning them
    #[serde(default = "default_true")]
    pub sanitize_tracks: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            strict: true,
            line_ending: LineEnding::default(),
            start_index: default_start_index(),
            sanitize_tracks: true,
        }
    }
}

impl OutputConfig {
    /// Composer options for these settings
    pub fn compose_options(&self, reindex: bool) -> ComposeOptions {
        let eol = match self.line_ending {
            LineEnding::Lf => None,
            LineEnding::Crlf => Some(self.line_ending.as_str().to_string()),
        };

        ComposeOptions {
            reindex,
            start_index: self.start_index,
            strict: self.strict,
            eol,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_start_index() -> usize {
    1
}

impl Config {
    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::File(format!("Failed to read config file {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config file {}: {}", path.display(), e)))
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        for code in [&self.first_language, &self.second_language] {
            language_utils::validate_language_code(code)
                .map_err(|e| AppError::Config(e.to_string()))?;
        }

        if language_utils::language_codes_match(&self.first_language, &self.second_language) {
            return Err(AppError::Config(format!(
                "First and second language are both '{}'",
                self.first_language
            )));
        }

        if self.output.start_index == 0 {
            return Err(AppError::Config("Output start index must be at least 1".to_string()));
        }

        Ok(())
    }

    /// Tag used in merged file names, e.g. `en-ko`
    pub fn merged_language_tag(&self) -> String {
        format!("{}-{}", self.first_language, self.second_language)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            first_language: "en".to_string(),
            second_language: "ko".to_string(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
