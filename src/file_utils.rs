use anyhow::{Result, Context};
use chardetng::EncodingDetector;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::language_utils;

// @module: File and directory utilities

const UTF8_BOM: char = '\u{feff}';

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Output path for a merged subtitle
    // @params: input_file, output_dir, language tag, extension
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        language_tag: &str,
        extension: &str,
    ) -> PathBuf {
        let input_file = input_file.as_ref();

        // "movie.en.srt" and "movie.srt" both give "movie"
        let stem = input_file.file_stem().unwrap_or_default().to_string_lossy();
        let (base, _) = language_utils::split_language_suffix(&stem);

        output_dir
            .as_ref()
            .join(format!("{}.{}.{}", base, language_tag, extension))
    }

    /// Find subtitle files in a directory tree, sorted by path
    pub fn find_subtitle_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && FileType::from_path(path) != FileType::Unknown {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read subtitle text with any leading byte order mark removed
    pub fn read_subtitle_text<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;

        Ok(Self::decode_subtitle_bytes(&bytes))
    }

    /// Decode subtitle bytes. Text that is not UTF-8 is decoded from its
    /// detected legacy encoding, such as CP949 for Korean SAMI files.
    pub fn decode_subtitle_bytes(bytes: &[u8]) -> String {
        if let Ok(text) = std::str::from_utf8(bytes) {
            return Self::strip_bom(text).to_string();
        }

        let mut detector = EncodingDetector::new();
        detector.feed(bytes, true);
        let encoding = detector.guess(None, false);

        // decode() also honours a UTF-16 byte order mark over the guess
        let (text, used, had_errors) = encoding.decode(bytes);
        if had_errors {
            warn!("Some characters could not be decoded as {}", used.name());
        }
        debug!("Decoded subtitle text as {}", used.name());

        text.into_owned()
    }

    pub fn strip_bom(content: &str) -> &str {
        content.strip_prefix(UTF8_BOM).unwrap_or(content)
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Detect the subtitle format of a file from its extension
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> Result<FileType> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(anyhow::anyhow!("File does not exist: {:?}", path));
        }

        Ok(FileType::from_path(path))
    }
}

/// Enum representing the supported subtitle formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// SubRip text
    Srt,
    /// SAMI markup
    Sami,
    /// Anything else
    Unknown,
}

impl FileType {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "srt" => FileType::Srt,
            "smi" | "sami" => FileType::Sami,
            _ => FileType::Unknown,
        }
    }
}
