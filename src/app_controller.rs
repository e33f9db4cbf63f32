use anyhow::{Result, Context};
use log::{error, warn, info, debug};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};

use crate::alignment;
use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::{FileManager, FileType};
use crate::language_utils;
use crate::srt;
use crate::subtitle_processor::{SubtitleCollection, SubtitleEntry};

// @module: Application controller for subtitle merging

/// Outcome of merging two subtitle files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    pub first_entries: usize,
    pub second_entries: usize,
    pub merged_entries: usize,
    pub output_path: PathBuf,
}

/// Outcome of processing a directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub merged: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Two tracks of the same title found side by side in a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackPair {
    pub first: PathBuf,
    pub second: PathBuf,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load one track, sanitizing it when configured to
    pub fn load_track(&self, path: &Path, language: &str) -> Result<SubtitleCollection> {
        let mut track = SubtitleCollection::load(path, language)?;

        if self.config.output.sanitize_tracks {
            let skipped = track.sanitize();
            if skipped > 0 {
                warn!("Dropped {} invalid entries from {:?}", skipped, path);
            }
        }

        Ok(track)
    }

    /// Align two loaded tracks and number the result in emission order
    pub fn merge_tracks(&self, first: &SubtitleCollection, second: &SubtitleCollection) -> Vec<SubtitleEntry> {
        let records = alignment::align_tracks(&first.entries, &second.entries);
        debug!(
            "Aligned {} x {} entries into {} records",
            first.entries.len(),
            second.entries.len(),
            records.len()
        );
        alignment::number_aligned(records, self.config.output.start_index)
    }

    fn check_output(output: &Path, force_overwrite: bool) -> Result<()> {
        if output.exists() && !force_overwrite {
            return Err(AppError::File(format!(
                "Output file already exists: {:?}. Use -f to force overwrite.",
                output
            ))
            .into());
        }
        Ok(())
    }

    /// Merge two subtitle files into one bilingual SRT file
    pub fn merge_files(&self, first: &Path, second: &Path, output: &Path, force_overwrite: bool) -> Result<MergeSummary> {
        Self::check_output(output, force_overwrite)?;

        let first_track = self
            .load_track(first, &self.config.first_language)
            .with_context(|| format!("Failed to load first track: {:?}", first))?;
        let second_track = self
            .load_track(second, &self.config.second_language)
            .with_context(|| format!("Failed to load second track: {:?}", second))?;

        let mut merged = SubtitleCollection::new(output.to_path_buf(), self.config.merged_language_tag());
        merged.entries = self.merge_tracks(&first_track, &second_track);

        // Aligned records keep traversal order; reindexing would re-sort them.
        merged.write_to_srt(output, &self.config.output.compose_options(false))?;

        info!(
            "Merged {} + {} entries into {} bilingual entries: {:?}",
            first_track.entries.len(),
            second_track.entries.len(),
            merged.entries.len(),
            output
        );

        Ok(MergeSummary {
            first_entries: first_track.entries.len(),
            second_entries: second_track.entries.len(),
            merged_entries: merged.entries.len(),
            output_path: output.to_path_buf(),
        })
    }

    /// Rewrite a subtitle file as clean, sorted and renumbered SRT
    pub fn normalize_file(&self, input: &Path, output: &Path, force_overwrite: bool) -> Result<usize> {
        Self::check_output(output, force_overwrite)?;

        let track = SubtitleCollection::load(input, "")
            .with_context(|| format!("Failed to load subtitle file: {:?}", input))?;
        let loaded = track.entries.len();

        let report = srt::sanitize(track.entries, self.config.output.start_index);
        let text = srt::compose(&report.entries, &self.config.output.compose_options(false));
        FileManager::write_to_file(output, &text)?;

        info!(
            "Normalized {} entries into {} entries ({} dropped): {:?}",
            loaded,
            report.entries.len(),
            report.skipped.len(),
            output
        );
        Ok(report.entries.len())
    }

    /// Pair up `<stem>.<lang>.<ext>` files that carry the configured languages
    pub fn find_track_pairs(&self, files: &[PathBuf]) -> Vec<TrackPair> {
        let mut groups: BTreeMap<PathBuf, (Option<PathBuf>, Option<PathBuf>)> = BTreeMap::new();

        for path in files {
            let stem = path.file_stem().unwrap_or_default().to_string_lossy().to_string();
            let (base, Some(lang)) = language_utils::split_language_suffix(&stem) else {
                continue;
            };
            let key = path.with_file_name(base);
            let slot = groups.entry(key).or_default();

            let target = if language_utils::language_codes_match(lang, &self.config.first_language) {
                &mut slot.0
            } else if language_utils::language_codes_match(lang, &self.config.second_language) {
                &mut slot.1
            } else {
                continue;
            };

            // Prefer SRT when a title has both SRT and SAMI for one language
            let replace = match target {
                None => true,
                Some(existing) => FileType::from_path(existing.as_path()) != FileType::Srt
                    && FileType::from_path(path) == FileType::Srt,
            };
            if replace {
                *target = Some(path.clone());
            }
        }

        groups
            .into_values()
            .filter_map(|slot| match slot {
                (Some(first), Some(second)) => Some(TrackPair { first, second }),
                _ => None,
            })
            .collect()
    }

    /// Merge every language pair found under a directory.
    ///
    /// A pair that fails is logged and counted; the rest still run.
    pub fn run_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<FolderSummary> {
        if !input_dir.is_dir() {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let files = FileManager::find_subtitle_files(input_dir)?;
        let pairs = self.find_track_pairs(&files);
        let mut summary = FolderSummary::default();

        let languages = format!(
            "{}/{}",
            language_label(&self.config.first_language),
            language_label(&self.config.second_language)
        );

        if pairs.is_empty() {
            warn!("No {} subtitle pairs found in {:?}", languages, input_dir);
            return Ok(summary);
        }

        info!("Found {} {} subtitle pair(s) in {:?}", pairs.len(), languages, input_dir);

        let progress_bar = ProgressBar::new(pairs.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pairs ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        for pair in &pairs {
            let output_dir = pair.first.parent().unwrap_or(Path::new("."));
            let output = FileManager::generate_output_path(
                &pair.first,
                output_dir,
                &self.config.merged_language_tag(),
                "srt",
            );
            progress_bar.set_message(output.file_name().unwrap_or_default().to_string_lossy().to_string());

            if output.exists() && !force_overwrite {
                debug!("Skipping existing output: {:?}", output);
                summary.skipped += 1;
            } else {
                match self.merge_files(&pair.first, &pair.second, &output, force_overwrite) {
                    Ok(_) => summary.merged += 1,
                    Err(e) => {
                        error!("Failed to merge {:?} and {:?}: {:#}", pair.first, pair.second, e);
                        summary.failed += 1;
                    }
                }
            }
            progress_bar.inc(1);
        }

        progress_bar.finish_with_message("done");
        info!(
            "Finished: {} merged, {} skipped, {} failed",
            summary.merged, summary.skipped, summary.failed
        );

        Ok(summary)
    }
}

/// English name of a language for log lines, e.g. `Korean (ko)`
fn language_label(code: &str) -> String {
    match language_utils::get_language_name(code) {
        Ok(name) => format!("{} ({})", name, code),
        Err(_) => code.to_string(),
    }
}
