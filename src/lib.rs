/*!
 * # dualsub - bilingual subtitle merger
 *
 * A Rust library for combining two subtitle tracks of the same video into a
 * single SubRip file that shows both languages at once.
 *
 * ## Features
 *
 * - Lenient SRT parsing with precise error reporting
 * - SAMI (`.smi`) conversion
 * - Sanitizing: sorting, renumbering and dropping invalid entries
 * - Overlap-based alignment of two tracks
 * - Configurable output (line endings, strict content, start index)
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timecode`: Millisecond timestamps and their SRT text form
 * - `subtitle_processor`: Subtitle entries and track collections
 * - `srt`: SubRip format handling:
 *   - `srt::parser`: Lazy block parser
 *   - `srt::sanitizer`: Sorting, filtering and renumbering
 *   - `srt::composer`: Serialization back to text
 * - `sami`: SAMI to subtitle entry conversion
 * - `alignment`: Pairing of overlapping entries from two tracks
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod alignment;
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod sami;
pub mod srt;
pub mod subtitle_processor;
pub mod timecode;

// Re-export main types for easier usage
pub use alignment::{AlignedEntry, align_tracks, overlap, overlaps};
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, SubtitleError};
pub use language_utils::{get_language_name, language_codes_match};
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry};
pub use timecode::Timecode;
