/*!
 * SRT (SubRip) reading and writing.
 *
 * - `parser`: lazy, contiguity-checked block scanner
 * - `sanitizer`: sorting, validity filtering and renumbering
 * - `composer`: rendering entries back into SRT text
 */

pub mod composer;
pub mod parser;
pub mod sanitizer;

pub use composer::{compose, make_legal_content, ComposeOptions};
pub use parser::{parse, SrtParser};
pub use sanitizer::{
    sanitize, skip_reason, sort_and_reindex, sort_and_reindex_owned, Sanitized, SkipReason,
    SkippedSubtitle,
};
