/*!
 * Tests for subtitle entries and collections
 */

use anyhow::Result;
use dualsub::srt::ComposeOptions;
use dualsub::subtitle_processor::{SubtitleCollection, SubtitleEntry};
use dualsub::timecode::Timecode;
use crate::common;

/// Test that an entry renders as one SRT block
#[test]
fn test_to_srt_withDefaultOptions_shouldRenderBlock() {
    let entry = SubtitleEntry::from_millis(3, 1_000, 2_500, "Hello\nworld");

    assert_eq!(
        entry.to_srt(true, None),
        "3\n00:00:01,000 --> 00:00:02,500\nHello\nworld\n\n"
    );
}

/// Test that strict mode drops blank lines from the text
#[test]
fn test_to_srt_withStrictMode_shouldDropBlankLines() {
    let entry = SubtitleEntry::from_millis(1, 0, 1_000, "\nfoo\n\nbar\n");

    assert_eq!(entry.to_srt(true, None), "1\n00:00:00,000 --> 00:00:01,000\nfoo\nbar\n\n");
    assert_eq!(entry.to_srt(false, None), "1\n00:00:00,000 --> 00:00:01,000\n\nfoo\n\nbar\n\n\n");
}

/// Test that a custom line ending is used everywhere, including inside the text
#[test]
fn test_to_srt_withCrlf_shouldUseItThroughout() {
    let entry = SubtitleEntry::from_millis(1, 0, 1_000, "a\nb");

    assert_eq!(
        entry.to_srt(true, Some("\r\n")),
        "1\r\n00:00:00,000 --> 00:00:01,000\r\na\r\nb\r\n\r\n"
    );
}

/// Test that proprietary metadata is written after the end time
#[test]
fn test_to_srt_withProprietary_shouldAppendToTimingLine() {
    let entry = SubtitleEntry::from_millis(1, 0, 1_000, "x").with_proprietary("X1:40 X2:600");

    assert_eq!(entry.to_srt(true, None), "1\n00:00:00,000 --> 00:00:01,000 X1:40 X2:600\nx\n\n");
}

/// Test building an entry from timestamp text
#[test]
fn test_from_timestamps_withValidText_shouldParseBoth() -> Result<()> {
    let entry = SubtitleEntry::from_timestamps(1, "00:01:00,000", "00:01:02.250", "text")?;

    assert_eq!(entry.start, Timecode::from_millis(60_000));
    assert_eq!(entry.end, Timecode::from_millis(62_250));
    assert_eq!(entry.duration(), Timecode::from_millis(2_250));
    assert_eq!(entry.format_end_time(), "00:01:02,250");
    Ok(())
}

/// Test that bad timestamp text is rejected
#[test]
fn test_from_timestamps_withBadText_shouldFail() {
    assert!(SubtitleEntry::from_timestamps(1, "1:00", "00:01:02,250", "text").is_err());
}

/// Test that entries with identical timing compare equal for ordering
#[test]
fn test_timing_cmp_shouldIgnoreIndexAndText() {
    let a = SubtitleEntry::from_millis(1, 1_000, 2_000, "a");
    let b = SubtitleEntry::from_millis(9, 1_000, 2_000, "b");
    let c = SubtitleEntry::from_millis(2, 1_000, 1_500, "c");

    assert_eq!(a.timing_cmp(&b), std::cmp::Ordering::Equal);
    assert_eq!(c.timing_cmp(&a), std::cmp::Ordering::Less);
}

/// Test parsing a whole SRT document
#[test]
fn test_parse_srt_string_withValidContent_shouldReturnEntries() -> Result<()> {
    let entries = SubtitleCollection::parse_srt_string(common::ENGLISH_SRT)?;

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], SubtitleEntry::from_millis(1, 1_000, 3_000, "Hello"));
    assert_eq!(entries[1], SubtitleEntry::from_millis(2, 4_000, 6_000, "How are you?"));
    Ok(())
}

/// Test that a broken document reports the failure
#[test]
fn test_parse_srt_string_withBrokenHeader_shouldFail() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nfoo\n\n2\n00:00:03,000 -> 00:00:04,000\nbar\n";
    let err = SubtitleCollection::parse_srt_string(content).unwrap_err();

    assert!(err.to_string().contains("unmatched content"));
}

/// Test loading from disk, including byte order mark removal
#[test]
fn test_load_withBomPrefixedFile_shouldParse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = format!("\u{feff}{}", common::ENGLISH_SRT);
    let path = common::create_test_file(temp_dir.path(), "movie.en.srt", &content)?;

    let collection = SubtitleCollection::load(&path, "en")?;

    assert_eq!(collection.entries.len(), 2);
    assert_eq!(collection.entries[0].seq_num, 1);
    assert_eq!(collection.language, "en");
    assert_eq!(collection.source_file, path);
    Ok(())
}

/// Test that SAMI files are converted on load
#[test]
fn test_load_withSamiFile_shouldConvert() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "movie.ko.smi", common::KOREAN_SMI)?;

    let collection = SubtitleCollection::load(&path, "ko")?;

    assert_eq!(collection.entries.len(), 3);
    assert_eq!(collection.entries[0].text, "안녕하세요");
    assert_eq!(collection.entries[0].end, Timecode::from_millis(2_000));
    assert_eq!(collection.entries[2].text, "잘 지내요?");
    Ok(())
}

/// Test that a CP949 SAMI file loads with readable Korean text
#[test]
fn test_load_withCp949SamiFile_shouldDecodeAndConvert() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_cp949_sami(temp_dir.path(), "movie.ko.smi")?;

    let collection = SubtitleCollection::load(&path, "ko")?;

    let texts: Vec<_> = collection.entries.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(
        texts,
        [
            "안녕하세요, 오늘 날씨가 정말 좋네요.",
            "우리 같이 공원에 산책하러 갈까요?",
            "좋아요. 점심을 먹고 나서 출발합시다.",
        ]
    );
    Ok(())
}

/// Test that unknown extensions are refused
#[test]
fn test_load_withUnknownExtension_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "movie.txt", common::ENGLISH_SRT)?;

    assert!(SubtitleCollection::load(&path, "en").is_err());
    Ok(())
}

/// Test sanitizing a collection in place
#[test]
fn test_sanitize_withInvalidEntries_shouldDropAndRenumber() {
    let mut collection = SubtitleCollection::new("x.srt".into(), "en".to_string());
    collection.entries = vec![
        SubtitleEntry::from_millis(5, 3_000, 4_000, "late"),
        SubtitleEntry::from_millis(6, 1_000, 2_000, "early"),
        SubtitleEntry::from_millis(7, 2_000, 2_000, "zero length"),
        SubtitleEntry::from_millis(8, 2_500, 2_900, "   "),
    ];

    let skipped = collection.sanitize();

    assert_eq!(skipped, 2);
    let summary: Vec<_> = collection.entries.iter().map(|e| (e.seq_num, e.text.as_str())).collect();
    assert_eq!(summary, [(1, "early"), (2, "late")]);
}

/// Test writing a collection and reading it back
#[test]
fn test_write_to_srt_thenLoad_shouldPreserveEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("out.srt");

    let mut collection = SubtitleCollection::new(path.clone(), "en".to_string());
    collection.entries = vec![
        SubtitleEntry::from_millis(1, 0, 5_000, "First subtitle"),
        SubtitleEntry::from_millis(2, 5_500, 10_000, "Second subtitle"),
    ];
    collection.write_to_srt(&path, &ComposeOptions::default())?;

    let reloaded = SubtitleCollection::load(&path, "en")?;
    assert_eq!(reloaded.entries, collection.entries);
    Ok(())
}

/// Test the summary display of a collection
#[test]
fn test_display_shouldSummarizeCollection() {
    let collection = SubtitleCollection::new("movie.en.srt".into(), "en".to_string());
    let display = collection.to_string();

    assert!(display.contains("Language: en"));
    assert!(display.contains("Entries: 0"));
}
