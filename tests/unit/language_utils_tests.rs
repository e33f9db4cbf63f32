/*!
 * Tests for language utility functions
 */

use dualsub::language_utils::{
    get_language_name, language_codes_match, split_language_suffix, validate_language_code,
};

/// Test validation of language codes
#[test]
fn test_validate_language_code_withVariousCodes_shouldAcceptKnownOnes() {
    // ISO 639-1
    assert!(validate_language_code("en").is_ok());
    assert!(validate_language_code("ko").is_ok());

    // ISO 639-2/T and 639-2/B
    assert!(validate_language_code("kor").is_ok());
    assert!(validate_language_code("ger").is_ok());

    // Whitespace and case
    assert!(validate_language_code(" EN ").is_ok());

    // Invalid codes
    assert!(validate_language_code("zz").is_err());
    assert!(validate_language_code("e").is_err());
    assert!(validate_language_code("").is_err());
}

/// Test matching codes across their different spellings
#[test]
fn test_language_codes_match_withEquivalentCodes_shouldMatch() {
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("fr", "fre"));
    assert!(language_codes_match("kor", "KO"));
    assert!(!language_codes_match("en", "ko"));
    assert!(!language_codes_match("zz", "zz"));
}

/// Test language names
#[test]
fn test_get_language_name_withValidCode_shouldReturnEnglishName() {
    assert_eq!(get_language_name("ko").unwrap(), "Korean");
    assert_eq!(get_language_name("eng").unwrap(), "English");
    assert!(get_language_name("zz").is_err());
}

/// Test splitting a language tag off a file stem
#[test]
fn test_split_language_suffix_withVariousStems_shouldSplitOnlyLanguageTags() {
    assert_eq!(split_language_suffix("movie.en"), ("movie", Some("en")));
    assert_eq!(split_language_suffix("show.s01e02.kor"), ("show.s01e02", Some("kor")));
    assert_eq!(split_language_suffix("movie"), ("movie", None));
    assert_eq!(split_language_suffix("movie.en-ko"), ("movie.en-ko", None));
    assert_eq!(split_language_suffix(".en"), (".en", None));
}
