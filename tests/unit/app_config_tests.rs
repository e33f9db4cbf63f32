/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use log::LevelFilter;
use dualsub::app_config::{Config, LineEnding, LogLevel, OutputConfig};
use dualsub::errors::AppError;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.first_language, "en");
    assert_eq!(config.second_language, "ko");
    assert!(config.output.strict);
    assert_eq!(config.output.line_ending, LineEnding::Lf);
    assert_eq!(config.output.start_index, 1);
    assert!(config.output.sanitize_tracks);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Three-letter and bibliographic codes are fine
    config.first_language = "eng".to_string();
    config.second_language = "fre".to_string();
    assert!(config.validate().is_ok());

    // Invalid first language
    config.first_language = "zz".to_string();
    assert!(matches!(config.validate(), Err(AppError::Config(_))));
    config.first_language = "en".to_string();

    // Invalid second language
    config.second_language = "".to_string();
    assert!(config.validate().is_err());

    // Same language twice, spelled differently
    config.second_language = "eng".to_string();
    assert!(config.validate().is_err());
    config.second_language = "ko".to_string();

    // Indexes start at one
    config.output.start_index = 0;
    assert!(config.validate().is_err());
}

/// Test saving and loading a configuration file
#[test]
fn test_save_thenLoad_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.second_language = "ja".to_string();
    config.output.line_ending = LineEnding::Crlf;
    config.log_level = LogLevel::Debug;
    config.save(&path)?;

    assert_eq!(Config::load(&path)?, config);
    Ok(())
}

/// Test that omitted sections fall back to defaults
#[test]
fn test_load_withMinimalFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{ "first_language": "de", "second_language": "fr", "output": { "line_ending": "crlf" } }"#,
    )?;

    let config = Config::load(&path)?;

    assert_eq!(config.first_language, "de");
    assert_eq!(config.output.line_ending, LineEnding::Crlf);
    assert!(config.output.strict);
    assert_eq!(config.output.start_index, 1);
    assert_eq!(config.log_level, LogLevel::Info);
    Ok(())
}

/// Test that broken JSON is a configuration error
#[test]
fn test_load_withInvalidJson_shouldReturnConfigError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(matches!(Config::load(&path), Err(AppError::Config(_))));
    assert!(matches!(Config::load(temp_dir.path().join("missing.json")), Err(AppError::File(_))));
    Ok(())
}

/// Test the composer options derived from output settings
#[test]
fn test_compose_options_shouldFollowOutputSettings() {
    let output = OutputConfig {
        strict: false,
        line_ending: LineEnding::Crlf,
        start_index: 5,
        sanitize_tracks: true,
    };

    let options = output.compose_options(false);

    assert!(!options.reindex);
    assert!(!options.strict);
    assert_eq!(options.start_index, 5);
    assert_eq!(options.eol.as_deref(), Some("\r\n"));
    assert_eq!(OutputConfig::default().compose_options(true).eol, None);
}

/// Test log level conversion
#[test]
fn test_log_level_shouldMapToLevelFilter() {
    assert_eq!(LogLevel::Error.to_level_filter(), LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), LevelFilter::Trace);
}

/// Test the language tag used in output file names
#[test]
fn test_merged_language_tag_shouldJoinLanguages() {
    let config = Config::default();
    assert_eq!(config.merged_language_tag(), "en-ko");
}
