/*!
 * Common test utilities for the dualsub test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

/// English sample track
pub const ENGLISH_SRT: &str = "1
00:00:01,000 --> 00:00:03,000
Hello

2
00:00:04,000 --> 00:00:06,000
How are you?

";

/// Korean sample track timed against ENGLISH_SRT
pub const KOREAN_SRT: &str = "1
00:00:00,500 --> 00:00:02,000
안녕하세요

2
00:00:02,500 --> 00:00:04,000
반가워요

3
00:00:04,200 --> 00:00:05,800
잘 지내요?

";

/// Korean sample track in SAMI form, same cues as KOREAN_SRT up to the 10ms gap
pub const KOREAN_SMI: &str = "<SAMI>
<HEAD><TITLE>sample</TITLE></HEAD>
<BODY>
<SYNC Start=500><P Class=KRCC>안녕하세요
<SYNC Start=2010><P Class=KRCC>&nbsp;
<SYNC Start=2500><P Class=KRCC>반가워요
<SYNC Start=4010><P Class=KRCC>&nbsp;
<SYNC Start=4200><P Class=KRCC><font color=\"#ffffff\">잘 지내요?</font>
<SYNC Start=5810><P Class=KRCC>&nbsp;
</BODY>
</SAMI>
";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample subtitle file for testing
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, ENGLISH_SRT)
}

/// Route library logs to the test output; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Korean SAMI document with enough text for encoding detection
pub const KOREAN_LONG_SMI: &str = "<SAMI>
<BODY>
<SYNC Start=1000><P Class=KRCC>안녕하세요, 오늘 날씨가 정말 좋네요.
<SYNC Start=3000><P Class=KRCC>우리 같이 공원에 산책하러 갈까요?
<SYNC Start=5000><P Class=KRCC>좋아요. 점심을 먹고 나서 출발합시다.
<SYNC Start=7000><P Class=KRCC>&nbsp;
</BODY>
</SAMI>
";

/// Writes KOREAN_LONG_SMI encoded as CP949 (EUC-KR)
pub fn create_cp949_sami(dir: &Path, filename: &str) -> Result<PathBuf> {
    let (bytes, _, had_errors) = encoding_rs::EUC_KR.encode(KOREAN_LONG_SMI);
    assert!(!had_errors, "sample text must be representable in CP949");
    let file_path = dir.join(filename);
    fs::write(&file_path, &bytes)?;
    Ok(file_path)
}
