//! Error type and one-call summarization helpers.

use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::commands::SummarizeCommand;

/// Errors that can occur while summarizing.
#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, SummaryError>;

/// Summarize a measurement file into its one-line report.
pub fn summarize_path<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut out = Vec::new();
    SummarizeCommand::new().run(path.as_ref(), &mut out)?;
    Ok(into_summary_string(out))
}

/// Summarize any readable source into its one-line report.
pub fn summarize_reader<R: Read>(reader: R) -> Result<String> {
    let mut out = Vec::new();
    SummarizeCommand::new().run_reader(reader, &mut out)?;
    Ok(into_summary_string(out))
}

/// Summarize a string (useful for testing).
///
/// Keys are folded as raw bytes; any non-UTF-8 key bytes are replaced
/// when rendering back to a `String`.
///
/// # Example
///
/// ```
/// let report = sumstat::summarize_str("Hamburg;12.0\nBerlin;5.5\nHamburg;8.0\n").unwrap();
/// assert_eq!(report, "{Berlin=5.5/5.5/5.5, Hamburg=8.0/10.0/12.0}");
/// ```
pub fn summarize_str(content: &str) -> Result<String> {
    summarize_reader(content.as_bytes())
}

fn into_summary_string(mut out: Vec<u8>) -> String {
    if out.last() == Some(&b'\n') {
        out.pop();
    }
    String::from_utf8(out)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
