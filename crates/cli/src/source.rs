//! Where the workbook bytes come from.

use sheetpick_http::HttpClient;
use sheetpick_sheet::ExtractError;
use std::path::PathBuf;
use tracing::debug;

/// A workbook location given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// An `http://` or `https://` link.
    Url(String),
    /// A local file, given directly or as a `file://` link.
    Path(PathBuf),
}

impl Source {
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Url(location.to_string())
        } else if lower.starts_with("file://") {
            Source::Path(PathBuf::from(&location["file://".len()..]))
        } else {
            Source::Path(PathBuf::from(location))
        }
    }

    /// Read the whole workbook into memory.
    ///
    /// # Errors
    ///
    /// Every failure is reported as `ExtractError::SourceUnreadable`.
    pub async fn read(&self, timeout_secs: u64) -> Result<Vec<u8>, ExtractError> {
        match self {
            Source::Url(url) => {
                debug!(url = %url, "downloading workbook");
                let client = HttpClient::with_timeout(timeout_secs)
                    .map_err(|e| ExtractError::SourceUnreadable(e.to_string()))?;
                client
                    .fetch_bytes(url)
                    .await
                    .map_err(|e| ExtractError::SourceUnreadable(e.to_string()))
            }
            Source::Path(path) => {
                debug!(path = %path.display(), "reading workbook");
                Ok(tokio::fs::read(path).await?)
            }
        }
    }
}
