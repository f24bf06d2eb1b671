use crate::error::{ExtractError, Result};
use crate::header::resolve_header;
use crate::record::{project_records, Record};
use crate::rows::{extract_rows, GenericRow};
use crate::workbook::Workbook;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// Message carried by every successful extraction.
pub const SUCCESS_MESSAGE: &str = "解析成功";

/// Options for an extraction call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// 1-based number of the header row
    pub header_row: usize,
    /// Sheet to read; the first sheet when `None` or blank
    pub sheet_name: Option<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ExtractOptions {
    #[must_use]
    pub fn new(header_row: usize) -> Self {
        Self {
            header_row,
            sheet_name: None,
        }
    }

    /// Set the sheet to read by name
    #[must_use]
    pub fn with_sheet_name<S: Into<String>>(mut self, name: S) -> Self {
        self.sheet_name = Some(name.into());
        self
    }
}

/// Output of a successful extraction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub headers: Vec<String>,
    pub rows: Vec<GenericRow>,
    pub records: Vec<Record>,
}

/// Status message plus extracted data; the collections are empty on failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionResult {
    pub message: String,
    pub headers: Vec<String>,
    #[serde(rename = "dataList")]
    pub rows: Vec<GenericRow>,
    #[serde(rename = "items")]
    pub records: Vec<Record>,
}

impl ExtractionResult {
    #[must_use]
    pub fn success(extraction: Extraction) -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            headers: extraction.headers,
            rows: extraction.rows,
            records: extraction.records,
        }
    }

    #[must_use]
    pub fn failure(error: &ExtractError) -> Self {
        Self {
            message: error.to_string(),
            ..Self::default()
        }
    }

    /// Whether the extraction succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.message == SUCCESS_MESSAGE
    }
}

impl From<Result<Extraction>> for ExtractionResult {
    fn from(result: Result<Extraction>) -> Self {
        match result {
            Ok(extraction) => {
                info!(rows = extraction.rows.len(), "extracted workbook rows");
                Self::success(extraction)
            }
            Err(e) => {
                warn!(error = %e, "extraction failed");
                Self::failure(&e)
            }
        }
    }
}

/// Extract headers, rows and records from a loaded workbook.
///
/// # Errors
///
/// Returns `SheetNotFound` or `HeaderRowMissing`; nothing below the header
/// row can fail.
pub fn extract_workbook(book: &Workbook, options: &ExtractOptions) -> Result<Extraction> {
    let selection = resolve_header(book, options.sheet_name.as_deref(), options.header_row)?;
    let rows = extract_rows(
        selection.sheet,
        &selection.headers,
        selection.header_row_index,
    );
    let records = project_records(&rows);

    Ok(Extraction {
        headers: selection.headers,
        rows,
        records,
    })
}

/// Extract from an in-memory workbook file. Never fails: errors are reported
/// through the result's message.
pub fn extract_bytes(bytes: Vec<u8>, options: &ExtractOptions) -> ExtractionResult {
    Workbook::from_bytes(bytes)
        .and_then(|book| extract_workbook(&book, options))
        .into()
}

/// Extract from a workbook file on disk. Never fails: errors are reported
/// through the result's message.
pub fn extract_path<P: AsRef<Path>>(path: P, options: &ExtractOptions) -> ExtractionResult {
    Workbook::open(path)
        .and_then(|book| extract_workbook(&book, options))
        .into()
}
