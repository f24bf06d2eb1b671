use thiserror::Error;

/// Conditions that abort an extraction call.
///
/// Per-field coercion failures are not represented here: they only ever
/// produce an absent record field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The source could not be opened or is not a readable workbook.
    #[error("解析Excel文件失败: {0}")]
    SourceUnreadable(String),

    #[error("找不到名为 '{name}' 的工作表")]
    SheetNotFound { name: String },

    /// `row` is the configured 1-based header row number.
    #[error("表头行不存在，请检查表头行号是否正确")]
    HeaderRowMissing { row: usize },
}

impl From<calamine::Error> for ExtractError {
    fn from(err: calamine::Error) -> Self {
        ExtractError::SourceUnreadable(err.to_string())
    }
}

impl From<std::io::Error> for ExtractError {
    fn from(err: std::io::Error) -> Self {
        ExtractError::SourceUnreadable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
