use crate::error::{ExtractError, Result};
use crate::resolve::resolve_display;
use crate::workbook::{Row, Sheet, Workbook};
use tracing::debug;

/// The sheet and header row chosen for one extraction.
#[derive(Debug, Clone)]
pub struct HeaderSelection<'a> {
    pub sheet: &'a Sheet,
    /// 0-based index of the header row.
    pub header_row_index: usize,
    pub headers: Vec<String>,
}

/// Placeholder name for a header cell with no text (`column` is 0-based).
fn placeholder_name(column: usize) -> String {
    format!("Column{}", column + 1)
}

/// Pick the sheet to extract from.
///
/// A blank or missing name selects the first sheet in workbook order.
///
/// # Errors
///
/// Returns `SheetNotFound` if the named sheet does not exist, or if the
/// workbook has no sheets at all.
pub fn select_sheet<'a>(book: &'a Workbook, sheet_name: Option<&str>) -> Result<&'a Sheet> {
    match sheet_name.filter(|name| !name.trim().is_empty()) {
        Some(name) => book.sheet(name).ok_or_else(|| ExtractError::SheetNotFound {
            name: name.to_string(),
        }),
        None => book.first_sheet().ok_or_else(|| ExtractError::SheetNotFound {
            name: String::new(),
        }),
    }
}

/// Header names for every column up to the row's last present cell.
pub fn header_names(row: &Row) -> Vec<String> {
    let Some(last) = row.last_cell_index() else {
        return Vec::new();
    };
    (0..=last)
        .map(|col| {
            let name = resolve_display(row.cell(col));
            if name.trim().is_empty() {
                placeholder_name(col)
            } else {
                name
            }
        })
        .collect()
}

/// Select the sheet and read the header row.
///
/// `header_row_number` is 1-based.
///
/// # Errors
///
/// Returns `SheetNotFound` as described in [`select_sheet`], or
/// `HeaderRowMissing` when no row exists at the configured position.
pub fn resolve_header<'a>(
    book: &'a Workbook,
    sheet_name: Option<&str>,
    header_row_number: usize,
) -> Result<HeaderSelection<'a>> {
    let sheet = select_sheet(book, sheet_name)?;

    let missing = || ExtractError::HeaderRowMissing {
        row: header_row_number,
    };
    let header_row_index = header_row_number.checked_sub(1).ok_or_else(missing)?;
    let row = sheet.row(header_row_index).ok_or_else(missing)?;

    let headers = header_names(row);
    debug!(
        sheet = sheet.name(),
        header_row = header_row_number,
        columns = headers.len(),
        "resolved header row"
    );

    Ok(HeaderSelection {
        sheet,
        header_row_index,
        headers,
    })
}
