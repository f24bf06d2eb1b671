use crate::cell::{FormulaResult, RawCell};
use crate::datetime::{datetime_to_excel_serial, parse_iso_datetime};
use crate::error::Result;
use crate::workbook::{Sheet, Workbook};
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::debug;

/// Convert a calamine value to a raw cell. `Data::Empty` has no cell.
fn data_to_raw_cell(data: &Data) -> Option<RawCell> {
    let cell = match data {
        Data::Empty => return None,
        Data::Bool(b) => RawCell::Boolean(*b),
        Data::Int(i) => RawCell::number(*i as f64),
        Data::Float(f) => RawCell::number(*f),
        Data::String(s) => RawCell::Text(s.clone()),
        Data::DateTime(dt) if dt.is_duration() => RawCell::number(dt.as_f64()),
        Data::DateTime(dt) => {
            // as_datetime() accounts for the 1904 date system; as_f64() does not
            let serial = dt
                .as_datetime()
                .map_or_else(|| dt.as_f64(), datetime_to_excel_serial);
            RawCell::date_serial(serial)
        }
        Data::DateTimeIso(s) => match parse_iso_datetime(s) {
            Some(dt) => RawCell::date_serial(datetime_to_excel_serial(dt)),
            None => RawCell::Text(s.clone()),
        },
        Data::DurationIso(s) => RawCell::Text(s.clone()),
        Data::Error(_) => RawCell::Unsupported,
    };
    Some(cell)
}

/// The cached result of a formula cell, as stored in the value range.
fn data_to_formula_result(data: Option<&Data>) -> FormulaResult {
    match data {
        Some(Data::Float(f)) => FormulaResult::Number(*f),
        Some(Data::Int(i)) => FormulaResult::Number(*i as f64),
        Some(Data::DateTime(dt)) => FormulaResult::Number(dt.as_f64()),
        Some(Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s)) => {
            FormulaResult::Text(s.clone())
        }
        Some(Data::Bool(b)) => FormulaResult::Boolean(*b),
        Some(Data::Empty | Data::Error(_)) | None => FormulaResult::None,
    }
}

/// Merge a sheet's value range and (optional) formula range into a `Sheet`.
fn build_sheet(name: &str, values: &Range<Data>, formulas: Option<&Range<String>>) -> Sheet {
    let mut sheet = Sheet::with_name(name);

    if let Some((row0, col0)) = values.start() {
        for (row, col, data) in values.used_cells() {
            if let Some(cell) = data_to_raw_cell(data) {
                sheet.set_cell(row0 as usize + row, col0 as usize + col, cell);
            }
        }
    }

    if let Some(formulas) = formulas {
        if let Some((row0, col0)) = formulas.start() {
            for (row, col, source) in formulas.used_cells() {
                if source.is_empty() {
                    continue;
                }
                let abs_row = row0 as usize + row;
                let abs_col = col0 as usize + col;
                let cached = u32::try_from(abs_row)
                    .ok()
                    .zip(u32::try_from(abs_col).ok())
                    .and_then(|pos| values.get_value(pos));
                let cell = RawCell::formula_with_result(source.clone(), data_to_formula_result(cached));
                sheet.set_cell(abs_row, abs_col, cell);
            }
        }
    }

    sheet
}

impl Workbook {
    /// Load a workbook from an in-memory file (xlsx, xlsm, xlsb, xls or ods).
    ///
    /// # Errors
    ///
    /// Returns `SourceUnreadable` if the bytes are not a readable workbook.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let reader = open_workbook_auto_from_rs(Cursor::new(bytes))?;
        Self::from_reader(reader)
    }

    /// Load a workbook from a file path
    ///
    /// # Errors
    ///
    /// Returns `SourceUnreadable` if the file cannot be opened or read.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = open_workbook_auto(path.as_ref())?;
        Self::from_reader(reader)
    }

    /// Drain every sheet out of the reader; the reader is dropped on return.
    fn from_reader<RS: Read + Seek>(mut reader: Sheets<RS>) -> Result<Self> {
        let mut book = Workbook::new();

        for name in reader.sheet_names() {
            let values = reader.worksheet_range(&name)?;
            // Formula text is optional: some formats cannot provide it.
            let formulas = match reader.worksheet_formula(&name) {
                Ok(range) => Some(range),
                Err(e) => {
                    debug!(sheet = %name, error = %e, "formula text unavailable");
                    None
                }
            };

            let sheet = build_sheet(&name, &values, formulas.as_ref());
            debug!(sheet = %name, last_row = ?sheet.last_row_index(), "loaded sheet");
            book.add_sheet(sheet);
        }

        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_to_raw_cell() {
        assert_eq!(data_to_raw_cell(&Data::Empty), None);
        assert_eq!(data_to_raw_cell(&Data::Int(7)), Some(RawCell::number(7.0)));
        assert_eq!(
            data_to_raw_cell(&Data::String("x".to_string())),
            Some(RawCell::text("x"))
        );
        assert_eq!(data_to_raw_cell(&Data::Bool(true)), Some(RawCell::Boolean(true)));
        assert_eq!(
            data_to_raw_cell(&Data::Error(calamine::CellErrorType::Div0)),
            Some(RawCell::Unsupported)
        );
    }

    #[test]
    fn test_iso_dates_become_date_cells() {
        assert_eq!(
            data_to_raw_cell(&Data::DateTimeIso("2023-01-15".to_string())),
            Some(RawCell::date_serial(44941.0))
        );
        assert_eq!(
            data_to_raw_cell(&Data::DateTimeIso("not a date".to_string())),
            Some(RawCell::text("not a date"))
        );
    }

    #[test]
    fn test_formula_result_priority_inputs() {
        assert_eq!(
            data_to_formula_result(Some(&Data::Float(30.0))),
            FormulaResult::Number(30.0)
        );
        assert_eq!(
            data_to_formula_result(Some(&Data::String("ok".to_string()))),
            FormulaResult::Text("ok".to_string())
        );
        assert_eq!(data_to_formula_result(Some(&Data::Empty)), FormulaResult::None);
        assert_eq!(data_to_formula_result(None), FormulaResult::None);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let result = Workbook::from_bytes(b"definitely not a workbook".to_vec());
        assert!(matches!(
            result,
            Err(crate::error::ExtractError::SourceUnreadable(_))
        ));
    }
}
