//! Data row extraction below the header row.

use crate::cell::CellValue;
use crate::datetime::format_date;
use crate::resolve::resolve_typed;
use crate::workbook::{Row, Sheet};
use indexmap::IndexMap;
use tracing::trace;

/// Header name to value, in header order, led by the sequence number.
pub type GenericRow = IndexMap<String, CellValue>;

/// Key of the synthesized sequence-number field.
pub const SEQUENCE_KEY: &str = "序号";

fn is_date_header(name: &str) -> bool {
    name.contains("日期") || name.to_ascii_lowercase().contains("date")
}

/// Apply the per-column rules to a resolved value.
///
/// Dates under a date-like header become `yyyy/MM/dd` strings, then integral
/// floats become integers.
pub fn normalize_value(header: &str, value: CellValue) -> CellValue {
    let value = match value {
        CellValue::Date(date) if is_date_header(header) => CellValue::String(format_date(date)),
        other => other,
    };
    value.collapse_integral()
}

/// Build the generic row for one physical row.
///
/// Returns `None` when no header column holds a non-blank value. A header
/// that appears twice keeps its first position and its last value.
pub fn extract_row(row: &Row, headers: &[String], sequence: i64) -> Option<GenericRow> {
    let mut values = GenericRow::with_capacity(headers.len() + 1);
    values.insert(SEQUENCE_KEY.to_string(), CellValue::Int(sequence));

    let mut has_data = false;
    for (col, header) in headers.iter().enumerate() {
        let value = match row.cell(col) {
            Some(cell) => normalize_value(header, resolve_typed(Some(cell))),
            None => CellValue::Null,
        };
        has_data |= !value.is_blank();
        values.insert(header.clone(), value);
    }

    has_data.then_some(values)
}

/// Extract every non-blank row below `header_row_index` (0-based).
///
/// The sequence number of physical row `i` is `i - header_row_index`; rows
/// that are absent or blank are dropped without renumbering the rest.
pub fn extract_rows(sheet: &Sheet, headers: &[String], header_row_index: usize) -> Vec<GenericRow> {
    let Some(last_row) = sheet.last_row_index() else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    for index in header_row_index + 1..=last_row {
        let Some(row) = sheet.row(index) else {
            continue;
        };
        let sequence = i64::try_from(index - header_row_index).unwrap_or(i64::MAX);
        match extract_row(row, headers, sequence) {
            Some(values) => rows.push(values),
            None => trace!(row = index + 1, "skipping blank row"),
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::RawCell;
    use chrono::NaiveDate;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_date_header_formats_date() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
        assert_eq!(
            normalize_value("采购日期", CellValue::Date(date)),
            CellValue::from("2023/01/15")
        );
        assert_eq!(
            normalize_value("Due Date", CellValue::Date(date)),
            CellValue::from("2023/01/15")
        );
        // Other headers keep the typed date.
        assert_eq!(normalize_value("到货", CellValue::Date(date)), CellValue::Date(date));
    }

    #[test]
    fn test_integral_float_collapses() {
        assert_eq!(normalize_value("金额", CellValue::Float(16000.0)), CellValue::Int(16000));
        assert_eq!(normalize_value("金额", CellValue::Float(0.5)), CellValue::Float(0.5));
    }

    #[test]
    fn test_row_keys_follow_header_order() {
        let row = Row::from_cells([RawCell::text("笔记本电脑"), RawCell::number(2.0)]);
        let values = extract_row(&row, &headers(&["物品名称", "数量", "备注"]), 1).unwrap();

        let keys: Vec<&str> = values.keys().map(String::as_str).collect();
        assert_eq!(keys, vec![SEQUENCE_KEY, "物品名称", "数量", "备注"]);
        assert_eq!(values[SEQUENCE_KEY], CellValue::Int(1));
        assert_eq!(values["数量"], CellValue::Int(2));
        assert_eq!(values["备注"], CellValue::Null);
    }

    #[test]
    fn test_blank_row_is_dropped() {
        let mut row = Row::new();
        row.set_cell(0, RawCell::text("   "));
        row.set_cell(2, RawCell::Unsupported);
        assert!(extract_row(&row, &headers(&["a", "b", "c"]), 1).is_none());
    }

    #[test]
    fn test_cells_beyond_headers_are_ignored() {
        let mut row = Row::new();
        row.set_cell(3, RawCell::text("outside"));
        assert!(extract_row(&row, &headers(&["a", "b"]), 1).is_none());
    }

    #[test]
    fn test_duplicate_header_last_write_wins() {
        let row = Row::from_cells([RawCell::text("first"), RawCell::text("second")]);
        let values = extract_row(&row, &headers(&["名称", "名称"]), 1).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values["名称"], CellValue::from("second"));
    }

    #[test]
    fn test_sequence_numbers_keep_gaps() {
        let mut sheet = Sheet::with_name("Data");
        sheet.set_cell(0, 0, RawCell::text("名称"));
        sheet.set_cell(1, 0, RawCell::text("a"));
        // row 2 absent, row 3 blank
        sheet.set_cell(3, 0, RawCell::text(""));
        sheet.set_cell(4, 0, RawCell::text("b"));

        let rows = extract_rows(&sheet, &headers(&["名称"]), 0);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][SEQUENCE_KEY], CellValue::Int(1));
        assert_eq!(rows[1][SEQUENCE_KEY], CellValue::Int(4));
        assert_eq!(rows[1]["名称"], CellValue::from("b"));
    }

    #[test]
    fn test_no_rows_below_header() {
        let mut sheet = Sheet::with_name("Data");
        sheet.set_cell(0, 0, RawCell::text("名称"));
        assert!(extract_rows(&sheet, &headers(&["名称"]), 0).is_empty());
    }
}
