//! Header-driven extraction of rows and records from spreadsheet workbooks.
//!
//! A header row (1-based) names the columns; every non-blank row below it
//! becomes an ordered header→value map, and each map is projected onto the
//! fixed purchase-list [`Record`].
//!
//! # Examples
//!
//! ## Extracting from an in-memory workbook
//!
//! ```
//! use sheetpick_sheet::{extract_workbook, CellValue, ExtractOptions, RawCell, Sheet, Workbook};
//!
//! let mut sheet = Sheet::with_name("清单");
//! sheet.set_cell(0, 0, RawCell::text("物品名称"));
//! sheet.set_cell(0, 1, RawCell::text("单价"));
//! sheet.set_cell(1, 0, RawCell::text("打印机"));
//! sheet.set_cell(1, 1, RawCell::number(3000.0));
//!
//! let mut book = Workbook::new();
//! book.add_sheet(sheet);
//!
//! let extraction = extract_workbook(&book, &ExtractOptions::new(1)).unwrap();
//! assert_eq!(extraction.headers, vec!["物品名称", "单价"]);
//! assert_eq!(extraction.rows[0]["单价"], CellValue::Int(3000));
//! assert_eq!(extraction.records[0].unit_price, Some(3000.0));
//! ```
//!
//! ## Extracting from a file
//!
//! ```no_run
//! use sheetpick_sheet::{extract_path, ExtractOptions};
//!
//! let result = extract_path("purchases.xlsx", &ExtractOptions::new(2).with_sheet_name("Sheet1"));
//! println!("{}", result.message);
//! ```
//!
//! # Value rules
//!
//! - Integral numbers are reported as integers (`8000`, never `8000.0`).
//! - Date-formatted cells under a header containing `日期` or `date` are
//!   rendered as `yyyy/MM/dd`.
//! - Formula cells use their cached number, then cached text, then the
//!   formula source.
//! - Record fields that are missing or do not coerce are `None`.

mod cell;
mod datetime;
mod error;
mod extract;
mod header;
mod record;
mod resolve;
mod rows;
mod workbook;
mod xlsx;

/// Re-export cell types.
pub use cell::{CellValue, FormulaResult, RawCell};
/// Re-export date helpers.
pub use datetime::{excel_serial_to_date, format_date, DATE_PATTERN};
/// Re-export extraction error types.
pub use error::{ExtractError, Result};
/// Re-export the extraction entry points.
pub use extract::{
    extract_bytes, extract_path, extract_workbook, ExtractOptions, Extraction, ExtractionResult,
    SUCCESS_MESSAGE,
};
/// Re-export header resolution.
pub use header::{resolve_header, select_sheet, HeaderSelection};
/// Re-export record projection.
pub use record::{columns, project_records, Record};
/// Re-export cell resolution.
pub use resolve::{resolve_display, resolve_typed};
/// Re-export row extraction.
pub use rows::{extract_rows, GenericRow, SEQUENCE_KEY};
/// Re-export the workbook model.
pub use workbook::{Row, Sheet, Workbook};
