//! Cell value resolution.
//!
//! Every raw cell has two renderings: the display string (used for header
//! names) and the typed value (used for data rows). Neither can fail; each
//! branch ends in a fallback value.

use crate::cell::{integral_value, CellValue, FormulaResult, RawCell};
use crate::datetime::{excel_serial_to_date, format_date};

/// Text of a number with integral collapse applied.
fn number_text(value: f64) -> String {
    match integral_value(value) {
        Some(i) => i.to_string(),
        None => value.to_string(),
    }
}

/// Resolve a cell to its display string.
pub fn resolve_display(cell: Option<&RawCell>) -> String {
    let Some(cell) = cell else {
        return String::new();
    };
    match cell {
        RawCell::Text(s) => s.clone(),
        RawCell::Numeric { value, is_date } => {
            if *is_date {
                if let Some(date) = excel_serial_to_date(*value) {
                    return format_date(date);
                }
            }
            number_text(*value)
        }
        RawCell::Boolean(b) => b.to_string(),
        RawCell::Formula { source, cached } => match cached {
            FormulaResult::Number(n) => number_text(*n),
            FormulaResult::Text(s) => s.clone(),
            FormulaResult::Boolean(_) | FormulaResult::None => source.clone(),
        },
        RawCell::Unsupported => String::new(),
    }
}

/// Resolve a cell to its typed value.
pub fn resolve_typed(cell: Option<&RawCell>) -> CellValue {
    let Some(cell) = cell else {
        return CellValue::Null;
    };
    match cell {
        RawCell::Text(s) => CellValue::String(s.clone()),
        RawCell::Numeric { value, is_date } => {
            if *is_date {
                if let Some(date) = excel_serial_to_date(*value) {
                    return CellValue::Date(date);
                }
            }
            CellValue::from_number(*value)
        }
        RawCell::Boolean(b) => CellValue::Bool(*b),
        RawCell::Formula { source, cached } => match cached {
            FormulaResult::Number(n) => CellValue::from_number(*n),
            FormulaResult::Text(s) => CellValue::String(s.clone()),
            // Boolean results are neither a number nor text.
            FormulaResult::Boolean(_) | FormulaResult::None => CellValue::String(source.clone()),
        },
        RawCell::Unsupported => CellValue::Null,
    }
}
