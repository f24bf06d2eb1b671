use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// A cell as stored in the source workbook, classified once at load time.
///
/// Missing cells are not a variant: rows hold `Option<RawCell>` and `None`
/// means the cell is absent.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Text(String),
    /// A number; `is_date` is set when the cell's display format is a date format.
    Numeric { value: f64, is_date: bool },
    Boolean(bool),
    Formula { source: String, cached: FormulaResult },
    /// Error values and any other kind the extractor does not interpret.
    Unsupported,
}

/// The last value a spreadsheet application stored for a formula cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormulaResult {
    /// Never calculated, or the cached value was empty.
    #[default]
    None,
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl RawCell {
    /// Create a text cell.
    #[must_use]
    pub fn text<S: Into<String>>(text: S) -> Self {
        RawCell::Text(text.into())
    }

    /// Create a plain (non-date) numeric cell.
    #[must_use]
    pub fn number(value: f64) -> Self {
        RawCell::Numeric {
            value,
            is_date: false,
        }
    }

    /// Create a date-formatted numeric cell from an Excel serial number.
    #[must_use]
    pub fn date_serial(serial: f64) -> Self {
        RawCell::Numeric {
            value: serial,
            is_date: true,
        }
    }

    /// Create a formula cell without a cached result.
    #[must_use]
    pub fn formula<S: Into<String>>(source: S) -> Self {
        RawCell::Formula {
            source: source.into(),
            cached: FormulaResult::None,
        }
    }

    /// Create a formula cell carrying a cached result.
    #[must_use]
    pub fn formula_with_result<S: Into<String>>(source: S, cached: FormulaResult) -> Self {
        RawCell::Formula {
            source: source.into(),
            cached,
        }
    }
}

/// A normalized scalar value in an extracted row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Date(NaiveDate),
}

impl CellValue {
    /// Check if the value is null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Check whether the value renders to nothing but whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Build a numeric value, collapsing integral doubles to `Int`.
    #[must_use]
    pub fn from_number(value: f64) -> Self {
        match integral_value(value) {
            Some(i) => CellValue::Int(i),
            None => CellValue::Float(value),
        }
    }

    /// Replace an integral `Float` with the equivalent `Int`.
    #[must_use]
    pub fn collapse_integral(self) -> Self {
        match self {
            CellValue::Float(f) => CellValue::from_number(f),
            other => other,
        }
    }

    /// Numeric view of the value; text is not parsed.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

/// Integer form of `value` when it has no fractional part and fits in an `i64`.
pub(crate) fn integral_value(value: f64) -> Option<i64> {
    // 2^63 is exactly representable; anything at or above it overflows i64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if value.is_finite() && value.fract() == 0.0 && value >= -LIMIT && value < LIMIT {
        Some(value as i64)
    } else {
        None
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, ""),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(fl) => write!(f, "{fl}"),
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Int(i64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_number_collapses_integral() {
        assert_eq!(CellValue::from_number(100.0), CellValue::Int(100));
        assert_eq!(CellValue::from_number(-3.0), CellValue::Int(-3));
        assert_eq!(CellValue::from_number(123.45), CellValue::Float(123.45));
    }

    #[test]
    fn test_from_number_keeps_out_of_range() {
        assert_eq!(CellValue::from_number(1e20), CellValue::Float(1e20));
        assert!(matches!(CellValue::from_number(f64::NAN), CellValue::Float(f) if f.is_nan()));
        assert_eq!(
            CellValue::from_number(f64::INFINITY),
            CellValue::Float(f64::INFINITY)
        );
    }

    #[test]
    fn test_collapse_integral_leaves_other_variants() {
        assert_eq!(CellValue::Float(8000.0).collapse_integral(), CellValue::Int(8000));
        assert_eq!(
            CellValue::from("8000.0").collapse_integral(),
            CellValue::String("8000.0".to_string())
        );
    }

    #[test]
    fn test_is_blank() {
        assert!(CellValue::Null.is_blank());
        assert!(CellValue::from("   ").is_blank());
        assert!(!CellValue::from(" x ").is_blank());
        assert!(!CellValue::Int(0).is_blank());
        assert!(!CellValue::Bool(false).is_blank());
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::Bool(true).to_string(), "true");
        assert_eq!(CellValue::Int(16000).to_string(), "16000");
        assert_eq!(CellValue::Float(123.45).to_string(), "123.45");
        let date = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
        assert_eq!(CellValue::Date(date).to_string(), "2023-01-15");
    }
}
