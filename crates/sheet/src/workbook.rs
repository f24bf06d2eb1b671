use crate::cell::RawCell;
use indexmap::IndexMap;

/// One physical row; `None` entries are cells that do not exist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<Option<RawCell>>,
}

impl Row {
    /// Create an empty row
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from present cells laid out from column 0.
    #[must_use]
    pub fn from_cells<I: IntoIterator<Item = RawCell>>(cells: I) -> Self {
        let mut row = Row::new();
        for (col, cell) in cells.into_iter().enumerate() {
            row.set_cell(col, cell);
        }
        row
    }

    /// Get the cell at a 0-based column, if present
    #[must_use]
    pub fn cell(&self, col: usize) -> Option<&RawCell> {
        self.cells.get(col).and_then(Option::as_ref)
    }

    pub fn set_cell(&mut self, col: usize, cell: RawCell) {
        if col >= self.cells.len() {
            self.cells.resize(col + 1, None);
        }
        self.cells[col] = Some(cell);
    }

    /// Index of the last present cell.
    #[must_use]
    pub fn last_cell_index(&self) -> Option<usize> {
        self.cells.iter().rposition(Option::is_some)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.last_cell_index().is_none()
    }
}

/// A read-only view of one worksheet; rows without any cell are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    name: String,
    rows: Vec<Option<Row>>,
}

impl Sheet {
    /// Create an empty sheet with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            rows: Vec::new(),
        }
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the row at a 0-based index, if it exists
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index).and_then(Option::as_ref)
    }

    /// Get the cell at a 0-based (row, col) position, if it exists
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&RawCell> {
        self.row(row).and_then(|r| r.cell(col))
    }

    /// Index of the last row holding at least one cell.
    #[must_use]
    pub fn last_row_index(&self) -> Option<usize> {
        self.rows
            .iter()
            .rposition(|r| r.as_ref().is_some_and(|r| !r.is_empty()))
    }

    /// Place a whole row at a 0-based index; an empty row leaves the slot absent.
    pub fn set_row(&mut self, index: usize, row: Row) {
        if row.is_empty() {
            if let Some(slot) = self.rows.get_mut(index) {
                *slot = None;
            }
            return;
        }
        if index >= self.rows.len() {
            self.rows.resize(index + 1, None);
        }
        self.rows[index] = Some(row);
    }

    pub fn set_cell(&mut self, row: usize, col: usize, cell: RawCell) {
        if row >= self.rows.len() {
            self.rows.resize(row + 1, None);
        }
        self.rows[row].get_or_insert_with(Row::new).set_cell(col, cell);
    }
}

/// An ordered collection of sheets (preserves the workbook's declared order)
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: IndexMap<String, Sheet>,
}

impl Workbook {
    /// Create a new empty workbook
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of sheets
    #[must_use]
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Get all sheet names in order
    #[must_use]
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }

    /// Append a sheet, replacing any sheet of the same name in place.
    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.insert(sheet.name().to_string(), sheet);
    }

    /// Look up a sheet by exact, case-sensitive name
    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.get(name)
    }

    #[must_use]
    pub fn first_sheet(&self) -> Option<&Sheet> {
        self.sheets.first().map(|(_, sheet)| sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_last_cell_index_ignores_gaps() {
        let mut row = Row::new();
        assert_eq!(row.last_cell_index(), None);
        row.set_cell(3, RawCell::text("d"));
        row.set_cell(0, RawCell::text("a"));
        assert_eq!(row.last_cell_index(), Some(3));
        assert!(row.cell(1).is_none());
        assert_eq!(row.cell(3), Some(&RawCell::text("d")));
    }

    #[test]
    fn test_sheet_absent_rows() {
        let mut sheet = Sheet::with_name("Data");
        sheet.set_cell(4, 1, RawCell::number(1.0));

        assert!(sheet.row(0).is_none());
        assert!(sheet.row(4).is_some());
        assert!(sheet.row(5).is_none());
        assert_eq!(sheet.last_row_index(), Some(4));
        assert_eq!(sheet.cell(4, 1), Some(&RawCell::number(1.0)));
    }

    #[test]
    fn test_set_empty_row_stays_absent() {
        let mut sheet = Sheet::with_name("Data");
        sheet.set_row(2, Row::new());
        assert_eq!(sheet.last_row_index(), None);
        assert!(sheet.row(2).is_none());
    }

    #[test]
    fn test_workbook_order_and_lookup() {
        let mut book = Workbook::new();
        book.add_sheet(Sheet::with_name("Second"));
        book.add_sheet(Sheet::with_name("First"));

        assert_eq!(book.sheet_names(), vec!["Second", "First"]);
        assert_eq!(book.first_sheet().map(Sheet::name), Some("Second"));
        assert!(book.sheet("first").is_none());
        assert!(book.sheet("First").is_some());
    }
}
