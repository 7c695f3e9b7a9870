//! Cell grid source
//!
//! The sheet is read once into rows of text cells addressed by 0-based row and
//! column. Spreadsheet workbooks go through `calamine`; CSV exports through `csv`.

use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while loading a grid
#[derive(Error, Debug)]
pub enum GridError {
    #[error("Failed to open workbook {path:?}: {source}")]
    Open { path: PathBuf, source: calamine::Error },

    #[error("Worksheet '{sheet}' not found in {path:?}: {source}")]
    SheetNotFound { path: PathBuf, sheet: String, source: calamine::Error },

    #[error("CSV error in {path:?}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

/// Rows of text cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellGrid {
    rows: Vec<Vec<String>>,
}

impl CellGrid {
    /// Build a grid from rows already in memory
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Load a grid from disk
    ///
    /// Files ending in `.csv` are read as comma separated text; everything else
    /// is opened as a workbook and `sheet` is read from it.
    pub fn open<P: AsRef<Path>>(path: P, sheet: &str) -> Result<Self, GridError> {
        let path = path.as_ref();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        let grid = if is_csv { Self::open_csv(path)? } else { Self::open_workbook(path, sheet)? };

        info!("Loaded {} rows from {:?}", grid.row_count(), path);
        Ok(grid)
    }

    fn open_workbook(path: &Path, sheet: &str) -> Result<Self, GridError> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|source| GridError::Open { path: path.to_path_buf(), source })?;

        let range = workbook.worksheet_range(sheet).map_err(|source| GridError::SheetNotFound {
            path: path.to_path_buf(),
            sheet: sheet.to_string(),
            source,
        })?;

        Ok(Self::from_range(&range))
    }

    fn open_csv(path: &Path) -> Result<Self, GridError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|source| GridError::Csv { path: path.to_path_buf(), source })?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record =
                record.map_err(|source| GridError::Csv { path: path.to_path_buf(), source })?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { rows })
    }

    /// Convert a worksheet range, padding so that indices stay absolute when the
    /// used range does not start at A1
    fn from_range(range: &Range<Data>) -> Self {
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        debug!("Worksheet used range starts at row {}, col {}", start_row, start_col);

        let mut rows: Vec<Vec<String>> = vec![Vec::new(); start_row as usize];
        for cells in range.rows() {
            let mut row = vec![String::new(); start_col as usize];
            row.extend(cells.iter().map(cell_text));
            rows.push(row);
        }

        Self { rows }
    }

    /// Text of a cell, or `None` when the row or column is past the end
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row).and_then(|cells| cells.get(column)).map(String::as_str)
    }

    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => text.clone(),
        Data::Float(number) => number.to_string(),
        Data::Int(number) => number.to_string(),
        Data::Bool(flag) => flag.to_string(),
        Data::DateTime(date) => date.as_f64().to_string(),
        Data::Error(error) => error.to_string(),
    }
}
