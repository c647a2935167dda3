//! Workbook access.
//!
//! The extractor sits on top of the [`Workbook`] trait. [`XlsxWorkbook`]
//! reads `.xlsx` bytes with calamine; [`MemoryWorkbook`] holds cells built
//! in code.

use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx, open_workbook_from_rs};

use crate::error::{EngineError, EngineResult};
use crate::models::CellValue;

use super::range::CellRange;

/// A read-only view of a spreadsheet document.
///
/// Coordinates are 1-based, matching A1 notation.
pub trait Workbook {
    /// Returns the names of all sheets, in document order.
    fn sheet_names(&self) -> Vec<String>;

    /// Returns the cell at the given position of an existing sheet.
    ///
    /// Cells outside the used area of the sheet are [`CellValue::Empty`].
    fn cell(&self, sheet: &str, row: u32, col: u32) -> CellValue;

    /// Returns true if the workbook has a sheet with this exact name.
    fn has_sheet(&self, sheet: &str) -> bool {
        self.sheet_names().iter().any(|name| name == sheet)
    }

    /// Reads every cell of `range` on `sheet`, row by row.
    ///
    /// Fails with [`EngineError::SheetNotFound`] if the sheet does not exist.
    fn read_range(&self, sheet: &str, range: &CellRange) -> EngineResult<Vec<Vec<CellValue>>> {
        if !self.has_sheet(sheet) {
            return Err(EngineError::SheetNotFound {
                sheet: sheet.to_string(),
            });
        }

        Ok((range.first_row..=range.last_row)
            .map(|row| {
                (range.first_col..=range.last_col)
                    .map(|col| self.cell(sheet, row, col))
                    .collect()
            })
            .collect())
    }
}

/// Cached values and formula sources of one worksheet.
struct SheetData {
    values: Range<Data>,
    formulas: Option<Range<String>>,
}

/// A workbook loaded from `.xlsx` bytes.
///
/// All sheets are read eagerly so that lookups need no mutable access to
/// the underlying reader.
pub struct XlsxWorkbook {
    order: Vec<String>,
    sheets: HashMap<String, SheetData>,
}

impl XlsxWorkbook {
    /// Parses a workbook from raw `.xlsx` bytes.
    ///
    /// `id` is only used to label errors.
    pub fn from_bytes(id: &str, bytes: &[u8]) -> EngineResult<Self> {
        let parse_error = |message: String| EngineError::DocumentParseError {
            id: id.to_string(),
            message,
        };

        let mut reader: Xlsx<Cursor<&[u8]>> =
            open_workbook_from_rs(Cursor::new(bytes)).map_err(|e: calamine::XlsxError| parse_error(e.to_string()))?;

        let order = reader.sheet_names();
        let mut sheets = HashMap::with_capacity(order.len());

        for name in &order {
            let values = reader
                .worksheet_range(name)
                .map_err(|e| parse_error(format!("sheet '{}': {}", name, e)))?;
            // Formula parts are optional; a workbook without them still has
            // its cached values.
            let formulas = reader.worksheet_formula(name).ok();
            sheets.insert(name.clone(), SheetData { values, formulas });
        }

        Ok(Self { order, sheets })
    }
}

impl Workbook for XlsxWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.order.clone()
    }

    fn cell(&self, sheet: &str, row: u32, col: u32) -> CellValue {
        let Some(data) = self.sheets.get(sheet) else {
            return CellValue::Empty;
        };
        if row == 0 || col == 0 {
            return CellValue::Empty;
        }
        let position = (row - 1, col - 1);

        let value = data
            .values
            .get_value(position)
            .map(data_to_text)
            .unwrap_or_default();
        let formula = data
            .formulas
            .as_ref()
            .and_then(|f| f.get_value(position))
            .filter(|f| !f.is_empty())
            .cloned();

        match formula {
            Some(formula) => CellValue::Rich {
                text: None,
                result: Some(value).filter(|v| !v.is_empty()),
                formula: Some(formula),
            },
            None => CellValue::from(value.as_str()),
        }
    }
}

/// Renders a calamine value as text; whole floats lose their fraction.
fn data_to_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                format!("{:.0}", f)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::Error(_) => String::new(),
    }
}

/// A workbook held in memory.
///
/// # Example
///
/// ```
/// use stipend_engine::extraction::{MemoryWorkbook, Workbook};
/// use stipend_engine::models::CellValue;
///
/// let mut workbook = MemoryWorkbook::new();
/// workbook.set("식대", 3, 2, CellValue::text("2025"));
///
/// assert!(workbook.has_sheet("식대"));
/// assert_eq!(workbook.cell("식대", 3, 2).resolve(), "2025");
/// assert_eq!(workbook.cell("식대", 3, 3), CellValue::Empty);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    order: Vec<String>,
    cells: HashMap<String, HashMap<(u32, u32), CellValue>>,
}

impl MemoryWorkbook {
    /// Creates an empty workbook with no sheets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty sheet if it does not exist yet.
    pub fn add_sheet(&mut self, sheet: &str) -> &mut Self {
        if !self.cells.contains_key(sheet) {
            self.order.push(sheet.to_string());
            self.cells.insert(sheet.to_string(), HashMap::new());
        }
        self
    }

    /// Sets a cell, creating the sheet if needed.
    pub fn set(&mut self, sheet: &str, row: u32, col: u32, value: CellValue) -> &mut Self {
        self.add_sheet(sheet);
        if let Some(cells) = self.cells.get_mut(sheet) {
            cells.insert((row, col), value);
        }
        self
    }

    /// Writes a row of plain text values starting at `first_col`.
    pub fn set_row(&mut self, sheet: &str, row: u32, first_col: u32, values: &[&str]) -> &mut Self {
        self.add_sheet(sheet);
        for (offset, value) in values.iter().enumerate() {
            self.set(sheet, row, first_col + offset as u32, CellValue::from(*value));
        }
        self
    }
}

impl Workbook for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.order.clone()
    }

    fn cell(&self, sheet: &str, row: u32, col: u32) -> CellValue {
        self.cells
            .get(sheet)
            .and_then(|cells| cells.get(&(row, col)))
            .cloned()
            .unwrap_or_default()
    }
}
