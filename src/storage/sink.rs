//! Result sinks.
//!
//! A [`ResultSink`] persists an ordered batch of [`EmployeeResult`]s into the
//! shared results spreadsheet, one sheet per period.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Color, Format, Formula, Workbook, Worksheet, XlsxError};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeResult, Period};

/// Header row of every results sheet.
pub const RESULT_HEADERS: [&str; 8] = [
    "이름", "업무일", "휴일근무", "휴무", "지급액", "사용액", "잔액", "원본",
];

/// Row index (0-based) of the header.
pub const HEADER_ROW: u32 = 0;

/// Row index (0-based) of the first result row.
pub const FIRST_RESULT_ROW: u32 = 1;

/// Label shown on the download link cell.
pub const LINK_LABEL: &str = "다운로드";

/// Where computed results go.
pub trait ResultSink: Send + Sync {
    /// Writes `results` into the sheet for `period` of spreadsheet
    /// `spreadsheet_id`, creating the sheet if absent.
    ///
    /// Returns the name of the sheet written.
    fn write(
        &self,
        results: &[EmployeeResult],
        period: &Period,
        spreadsheet_id: &str,
    ) -> EngineResult<String>;
}

fn sink_error(message: impl std::fmt::Display) -> EngineError {
    EngineError::SinkError {
        message: message.to_string(),
    }
}

impl From<XlsxError> for EngineError {
    fn from(error: XlsxError) -> Self {
        sink_error(error)
    }
}

/// Builds the `HYPERLINK` formula for a download link.
///
/// # Example
///
/// ```
/// use stipend_engine::storage::hyperlink_formula;
///
/// assert_eq!(
///     hyperlink_formula("https://x/a.xlsx"),
///     r#"=HYPERLINK("https://x/a.xlsx","다운로드")"#
/// );
/// ```
pub fn hyperlink_formula(url: &str) -> String {
    format!(
        "=HYPERLINK(\"{}\",\"{}\")",
        url.replace('"', "\"\""),
        LINK_LABEL
    )
}

fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// A sink keeping one `.xlsx` results workbook per spreadsheet id in a
/// directory.
///
/// Writing a period rewrites the workbook: other sheets are carried over
/// cell by cell (values and formulas), and the period's sheet is replaced
/// in place or appended.
///
/// Writes through one sink (and its clones) are serialised, and the new
/// workbook is saved to a temporary file in the output directory before it
/// is renamed over the old one. A reader never sees a half-written file.
#[derive(Debug, Clone)]
pub struct XlsxResultSink {
    output_dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl XlsxResultSink {
    /// Creates a sink writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the workbook path for a spreadsheet id.
    pub fn workbook_path(&self, spreadsheet_id: &str) -> PathBuf {
        self.output_dir.join(format!("{}.xlsx", spreadsheet_id))
    }

    /// Reads the sheets of an existing results workbook, in order.
    fn existing_sheets(path: &Path) -> EngineResult<Vec<CarriedSheet>> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let bytes = fs::read(path).map_err(sink_error)?;
        let mut reader: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).map_err(sink_error)?;

        let mut sheets = Vec::new();
        for name in reader.sheet_names() {
            let values = reader.worksheet_range(&name).map_err(sink_error)?;
            let formulas = reader.worksheet_formula(&name).ok();

            let mut cells = Vec::new();
            if let Some((start_row, start_col)) = values.start() {
                for (row, col, value) in values.used_cells() {
                    let position = (start_row + row as u32, start_col + col as u32);
                    let formula = formulas
                        .as_ref()
                        .and_then(|f| f.get_value(position))
                        .filter(|f| !f.is_empty())
                        .cloned();
                    cells.push(CarriedCell {
                        row: position.0,
                        col: position.1 as u16,
                        value: value.clone(),
                        formula,
                    });
                }
            }
            sheets.push(CarriedSheet { name, cells });
        }
        Ok(sheets)
    }

    /// Saves `workbook` to `staging`, then renames it over `target`.
    fn replace_atomically(workbook: &mut Workbook, staging: &Path, target: &Path) -> EngineResult<()> {
        workbook.save(staging)?;
        fs::rename(staging, target).map_err(sink_error)
    }

    fn write_results_sheet(worksheet: &mut Worksheet, results: &[EmployeeResult]) -> EngineResult<()> {
        let header_format = Format::new().set_bold();
        let overspent_format = Format::new().set_font_color(Color::Red);
        for (col, header) in RESULT_HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(HEADER_ROW, col as u16, *header, &header_format)?;
        }

        for (idx, result) in results.iter().enumerate() {
            let row = FIRST_RESULT_ROW + idx as u32;
            worksheet.write_string(row, 0, &result.name)?;
            worksheet.write_number(row, 1, f64::from(result.work_day))?;
            worksheet.write_number(row, 2, f64::from(result.weekend_work))?;
            worksheet.write_number(row, 3, f64::from(result.holiday))?;
            worksheet.write_number(row, 4, decimal_to_f64(result.total))?;
            worksheet.write_number(row, 5, decimal_to_f64(result.used_amount))?;
            if result.is_overspent() {
                worksheet.write_number_with_format(row, 6, decimal_to_f64(result.balance), &overspent_format)?;
            } else {
                worksheet.write_number(row, 6, decimal_to_f64(result.balance))?;
            }
            if !result.download_url.is_empty() {
                worksheet.write_formula(
                    row,
                    7,
                    Formula::new(hyperlink_formula(&result.download_url)).set_result(LINK_LABEL),
                )?;
            }
        }

        worksheet.set_column_width(0, 16.0)?;
        worksheet.set_column_width(7, 12.0)?;
        Ok(())
    }
}

/// A cell read back from an existing results workbook.
struct CarriedCell {
    row: u32,
    col: u16,
    value: Data,
    formula: Option<String>,
}

impl CarriedCell {
    fn write(&self, worksheet: &mut Worksheet) -> EngineResult<()> {
        if let Some(formula) = &self.formula {
            let result = self.value.to_string();
            worksheet.write_formula(self.row, self.col, Formula::new(formula).set_result(result))?;
            return Ok(());
        }

        match &self.value {
            Data::Empty => {}
            Data::Float(f) => {
                worksheet.write_number(self.row, self.col, *f)?;
            }
            Data::Int(i) => {
                worksheet.write_number(self.row, self.col, *i as f64)?;
            }
            Data::Bool(b) => {
                worksheet.write_boolean(self.row, self.col, *b)?;
            }
            other => {
                worksheet.write_string(self.row, self.col, other.to_string())?;
            }
        }
        Ok(())
    }
}

/// A sheet read back from an existing results workbook.
struct CarriedSheet {
    name: String,
    cells: Vec<CarriedCell>,
}

impl ResultSink for XlsxResultSink {
    fn write(
        &self,
        results: &[EmployeeResult],
        period: &Period,
        spreadsheet_id: &str,
    ) -> EngineResult<String> {
        let sheet_name = period.sheet_title();
        let path = self.workbook_path(spreadsheet_id);

        // Held for the whole read-modify-write.
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| sink_error("results workbook lock poisoned"))?;

        fs::create_dir_all(&self.output_dir).map_err(sink_error)?;
        let existing = Self::existing_sheets(&path)?;

        let mut workbook = Workbook::new();
        let mut written = false;

        for sheet in &existing {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&sheet.name)?;
            if sheet.name == sheet_name {
                Self::write_results_sheet(worksheet, results)?;
                written = true;
            } else {
                for cell in &sheet.cells {
                    cell.write(worksheet)?;
                }
            }
        }

        if !written {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&sheet_name)?;
            Self::write_results_sheet(worksheet, results)?;
        }

        let staging = self
            .output_dir
            .join(format!(".{}.{}.tmp", spreadsheet_id, Uuid::new_v4()));
        if let Err(err) = Self::replace_atomically(&mut workbook, &staging, &path) {
            if let Err(cleanup) = fs::remove_file(&staging) {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %staging.display(), error = %cleanup, "Could not remove staging file");
                }
            }
            return Err(err);
        }

        debug!(
            path = %path.display(),
            sheet = %sheet_name,
            rows = results.len(),
            carried_sheets = existing.len(),
            "Wrote results sheet"
        );

        Ok(sheet_name)
    }
}

/// A batch recorded by [`MemoryResultSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedBatch {
    /// The spreadsheet written to.
    pub spreadsheet_id: String,
    /// The sheet written.
    pub sheet_name: String,
    /// The results, in the order received.
    pub results: Vec<EmployeeResult>,
}

/// A sink recording batches in memory.
#[derive(Debug, Default)]
pub struct MemoryResultSink {
    batches: Mutex<Vec<RecordedBatch>>,
}

impl MemoryResultSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every batch written so far.
    pub fn batches(&self) -> Vec<RecordedBatch> {
        self.batches
            .lock()
            .map(|batches| batches.clone())
            .unwrap_or_default()
    }
}

impl ResultSink for MemoryResultSink {
    fn write(
        &self,
        results: &[EmployeeResult],
        period: &Period,
        spreadsheet_id: &str,
    ) -> EngineResult<String> {
        let sheet_name = period.sheet_title();
        let mut batches = self
            .batches
            .lock()
            .map_err(|_| sink_error("result sink lock poisoned"))?;
        batches.push(RecordedBatch {
            spreadsheet_id: spreadsheet_id.to_string(),
            sheet_name: sheet_name.clone(),
            results: results.to_vec(),
        });
        Ok(sheet_name)
    }
}
