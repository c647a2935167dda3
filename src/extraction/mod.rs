//! Tabular extraction for the Meal Stipend Engine.
//!
//! This module reads the attendance table of an employee workbook:
//! parsing the configured A1 range, resolving cell values through the
//! [`Workbook`] abstraction, and turning table rows into
//! [`AttendanceRow`](crate::models::AttendanceRow)s.

mod extractor;
mod range;
mod workbook;

pub use extractor::{
    AMOUNT_OFFSET, ATTENDANCE_OFFSET, MONTH_OFFSET, WORK_TYPE_OFFSET, YEAR_OFFSET, extract_rows,
    extract_rows_in, parse_amount, parse_row,
};
pub use range::{CellRange, column_letters, column_number};
pub use workbook::{MemoryWorkbook, Workbook, XlsxWorkbook};
