//! Attendance row extraction.
//!
//! Turns the fixed attendance table of an employee workbook into
//! [`AttendanceRow`]s. Columns are addressed by offset from the first
//! column of the configured range; changing the template means changing
//! these offsets.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{AttendanceRow, CellValue};

use super::range::CellRange;
use super::workbook::Workbook;

/// Offset of the year column from the first column of the range.
pub const YEAR_OFFSET: usize = 0;
/// Offset of the month column.
pub const MONTH_OFFSET: usize = 1;
/// Offset of the work-type column.
pub const WORK_TYPE_OFFSET: usize = 4;
/// Offset of the attendance column.
pub const ATTENDANCE_OFFSET: usize = 6;
/// Offset of the amount column.
pub const AMOUNT_OFFSET: usize = 8;

/// Extracts attendance rows from `sheet` within `range`.
///
/// Rows that are empty, lack a year or month, or whose year/month are not
/// integers (or whose month is outside 1-12) are dropped without error.
/// Missing or unparseable amounts become zero.
///
/// Fails only with [`EngineError::SheetNotFound`](crate::error::EngineError::SheetNotFound).
///
/// # Example
///
/// ```
/// use stipend_engine::extraction::{CellRange, MemoryWorkbook, extract_rows};
/// use rust_decimal::Decimal;
///
/// let mut workbook = MemoryWorkbook::new();
/// workbook.set_row(
///     "식대",
///     3,
///     2,
///     &["2025", "3", "", "", "업무일", "", "근무", "", "8,500"],
/// );
/// workbook.set_row("식대", 4, 2, &["", "3", "", "", "업무일"]);
///
/// let rows = extract_rows(&workbook, "식대", &CellRange::parse("B3:L204").unwrap()).unwrap();
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].amount, Decimal::new(8500, 0));
/// ```
pub fn extract_rows<W: Workbook + ?Sized>(
    workbook: &W,
    sheet: &str,
    range: &CellRange,
) -> EngineResult<Vec<AttendanceRow>> {
    let cells = workbook.read_range(sheet, range)?;
    let total = cells.len();

    let rows: Vec<AttendanceRow> = cells.iter().filter_map(|row| parse_row(row)).collect();

    debug!(
        sheet = %sheet,
        range = %range,
        scanned = total,
        extracted = rows.len(),
        "Extracted attendance rows"
    );

    Ok(rows)
}

/// Extracts attendance rows using a range given in A1 notation.
///
/// Fails with `RangeFormatInvalid` if the range does not parse, before the
/// workbook is touched.
pub fn extract_rows_in<W: Workbook + ?Sized>(
    workbook: &W,
    sheet: &str,
    range: &str,
) -> EngineResult<Vec<AttendanceRow>> {
    let range = CellRange::parse(range)?;
    extract_rows(workbook, sheet, &range)
}

/// Parses one table row, or returns `None` if the row is skipped.
pub fn parse_row(cells: &[CellValue]) -> Option<AttendanceRow> {
    if cells.iter().all(CellValue::is_blank) {
        return None;
    }

    let year: i32 = parse_integer(cell_text(cells, YEAR_OFFSET))?;
    let month: u32 = parse_integer(cell_text(cells, MONTH_OFFSET))?;
    if !(1..=12).contains(&month) {
        return None;
    }

    Some(AttendanceRow {
        year,
        month,
        work_type: cell_text(cells, WORK_TYPE_OFFSET).trim().to_string(),
        attendance: cell_text(cells, ATTENDANCE_OFFSET).trim().to_string(),
        amount: parse_amount(cell_text(cells, AMOUNT_OFFSET)),
    })
}

fn cell_text(cells: &[CellValue], offset: usize) -> &str {
    cells.get(offset).map(CellValue::resolve).unwrap_or("")
}

/// Parses a trimmed integer, `None` when blank or not an integer.
fn parse_integer<T: FromStr>(text: &str) -> Option<T> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse().ok()
}

/// Parses a currency amount, defaulting to zero.
///
/// Thousands separators are ignored.
pub fn parse_amount(text: &str) -> Decimal {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::extraction::MemoryWorkbook;

    const SHEET: &str = "식대";

    fn template_range() -> CellRange {
        CellRange::parse("B3:L204").unwrap()
    }

    /// Builds a table row: year, month, work type, attendance, amount at
    /// their template offsets.
    fn table_row(year: &str, month: &str, work_type: &str, attendance: &str, amount: &str) -> Vec<String> {
        let mut row = vec![String::new(); 11];
        row[YEAR_OFFSET] = year.to_string();
        row[MONTH_OFFSET] = month.to_string();
        row[WORK_TYPE_OFFSET] = work_type.to_string();
        row[ATTENDANCE_OFFSET] = attendance.to_string();
        row[AMOUNT_OFFSET] = amount.to_string();
        row
    }

    fn workbook_with(rows: &[Vec<String>]) -> MemoryWorkbook {
        let mut workbook = MemoryWorkbook::new();
        workbook.add_sheet(SHEET);
        for (i, row) in rows.iter().enumerate() {
            let values: Vec<&str> = row.iter().map(String::as_str).collect();
            workbook.set_row(SHEET, 3 + i as u32, 2, &values);
        }
        workbook
    }

    #[test]
    fn test_missing_amount_defaults_to_zero() {
        let workbook = workbook_with(&[table_row("2025", "3", "업무일", "", "")]);
        let rows = extract_rows(&workbook, SHEET, &template_range()).unwrap();

        assert_eq!(
            rows,
            vec![AttendanceRow {
                year: 2025,
                month: 3,
                work_type: "업무일".to_string(),
                attendance: String::new(),
                amount: Decimal::ZERO,
            }]
        );
    }

    #[test]
    fn test_blank_year_drops_row() {
        let workbook = workbook_with(&[
            table_row("", "3", "업무일", "근무", "8000"),
            table_row("2025", "3", "업무일", "근무", "9000"),
        ]);
        let rows = extract_rows(&workbook, SHEET, &template_range()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount, Decimal::new(9000, 0));
    }

    #[test]
    fn test_blank_month_drops_row() {
        let workbook = workbook_with(&[table_row("2025", "  ", "업무일", "근무", "8000")]);
        assert!(extract_rows(&workbook, SHEET, &template_range()).unwrap().is_empty());
    }

    #[test]
    fn test_non_numeric_year_or_month_drops_row() {
        let workbook = workbook_with(&[
            table_row("연도", "월", "구분", "근태", "금액"),
            table_row("2025", "3월", "업무일", "", ""),
            table_row("2025.5", "3", "업무일", "", ""),
        ]);
        assert!(extract_rows(&workbook, SHEET, &template_range()).unwrap().is_empty());
    }

    #[test]
    fn test_out_of_range_month_drops_row() {
        let workbook = workbook_with(&[
            table_row("2025", "0", "업무일", "", ""),
            table_row("2025", "13", "업무일", "", ""),
        ]);
        assert!(extract_rows(&workbook, SHEET, &template_range()).unwrap().is_empty());
    }

    #[test]
    fn test_empty_rows_are_skipped() {
        let workbook = workbook_with(&[
            table_row("", "", "", "", ""),
            table_row("2025", "4", "휴일", "근무", "12000"),
        ]);
        let rows = extract_rows(&workbook, SHEET, &template_range()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].month, 4);
    }

    #[test]
    fn test_codes_are_trimmed() {
        let workbook = workbook_with(&[table_row(" 2025 ", " 3 ", " 업무일 ", " 근무 ", " 7,000 ")]);
        let rows = extract_rows(&workbook, SHEET, &template_range()).unwrap();
        assert_eq!(rows[0].work_type, "업무일");
        assert_eq!(rows[0].attendance, "근무");
        assert_eq!(rows[0].amount, Decimal::new(7000, 0));
    }

    #[test]
    fn test_cells_outside_range_are_ignored() {
        let mut workbook = workbook_with(&[]);
        // Row 2 is above the table, column A is left of it.
        workbook.set_row(SHEET, 2, 2, &["2025", "3", "", "", "업무일"]);
        workbook.set_row(SHEET, 3, 1, &["2025", "3"]);
        let rows = extract_rows(&workbook, SHEET, &template_range()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_formula_cells_use_resolved_text() {
        let mut workbook = workbook_with(&[table_row("2025", "", "업무일", "", "5000")]);
        workbook.set(
            SHEET,
            3,
            3,
            CellValue::Rich {
                text: None,
                result: Some("3".to_string()),
                formula: Some("MONTH(A3)".to_string()),
            },
        );
        let rows = extract_rows(&workbook, SHEET, &template_range()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].month, 3);
    }

    #[test]
    fn test_missing_sheet_fails() {
        let workbook = MemoryWorkbook::new();
        match extract_rows(&workbook, SHEET, &template_range()) {
            Err(EngineError::SheetNotFound { sheet }) => assert_eq!(sheet, SHEET),
            other => panic!("Expected SheetNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_range_string_fails() {
        let workbook = workbook_with(&[]);
        match extract_rows_in(&workbook, SHEET, "B3..L204") {
            Err(EngineError::RangeFormatInvalid { range }) => assert_eq!(range, "B3..L204"),
            other => panic!("Expected RangeFormatInvalid, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_amount_variants() {
        assert_eq!(parse_amount("12000"), Decimal::new(12000, 0));
        assert_eq!(parse_amount("1,234.5"), Decimal::new(12345, 1));
        assert_eq!(parse_amount("-500"), Decimal::new(-500, 0));
        assert_eq!(parse_amount("1.2e3"), Decimal::new(1200, 0));
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("n/a"), Decimal::ZERO);
    }
}
