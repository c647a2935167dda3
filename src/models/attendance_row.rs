//! Attendance row model.
//!
//! This module contains the [`AttendanceRow`] type, one normalized record
//! extracted from an employee's attendance workbook.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One normalized attendance record.
///
/// `year` and `month` are always present; rows without them never make it
/// out of the extractor. `amount` is zero when the source cell was blank or
/// unparseable.
///
/// # Example
///
/// ```
/// use stipend_engine::models::AttendanceRow;
/// use rust_decimal::Decimal;
///
/// let row = AttendanceRow {
///     year: 2025,
///     month: 3,
///     work_type: "업무일".to_string(),
///     attendance: "근무".to_string(),
///     amount: Decimal::new(8500, 0),
/// };
/// assert!(row.is_in_month(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRow {
    /// The calendar year of the record.
    pub year: i32,
    /// The calendar month of the record (1-12).
    pub month: u32,
    /// The work-type code (e.g. "업무일", "휴일").
    pub work_type: String,
    /// The attendance code (e.g. "근무", or text containing "휴무").
    pub attendance: String,
    /// The amount spent on this day.
    pub amount: Decimal,
}

impl AttendanceRow {
    /// Returns true if this row belongs to the given month.
    pub fn is_in_month(&self, month: u32) -> bool {
        self.month == month
    }
}
