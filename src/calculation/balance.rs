//! Monthly stipend balance calculation.
//!
//! An employee is entitled to one daily stipend per scheduled work day and
//! per holiday-type day actually worked, minus one per day off. Spend is
//! every amount recorded in the month.

use rust_decimal::Decimal;

use crate::models::{AttendanceRow, EmployeeResult};

/// Work-type code for a scheduled business day.
pub const WORK_DAY_CODE: &str = "업무일";

/// Work-type code for a holiday-type day (weekends and public holidays).
pub const HOLIDAY_TYPE_CODE: &str = "휴일";

/// Attendance code for a day actually worked.
pub const WORKED_CODE: &str = "근무";

/// Marker contained in attendance codes for days off.
pub const OFF_MARKER: &str = "휴무";

fn in_month(rows: &[AttendanceRow], month: u32) -> impl Iterator<Item = &AttendanceRow> {
    rows.iter().filter(move |row| row.is_in_month(month))
}

/// Counts scheduled work days in `month`.
pub fn count_work_days(rows: &[AttendanceRow], month: u32) -> u32 {
    in_month(rows, month)
        .filter(|row| row.work_type == WORK_DAY_CODE)
        .count() as u32
}

/// Counts holiday-type days worked in `month`.
pub fn count_weekend_work(rows: &[AttendanceRow], month: u32) -> u32 {
    in_month(rows, month)
        .filter(|row| row.work_type == HOLIDAY_TYPE_CODE && row.attendance == WORKED_CODE)
        .count() as u32
}

/// Counts days off in `month` (attendance containing the off marker).
pub fn count_holidays(rows: &[AttendanceRow], month: u32) -> u32 {
    in_month(rows, month)
        .filter(|row| row.attendance.contains(OFF_MARKER))
        .count() as u32
}

/// Sums the amounts of every row in `month`, whatever its codes.
pub fn calculate_used_amount(rows: &[AttendanceRow], month: u32) -> Decimal {
    in_month(rows, month).map(|row| row.amount).sum()
}

/// Computes the entitlement: `(work_day + weekend_work - holiday) * daily_rate`.
///
/// Negative when days off outnumber entitled days.
pub fn calculate_entitlement(work_day: u32, weekend_work: u32, holiday: u32, daily_rate: Decimal) -> Decimal {
    let days = i64::from(work_day) + i64::from(weekend_work) - i64::from(holiday);
    Decimal::from(days) * daily_rate
}

/// Calculates one employee's balance for `month`.
///
/// Never fails: an employee with no rows in the month gets zero counts and
/// a zero total.
///
/// # Example
///
/// ```
/// use stipend_engine::calculation::calculate_balance;
/// use stipend_engine::models::AttendanceRow;
/// use rust_decimal::Decimal;
///
/// let row = |work_type: &str, attendance: &str, amount: i64| AttendanceRow {
///     year: 2025,
///     month: 3,
///     work_type: work_type.to_string(),
///     attendance: attendance.to_string(),
///     amount: Decimal::from(amount),
/// };
/// let rows = vec![
///     row("업무일", "근무", 9_000),
///     row("업무일", "근무", 11_000),
///     row("휴일", "근무", 0),
/// ];
///
/// let result = calculate_balance(&rows, 3, Decimal::from(10_000), "홍길동", "");
/// assert_eq!(result.work_day, 2);
/// assert_eq!(result.weekend_work, 1);
/// assert_eq!(result.total, Decimal::from(30_000));
/// assert_eq!(result.balance, Decimal::from(10_000));
/// ```
pub fn calculate_balance(
    rows: &[AttendanceRow],
    month: u32,
    daily_rate: Decimal,
    name: impl Into<String>,
    download_url: impl Into<String>,
) -> EmployeeResult {
    let work_day = count_work_days(rows, month);
    let weekend_work = count_weekend_work(rows, month);
    let holiday = count_holidays(rows, month);
    let used_amount = calculate_used_amount(rows, month);
    let total = calculate_entitlement(work_day, weekend_work, holiday, daily_rate);

    EmployeeResult {
        name: name.into(),
        work_day,
        holiday,
        weekend_work,
        total,
        used_amount,
        balance: total - used_amount,
        download_url: download_url.into(),
    }
}
