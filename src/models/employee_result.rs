//! Employee balance result model.
//!
//! This module contains the [`EmployeeResult`] type produced by the balance
//! calculator for one employee and one target month.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The stipend balance for one employee in one target month.
///
/// `total` is the entitlement derived from day counts and may be negative
/// when holidays outnumber worked days. `balance` is `total - used_amount`
/// and is negative on overspend.
///
/// # Example
///
/// ```
/// use stipend_engine::models::EmployeeResult;
/// use rust_decimal::Decimal;
///
/// let result = EmployeeResult {
///     name: "홍길동".to_string(),
///     work_day: 20,
///     holiday: 0,
///     weekend_work: 1,
///     total: Decimal::new(210_000, 0),
///     used_amount: Decimal::new(150_000, 0),
///     balance: Decimal::new(60_000, 0),
///     download_url: String::new(),
/// };
/// assert!(!result.is_overspent());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeResult {
    /// The employee's display name.
    pub name: String,
    /// Number of scheduled work days in the month.
    pub work_day: u32,
    /// Number of days marked as off.
    pub holiday: u32,
    /// Number of holiday-type days actually worked.
    pub weekend_work: u32,
    /// Entitlement for the month.
    pub total: Decimal,
    /// Amount spent in the month.
    pub used_amount: Decimal,
    /// Entitlement minus spend.
    pub balance: Decimal,
    /// Link to the source workbook, empty when unknown.
    pub download_url: String,
}

impl EmployeeResult {
    /// Returns true if the employee spent more than their entitlement.
    pub fn is_overspent(&self) -> bool {
        self.balance < Decimal::ZERO
    }
}
