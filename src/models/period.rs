//! Billing period model.
//!
//! This module contains the [`Period`] type identifying the target year and
//! month for which stipend balances are computed.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Label used in template file names for months 1 to 6.
pub const FIRST_HALF_LABEL: &str = "상반기";

/// Label used in template file names for months 7 to 12.
pub const SECOND_HALF_LABEL: &str = "하반기";

/// A target billing period (year and month).
///
/// # Example
///
/// ```
/// use stipend_engine::models::Period;
///
/// let period = Period::new(2025, 3).unwrap();
/// assert_eq!(period.half_label(), "상반기");
/// assert_eq!(period.sheet_title(), "2025년 3월");
///
/// assert!(Period::new(2025, 13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// The calendar year.
    pub year: i32,
    /// The calendar month (1-12).
    pub month: u32,
}

impl Period {
    /// Creates a validated period.
    ///
    /// Returns [`EngineError::InvalidPeriod`] when the month is outside
    /// 1-12 or the year is not positive.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        let period = Self { year, month };
        period.validate()?;
        Ok(period)
    }

    /// Checks that the period is a valid billing period.
    pub fn validate(&self) -> EngineResult<()> {
        if !(1..=12).contains(&self.month) {
            return Err(EngineError::InvalidPeriod {
                message: format!("month must be between 1 and 12, got {}", self.month),
            });
        }
        if self.year < 1 {
            return Err(EngineError::InvalidPeriod {
                message: format!("year must be positive, got {}", self.year),
            });
        }
        Ok(())
    }

    /// Returns the half-year label used by the attendance template.
    pub fn half_label(&self) -> &'static str {
        if self.month <= 6 {
            FIRST_HALF_LABEL
        } else {
            SECOND_HALF_LABEL
        }
    }

    /// Returns the title of the results sheet for this period.
    pub fn sheet_title(&self) -> String {
        format!("{}년 {}월", self.year, self.month)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
