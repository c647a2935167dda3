//! Request types for the Meal Stipend Engine API.

use serde::{Deserialize, Serialize};

use crate::models::Period;

/// Request body for the `/balances` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRequest {
    /// The calendar year of the billing month.
    pub year: i32,
    /// The billing month, 1 to 12.
    pub month: u32,
}

impl From<BalanceRequest> for Period {
    fn from(req: BalanceRequest) -> Self {
        Period {
            year: req.year,
            month: req.month,
        }
    }
}
