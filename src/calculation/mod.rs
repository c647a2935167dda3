//! Calculation logic for the Meal Stipend Engine.
//!
//! This module contains the per-employee balance calculation (day counts,
//! entitlement, spend and balance), the batch aggregation across employees,
//! and the name normalization that turns uploaded file names into display
//! names.

mod balance;
mod batch;
mod naming;

pub use balance::{
    HOLIDAY_TYPE_CODE, OFF_MARKER, WORK_DAY_CODE, WORKED_CODE, calculate_balance,
    calculate_entitlement, calculate_used_amount, count_holidays, count_weekend_work,
    count_work_days,
};
pub use batch::aggregate_balances;
pub use naming::{
    NAME_SEPARATOR, last_segment, normalize_name, remove_substrings, strip_extension,
    strip_template_prefix, template_prefix, trim_affixes,
};
