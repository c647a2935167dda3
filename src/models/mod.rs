//! Core data models for the Meal Stipend Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance_row;
mod cell;
mod employee_result;
mod period;

pub use attendance_row::AttendanceRow;
pub use cell::CellValue;
pub use employee_result::EmployeeResult;
pub use period::{FIRST_HALF_LABEL, Period, SECOND_HALF_LABEL};
