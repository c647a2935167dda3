//! Meal Stipend Engine
//!
//! This crate reads per-employee monthly attendance workbooks, computes each
//! employee's meal-stipend entitlement, usage and remaining balance for a
//! billing month, and writes the consolidated results to a results
//! spreadsheet.
//!
//! The pieces are layered bottom-up:
//!
//! - [`extraction`] turns a rectangular cell range of a workbook into
//!   [`models::AttendanceRow`]s.
//! - [`calculation`] derives display names and computes balances.
//! - [`storage`] abstracts where documents come from, how download links are
//!   built and where results go.
//! - [`pipeline`] runs a whole batch; [`api`] exposes it over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod extraction;
pub mod models;
pub mod pipeline;
pub mod storage;
