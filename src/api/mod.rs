//! HTTP API module for the Meal Stipend Engine.
//!
//! This module exposes the batch pipeline as a single JSON endpoint that
//! computes balances for a billing month.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::BalanceRequest;
pub use response::{ApiError, ApiErrorResponse, BalanceResponse};
pub use state::AppState;
