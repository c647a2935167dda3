//! HTTP request handlers for the Meal Stipend Engine API.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::models::Period;
use crate::pipeline::run_batch;

use super::request::BalanceRequest;
use super::response::{ApiError, ApiErrorResponse, BalanceResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/balances", post(balances_handler))
        .with_state(state)
}

fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Handler for POST /balances endpoint.
///
/// Runs a batch over every uploaded workbook for the requested month and
/// returns the per-employee balances.
async fn balances_handler(
    State(state): State<AppState>,
    payload: Result<Json<BalanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing balance request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: rejection_error(rejection, correlation_id),
            }
            .into_response();
        }
    };

    let period: Period = request.into();
    if let Err(err) = period.validate() {
        warn!(
            correlation_id = %correlation_id,
            year = period.year,
            month = period.month,
            "Invalid period"
        );
        return ApiErrorResponse::from(err).into_response();
    }

    // Workbook reading and writing is blocking file I/O.
    let start_time = Instant::now();
    let batch_state = state.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        run_batch(batch_state.config(), batch_state.collaborators(), period)
    })
    .await;

    match outcome {
        Ok(Ok(report)) => {
            info!(
                correlation_id = %correlation_id,
                period = %period,
                employees = report.results.len(),
                skipped = report.skipped.len(),
                sheet_written = report.sheet_name.is_some(),
                duration_us = start_time.elapsed().as_micros(),
                "Balance batch completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(BalanceResponse::from(report)),
            )
                .into_response()
        }
        Ok(Err(err)) => {
            warn!(
                correlation_id = %correlation_id,
                period = %period,
                error = %err,
                "Balance batch failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
        Err(join_error) => {
            error!(
                correlation_id = %correlation_id,
                error = %join_error,
                "Balance batch task panicked"
            );
            ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::internal("Balance batch did not complete"),
            }
            .into_response()
        }
    }
}
