use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::error;

use crate::response::ApiResponse;
use common::state::AppState;
use db::ReviewError;
use db::models::review::{Model as ReviewModel, RatingSummary};

/// GET /api/courses/{course_id}/reviews/average
///
/// Computes the arithmetic mean of the course's ratings in the store. A
/// course with no reviews yields `{"average": 0.0, "has_data": false}` with a
/// message saying so, which keeps "no data" distinguishable from a genuine
/// zero mean.
///
/// # Returns
/// - `200 OK` with the `RatingSummary`.
/// - `400 BAD REQUEST` on a non-positive course id.
/// - `500 INTERNAL SERVER ERROR` on store failure.
pub async fn get_average_rating(
    Path(course_id): Path<i64>,
    State(app_state): State<AppState>,
) -> impl IntoResponse {
    let db = app_state.db();

    match ReviewModel::average_for_course(db, course_id).await {
        Ok(summary) => {
            let message = if summary.has_data {
                "Average rating computed successfully"
            } else {
                "Average rating is 0, no ratings given yet"
            };
            (StatusCode::OK, Json(ApiResponse::success(summary, message))).into_response()
        }
        Err(err @ ReviewError::Validation(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<RatingSummary>::error(err.to_string())),
        )
            .into_response(),
        Err(err) => {
            error!(course_id, "Failed to compute average rating: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<RatingSummary>::error(
                    "Failed to compute average rating",
                )),
            )
                .into_response()
        }
    }
}
