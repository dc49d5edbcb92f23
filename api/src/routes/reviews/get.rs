use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::error;

use crate::response::ApiResponse;
use common::state::AppState;
use db::models::review::{Model as ReviewModel, ReviewView};

/// GET /api/reviews
///
/// Returns every review, ordered by rating descending (ties by id), each
/// enriched with the reviewer's display fields and the course name. The full
/// result set is materialized in one response; there is no pagination.
pub async fn get_reviews(State(app_state): State<AppState>) -> impl IntoResponse {
    let db = app_state.db();

    match ReviewModel::list_all(db).await {
        Ok(reviews) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                reviews,
                "All reviews fetched successfully",
            )),
        )
            .into_response(),
        Err(err) => {
            error!("Failed to fetch reviews: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<ReviewView>>::error(
                    "Failed to fetch reviews",
                )),
            )
                .into_response()
        }
    }
}
