use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::error;

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::courses::reviews::common::ReviewRequest;
use common::state::AppState;
use db::ReviewError;
use db::models::review::Model as ReviewModel;

/// POST /api/courses/{course_id}/reviews
///
/// Records a rating and review for the course on behalf of the authenticated
/// caller. The caller must be enrolled in the course and must not have
/// reviewed it before.
///
/// # Returns
/// - `200 OK` with the created review.
/// - `400 BAD REQUEST` on missing fields or a rating outside 1..=5.
/// - `404 NOT FOUND` when the caller is not enrolled (or the course does not
///   exist; the two are not distinguished).
/// - `403 FORBIDDEN` when the caller already reviewed this course.
/// - `500 INTERNAL SERVER ERROR` on store failure.
pub async fn create_review(
    Path(course_id): Path<i64>,
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<ReviewRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let (rating, review) = match (req.rating, req.review) {
        (Some(rating), Some(review)) => (rating, review),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<ReviewModel>::error(
                    "Missing required fields: rating or review",
                )),
            )
                .into_response();
        }
    };

    match ReviewModel::submit(db, claims.sub, course_id, rating, &review).await {
        Ok(created) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                created,
                "Rating and review created successfully",
            )),
        )
            .into_response(),
        Err(err @ ReviewError::Validation(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<ReviewModel>::error(err.to_string())),
        )
            .into_response(),
        Err(err @ ReviewError::NotEnrolled) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<ReviewModel>::error(err.to_string())),
        )
            .into_response(),
        Err(err @ ReviewError::Duplicate) => (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<ReviewModel>::error(err.to_string())),
        )
            .into_response(),
        Err(err) => {
            error!(course_id, user_id = claims.sub, "Failed to create review: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ReviewModel>::error("Failed to create review")),
            )
                .into_response()
        }
    }
}
