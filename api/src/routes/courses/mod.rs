use axum::Router;
use common::state::AppState;

pub mod reviews;

pub fn course_routes() -> Router<AppState> {
    Router::new().nest("/{course_id}/reviews", reviews::course_review_routes())
}
