use axum::{Router, routing::get};
use common::state::AppState;

pub mod get;

use get::get_reviews;

pub fn review_routes() -> Router<AppState> {
    Router::new().route("/", get(get_reviews))
}
