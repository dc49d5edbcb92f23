use ::common::state::AppState;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;

pub mod common;
pub mod get;
pub mod post;

use crate::auth::guards::allow_authenticated;
use get::get_average_rating;
use post::create_review;

pub fn course_review_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_review).route_layer(from_fn(allow_authenticated)))
        .route("/average", get(get_average_rating))
}
