//! Error taxonomy for the review operations.
//!
//! Handlers translate these variants into status codes at the operation
//! boundary; nothing below the HTTP layer knows about status codes.

use std::future::Future;
use std::time::Duration;

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReviewError {
    /// Missing or malformed input (absent fields, rating outside 1..=5,
    /// non-positive identifiers).
    #[error("{0}")]
    Validation(String),

    /// The caller is not in the course's enrolled-student set, or the course
    /// does not exist. The two cases are intentionally indistinguishable so
    /// non-enrolled callers cannot probe course existence.
    #[error("Student is not enrolled in the course")]
    NotEnrolled,

    /// The caller has already reviewed this course.
    #[error("Course is already reviewed by the user")]
    Duplicate,

    /// The store did not answer within the configured timeout. Retryable by
    /// the caller; the service itself never retries.
    #[error("The store did not respond in time")]
    StoreUnavailable,

    #[error("Database error: {0}")]
    Db(#[from] DbErr),
}

impl ReviewError {
    /// Maps a unique-constraint violation on the insert to `Duplicate`.
    ///
    /// The pre-insert existence check is only advisory; two concurrent
    /// submissions can both pass it, and the `uq_reviews_user_course` index
    /// turns the loser's insert into this conflict.
    pub fn from_insert_err(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ReviewError::Duplicate,
            _ => ReviewError::Db(err),
        }
    }
}

/// Bounds a store call with the configured per-request timeout, surfacing an
/// elapse as `StoreUnavailable`.
pub(crate) async fn with_store_timeout<T, F>(fut: F) -> Result<T, ReviewError>
where
    F: Future<Output = Result<T, DbErr>>,
{
    let limit = Duration::from_secs(common::config::store_timeout_seconds());
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(ReviewError::from),
        Err(_) => Err(ReviewError::StoreUnavailable),
    }
}
