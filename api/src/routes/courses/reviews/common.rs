//! Review submission payload.
//!
//! Fields are optional so presence can be checked explicitly and reported as
//! a 400 rather than a deserialization rejection.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub rating: Option<i32>,
    pub review: Option<String>,
}
