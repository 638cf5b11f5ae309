pub mod actors;
pub mod comments;
pub mod genres;
pub mod movies;

mod multipart;

use axum::{
    Json,
    response::{IntoResponse, Response},
};

use crate::pagination::TOTAL_COUNT_HEADER;

/// Paged listing body plus the pre-window total as a response header.
fn listing_response(body: serde_json::Value, total: u64) -> Response {
    ([(TOTAL_COUNT_HEADER, total.to_string())], Json(body)).into_response()
}
