use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{CommentDto, CreateCommentRequest},
};

pub async fn get_all(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i32>,
) -> AppResult<Json<Vec<CommentDto>>> {
    let comments = state.comments.get_all(movie_id).await?;
    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path((movie_id, id)): Path<(i32, i32)>,
) -> AppResult<Json<CommentDto>> {
    let comment = state
        .comments
        .get_by_id(movie_id, id)
        .await?
        .ok_or(AppError::NotFound("comment"))?;
    Ok(Json(comment.into()))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i32>,
    Json(req): Json<CreateCommentRequest>,
) -> AppResult<impl IntoResponse> {
    let body = req.body.trim().to_string();
    if body.is_empty() {
        return Err(AppError::bad_request("body is required"));
    }

    let id = state.comments.create(movie_id, body.clone()).await?;

    let location = [(header::LOCATION, format!("/movies/{movie_id}/comments/{id}"))];
    Ok((StatusCode::CREATED, location, Json(CommentDto { id, body })))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path((movie_id, id)): Path<(i32, i32)>,
    Json(req): Json<CreateCommentRequest>,
) -> AppResult<StatusCode> {
    let body = req.body.trim().to_string();
    if body.is_empty() {
        return Err(AppError::bad_request("body is required"));
    }

    state.comments.update(movie_id, id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path((movie_id, id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    state.comments.delete(movie_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
