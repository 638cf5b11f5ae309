use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{CreateGenreRequest, GenreDto},
};

pub const CACHE_TAG: &str = "genres-get";
const CACHE_KEY: &str = "/genres";

pub async fn get_all(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    if let Some((body, _)) = state.cache.get(CACHE_KEY).await {
        return Ok(Json(body).into_response());
    }

    let genres = state.genres.get_all().await?;
    let dtos: Vec<GenreDto> = genres.into_iter().map(Into::into).collect();
    let body = serde_json::to_value(&dtos)?;
    state.cache.put(CACHE_KEY.to_string(), CACHE_TAG, body.clone(), None).await;

    Ok(Json(body).into_response())
}

pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<GenreDto>> {
    let genre = state.genres.get_by_id(id).await?.ok_or(AppError::NotFound("genre"))?;
    Ok(Json(genre.into()))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateGenreRequest>,
) -> AppResult<impl IntoResponse> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::bad_request("name is required"));
    }

    let id = state.genres.create(name.clone()).await?;
    state.cache.evict_tag(CACHE_TAG).await;

    let location = [(header::LOCATION, format!("/genres/{id}"))];
    Ok((StatusCode::CREATED, location, Json(GenreDto { id, name })))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<CreateGenreRequest>,
) -> AppResult<StatusCode> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::bad_request("name is required"));
    }

    state.genres.update(id, name).await?;
    state.cache.evict_tag(CACHE_TAG).await;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.genres.delete(id).await?;
    state.cache.evict_tag(CACHE_TAG).await;
    Ok(StatusCode::NO_CONTENT)
}
