use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::ActorDto,
    pagination::Pagination,
    routes::{listing_response, multipart::FormData},
};

pub const CACHE_TAG: &str = "actors-get";
const CONTAINER: &str = "actors";

pub async fn get_all(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Response> {
    let cache_key = format!(
        "/actors?page={}&records_per_page={}",
        pagination.page, pagination.records_per_page
    );
    if let Some((body, Some(total))) = state.cache.get(&cache_key).await {
        return Ok(listing_response(body, total));
    }

    let page = state.actors.get_all(pagination).await?;
    let dtos: Vec<ActorDto> = page.items.into_iter().map(Into::into).collect();
    let body = serde_json::to_value(&dtos)?;
    state.cache.put(cache_key, CACHE_TAG, body.clone(), Some(page.total)).await;

    Ok(listing_response(body, page.total))
}

pub async fn get_by_name(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> AppResult<Json<Vec<ActorDto>>> {
    let actors = state.actors.get_by_name(&name).await?;
    Ok(Json(actors.into_iter().map(Into::into).collect()))
}

pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<ActorDto>> {
    let actor = state.actors.get_by_id(id).await?.ok_or(AppError::NotFound("actor"))?;
    Ok(Json(actor.into()))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = FormData::read(multipart).await?;
    let name = form.required("name")?;

    let picture = match form.file("picture") {
        Some(file) => {
            Some(state.files.store(CONTAINER, &file.file_name, &file.data).await?)
        }
        None => None,
    };

    let id = state.actors.create(name.clone(), picture.clone()).await?;
    state.cache.evict_tag(CACHE_TAG).await;

    let location = [(header::LOCATION, format!("/actors/{id}"))];
    Ok((StatusCode::CREATED, location, Json(ActorDto { id, name, picture })))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<StatusCode> {
    let existing = state.actors.get_by_id(id).await?.ok_or(AppError::NotFound("actor"))?;

    let form = FormData::read(multipart).await?;
    let name = form.required("name")?;

    // No file sent keeps the stored picture.
    let picture = match form.file("picture") {
        Some(file) => Some(
            state
                .files
                .edit(existing.picture.as_deref(), CONTAINER, &file.file_name, &file.data)
                .await?,
        ),
        None => existing.picture,
    };

    state.actors.update(id, name, picture).await?;
    state.cache.evict_tag(CACHE_TAG).await;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let existing = state.actors.get_by_id(id).await?.ok_or(AppError::NotFound("actor"))?;

    state.actors.delete(id).await?;

    if let Some(picture) = existing.picture {
        state.files.delete(&picture, CONTAINER).await?;
    }

    state.cache.evict_tag(CACHE_TAG).await;
    Ok(StatusCode::NO_CONTENT)
}
