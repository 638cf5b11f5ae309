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
    models::{AssignActorRequest, MovieDetailsDto, MovieDto, parse_release_date},
    pagination::Pagination,
    routes::{listing_response, multipart::FormData},
    sync::CastMember,
};

pub const CACHE_TAG: &str = "movies-get";
const CONTAINER: &str = "movies";

pub async fn get_all(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Response> {
    let cache_key = format!(
        "/movies?page={}&records_per_page={}",
        pagination.page, pagination.records_per_page
    );
    if let Some((body, Some(total))) = state.cache.get(&cache_key).await {
        return Ok(listing_response(body, total));
    }

    let page = state.movies.get_all(pagination).await?;
    let dtos: Vec<MovieDto> = page.items.into_iter().map(Into::into).collect();
    let body = serde_json::to_value(&dtos)?;
    state.cache.put(cache_key, CACHE_TAG, body.clone(), Some(page.total)).await;

    Ok(listing_response(body, page.total))
}

pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i32>,
) -> AppResult<Json<MovieDetailsDto>> {
    let details =
        state.movies.get_by_id(movie_id).await?.ok_or(AppError::NotFound("movie"))?;
    Ok(Json(details.into()))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = FormData::read(multipart).await?;
    let title = form.required("title")?;
    let release_date = parse_release_date(&form.required("release_date")?)
        .ok_or_else(|| AppError::bad_request("release_date must be an ISO-8601 date"))?;

    let poster = match form.file("poster") {
        Some(file) => Some(state.files.store(CONTAINER, &file.file_name, &file.data).await?),
        None => None,
    };

    let id = state.movies.create(title.clone(), release_date.clone(), poster.clone()).await?;
    state.cache.evict_tag(CACHE_TAG).await;

    let location = [(header::LOCATION, format!("/movies/{id}"))];
    Ok((StatusCode::CREATED, location, Json(MovieDto { id, title, release_date, poster })))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i32>,
    multipart: Multipart,
) -> AppResult<StatusCode> {
    let existing =
        state.movies.get_by_id(movie_id).await?.ok_or(AppError::NotFound("movie"))?;

    let form = FormData::read(multipart).await?;
    let title = form.required("title")?;
    let release_date = parse_release_date(&form.required("release_date")?)
        .ok_or_else(|| AppError::bad_request("release_date must be an ISO-8601 date"))?;

    // No file sent keeps the stored poster.
    let poster = match form.file("poster") {
        Some(file) => Some(
            state
                .files
                .edit(existing.movie.poster.as_deref(), CONTAINER, &file.file_name, &file.data)
                .await?,
        ),
        None => existing.movie.poster,
    };

    state.movies.update(movie_id, title, release_date, poster).await?;
    state.cache.evict_tag(CACHE_TAG).await;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i32>,
) -> AppResult<StatusCode> {
    let existing =
        state.movies.get_by_id(movie_id).await?.ok_or(AppError::NotFound("movie"))?;

    state.movies.delete(movie_id).await?;

    if let Some(poster) = existing.movie.poster {
        state.files.delete(&poster, CONTAINER).await?;
    }

    state.cache.evict_tag(CACHE_TAG).await;
    Ok(StatusCode::NO_CONTENT)
}

/// Replace-set assignment of the movie's genres.
pub async fn assign_genres(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i32>,
    Json(genre_ids): Json<Vec<i32>>,
) -> AppResult<StatusCode> {
    state.movies.assign_genres(movie_id, &genre_ids).await?;
    state.cache.evict_tag(CACHE_TAG).await;
    Ok(StatusCode::NO_CONTENT)
}

/// Replace-set assignment of the movie's cast; body order is rank order.
/// Duplicate actor ids should be deduplicated by the caller.
pub async fn assign_actors(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i32>,
    Json(cast): Json<Vec<AssignActorRequest>>,
) -> AppResult<StatusCode> {
    let cast: Vec<CastMember> = cast.into_iter().map(Into::into).collect();
    state.movies.assign_actors(movie_id, &cast).await?;
    state.cache.evict_tag(CACHE_TAG).await;
    Ok(StatusCode::NO_CONTENT)
}
