mod actors;
mod cache;
mod comments;
mod config;
mod db;
mod entities;
mod error;
mod genres;
mod models;
mod movies;
mod pagination;
mod routes;
mod storage;
mod sync;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{
    actors::ActorStore,
    cache::ResponseCache,
    comments::CommentStore,
    config::Config,
    genres::GenreStore,
    movies::MovieStore,
    storage::{FileStorage, LocalFileStorage},
};

#[derive(Clone)]
pub struct AppState {
    pub movies: MovieStore,
    pub actors: ActorStore,
    pub genres: GenreStore,
    pub comments: CommentStore,
    pub cache: ResponseCache,
    pub files: Arc<dyn FileStorage>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,kinoteka=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect_and_migrate(&config.database_url).await?;
    let cache = ResponseCache::new(config.cache_ttl_secs);
    let files: Arc<dyn FileStorage> = Arc::new(LocalFileStorage::new(&config.media_root));

    let state = Arc::new(AppState {
        movies: MovieStore::new(db.clone()),
        actors: ActorStore::new(db.clone()),
        genres: GenreStore::new(db.clone()),
        comments: CommentStore::new(db),
        cache,
        files,
    });

    let genres = Router::new()
        .route("/", get(routes::genres::get_all).post(routes::genres::create))
        .route(
            "/{id}",
            get(routes::genres::get_by_id)
                .put(routes::genres::update)
                .delete(routes::genres::delete),
        );

    let actors = Router::new()
        .route("/", get(routes::actors::get_all).post(routes::actors::create))
        .route("/by-name/{name}", get(routes::actors::get_by_name))
        .route(
            "/{id}",
            get(routes::actors::get_by_id)
                .put(routes::actors::update)
                .delete(routes::actors::delete),
        );

    let movies = Router::new()
        .route("/", get(routes::movies::get_all).post(routes::movies::create))
        .route(
            "/{movie_id}",
            get(routes::movies::get_by_id)
                .put(routes::movies::update)
                .delete(routes::movies::delete),
        )
        .route("/{movie_id}/genres", post(routes::movies::assign_genres))
        .route("/{movie_id}/actors", post(routes::movies::assign_actors));

    let comments = Router::new()
        .route("/", get(routes::comments::get_all).post(routes::comments::create))
        .route(
            "/{id}",
            get(routes::comments::get_by_id)
                .put(routes::comments::update)
                .delete(routes::comments::delete),
        );

    let app = Router::new()
        .nest("/genres", genres)
        .nest("/actors", actors)
        .nest("/movies", movies)
        .nest("/movies/{movie_id}/comments", comments)
        .nest_service("/media", ServeDir::new(&config.media_root))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any).expose_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
