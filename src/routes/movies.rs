use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::debug;

use crate::{
    AppState,
    error::AppResult,
    models::{MovieFilter, MoviePatch, MovieReplace, NewMovie},
    schema::{self, MovieRecord},
};

#[utoipa::path(
    get,
    path = "/movies/",
    tag = "movies",
    operation_id = "list_movies",
    params(MovieFilter),
    responses(
        (status = 200, description = "Movies matching the filter", body = Vec<MovieRecord>)
    )
)]
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<MovieFilter>,
) -> AppResult<Json<Vec<MovieRecord>>> {
    let movies = state.catalog.list_movies(&filter).await?;
    Ok(Json(schema::dump_many(movies)))
}

#[utoipa::path(
    post,
    path = "/movies/",
    tag = "movies",
    operation_id = "create_movie",
    request_body = NewMovie,
    responses((status = 201, description = "Movie created", body = String))
)]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewMovie>,
) -> AppResult<(StatusCode, &'static str)> {
    let movie = state.catalog.create_movie(new).await?;
    debug!(id = movie.id, "movie created");
    Ok((StatusCode::CREATED, "Movie created"))
}

#[utoipa::path(
    get,
    path = "/movies/{id}",
    tag = "movies",
    operation_id = "get_movie",
    params(("id" = i32, Path, description = "Movie id")),
    responses(
        (status = 200, description = "The movie", body = MovieRecord),
        (status = 404, description = "No such movie", body = String)
    )
)]
pub async fn read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<MovieRecord>> {
    let movie = state.catalog.get_movie(id).await?;
    Ok(Json(schema::dump(movie)))
}

#[utoipa::path(
    put,
    path = "/movies/{id}",
    tag = "movies",
    operation_id = "replace_movie",
    params(("id" = i32, Path, description = "Movie id")),
    request_body = MovieReplace,
    responses(
        (status = 204, description = "Movie updated"),
        (status = 404, description = "No such movie", body = String)
    )
)]
pub async fn replace(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(body): Json<MovieReplace>,
) -> AppResult<(StatusCode, &'static str)> {
    state.catalog.replace_movie(id, body).await?;
    debug!(id, "movie replaced");
    Ok((StatusCode::NO_CONTENT, "Movie updated"))
}

#[utoipa::path(
    patch,
    path = "/movies/{id}",
    tag = "movies",
    operation_id = "patch_movie",
    params(("id" = i32, Path, description = "Movie id")),
    request_body = MoviePatch,
    responses(
        (status = 204, description = "Movie updated"),
        (status = 404, description = "No such movie", body = String),
        (status = 422, description = "A required field was set to null", body = String)
    )
)]
pub async fn patch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(patch): Json<MoviePatch>,
) -> AppResult<(StatusCode, &'static str)> {
    state.catalog.patch_movie(id, patch.validate()?).await?;
    debug!(id, "movie patched");
    Ok((StatusCode::NO_CONTENT, "Movie updated"))
}

#[utoipa::path(
    delete,
    path = "/movies/{id}",
    tag = "movies",
    operation_id = "delete_movie",
    params(("id" = i32, Path, description = "Movie id")),
    responses(
        (status = 204, description = "Movie deleted"),
        (status = 404, description = "No such movie", body = String)
    )
)]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<(StatusCode, &'static str)> {
    state.catalog.delete_movie(id).await?;
    debug!(id, "movie deleted");
    Ok((StatusCode::NO_CONTENT, "Movie deleted"))
}
