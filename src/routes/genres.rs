use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::debug;

use crate::{
    AppState,
    error::AppResult,
    models::{NamedPatch, NamedReplace, NewNamed},
    schema::{self, NamedRecord},
};

#[utoipa::path(
    get,
    path = "/genres/",
    tag = "genres",
    operation_id = "list_genres",
    responses((status = 200, description = "All genres", body = Vec<NamedRecord>))
)]
pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<NamedRecord>>> {
    let genres = state.catalog.list_genres().await?;
    Ok(Json(schema::dump_many(genres)))
}

#[utoipa::path(
    post,
    path = "/genres/",
    tag = "genres",
    operation_id = "create_genre",
    request_body = NewNamed,
    responses((status = 201, description = "Genre created", body = String))
)]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewNamed>,
) -> AppResult<(StatusCode, &'static str)> {
    let genre = state.catalog.create_genre(new).await?;
    debug!(id = genre.id, "genre created");
    Ok((StatusCode::CREATED, "Genre created"))
}

#[utoipa::path(
    get,
    path = "/genres/{id}",
    tag = "genres",
    operation_id = "get_genre",
    params(("id" = i32, Path, description = "Genre id")),
    responses(
        (status = 200, description = "The genre", body = NamedRecord),
        (status = 404, description = "No such genre", body = String)
    )
)]
pub async fn read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<NamedRecord>> {
    let genre = state.catalog.get_genre(id).await?;
    Ok(Json(schema::dump(genre)))
}

#[utoipa::path(
    put,
    path = "/genres/{id}",
    tag = "genres",
    operation_id = "replace_genre",
    params(("id" = i32, Path, description = "Genre id")),
    request_body = NamedReplace,
    responses(
        (status = 204, description = "Genre updated"),
        (status = 404, description = "No such genre", body = String)
    )
)]
pub async fn replace(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(body): Json<NamedReplace>,
) -> AppResult<(StatusCode, &'static str)> {
    state.catalog.replace_genre(id, body).await?;
    debug!(id, "genre replaced");
    Ok((StatusCode::NO_CONTENT, "Genre updated"))
}

#[utoipa::path(
    patch,
    path = "/genres/{id}",
    tag = "genres",
    operation_id = "patch_genre",
    params(("id" = i32, Path, description = "Genre id")),
    request_body = NamedPatch,
    responses(
        (status = 204, description = "Genre updated"),
        (status = 404, description = "No such genre", body = String),
        (status = 422, description = "A required field was set to null", body = String)
    )
)]
pub async fn patch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(patch): Json<NamedPatch>,
) -> AppResult<(StatusCode, &'static str)> {
    state.catalog.rename_genre(id, patch.validate()?).await?;
    debug!(id, "genre patched");
    Ok((StatusCode::NO_CONTENT, "Genre updated"))
}

#[utoipa::path(
    delete,
    path = "/genres/{id}",
    tag = "genres",
    operation_id = "delete_genre",
    params(("id" = i32, Path, description = "Genre id")),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 404, description = "No such genre", body = String)
    )
)]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<(StatusCode, &'static str)> {
    state.catalog.delete_genre(id).await?;
    debug!(id, "genre deleted");
    Ok((StatusCode::NO_CONTENT, "Genre deleted"))
}
