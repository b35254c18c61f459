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
    path = "/directors/",
    tag = "directors",
    operation_id = "list_directors",
    responses((status = 200, description = "All directors", body = Vec<NamedRecord>))
)]
pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<NamedRecord>>> {
    let directors = state.catalog.list_directors().await?;
    Ok(Json(schema::dump_many(directors)))
}

#[utoipa::path(
    post,
    path = "/directors/",
    tag = "directors",
    operation_id = "create_director",
    request_body = NewNamed,
    responses((status = 201, description = "Director created", body = String))
)]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewNamed>,
) -> AppResult<(StatusCode, &'static str)> {
    let director = state.catalog.create_director(new).await?;
    debug!(id = director.id, "director created");
    Ok((StatusCode::CREATED, "Director created"))
}

#[utoipa::path(
    get,
    path = "/directors/{id}",
    tag = "directors",
    operation_id = "get_director",
    params(("id" = i32, Path, description = "Director id")),
    responses(
        (status = 200, description = "The director", body = NamedRecord),
        (status = 404, description = "No such director", body = String)
    )
)]
pub async fn read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<NamedRecord>> {
    let director = state.catalog.get_director(id).await?;
    Ok(Json(schema::dump(director)))
}

#[utoipa::path(
    put,
    path = "/directors/{id}",
    tag = "directors",
    operation_id = "replace_director",
    params(("id" = i32, Path, description = "Director id")),
    request_body = NamedReplace,
    responses(
        (status = 204, description = "Director updated"),
        (status = 404, description = "No such director", body = String)
    )
)]
pub async fn replace(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(body): Json<NamedReplace>,
) -> AppResult<(StatusCode, &'static str)> {
    state.catalog.replace_director(id, body).await?;
    debug!(id, "director replaced");
    Ok((StatusCode::NO_CONTENT, "Director updated"))
}

#[utoipa::path(
    patch,
    path = "/directors/{id}",
    tag = "directors",
    operation_id = "patch_director",
    params(("id" = i32, Path, description = "Director id")),
    request_body = NamedPatch,
    responses(
        (status = 204, description = "Director updated"),
        (status = 404, description = "No such director", body = String),
        (status = 422, description = "A required field was set to null", body = String)
    )
)]
pub async fn patch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(patch): Json<NamedPatch>,
) -> AppResult<(StatusCode, &'static str)> {
    state.catalog.rename_director(id, patch.validate()?).await?;
    debug!(id, "director patched");
    Ok((StatusCode::NO_CONTENT, "Director updated"))
}

#[utoipa::path(
    delete,
    path = "/directors/{id}",
    tag = "directors",
    operation_id = "delete_director",
    params(("id" = i32, Path, description = "Director id")),
    responses(
        (status = 204, description = "Director deleted"),
        (status = 404, description = "No such director", body = String)
    )
)]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<(StatusCode, &'static str)> {
    state.catalog.delete_director(id).await?;
    debug!(id, "director deleted");
    Ok((StatusCode::NO_CONTENT, "Director deleted"))
}
