mod directors;
mod genres;
mod movies;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use utoipa::OpenApi;

use crate::{
    AppState,
    models::{MoviePatch, MovieReplace, NamedPatch, NamedReplace, NewMovie, NewNamed},
    schema::{MovieRecord, NamedRecord},
};

#[derive(OpenApi)]
#[openapi(
    info(title = "movie-catalog", description = "Movies, directors and genres"),
    paths(
        movies::list,
        movies::create,
        movies::read,
        movies::replace,
        movies::patch,
        movies::delete,
        directors::list,
        directors::create,
        directors::read,
        directors::replace,
        directors::patch,
        directors::delete,
        genres::list,
        genres::create,
        genres::read,
        genres::replace,
        genres::patch,
        genres::delete
    ),
    components(schemas(
        MovieRecord,
        NamedRecord,
        NewMovie,
        MovieReplace,
        MoviePatch,
        NewNamed,
        NamedReplace,
        NamedPatch
    )),
    tags(
        (name = "movies", description = "Movie catalog"),
        (name = "directors", description = "Directors referenced by movies"),
        (name = "genres", description = "Genres referenced by movies")
    )
)]
pub struct ApiDoc;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Collection paths answer with and without the trailing slash.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/openapi.json", get(openapi))
        .route("/movies", get(movies::list).post(movies::create))
        .route("/movies/", get(movies::list).post(movies::create))
        .route(
            "/movies/{id}",
            get(movies::read).put(movies::replace).patch(movies::patch).delete(movies::delete),
        )
        .route("/directors", get(directors::list).post(directors::create))
        .route("/directors/", get(directors::list).post(directors::create))
        .route(
            "/directors/{id}",
            get(directors::read)
                .put(directors::replace)
                .patch(directors::patch)
                .delete(directors::delete),
        )
        .route("/genres", get(genres::list).post(genres::create))
        .route("/genres/", get(genres::list).post(genres::create))
        .route(
            "/genres/{id}",
            get(genres::read).put(genres::replace).patch(genres::patch).delete(genres::delete),
        )
        .with_state(state)
}
