use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use catalog_http::AppError;
use serde_json::{json, Value};

use super::models::{Genre, GenreForm};
use super::service::CreateOutcome;
use super::GenresState;
use crate::views::page;

fn genre_json(genre: &Genre) -> Value {
    json!({
        "id": genre.id,
        "name": genre.name,
        "url": genre.url(),
    })
}

/// GET /genres
pub async fn genre_list(State(state): State<GenresState>) -> Result<Html<String>, AppError> {
    let genres = state.service.list().await?;
    let data = json!({
        "title": "Genre List",
        "genre_list": genres.iter().map(genre_json).collect::<Vec<_>>(),
    });
    Ok(page(state.renderer.as_ref(), "genre_list", &data)?)
}

/// GET /genre/{id}
pub async fn genre_detail(
    State(state): State<GenresState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let detail = state.service.detail(&id).await?;
    let data = json!({
        "title": "Genre Detail",
        "genre": genre_json(&detail.genre),
        "genre_books": detail.books,
    });
    Ok(page(state.renderer.as_ref(), "genre_detail", &data)?)
}

/// GET /genre/create
pub async fn genre_create_get(State(state): State<GenresState>) -> Result<Html<String>, AppError> {
    let data = json!({ "title": "Create Genre" });
    Ok(page(state.renderer.as_ref(), "genre_form", &data)?)
}

/// POST /genre/create
pub async fn genre_create_post(
    State(state): State<GenresState>,
    Form(form): Form<GenreForm>,
) -> Result<Response, AppError> {
    let genre = match state.service.create(form).await? {
        CreateOutcome::Invalid { attempt, errors } => {
            let data = json!({
                "title": "Create Genre",
                "genre": attempt,
                "errors": errors,
            });
            return Ok(page(state.renderer.as_ref(), "genre_form", &data)?.into_response());
        }
        CreateOutcome::Existing(genre) | CreateOutcome::Created(genre) => genre,
    };
    Ok(Redirect::to(&genre.url()).into_response())
}

pub async fn genre_delete_get() -> AppError {
    AppError::not_implemented("Genre delete GET")
}

pub async fn genre_delete_post() -> AppError {
    AppError::not_implemented("Genre delete POST")
}

pub async fn genre_update_get() -> AppError {
    AppError::not_implemented("Genre update GET")
}

pub async fn genre_update_post() -> AppError {
    AppError::not_implemented("Genre update POST")
}
