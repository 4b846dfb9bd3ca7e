use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use catalog_http::AppError;
use serde_json::json;

use super::models::{url, AuthorForm, AuthorView};
use super::service::CreateOutcome;
use super::AuthorsState;
use crate::views::page;

/// GET /authors
pub async fn author_list(State(state): State<AuthorsState>) -> Result<Html<String>, AppError> {
    let authors = state.service.list().await?;
    let data = json!({
        "title": "Author List",
        "author_list": authors.iter().map(AuthorView::from).collect::<Vec<_>>(),
    });
    Ok(page(state.renderer.as_ref(), "author_list", &data)?)
}

/// GET /author/{id}
pub async fn author_detail(
    State(state): State<AuthorsState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let detail = state.service.detail(&id).await?;
    let data = json!({
        "title": "Author Detail",
        "author": AuthorView::from(&detail.author),
        "author_books": detail.books,
    });
    Ok(page(state.renderer.as_ref(), "author_detail", &data)?)
}

/// GET /author/create
pub async fn author_create_get(State(state): State<AuthorsState>) -> Result<Html<String>, AppError> {
    let data = json!({ "title": "Create Author" });
    Ok(page(state.renderer.as_ref(), "author_form", &data)?)
}

/// POST /author/create
pub async fn author_create_post(
    State(state): State<AuthorsState>,
    Form(form): Form<AuthorForm>,
) -> Result<Response, AppError> {
    match state.service.create(form).await? {
        CreateOutcome::Invalid { attempt, errors } => {
            let data = json!({
                "title": "Create Author",
                "author": attempt,
                "errors": errors,
            });
            Ok(page(state.renderer.as_ref(), "author_form", &data)?.into_response())
        }
        CreateOutcome::Created(author) => Ok(Redirect::to(&url(&author)).into_response()),
    }
}

pub async fn author_delete_get() -> AppError {
    AppError::not_implemented("Author delete GET")
}

pub async fn author_delete_post() -> AppError {
    AppError::not_implemented("Author delete POST")
}

pub async fn author_update_get() -> AppError {
    AppError::not_implemented("Author update GET")
}

pub async fn author_update_post() -> AppError {
    AppError::not_implemented("Author update POST")
}
