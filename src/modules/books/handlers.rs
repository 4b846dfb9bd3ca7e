use axum::{extract::State, response::Html};
use catalog_http::AppError;
use serde_json::json;

use super::BooksState;
use crate::views::page;

/// GET /books
pub async fn book_list(State(state): State<BooksState>) -> Result<Html<String>, AppError> {
    let books = state.service.list().await?;
    let data = json!({
        "title": "Book List",
        "book_list": books,
    });
    Ok(page(state.renderer.as_ref(), "book_list", &data)?)
}
