//! Books: the titles held by the library, linked to one author and any
//! number of genres.

pub mod handlers;
pub mod models;
pub mod service;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Router};
use catalog_kernel::{InitCtx, Migration, Module};

use super::Catalog;
use crate::views::Renderer;
use service::BookService;

#[derive(Clone)]
pub struct BooksState {
    pub service: Arc<BookService>,
    pub renderer: Arc<dyn Renderer>,
}

pub struct BooksModule {
    state: BooksState,
}

impl BooksModule {
    pub fn new(state: BooksState) -> Self {
        Self { state }
    }
}

/// Schema for `books` and the `book_genres` join table. Must run after the
/// genres and authors migrations.
pub fn migrations() -> Vec<Migration> {
    vec![Migration {
        id: "001_create_books",
        up: r#"
            CREATE TABLE IF NOT EXISTS books (
                id        TEXT PRIMARY KEY NOT NULL,
                title     TEXT NOT NULL,
                summary   TEXT NOT NULL,
                isbn      TEXT NOT NULL,
                author_id TEXT NOT NULL REFERENCES authors (id)
            );
            CREATE INDEX IF NOT EXISTS books_author_id ON books (author_id);
            CREATE TABLE IF NOT EXISTS book_genres (
                book_id  TEXT NOT NULL REFERENCES books (id) ON DELETE CASCADE,
                genre_id TEXT NOT NULL REFERENCES genres (id),
                PRIMARY KEY (book_id, genre_id)
            );
            CREATE INDEX IF NOT EXISTS book_genres_genre_id ON book_genres (genre_id);
            "#,
    }]
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/books", get(handlers::book_list))
            .with_state(self.state.clone())
    }

    fn migrations(&self) -> Vec<Migration> {
        migrations()
    }
}

pub fn create_module(catalog: &Catalog) -> Arc<dyn Module> {
    let service = BookService::new(catalog.books.clone(), catalog.authors.clone());
    Arc::new(BooksModule::new(BooksState {
        service: Arc::new(service),
        renderer: catalog.renderer.clone(),
    }))
}
