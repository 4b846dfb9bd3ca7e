//! Authors: the people who wrote the catalog's books.

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
use service::AuthorService;

#[derive(Clone)]
pub struct AuthorsState {
    pub service: Arc<AuthorService>,
    pub renderer: Arc<dyn Renderer>,
}

pub struct AuthorsModule {
    state: AuthorsState,
}

impl AuthorsModule {
    pub fn new(state: AuthorsState) -> Self {
        Self { state }
    }
}

/// Schema for the `authors` table; dates are stored as `YYYY-MM-DD` text.
pub fn migrations() -> Vec<Migration> {
    vec![Migration {
        id: "001_create_authors",
        up: r#"
            CREATE TABLE IF NOT EXISTS authors (
                id            TEXT PRIMARY KEY NOT NULL,
                first_name    TEXT NOT NULL,
                family_name   TEXT NOT NULL,
                date_of_birth TEXT,
                date_of_death TEXT
            );
            CREATE INDEX IF NOT EXISTS authors_family_name ON authors (family_name);
            "#,
    }]
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "authors"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "authors module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/authors", get(handlers::author_list))
            .route(
                "/author/create",
                get(handlers::author_create_get).post(handlers::author_create_post),
            )
            .route("/author/{id}", get(handlers::author_detail))
            .route(
                "/author/{id}/delete",
                get(handlers::author_delete_get).post(handlers::author_delete_post),
            )
            .route(
                "/author/{id}/update",
                get(handlers::author_update_get).post(handlers::author_update_post),
            )
            .with_state(self.state.clone())
    }

    fn migrations(&self) -> Vec<Migration> {
        migrations()
    }
}

pub fn create_module(catalog: &Catalog) -> Arc<dyn Module> {
    let service = AuthorService::new(catalog.authors.clone(), catalog.books.clone());
    Arc::new(AuthorsModule::new(AuthorsState {
        service: Arc::new(service),
        renderer: catalog.renderer.clone(),
    }))
}
