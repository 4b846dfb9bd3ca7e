//! Genres: the categories books are filed under.

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
use service::GenreService;

/// Shared state for the genre handlers
#[derive(Clone)]
pub struct GenresState {
    pub service: Arc<GenreService>,
    pub renderer: Arc<dyn Renderer>,
}

pub struct GenresModule {
    state: GenresState,
}

impl GenresModule {
    pub fn new(state: GenresState) -> Self {
        Self { state }
    }
}

/// Schema for the `genres` table. `name_key` holds the case-folded name so
/// the unique index enforces case-insensitive uniqueness.
pub fn migrations() -> Vec<Migration> {
    vec![Migration {
        id: "001_create_genres",
        up: r#"
            CREATE TABLE IF NOT EXISTS genres (
                id       TEXT PRIMARY KEY NOT NULL,
                name     TEXT NOT NULL,
                name_key TEXT NOT NULL
            );
            CREATE UNIQUE INDEX IF NOT EXISTS genres_name_key_unique ON genres (name_key);
            "#,
    }]
}

#[async_trait]
impl Module for GenresModule {
    fn name(&self) -> &'static str {
        "genres"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "genres module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/genres", get(handlers::genre_list))
            .route(
                "/genre/create",
                get(handlers::genre_create_get).post(handlers::genre_create_post),
            )
            .route("/genre/{id}", get(handlers::genre_detail))
            .route(
                "/genre/{id}/delete",
                get(handlers::genre_delete_get).post(handlers::genre_delete_post),
            )
            .route(
                "/genre/{id}/update",
                get(handlers::genre_update_get).post(handlers::genre_update_post),
            )
            .with_state(self.state.clone())
    }

    fn migrations(&self) -> Vec<Migration> {
        migrations()
    }
}

pub fn create_module(catalog: &Catalog) -> Arc<dyn Module> {
    let service = GenreService::new(catalog.genres.clone(), catalog.books.clone());
    Arc::new(GenresModule::new(GenresState {
        service: Arc::new(service),
        renderer: catalog.renderer.clone(),
    }))
}
