//! Application assembly: stores, modules, migrations and the HTTP server.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use catalog_db::{migrate, SqlitePool};
use catalog_http::Mount;
use catalog_kernel::settings::{Settings, StoreBackend};
use catalog_kernel::{InitCtx, ModuleRegistry};

use crate::modules::{register_all, Catalog, CATALOG_PREFIX};
use crate::views::{HtmlRenderer, Renderer};

/// Catalog routes live under `/catalog`; `/` lands on the genre list
pub const MOUNT: Mount<'static> = Mount {
    prefix: CATALOG_PREFIX,
    landing: "/catalog/genres",
};

pub struct Application {
    settings: Settings,
    catalog: Catalog,
    registry: ModuleRegistry,
    pool: Option<SqlitePool>,
}

impl Application {
    /// Connect the configured store backend and register every module
    pub async fn build(settings: Settings) -> anyhow::Result<Self> {
        let renderer: Arc<dyn Renderer> =
            Arc::new(HtmlRenderer::new(settings.catalog.site_title.clone()));

        match settings.database.backend {
            StoreBackend::Sqlite => {
                let pool = catalog_db::connect(&settings.database).await?;
                let catalog = Catalog::sqlite(pool.clone(), renderer);
                Self::from_catalog(settings, catalog, Some(pool))
            }
            StoreBackend::Memory => {
                tracing::warn!("using the in-memory store; data is lost on exit");
                Self::from_catalog(settings, Catalog::in_memory(renderer), None)
            }
        }
    }

    /// Assemble around an existing catalog. `pool` is the database the
    /// catalog's stores write to, if any.
    pub fn from_catalog(
        settings: Settings,
        catalog: Catalog,
        pool: Option<SqlitePool>,
    ) -> anyhow::Result<Self> {
        let mut registry = ModuleRegistry::new();
        register_all(&mut registry, &catalog).context("failed to register catalog modules")?;

        Ok(Self {
            settings,
            catalog,
            registry,
            pool,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Apply pending module migrations, returning how many ran
    pub async fn migrate(&self) -> anyhow::Result<usize> {
        let Some(pool) = &self.pool else {
            tracing::debug!("no database attached, skipping migrations");
            return Ok(0);
        };

        let applied = migrate::apply(pool, &self.registry.collect_migrations())
            .await
            .context("failed to apply migrations")?;
        tracing::info!(applied, "migrations complete");
        Ok(applied)
    }

    /// The full HTTP router, middleware included
    pub fn router(&self) -> Router {
        catalog_http::build_router(&self.registry, &self.settings, MOUNT)
    }

    /// Run the module lifecycle around the HTTP server until shutdown
    pub async fn serve(self) -> anyhow::Result<()> {
        let ctx = InitCtx {
            settings: &self.settings,
        };

        self.registry.init_all(&ctx).await?;
        self.migrate().await?;
        self.registry.start_all(&ctx).await?;

        let served = catalog_http::start_server(&self.registry, &self.settings, MOUNT).await;

        self.registry.stop_all().await?;
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
        served
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_backend_needs_no_migrations() {
        let mut settings = Settings::default();
        settings.database.backend = StoreBackend::Memory;

        let app = Application::build(settings).await.unwrap();

        assert_eq!(app.migrate().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn sqlite_migrations_apply_once() {
        let pool = catalog_db::connect_in_memory().await.unwrap();
        let renderer: Arc<dyn Renderer> = Arc::new(HtmlRenderer::new("Test"));
        let app = Application::from_catalog(
            Settings::default(),
            Catalog::sqlite(pool.clone(), renderer),
            Some(pool),
        )
        .unwrap();

        assert_eq!(app.migrate().await.unwrap(), 3);
        assert_eq!(app.migrate().await.unwrap(), 0);
    }
}
