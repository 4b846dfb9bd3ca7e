use async_trait::async_trait;
use axum::Router;

/// Context handed to catalog modules during initialization and startup
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// Schema change contributed by a module.
///
/// `up` may hold several SQL statements; they run inside one transaction.
#[derive(Debug, Clone)]
pub struct Migration {
    pub id: &'static str,
    pub up: &'static str,
}

/// A catalog entity module (genres, authors, books, ...)
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module
    fn name(&self) -> &'static str;

    /// Called during application startup before migrations
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Routes owned by this module, relative to the catalog mount point.
    /// The returned router must already carry its state.
    fn routes(&self) -> Router {
        Router::new()
    }

    /// Migrations contributed by this module, executed in the order returned
    fn migrations(&self) -> Vec<Migration> {
        vec![]
    }

    /// Called after migrations are complete
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called during application shutdown
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
