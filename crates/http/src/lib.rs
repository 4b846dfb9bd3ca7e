//! HTTP server facade for the catalog: axum router assembly, middleware,
//! error pages.

use anyhow::Context;
use axum::{routing::get, Router};

use catalog_kernel::{settings::Settings, ModuleRegistry};

pub mod error;
pub mod html;
pub mod router;

pub use error::AppError;
use router::RouterBuilder;

/// Where module routes are nested and where `/` sends visitors
#[derive(Debug, Clone, Copy)]
pub struct Mount<'a> {
    pub prefix: &'a str,
    pub landing: &'a str,
}

/// Start the HTTP server and serve until ctrl-c / SIGTERM
pub async fn start_server(
    registry: &ModuleRegistry,
    settings: &Settings,
    mount: Mount<'_>,
) -> anyhow::Result<()> {
    let address = format!("{}:{}", settings.server.host, settings.server.port);
    tracing::info!("starting HTTP server on {}", address);

    let app = build_router(registry, settings, mount);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to {address}"))?;

    tracing::info!("HTTP server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Build the main router with every module's routes nested under the mount
/// prefix
pub fn build_router(registry: &ModuleRegistry, settings: &Settings, mount: Mount<'_>) -> Router {
    let mut catalog = Router::new();
    for module in registry.modules() {
        tracing::info!(
            module = module.name(),
            "mounting module routes under {}",
            mount.prefix
        );
        catalog = catalog.merge(module.routes());
    }

    RouterBuilder::new()
        .route("/healthz", get(health_check))
        .redirect("/", mount.landing)
        .mount(mount.prefix, catalog)
        .with_not_found_fallback()
        .with_timeout(settings.server.request_timeout_ms)
        .with_tracing()
        .with_request_id()
        .build()
}

async fn health_check() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
