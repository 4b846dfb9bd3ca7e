use anyhow::Context;
use catalog_app::Application;
use catalog_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load catalog settings")?;
    catalog_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        backend = ?settings.database.backend,
        "catalog-app bootstrap starting"
    );

    Application::build(settings).await?.serve().await
}
