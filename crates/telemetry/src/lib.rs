//! Tracing subscriber bootstrap.

use std::env::{self, VarError};

use anyhow::{anyhow, Context};
use catalog_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured filter; a malformed `RUST_LOG` is an error.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let rust_log = match env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) => Some(directives),
        Err(VarError::NotPresent) => None,
        Err(err) => {
            return Err(anyhow!(err).context(format!("failed to read {}", EnvFilter::DEFAULT_ENV)));
        }
    };
    let filter = build_filter(rust_log.as_deref(), &settings.filter)?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match settings.log_format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;

    tracing::info!(
        target: "catalog-telemetry",
        format = ?settings.log_format,
        "telemetry initialized"
    );
    Ok(())
}

/// `rust_log` when set, otherwise the `configured` directives
fn build_filter(rust_log: Option<&str>, configured: &str) -> anyhow::Result<EnvFilter> {
    match rust_log {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid {} filter '{directives}'", EnvFilter::DEFAULT_ENV)),
        None => EnvFilter::try_new(configured)
            .with_context(|| format!("invalid log filter '{configured}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_overrides_the_configured_filter() {
        let filter = build_filter(Some("warn"), "info").unwrap();
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn configured_filter_applies_when_rust_log_is_absent() {
        let filter = build_filter(None, "info,sqlx=warn").unwrap();
        assert!(filter.to_string().contains("sqlx=warn"));
    }

    #[test]
    fn malformed_rust_log_is_reported_not_ignored() {
        let err = build_filter(Some("catalog=loud"), "info").unwrap_err();
        assert!(err.to_string().contains("invalid RUST_LOG filter 'catalog=loud'"));
    }

    #[test]
    fn malformed_configured_filter_is_reported() {
        let err = build_filter(None, "catalog=loud").unwrap_err();
        assert!(err.to_string().contains("invalid log filter"));
    }
}
