use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use crate::core::settings::Settings;

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init(settings: &Settings) -> Result<(), tracing_subscriber::util::TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level.value));

    let format_layer = if settings.log_json.value {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer().with_target(false).boxed()
    };

    Registry::default()
        .with(env_filter)
        .with(format_layer)
        .try_init()?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "folio-profile starting");
    Ok(())
}

pub fn log_settings(settings: &Settings) {
    tracing::info!(
        bind_addr = %settings.bind_addr.value,
        api_base_url = %settings.api_base_url.value,
        body_limit_bytes = settings.body_limit_bytes.value,
        "Settings loaded"
    );
}
