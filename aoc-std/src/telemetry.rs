use tracing::{subscriber::DefaultGuard, Subscriber};
use tracing_subscriber::{fmt::MakeWriter, EnvFilter};

use crate::types::LogLevel;

/// Builds the fmt subscriber for one run. `RUST_LOG`, when set, overrides `level`.
pub fn get_subscriber(
    level: LogLevel,
    sink: impl for<'a> MakeWriter<'a> + Send + Sync + 'static,
) -> impl Subscriber + Send + Sync {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.to_level_filter().into()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(sink)
        .finish()
}

/// Installs `subscriber` until the returned guard is dropped.
#[must_use]
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync + 'static) -> DefaultGuard {
    tracing::subscriber::set_default(subscriber)
}
