use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::FmtSubscriber;
use crate::error::{AppError, Result};

/// Installs the global fmt subscriber. Logs go to stderr so the prompts on
/// stdout stay readable.
pub fn init(level: LevelFilter) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| AppError::ConfigError(format!("Failed to set logger: {}", e)))
}
