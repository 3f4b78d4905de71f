use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_NAME: &str = "hotbar_keeper.log";
/// Overrides the directory the rolling log is written to
const LOG_DIR_VAR: &str = "HOTBAR_KEEPER_LOG_DIR";

pub fn init_logger() -> Result<()> {
    let log_dir = log_dir(std::env::var_os(LOG_DIR_VAR).map(PathBuf::from));
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {:?}", log_dir))?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    // RUST_LOG=hotbar_keeper=debug shows every deferred inventory move
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_target(false)
        )
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
        )
        .try_init()?;

    tracing::info!("Logger initialized, writing to {:?}", log_dir.join(LOG_FILE_NAME));
    Ok(())
}

/// The override when given, else the executable's directory, else the working directory
fn log_dir(override_dir: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = override_dir.filter(|d| !d.as_os_str().is_empty()) {
        return dir;
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| {
            eprintln!("Warning: Could not locate the executable directory, logging to the current directory");
            PathBuf::from(".")
        })
}
