use anyhow::Result;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Logs go to `<data dir>/logs/flashdeck.log`; stdout belongs to the
/// prompts and the TUI. `RUST_LOG` wins over `default_level`.
pub fn init_logging(data_dir: &Path, default_level: &str) -> Result<()> {
    let log_dir = flashdeck_json::paths::logs_dir(data_dir);
    fs::create_dir_all(&log_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("flashdeck.log"))?;

    // Directive targets match by prefix, so this covers every flashdeck_* crate.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("flashdeck={default_level}")));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
