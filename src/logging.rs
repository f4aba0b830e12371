use std::fs::{self, File};
use std::path::Path;

use color_eyre::eyre::{Result, eyre};
use tracing_subscriber::EnvFilter;

/// Route tracing output to `path`. The terminal belongs to the UI, so there
/// is no stderr fallback: without a log file, events are dropped.
pub fn init_file_logging(path: &Path, level: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = File::options().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_new(level)
        .map_err(|e| eyre!("invalid --log-level `{level}`: {e}"))?;

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_target(true)
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(())
}
