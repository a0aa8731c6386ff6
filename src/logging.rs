use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Filter env var, e.g. `PUNCHLIST_LOG=punchlist=debug`.
pub const LOG_ENV: &str = "PUNCHLIST_LOG";

/// Initialize file logging. Stdout and stderr belong to the UI, so traces
/// go to `punchlist.log` in the config directory. Quietly does nothing if
/// the log file can't be opened or a subscriber is already installed.
pub fn init(config_dir: &Path) {
    let _ = std::fs::create_dir_all(config_dir);
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config_dir.join("punchlist.log"))
    else {
        return;
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
}
