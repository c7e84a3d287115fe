//! Tracing setup.
//!
//! The TUI owns stderr, so log output goes to a file or nowhere. The filter
//! comes from `RUST_LOG` and defaults to `info`.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber writing to `log_file`.
///
/// Returns `Ok(false)` without installing anything when no file is given.
pub fn init(log_file: Option<&Path>) -> std::io::Result<bool> {
    let Some(path) = log_file else {
        return Ok(false);
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(std::io::Error::other)?;
    Ok(true)
}
