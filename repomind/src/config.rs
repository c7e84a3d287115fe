//! User configuration.
//!
//! Read from `$XDG_CONFIG_HOME/repomind/config.toml` (or
//! `~/.config/repomind/config.toml`). Every key is optional:
//!
//! ```toml
//! theme = "dark"
//! seed = 42
//! log_file = "/tmp/repomind.log"
//!
//! [timing]
//! stage_ms = 500
//! reply_ms = 300
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use repomind_core::timing::Timings;

use crate::cli::Cli;

pub const DEFAULT_THEME: &str = "repomind";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Contents of the config file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub theme: Option<String>,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub timing: TimingConfig,
}

/// Optional overrides for the simulated delays, in milliseconds.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    pub navigate_ms: Option<u64>,
    pub stage_ms: Option<u64>,
    pub progress_tick_ms: Option<u64>,
    pub status_ms: Option<u64>,
    pub completion_ms: Option<u64>,
    pub reply_ms: Option<u64>,
    pub carousel_ms: Option<u64>,
}

impl TimingConfig {
    /// Applies the overrides on top of `base`. Zero values are ignored since
    /// tokio intervals reject a zero period.
    pub fn apply(&self, base: Timings) -> Timings {
        let pick = |value: Option<u64>, default: Duration| {
            value
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(default)
        };
        Timings {
            navigate_delay: pick(self.navigate_ms, base.navigate_delay),
            stage_interval: pick(self.stage_ms, base.stage_interval),
            progress_tick: pick(self.progress_tick_ms, base.progress_tick),
            status_interval: pick(self.status_ms, base.status_interval),
            completion_delay: pick(self.completion_ms, base.completion_delay),
            reply_delay: pick(self.reply_ms, base.reply_delay),
            carousel_interval: pick(self.carousel_ms, base.carousel_interval),
        }
    }
}

impl Config {
    /// Reads `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_owned(),
                    source,
                })
            }
        };
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }
}

/// Returns the path to the default config file.
///
/// Prefers `$XDG_CONFIG_HOME/repomind/config.toml`; falls back to
/// `~/.config/repomind/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("repomind").join("config.toml")
}

/// Effective settings after merging the config file and the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub theme: String,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub timings: Timings,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: Config) -> Settings {
        Settings {
            theme: cli
                .theme
                .clone()
                .or(config.theme)
                .unwrap_or_else(|| DEFAULT_THEME.to_owned()),
            seed: cli.seed.or(config.seed),
            log_file: cli.log_file.clone().or(config.log_file),
            timings: config.timing.apply(Timings::default()),
        }
    }
}
