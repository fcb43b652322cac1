use config::{Config, Environment, File, FileFormat, Map};
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::debug;
use vars_logger::LevelFilter;

/// Prefix of environment overrides, e.g. `VARS__STATE_ROOT` or `VARS__LOG__LEVEL`.
pub const ENV_PREFIX: &str = "VARS";
const ENV_SEPARATOR: &str = "__";

#[vars_derive::vars_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Invalid log level{}: {level:?}", format_context(.context))]
    InvalidLevel { level: String, context: Option<Cow<'static, str>> },
}

/// Settings of the `vars` binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Explicit state root. `--state-root` wins over this value.
    pub state_root: Option<PathBuf>,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `error`, `warn`, `info`, `debug`, `trace` or `off`.
    pub level: Option<String>,
    /// Directory for rolling log files. Console-only when unset.
    pub dir: Option<PathBuf>,
}

impl LogConfig {
    /// Parses the configured level.
    ///
    /// # Errors
    /// [`ConfigError::InvalidLevel`] if the value is not a level name.
    pub fn level_filter(&self) -> Result<Option<LevelFilter>, ConfigError> {
        self.level
            .as_deref()
            .map(|level| {
                level.trim().parse::<LevelFilter>().map_err(|_| ConfigError::InvalidLevel {
                    level: level.to_owned(),
                    context: Some("log.level".into()),
                })
            })
            .transpose()
    }
}

/// Loads [`CliConfig`] from an optional TOML file overlaid with `VARS__*` variables of the
/// process environment.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing or malformed, or if a value does
/// not fit the expected type.
pub fn load_config(path: Option<&Path>) -> Result<CliConfig, ConfigError> {
    load_config_with(path, None)
}

/// Like [`load_config`], reading overrides from `vars` instead of the process environment.
///
/// # Errors
/// Same as [`load_config`].
pub fn load_config_with(
    path: Option<&Path>,
    vars: Option<Map<String, String>>,
) -> Result<CliConfig, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        debug!("Loading config from {}", path.display());
        builder = builder.add_source(File::new(&path.to_string_lossy(), FileFormat::Toml).required(true));
    }

    let config = builder
        .add_source(Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR).source(vars))
        .build()
        .context("Failed to build config")?
        .try_deserialize::<CliConfig>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
