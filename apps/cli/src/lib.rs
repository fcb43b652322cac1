//! # vars CLI
//!
//! The `vars` binary and the pieces another application needs to mount property
//! management under its own command tree:
//!
//! - [`VarsCommand`]: a clap subcommand (`init`, `set`, `get`, `unset`, `data`, `keys`,
//!   `edit`) that runs against a [`vars_store::Store`] chosen by the host.
//! - [`Cli`] / [`Command`]: the standalone tree, where each command names its store as
//!   `<name> [scope]`.
//! - [`load_config`]: layered settings from an optional TOML file and `VARS__*`
//!   environment variables.

mod args;
mod commands;
mod config;
pub mod exit;

pub use crate::args::{Cli, Command};
pub use crate::commands::{INIT_MESSAGE, StoreOpener, VarsCommand};
pub use crate::config::{
    CliConfig, ConfigError, ConfigErrorExt, ENV_PREFIX, LogConfig, load_config, load_config_with,
};
