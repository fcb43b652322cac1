//! Store-level commands shared by the standalone binary and by host applications that
//! mount `vars` under their own command tree.

use crate::args::Command;
use clap::Subcommand;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;
use vars_store::{FixedRoot, Result, Store, VarsError, VarsErrorExt};

pub const INIT_MESSAGE: &str = "Initialized vars properties";

/// Operations on one store, without the `<name> [scope]` target.
///
/// A host application binds the store itself, usually to its own name:
///
/// ```rust
/// use clap::{Parser, Subcommand};
/// use vars_cli::VarsCommand;
/// use vars_store::{FixedRoot, Store};
///
/// #[derive(Parser)]
/// struct Pomo {
///     #[command(subcommand)]
///     command: PomoCommand,
/// }
///
/// #[derive(Subcommand)]
/// enum PomoCommand {
///     /// Manage variables for pomo
///     #[command(subcommand)]
///     Vars(VarsCommand),
/// }
///
/// # let tmp = tempfile::tempdir().unwrap();
/// let store = Store::builder().namespace("pomo").state_root(FixedRoot::new(tmp.path())).build();
/// let PomoCommand::Vars(cmd) = Pomo::parse_from(["pomo", "vars", "init"]).command;
///
/// let mut out = Vec::new();
/// cmd.run(&store, &mut out).unwrap();
/// assert_eq!(out, b"Initialized vars properties\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum VarsCommand {
    /// Initialize an empty vars file (required before use)
    Init,
    /// Set a variable
    Set { key: String, value: String },
    /// Get a variable
    Get { key: String },
    /// Remove a variable
    Unset { key: String },
    /// Print all variables as key=value
    Data,
    /// List all keys
    #[command(alias = "k")]
    Keys,
    /// Edit the vars file in the default editor
    Edit,
}

impl VarsCommand {
    /// Runs the command against `store`, writing its output to `out`.
    ///
    /// `get` prints the raw value, `data` prints sorted `key=value` lines (values are not
    /// re-escaped), `keys` prints sorted keys one per line.
    ///
    /// # Errors
    /// Whatever the store operation returns, or [`VarsError::Io`] if writing to `out` fails.
    pub fn run(&self, store: &Store, out: &mut impl Write) -> Result<()> {
        debug!(command = ?self, store = %store.target(), "Running vars command");

        match self {
            Self::Init => {
                store.init()?;
                writeln!(out, "{INIT_MESSAGE}").context("Writing output")?;
            },
            Self::Set { key, value } => store.set(key, value.as_str())?,
            Self::Get { key } => {
                let value = store.get(key)?;
                writeln!(out, "{value}").context("Writing output")?;
            },
            Self::Unset { key } => store.unset(key)?,
            Self::Data => {
                for (key, value) in store.all()? {
                    writeln!(out, "{key}={value}").context("Writing output")?;
                }
            },
            Self::Keys => {
                for key in store.keys()? {
                    writeln!(out, "{key}").context("Writing output")?;
                }
            },
            Self::Edit => store.edit()?,
        }

        Ok(())
    }
}

/// Opens stores for the standalone command tree.
#[derive(Debug, Clone, Default)]
pub struct StoreOpener {
    state_root: Option<PathBuf>,
}

impl StoreOpener {
    /// `state_root` is the explicit override; `None` resolves through `XDG_STATE_HOME`.
    #[must_use]
    pub const fn new(state_root: Option<PathBuf>) -> Self {
        Self { state_root }
    }

    /// Builds a store from `<name> [scope]` segments.
    ///
    /// # Errors
    /// [`VarsError::EmptyNamespace`] for no segments, [`VarsError::TooManyScopeLevels`]
    /// for more than two.
    pub fn open(&self, segments: &[String]) -> Result<Store> {
        let Some((namespace, scopes)) = segments.split_first() else {
            return Err(VarsError::EmptyNamespace { context: None });
        };

        let builder = Store::segments_builder(namespace.as_str(), scopes)?;
        Ok(match &self.state_root {
            Some(root) => builder.state_root(FixedRoot::new(root)).build(),
            None => builder.build(),
        })
    }
}

impl Command {
    /// Runs a standalone command: resolves its target store, then the store-level command.
    ///
    /// # Errors
    /// Construction errors from [`StoreOpener::open`] and everything [`VarsCommand::run`]
    /// returns.
    pub fn run(self, opener: &StoreOpener, out: &mut impl Write) -> Result<()> {
        let (target, command) = self.into_parts();
        let store = opener.open(&target)?;
        command.run(&store, out)
    }
}
