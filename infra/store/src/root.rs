use crate::env::{Environment, SystemEnvironment};
use crate::error::{Result, VarsError};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Environment variable that overrides the state root.
pub const STATE_HOME_VAR: &str = "XDG_STATE_HOME";

/// Produces the base directory under which every namespace directory lives.
///
/// Implementations are consulted on every path computation, so a change in the
/// underlying source (e.g. the environment) is picked up by the next operation.
pub trait StateRoot: Send + Sync + fmt::Debug {
    /// Returns the state root.
    ///
    /// # Errors
    /// Returns [`VarsError::StateRootUnavailable`] if no root can be determined.
    fn resolve(&self) -> Result<PathBuf>;
}

/// An explicitly configured state root. Takes precedence over any environment lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedRoot(PathBuf);

impl FixedRoot {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl StateRoot for FixedRoot {
    fn resolve(&self) -> Result<PathBuf> {
        Ok(self.0.clone())
    }
}

/// `$XDG_STATE_HOME` when set, otherwise `<home>/.local/state`.
#[derive(Debug, Clone)]
pub struct XdgStateRoot {
    env: Arc<dyn Environment>,
}

impl XdgStateRoot {
    #[must_use]
    pub fn new(env: Arc<dyn Environment>) -> Self {
        Self { env }
    }

    /// Resolves against the real process environment.
    #[must_use]
    pub fn system() -> Self {
        Self::new(Arc::new(SystemEnvironment))
    }
}

impl StateRoot for XdgStateRoot {
    fn resolve(&self) -> Result<PathBuf> {
        if let Some(dir) = self.env.non_empty(STATE_HOME_VAR) {
            return Ok(PathBuf::from(dir));
        }

        self.env.home_dir().map(|home| home.join(".local").join("state")).ok_or_else(|| {
            VarsError::StateRootUnavailable {
                message: "home directory could not be determined".into(),
                context: Some(format!("{STATE_HOME_VAR} is not set").into()),
            }
        })
    }
}
