//! Process-environment access behind a trait, so path resolution and editor selection
//! can be driven by an in-memory environment in tests and embedded hosts.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;

/// Read-only view of the variables and home directory a store depends on.
pub trait Environment: Send + Sync + fmt::Debug {
    /// Returns the raw value of `key`, if set.
    fn var(&self, key: &str) -> Option<OsString>;

    /// Returns the current user's home directory, if it can be determined.
    fn home_dir(&self) -> Option<PathBuf>;

    /// Returns the value of `key` when it is set to something other than whitespace.
    fn non_empty(&self, key: &str) -> Option<OsString> {
        self.var(key).filter(|v| !v.to_string_lossy().trim().is_empty())
    }
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

/// A fixed, in-memory environment.
///
/// ```rust
/// use std::ffi::OsStr;
/// use vars_store::{Environment, MapEnvironment};
///
/// let env = MapEnvironment::new().with_var("EDITOR", "nano").with_home("/home/alice");
/// assert_eq!(env.var("EDITOR").as_deref(), Some(OsStr::new("nano")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    vars: BTreeMap<String, OsString>,
    home: Option<PathBuf>,
}

impl MapEnvironment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Returns the environment with the variable set"]
    pub fn with_var(mut self, key: impl Into<String>, value: impl AsRef<OsStr>) -> Self {
        self.vars.insert(key.into(), value.as_ref().to_os_string());
        self
    }

    #[must_use = "Returns the environment with the home directory set"]
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }
}

impl Environment for MapEnvironment {
    fn var(&self, key: &str) -> Option<OsString> {
        self.vars.get(key).cloned()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }
}
