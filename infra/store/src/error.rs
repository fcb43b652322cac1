use std::borrow::Cow;

/// A specialized [`VarsError`] enum of this crate.
#[vars_derive::vars_error]
pub enum VarsError {
    #[error("Namespace cannot be empty{}", format_context(.context))]
    EmptyNamespace { context: Option<Cow<'static, str>> },

    #[error(
        "Invalid namespace{} {name:?}: only [a-zA-Z0-9._-] is allowed",
        format_context(.context)
    )]
    InvalidNamespace { name: String, context: Option<Cow<'static, str>> },

    #[error("Invalid scope{} {scope:?}: {reason}", format_context(.context))]
    InvalidScope { scope: String, reason: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid key{} {key:?}: {reason}", format_context(.context))]
    InvalidKey { key: String, reason: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error(
        "Too many scope levels{}: got {count}, a single level is allowed (no nesting)",
        format_context(.context)
    )]
    TooManyScopeLevels { count: usize, context: Option<Cow<'static, str>> },

    #[error("Vars not initialized for {target:?}{} (run 'init' first)", format_context(.context))]
    NotInitialized { target: String, context: Option<Cow<'static, str>> },

    #[error("Key not found{}: {key}", format_context(.context))]
    KeyNotFound { key: String, context: Option<Cow<'static, str>> },

    #[error("State root unavailable{}: {message}", format_context(.context))]
    StateRootUnavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Editor {program:?} failed{}: {message}", format_context(.context))]
    EditorLaunch { program: String, message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Coarse classification of a [`VarsError`], used by callers to pick a remedy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad namespace, scope or key. Fix the input.
    Validation,
    /// More than one scope level was supplied at construction.
    Construction,
    /// The store directory or file is missing. Run `init`.
    NotInitialized,
    /// The store is initialized but the key is absent.
    KeyNotFound,
    /// Filesystem or environment failure. Check permissions.
    Io,
    /// The external editor could not be started or failed.
    EditorLaunch,
}

impl VarsError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyNamespace { .. }
            | Self::InvalidNamespace { .. }
            | Self::InvalidScope { .. }
            | Self::InvalidKey { .. } => ErrorKind::Validation,
            Self::TooManyScopeLevels { .. } => ErrorKind::Construction,
            Self::NotInitialized { .. } => ErrorKind::NotInitialized,
            Self::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            Self::StateRootUnavailable { .. } | Self::Io { .. } => ErrorKind::Io,
            Self::EditorLaunch { .. } => ErrorKind::EditorLaunch,
        }
    }
}
