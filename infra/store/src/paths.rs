//! Name validation and directory resolution for `(namespace, scope)` pairs.
//!
//! Every name is checked before a path is built, so nothing that could add, climb or
//! escape a directory level ever reaches the filesystem layer.

use crate::error::{Result, VarsError};
use crate::root::StateRoot;
use std::path::PathBuf;
use std::sync::Arc;

/// Name of the single persisted file inside a store directory.
pub const PROPERTY_FILE: &str = "vars.properties";

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

/// `.` and `..` pass the character rule but would collapse or climb a level.
fn is_dot_segment(name: &str) -> bool {
    name == "." || name == ".."
}

/// Validates a namespace against `^[a-zA-Z0-9._-]+$`.
///
/// # Errors
/// [`VarsError::EmptyNamespace`] or [`VarsError::InvalidNamespace`].
pub fn validate_namespace(namespace: &str) -> Result<()> {
    if namespace.is_empty() {
        return Err(VarsError::EmptyNamespace { context: None });
    }

    if !namespace.chars().all(is_name_char) || is_dot_segment(namespace) {
        return Err(VarsError::InvalidNamespace { name: namespace.to_owned(), context: None });
    }

    Ok(())
}

/// Validates a scope. The empty string means "no scope" and is accepted.
///
/// # Errors
/// [`VarsError::InvalidScope`] if the scope contains a path separator or any
/// character outside `[a-zA-Z0-9._-]`.
pub fn validate_scope(scope: &str) -> Result<()> {
    if scope.is_empty() {
        return Ok(());
    }

    if scope.contains(['/', '\\']) {
        return Err(VarsError::InvalidScope {
            scope: scope.to_owned(),
            reason: "nesting is not allowed".into(),
            context: None,
        });
    }

    if !scope.chars().all(is_name_char) || is_dot_segment(scope) {
        return Err(VarsError::InvalidScope {
            scope: scope.to_owned(),
            reason: "only [a-zA-Z0-9._-] is allowed".into(),
            context: None,
        });
    }

    Ok(())
}

/// Validates a property key so that it survives a write/read cycle of the file format.
///
/// # Errors
/// [`VarsError::InvalidKey`] for empty keys, keys containing `=` or line breaks,
/// keys with surrounding whitespace, and keys that would read back as a comment.
pub fn validate_key(key: &str) -> Result<()> {
    let reason = if key.is_empty() {
        "key cannot be empty"
    } else if key.contains('=') {
        "key cannot contain '='"
    } else if key.contains(['\n', '\r']) {
        "key cannot contain line breaks"
    } else if key.trim() != key {
        "key cannot start or end with whitespace"
    } else if key.starts_with('#') {
        "key cannot start with '#'"
    } else {
        return Ok(());
    };

    Err(VarsError::InvalidKey { key: key.to_owned(), reason: reason.into(), context: None })
}

/// Computes the directory backing a `(namespace, scope)` pair.
///
/// Pure computation: the state root is resolved fresh on each call and nothing is
/// created on disk.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: Arc<dyn StateRoot>,
}

impl PathResolver {
    #[must_use]
    pub fn new(root: Arc<dyn StateRoot>) -> Self {
        Self { root }
    }

    /// Returns `<root>/<namespace>` or `<root>/<namespace>/<scope>`.
    ///
    /// # Errors
    /// Validation errors for bad names, [`VarsError::StateRootUnavailable`] if the
    /// state root cannot be determined.
    pub fn resolve(&self, namespace: &str, scope: &str) -> Result<PathBuf> {
        validate_namespace(namespace)?;
        validate_scope(scope)?;

        let mut dir = self.root.resolve()?;
        dir.push(namespace);
        if !scope.is_empty() {
            dir.push(scope);
        }
        Ok(dir)
    }

    /// Returns the property file path for a `(namespace, scope)` pair.
    ///
    /// # Errors
    /// Same as [`PathResolver::resolve`].
    pub fn property_file(&self, namespace: &str, scope: &str) -> Result<PathBuf> {
        Ok(self.resolve(namespace, scope)?.join(PROPERTY_FILE))
    }
}
