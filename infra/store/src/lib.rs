//! Persistent, namespaced key-value properties for command-line applications.
//!
//! Each `(namespace, scope)` pair owns one line-oriented file:
//!
//! ```text
//! <state root>/<namespace>[/<scope>]/vars.properties
//! ```
//!
//! where the state root is an explicit override, `$XDG_STATE_HOME`, or
//! `~/.local/state`, in that order.
//!
//! # Core Features
//!
//! - **Strict Names**: namespaces and scopes must match `[a-zA-Z0-9._-]+`; a scope can
//!   never smuggle in a path separator, so a store is always one or two levels deep.
//! - **Explicit Initialization**: [`Store::init`] creates the directory and an empty file;
//!   every other operation reports [`VarsError::NotInitialized`] until it has run.
//! - **Deterministic Format**: entries are written sorted by key, one `key=value` per line,
//!   with line breaks in values escaped. See [`format`].
//! - **Atomic Rewrites**: every mutation writes a synced temp file and renames it over
//!   the old one.
//! - **In-Process Locking**: a reader/writer lock per [`Store`] (shared by its clones)
//!   serializes load → mutate → rewrite. No cross-process locking is attempted.
//! - **Injectable Environment**: [`StateRoot`] and [`Environment`] replace global
//!   lookups, which keeps tests hermetic.
//!
//! # Examples
//!
//! ```rust
//! use vars_store::{ErrorKind, FixedRoot, Store, VarsError};
//!
//! # fn main() -> Result<(), VarsError> {
//! # let tmp = tempfile::tempdir().unwrap();
//! let store = Store::builder().namespace("api").state_root(FixedRoot::new(tmp.path())).build();
//!
//! assert_eq!(store.get("secret_key").unwrap_err().kind(), ErrorKind::NotInitialized);
//!
//! store.init()?;
//! store.set("secret_key", "-----BEGIN KEY-----\nABC\n-----END KEY-----")?;
//!
//! let again = Store::builder().namespace("api").state_root(FixedRoot::new(tmp.path())).build();
//! assert_eq!(again.get("secret_key")?, "-----BEGIN KEY-----\nABC\n-----END KEY-----");
//! # Ok(())
//! # }
//! ```

mod builder;
mod editor;
mod env;
mod error;
pub mod format;
mod maintenance;
mod paths;
mod root;
mod store;

pub use builder::{NoNamespace, StoreBuilder, WithNamespace};
pub use editor::{FALLBACK_EDITOR, editor_command};
pub use env::{Environment, MapEnvironment, SystemEnvironment};
pub use error::{ErrorKind, Result, VarsError, VarsErrorExt};
pub use paths::{PROPERTY_FILE, PathResolver, validate_key, validate_namespace, validate_scope};
pub use root::{FixedRoot, STATE_HOME_VAR, StateRoot, XdgStateRoot};
pub use store::{Store, StoreInner};
