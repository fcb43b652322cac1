//! The [`Store`] handle: load/mutate/rewrite of one property file under a reader/writer lock.

use crate::builder::{StoreBuilder, WithNamespace};
use crate::editor;
use crate::env::Environment;
use crate::error::{Result, VarsError, VarsErrorExt};
use crate::format;
use crate::maintenance::{self, TMP_MARKER};
use crate::paths::{PROPERTY_FILE, PathResolver, validate_key};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

static TMP_COUNTER: AtomicU64 = AtomicU64::new(1);

/// The internal shared state of a [`Store`].
#[derive(Debug)]
pub struct StoreInner {
    pub(crate) namespace: String,
    /// Empty when the store has no scope.
    pub(crate) scope: String,
    pub(crate) resolver: PathResolver,
    pub(crate) environment: Arc<dyn Environment>,
    /// Guards every load/mutate/rewrite sequence issued through this handle and its clones.
    pub(crate) lock: RwLock<()>,
}

/// What to do when the directory exists but the property file does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MissingFile {
    NotInitialized,
    Empty,
}

/// A handle to the properties of one `(namespace, scope)` pair.
///
/// Every call reloads the file from disk; there is no cache to go stale between
/// handles. Reads (`get`, `all`, `keys`, `contains`) share the lock, mutations
/// (`init`, `set`, `unset`, `edit`) hold it exclusively for the whole
/// load → mutate → rewrite sequence.
///
/// Cloning is cheap and clones share the lock. Independent handles, including handles in
/// other processes, do not: concurrent writers through different handles race and the
/// last full rewrite wins.
///
/// # Example
///
/// ```rust
/// use vars_store::{FixedRoot, Store, VarsError};
///
/// # fn main() -> Result<(), VarsError> {
/// # let tmp = tempfile::tempdir().unwrap();
/// let store = Store::builder()
///     .namespace("pomo")
///     .scope("timer")
///     .state_root(FixedRoot::new(tmp.path()))
///     .build();
///
/// store.init()?;
/// store.set("default_duration", "25m")?;
/// assert_eq!(store.get("default_duration")?, "25m");
/// assert!(store.file_path()?.ends_with("pomo/timer/vars.properties"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    pub(crate) inner: Arc<StoreInner>,
}

impl Deref for Store {
    type Target = StoreInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Store {
    #[must_use = "The store is not configured until you call .build()"]
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    /// A store for `namespace` with no scope, rooted at `$XDG_STATE_HOME` or
    /// `~/.local/state`.
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self::builder().namespace(namespace).build()
    }

    /// A store for `namespace/scope`.
    #[must_use]
    pub fn scoped(namespace: impl Into<String>, scope: impl Into<String>) -> Self {
        Self::builder().namespace(namespace).scope(scope).build()
    }

    /// A store from a namespace and zero or one scope tokens.
    ///
    /// # Errors
    /// [`VarsError::TooManyScopeLevels`] if more than one scope token is given. Extra
    /// levels are never dropped silently.
    pub fn from_segments<S: AsRef<str>>(namespace: impl Into<String>, scopes: &[S]) -> Result<Self> {
        Self::segments_builder(namespace, scopes).map(StoreBuilder::build)
    }

    /// Like [`Store::from_segments`] but returns the builder for further configuration.
    ///
    /// # Errors
    /// [`VarsError::TooManyScopeLevels`] if more than one scope token is given.
    pub fn segments_builder<S: AsRef<str>>(
        namespace: impl Into<String>,
        scopes: &[S],
    ) -> Result<StoreBuilder<WithNamespace>> {
        let builder = Self::builder().namespace(namespace);
        match scopes {
            [] => Ok(builder),
            [scope] => Ok(builder.scope(scope.as_ref())),
            more => Err(VarsError::TooManyScopeLevels { count: more.len(), context: None }),
        }
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.inner.namespace
    }

    /// The scope, or `None` for an unscoped store.
    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        Some(self.inner.scope.as_str()).filter(|s| !s.is_empty())
    }

    /// `namespace` or `namespace/scope`, as shown in messages.
    #[must_use]
    pub fn target(&self) -> String {
        self.scope().map_or_else(
            || self.inner.namespace.clone(),
            |scope| format!("{}/{scope}", self.inner.namespace),
        )
    }

    /// The directory backing this store. Pure computation, nothing is created.
    ///
    /// # Errors
    /// Validation errors for bad names, [`VarsError::StateRootUnavailable`].
    pub fn dir(&self) -> Result<PathBuf> {
        self.resolver.resolve(&self.inner.namespace, &self.inner.scope)
    }

    /// The property file backing this store.
    ///
    /// # Errors
    /// Same as [`Store::dir`].
    pub fn file_path(&self) -> Result<PathBuf> {
        Ok(self.dir()?.join(PROPERTY_FILE))
    }

    /// Whether the property file exists.
    ///
    /// # Errors
    /// Same as [`Store::dir`].
    pub fn is_initialized(&self) -> Result<bool> {
        Ok(self.file_path()?.is_file())
    }

    /// Creates the store directory (`0700`) and an empty property file (`0600`) if they
    /// are missing. Existing content is never truncated, so calling it again is safe.
    ///
    /// Stale temporary files left by an interrupted rewrite are purged as well.
    ///
    /// # Errors
    /// Validation errors, or [`VarsError::Io`] if the directory or file cannot be created.
    pub fn init(&self) -> Result<()> {
        let _guard = self.lock.write();
        let dir = self.dir()?;

        create_private_dir(&dir)
            .context(format!("Failed to create state dir: {}", dir.display()))?;

        let file = dir.join(PROPERTY_FILE);
        match private_file_options().open(&file) {
            Ok(_) => info!(path = %file.display(), "Initialized empty property file"),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                debug!(path = %file.display(), "Property file already initialized");
            },
            Err(e) => {
                return Err(VarsError::Io {
                    source: e,
                    context: Some(format!("Failed to create file: {}", file.display()).into()),
                });
            },
        }

        maintenance::purge_tmp(&dir);
        Ok(())
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    /// [`VarsError::NotInitialized`], [`VarsError::KeyNotFound`], validation or I/O errors.
    pub fn get(&self, key: &str) -> Result<String> {
        let _guard = self.lock.read();
        let mut data = self.load(&self.dir()?, MissingFile::NotInitialized)?;

        data.remove(key).ok_or_else(|| VarsError::KeyNotFound {
            key: key.to_owned(),
            context: Some(self.target().into()),
        })
    }

    /// Inserts or overwrites `key`, then rewrites the whole file.
    ///
    /// A missing property file is treated as empty, but the store directory must exist.
    ///
    /// # Errors
    /// [`VarsError::NotInitialized`] if the directory is missing, [`VarsError::InvalidKey`]
    /// for keys the format cannot represent, other validation or I/O errors.
    pub fn set(&self, key: &str, value: impl Into<String>) -> Result<()> {
        validate_key(key)?;
        let _guard = self.lock.write();
        let dir = self.dir()?;

        let mut data = self.load(&dir, MissingFile::Empty)?;
        data.insert(key.to_owned(), value.into());
        self.save(&dir, &data)?;

        debug!(store = %self.target(), key, "Property set");
        Ok(())
    }

    /// Removes `key`. Removing an absent key succeeds and leaves the file untouched.
    ///
    /// # Errors
    /// [`VarsError::NotInitialized`] if the directory is missing, validation or I/O errors.
    pub fn unset(&self, key: &str) -> Result<()> {
        let _guard = self.lock.write();
        let dir = self.dir()?;

        let mut data = self.load(&dir, MissingFile::Empty)?;
        if data.remove(key).is_none() {
            debug!(store = %self.target(), key, "Property already absent");
            return Ok(());
        }
        self.save(&dir, &data)?;

        debug!(store = %self.target(), key, "Property unset");
        Ok(())
    }

    /// Returns a copy of every entry, ordered by key.
    ///
    /// # Errors
    /// [`VarsError::NotInitialized`], validation or I/O errors.
    pub fn all(&self) -> Result<BTreeMap<String, String>> {
        let _guard = self.lock.read();
        self.load(&self.dir()?, MissingFile::NotInitialized)
    }

    /// Returns every key in sorted order.
    ///
    /// # Errors
    /// Same as [`Store::all`].
    pub fn keys(&self) -> Result<Vec<String>> {
        Ok(self.all()?.into_keys().collect())
    }

    /// Whether `key` is present.
    ///
    /// # Errors
    /// Same as [`Store::all`].
    pub fn contains(&self, key: &str) -> Result<bool> {
        let _guard = self.lock.read();
        Ok(self.load(&self.dir()?, MissingFile::NotInitialized)?.contains_key(key))
    }

    /// Opens the property file in `$VISUAL`, `$EDITOR` or `vi` and blocks until the
    /// editor exits. The write lock is held meanwhile.
    ///
    /// # Errors
    /// [`VarsError::NotInitialized`] if the file does not exist,
    /// [`VarsError::EditorLaunch`] if the editor cannot start or fails.
    pub fn edit(&self) -> Result<()> {
        let _guard = self.lock.write();
        let file = self.file_path()?;

        if !file.is_file() {
            return Err(self.not_initialized());
        }

        editor::launch(self.environment.as_ref(), &file)
    }

    fn not_initialized(&self) -> VarsError {
        VarsError::NotInitialized { target: self.target(), context: None }
    }

    fn load(&self, dir: &Path, missing: MissingFile) -> Result<BTreeMap<String, String>> {
        match fs::metadata(dir) {
            Ok(meta) if meta.is_dir() => {},
            Ok(_) => return Err(self.not_initialized()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(self.not_initialized()),
            Err(e) => {
                return Err(VarsError::Io {
                    source: e,
                    context: Some(format!("Failed to inspect state dir: {}", dir.display()).into()),
                });
            },
        }

        let file = dir.join(PROPERTY_FILE);
        match fs::read_to_string(&file) {
            Ok(content) => Ok(format::parse(&content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => match missing {
                MissingFile::Empty => Ok(BTreeMap::new()),
                MissingFile::NotInitialized => Err(self.not_initialized()),
            },
            Err(e) => Err(VarsError::Io {
                source: e,
                context: Some(format!("Read failed: {}", file.display()).into()),
            }),
        }
    }

    /// Rewrites the property file with an atomic swap: the payload goes to a unique
    /// temporary file next to the target, is synced, then renamed over the target.
    fn save(&self, dir: &Path, data: &BTreeMap<String, String>) -> Result<()> {
        let target = dir.join(PROPERTY_FILE);
        let temp = unique_tmp_path(&target);
        let payload = format::serialize(data);

        if let Err(err) = write_synced(&temp, payload.as_bytes()) {
            let _ = fs::remove_file(&temp);
            return Err(err);
        }

        if let Err(err) = fs::rename(&temp, &target) {
            let _ = fs::remove_file(&temp);
            return Err(VarsError::Io {
                source: err,
                context: Some(
                    format!("Atomic swap failed: {} -> {}", temp.display(), target.display())
                        .into(),
                ),
            });
        }

        sync_dir(dir);
        debug!(path = %target.display(), entries = data.len(), "Property file rewritten");
        Ok(())
    }
}

fn write_synced(path: &Path, payload: &[u8]) -> Result<()> {
    let mut file = private_file_options()
        .open(path)
        .context(format!("Temp creation failed: {}", path.display()))?;
    file.write_all(payload).context("Write failed")?;
    file.sync_all().context("Syncing temp file")?;
    Ok(())
}

fn private_file_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options
}

fn create_private_dir(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(path)
}

fn sync_dir(path: &Path) {
    #[cfg(unix)]
    match fs::File::open(path) {
        Ok(dir) => {
            if let Err(err) = dir.sync_all() {
                warn!(path = %path.display(), error = %err, "Directory sync failed");
            }
        },
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Directory open failed");
        },
    }
    #[cfg(not(unix))]
    let _ = path;
}

fn unique_tmp_path(target: &Path) -> PathBuf {
    let counter = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or(PROPERTY_FILE);
    target.with_file_name(format!("{file_name}{TMP_MARKER}{}.{counter}", std::process::id()))
}
