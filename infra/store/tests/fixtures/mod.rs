use std::path::Path;
use vars_store::{FixedRoot, MapEnvironment, Store};

/// A store rooted at `root`, with an empty environment so nothing leaks in from the host.
#[must_use]
pub fn store(root: &Path, namespace: &str, scope: &str) -> Store {
    Store::builder()
        .namespace(namespace)
        .scope(scope)
        .state_root(FixedRoot::new(root))
        .environment(MapEnvironment::new())
        .build()
}
