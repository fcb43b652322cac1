use crate::env::{Environment, SystemEnvironment};
use crate::paths::PathResolver;
use crate::root::{StateRoot, XdgStateRoot};
use crate::store::{Store, StoreInner};
use parking_lot::RwLock;
use private::Sealed;
use std::sync::Arc;

#[derive(Debug, Default)]
struct StoreConfig {
    scope: String,
    state_root: Option<Arc<dyn StateRoot>>,
    environment: Option<Arc<dyn Environment>>,
}

#[derive(Debug, Default)]
pub struct NoNamespace;
#[derive(Debug)]
pub struct WithNamespace(String);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoNamespace {}
impl Sealed for WithNamespace {}

/// Typestate builder for [`Store`]; a namespace is required before [`StoreBuilder::build`].
#[allow(private_bounds)]
#[derive(Debug, Default)]
pub struct StoreBuilder<S: Sealed = NoNamespace> {
    state: S,
    config: StoreConfig,
}

#[allow(private_bounds)]
impl<S: Sealed> StoreBuilder<S> {
    /// Sets the single scope level. An empty string means "no scope".
    #[must_use = "Sets the scope of the store"]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.config.scope = scope.into();
        self
    }

    /// Overrides the state root. Without it, `XDG_STATE_HOME` and the home directory
    /// are consulted through the configured environment.
    #[must_use = "Sets the state root of the store"]
    pub fn state_root(mut self, root: impl StateRoot + 'static) -> Self {
        self.config.state_root = Some(Arc::new(root));
        self
    }

    /// Sets the environment used for state-root and editor lookup.
    #[must_use = "Sets the environment of the store"]
    pub fn environment(mut self, env: impl Environment + 'static) -> Self {
        self.config.environment = Some(Arc::new(env));
        self
    }

    fn transition<N: Sealed>(self, state: N) -> StoreBuilder<N> {
        StoreBuilder { state, config: self.config }
    }
}

impl StoreBuilder<NoNamespace> {
    #[must_use = "Creates a new store builder with default configuration"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the namespace of the store"]
    pub fn namespace(self, namespace: impl Into<String>) -> StoreBuilder<WithNamespace> {
        self.transition(WithNamespace(namespace.into()))
    }
}

impl StoreBuilder<WithNamespace> {
    /// Assembles the store. Names are validated lazily, by every operation, so an
    /// invalid namespace or scope surfaces as an error from the first call.
    #[must_use = "The store does nothing until an operation is called"]
    pub fn build(self) -> Store {
        let environment: Arc<dyn Environment> =
            self.config.environment.unwrap_or_else(|| Arc::new(SystemEnvironment));
        let state_root = self
            .config
            .state_root
            .unwrap_or_else(|| Arc::new(XdgStateRoot::new(Arc::clone(&environment))));

        Store {
            inner: Arc::new(StoreInner {
                namespace: self.state.0,
                scope: self.config.scope,
                resolver: PathResolver::new(state_root),
                environment,
                lock: RwLock::new(()),
            }),
        }
    }
}
