use crate::domain::{Environment, Layout};
use crate::ports::SystemTools;

/// Application context holding dependencies for command execution.
///
/// `S` is the store behind the catalog, enablement and archive ports; `T`
/// provides the external tools manifest operations call.
pub struct AppContext<S, T: SystemTools> {
    layout: Layout,
    store: S,
    tools: T,
    env: Environment,
}

impl<S, T: SystemTools> AppContext<S, T> {
    /// Create a new application context.
    pub fn new(layout: Layout, store: S, tools: T, env: Environment) -> Self {
        Self { layout, store, tools, env }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Get a reference to the service store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a reference to the external tools.
    pub fn tools(&self) -> &T {
        &self.tools
    }

    /// Variables snapshot used for substitution.
    pub fn env(&self) -> &Environment {
        &self.env
    }
}
