use std::sync::Arc;

use tracing::debug;

use crate::{
    http_helpers::HttpRequest,
    traits_helpers::{Middleware, MiddlewareResult, Next},
};

/// One middleware wrapped around the entry point that was current when it
/// was added.
pub struct ChainLink {
    middleware: Arc<dyn Middleware>,
    next: Arc<dyn Next>,
}

impl ChainLink {
    pub fn new(middleware: Arc<dyn Middleware>, next: Arc<dyn Next>) -> Self {
        Self { middleware, next }
    }
}

impl Next for ChainLink {
    fn run(&self, req: &mut HttpRequest) -> MiddlewareResult {
        self.middleware.before(req);
        let mut response = self.next.run(req)?;
        self.middleware.after(req, &mut response);
        Ok(response)
    }
}

/// Append-only onion of middleware around a fixed innermost entry point.
///
/// Each added middleware wraps the current entry point, so the most recently
/// added one is outermost: its `before` runs first and its `after` last.
pub struct MiddlewareChain {
    entry: Arc<dyn Next>,
    middleware_stack: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
    pub fn new(endpoint: Arc<dyn Next>) -> Self {
        Self {
            entry: endpoint,
            middleware_stack: Vec::new(),
        }
    }

    pub fn use_middleware(&mut self, middleware: Arc<dyn Middleware>) {
        self.entry = Arc::new(ChainLink::new(middleware.clone(), self.entry.clone()));
        self.middleware_stack.push(middleware);
        debug!(depth = self.middleware_stack.len(), "middleware added");
    }

    /// The outermost entry point. Cloning it out lets a request run without
    /// holding any lock on the chain.
    pub fn entry(&self) -> Arc<dyn Next> {
        self.entry.clone()
    }

    pub fn len(&self) -> usize {
        self.middleware_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middleware_stack.is_empty()
    }
}
