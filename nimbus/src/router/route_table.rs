use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::debug;

use super::{PathParams, PathTemplate};
use crate::errors::NimbusError;
use crate::traits_helpers::Handler;

// A unique pattern bound to its handler. Never mutated after registration.
struct Route {
    template: PathTemplate,
    handler: Arc<Handler>,
}

/// Outcome of a successful lookup.
#[derive(Clone)]
pub struct ResolvedRoute {
    pub pattern: String,
    pub handler: Arc<Handler>,
    pub params: PathParams,
}

/// Registration-ordered route registry. The first matching pattern wins.
#[derive(Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    patterns: FxHashSet<String>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, pattern: &str, handler: Handler) -> Result<(), NimbusError> {
        if self.patterns.contains(pattern) {
            return Err(NimbusError::DuplicateRoute(pattern.to_string()));
        }
        let template = PathTemplate::parse(pattern)?;

        debug!(pattern, kind = handler.kind(), "route registered");
        self.patterns.insert(pattern.to_string());
        self.routes.push(Route {
            template,
            handler: Arc::new(handler),
        });
        Ok(())
    }

    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        self.routes.iter().find_map(|route| {
            route.template.matches(path).map(|params| ResolvedRoute {
                pattern: route.template.raw().to_string(),
                handler: route.handler.clone(),
                params,
            })
        })
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.patterns.contains(pattern)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
