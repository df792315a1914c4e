use std::sync::Arc;

use rustc_hash::FxHashSet;

use super::ResourceHandler;
use crate::http_helpers::{HttpMethod, HttpRequest, HttpResponse};
use crate::router::PathParams;

/// Handlers report failure by returning `Err`; the dispatcher hands the
/// error to the exception handler.
pub type HandlerResult = anyhow::Result<()>;

pub type HandlerFn =
    Arc<dyn Fn(&HttpRequest, &mut HttpResponse, &PathParams) -> HandlerResult + Send + Sync>;

/// What a route dispatches to.
pub enum Handler {
    Function(FunctionHandler),
    Resource(ResourceHandler),
}

impl Handler {
    /// Pick the operation serving `method`, or `None` when the verb is not
    /// admitted (unknown verbs are never admitted).
    pub fn select(&self, method: Option<HttpMethod>) -> Option<&HandlerFn> {
        let method = method?;
        match self {
            Handler::Function(handler) => handler.allows(method).then_some(&handler.callable),
            Handler::Resource(handler) => handler.operation(method),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Handler::Function(_) => "function",
            Handler::Resource(_) => "resource",
        }
    }

    pub fn allowed_methods(&self) -> Vec<HttpMethod> {
        let allowed = |method: &HttpMethod| match self {
            Handler::Function(handler) => handler.allows(*method),
            Handler::Resource(handler) => handler.supports(*method),
        };
        HttpMethod::ALL.into_iter().filter(allowed).collect()
    }
}

impl From<FunctionHandler> for Handler {
    fn from(handler: FunctionHandler) -> Self {
        Handler::Function(handler)
    }
}

impl From<ResourceHandler> for Handler {
    fn from(handler: ResourceHandler) -> Self {
        Handler::Resource(handler)
    }
}

/// A single callable restricted to an explicit set of verbs.
pub struct FunctionHandler {
    callable: HandlerFn,
    allowed_methods: FxHashSet<HttpMethod>,
}

impl FunctionHandler {
    pub fn new<F>(callable: F, allowed_methods: impl IntoIterator<Item = HttpMethod>) -> Self
    where
        F: Fn(&HttpRequest, &mut HttpResponse, &PathParams) -> HandlerResult
            + Send
            + Sync
            + 'static,
    {
        Self {
            callable: Arc::new(callable),
            allowed_methods: allowed_methods.into_iter().collect(),
        }
    }

    pub fn allows(&self, method: HttpMethod) -> bool {
        self.allowed_methods.contains(&method)
    }
}
