use crate::errors::NimbusError;
use crate::http_helpers::{HttpRequest, HttpResponse};

/// Result type for middleware chain execution
pub type MiddlewareResult = Result<HttpResponse, NimbusError>;

/// An entry point into the request pipeline: the dispatcher itself, or a
/// middleware layer wrapping the previous entry point.
pub trait Next: Send + Sync {
    fn run(&self, req: &mut HttpRequest) -> MiddlewareResult;
}

/// Core middleware trait.
///
/// Hooks observe and may mutate the request and response. They cannot
/// short-circuit the chain.
pub trait Middleware: Send + Sync {
    /// Runs before the wrapped entry point.
    fn before(&self, req: &mut HttpRequest);

    /// Runs after the wrapped entry point produced a response.
    fn after(&self, req: &HttpRequest, resp: &mut HttpResponse);
}

type BeforeFn = Box<dyn Fn(&mut HttpRequest) + Send + Sync>;
type AfterFn = Box<dyn Fn(&HttpRequest, &mut HttpResponse) + Send + Sync>;

/// Functional middleware - simpler alternative using closures
pub struct FunctionalMiddleware {
    before: BeforeFn,
    after: AfterFn,
}

impl FunctionalMiddleware {
    pub fn new<B, A>(before: B, after: A) -> Self
    where
        B: Fn(&mut HttpRequest) + Send + Sync + 'static,
        A: Fn(&HttpRequest, &mut HttpResponse) + Send + Sync + 'static,
    {
        Self {
            before: Box::new(before),
            after: Box::new(after),
        }
    }

    pub fn on_request<B>(before: B) -> Self
    where
        B: Fn(&mut HttpRequest) + Send + Sync + 'static,
    {
        Self::new(before, |_: &HttpRequest, _: &mut HttpResponse| {})
    }

    pub fn on_response<A>(after: A) -> Self
    where
        A: Fn(&HttpRequest, &mut HttpResponse) + Send + Sync + 'static,
    {
        Self::new(|_: &mut HttpRequest| {}, after)
    }
}

impl Middleware for FunctionalMiddleware {
    fn before(&self, req: &mut HttpRequest) {
        (self.before)(req)
    }

    fn after(&self, req: &HttpRequest, resp: &mut HttpResponse) {
        (self.after)(req, resp)
    }
}
