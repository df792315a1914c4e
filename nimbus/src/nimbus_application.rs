use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;
use tracing::debug;

use crate::dispatcher::Dispatcher;
use crate::errors::NimbusError;
use crate::exception_slot::ExceptionSlot;
use crate::http_helpers::{HttpMethod, HttpRequest, HttpResponse};
use crate::middleware::MiddlewareChain;
use crate::router::{PathParams, RouteTable};
use crate::templates::{FileTemplates, TemplateRenderer};
use crate::traits_helpers::{
    ExceptionHandler, FunctionHandler, Handler, HandlerResult, Middleware, Resource,
    ResourceHandler,
};

/// Core tunables handed to [`App::with_settings`].
#[derive(Debug, Clone)]
pub struct Settings {
    pub templates_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("templates"),
        }
    }
}

/// The application: route table, middleware onion, exception handler slot
/// and template renderer behind one registration API.
///
/// Registration takes `&self`, so an `App` shared behind an `Arc` with a
/// running server can still accept routes.
pub struct App {
    routes: Arc<RwLock<RouteTable>>,
    exception_handler: Arc<ExceptionSlot>,
    middleware: RwLock<MiddlewareChain>,
    renderer: Arc<dyn TemplateRenderer>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let routes = Arc::new(RwLock::new(RouteTable::new()));
        let exception_handler = Arc::new(ExceptionSlot::new());
        let dispatcher = Dispatcher::new(routes.clone(), exception_handler.clone());

        Self {
            routes,
            exception_handler,
            middleware: RwLock::new(MiddlewareChain::new(Arc::new(dispatcher))),
            renderer: Arc::new(FileTemplates::new(settings.templates_dir)),
        }
    }

    pub fn with_renderer(mut self, renderer: impl TemplateRenderer + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    /// Register a function handler that answers `GET` only.
    pub fn route<F>(&self, pattern: &str, handler: F) -> Result<(), NimbusError>
    where
        F: Fn(&HttpRequest, &mut HttpResponse, &PathParams) -> HandlerResult
            + Send
            + Sync
            + 'static,
    {
        self.route_with_methods(pattern, [HttpMethod::GET], handler)
    }

    /// Register a function handler admitting exactly `methods` (possibly none).
    pub fn route_with_methods<F>(
        &self,
        pattern: &str,
        methods: impl IntoIterator<Item = HttpMethod>,
        handler: F,
    ) -> Result<(), NimbusError>
    where
        F: Fn(&HttpRequest, &mut HttpResponse, &PathParams) -> HandlerResult
            + Send
            + Sync
            + 'static,
    {
        self.register(pattern, FunctionHandler::new(handler, methods).into())
    }

    /// Non-builder spelling of [`App::route_with_methods`]; `None` means `GET`.
    pub fn add_route<F>(
        &self,
        pattern: &str,
        handler: F,
        allowed_methods: Option<&[HttpMethod]>,
    ) -> Result<(), NimbusError>
    where
        F: Fn(&HttpRequest, &mut HttpResponse, &PathParams) -> HandlerResult
            + Send
            + Sync
            + 'static,
    {
        let methods = allowed_methods.unwrap_or(&[HttpMethod::GET]).to_vec();
        self.route_with_methods(pattern, methods, handler)
    }

    pub fn resource<R: Resource>(&self, pattern: &str, resource: R) -> Result<(), NimbusError> {
        self.register(pattern, ResourceHandler::new(resource).into())
    }

    fn register(&self, pattern: &str, handler: Handler) -> Result<(), NimbusError> {
        self.routes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .register(pattern, handler)
    }

    /// Wrap the current pipeline in `middleware`; it becomes the outermost layer.
    pub fn add_middleware(&self, middleware: impl Middleware + 'static) {
        self.add_shared_middleware(Arc::new(middleware));
    }

    pub fn add_shared_middleware(&self, middleware: Arc<dyn Middleware>) {
        self.middleware
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .use_middleware(middleware);
    }

    /// Replace the exception handler; the previous one is discarded.
    pub fn add_exception_handler<F>(&self, handler: F)
    where
        F: Fn(&HttpRequest, &mut HttpResponse, &anyhow::Error) -> HandlerResult
            + Send
            + Sync
            + 'static,
    {
        self.exception_handler.set(ExceptionHandler::new(handler));
    }

    pub fn template(&self, name: &str, context: &Value) -> Result<String, NimbusError> {
        self.renderer.render(name, context)
    }

    pub fn renderer(&self) -> Arc<dyn TemplateRenderer> {
        self.renderer.clone()
    }

    /// Run one request through the middleware onion and the dispatcher.
    pub fn handle(&self, mut request: HttpRequest) -> Result<HttpResponse, NimbusError> {
        let entry = self
            .middleware
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entry();
        debug!(method = %request.method, url = %request.url, "handling request");
        entry.run(&mut request)
    }

    pub fn route_count(&self) -> usize {
        self.routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn has_route(&self, pattern: &str) -> bool {
        self.routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(pattern)
    }

    pub fn middleware_count(&self) -> usize {
        self.middleware
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::MemoryTemplates;
    use serde_json::json;

    fn send(app: &App, method: &str, url: &str) -> HttpResponse {
        app.handle(HttpRequest::new(method, url).unwrap()).unwrap()
    }

    #[test]
    fn test_route_defaults_to_get() {
        let app = App::new();
        app.route("/home", |_, resp, _| {
            resp.set_text("Hello from home");
            Ok(())
        })
        .unwrap();

        assert_eq!(send(&app, "GET", "/home").text(), "Hello from home");
        assert_eq!(send(&app, "POST", "/home").status, 405);
        assert!(app.has_route("/home"));
    }

    #[test]
    fn test_add_route_with_explicit_methods() {
        let app = App::new();
        app.add_route(
            "/about",
            |_, resp, _| {
                resp.set_text("Hello from the About Page");
                Ok(())
            },
            Some(&[HttpMethod::PUT]),
        )
        .unwrap();

        assert_eq!(send(&app, "PUT", "/about").status, 200);
        assert_eq!(send(&app, "GET", "/about").status, 405);
    }

    #[test]
    fn test_duplicate_route_is_fatal() {
        let app = App::new();
        app.route("/home", |_, _, _| Ok(())).unwrap();
        let err = app.route("/home", |_, _, _| Ok(())).unwrap_err();
        assert!(matches!(err, NimbusError::DuplicateRoute(_)));
        assert_eq!(app.route_count(), 1);
    }

    #[test]
    fn test_route_registered_after_sharing() {
        let app = Arc::new(App::new());
        let shared = app.clone();
        shared.route("/late", |_, resp, _| {
            resp.set_text("late");
            Ok(())
        })
        .unwrap();
        assert_eq!(send(&app, "GET", "/late").text(), "late");
    }

    #[test]
    fn test_template_uses_renderer() {
        let app = App::new().with_renderer(
            MemoryTemplates::new().with_template("test.html", "<h1>{{ new_title }}</h1>"),
        );
        let html = app.template("test.html", &json!({"new_title": "Best Title"})).unwrap();
        assert_eq!(html, "<h1>Best Title</h1>");
    }

    #[test]
    fn test_middleware_count() {
        let app = App::new();
        app.add_middleware(crate::middleware::LoggerMiddleware::new());
        assert_eq!(app.middleware_count(), 1);
        assert_eq!(send(&app, "GET", "/nowhere").status, 404);
    }
}
