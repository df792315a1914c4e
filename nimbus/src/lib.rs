//! # nimbus
//!
//! A minimal request-routing framework. Requests flow
//!
//! ```text
//! HttpRequest
//!     → middleware before hooks (last added runs first)
//!     → Dispatcher: RouteTable lookup → verb check → handler
//!         404 / 405 written as plain responses
//!         handler Err or panic → exception handler slot
//!     → middleware after hooks (first added runs first)
//!     → HttpResponse
//! ```
//!
//! ```rust
//! use nimbus::{App, TestClient};
//!
//! let app = App::new();
//! app.route("/hello/{name}", |_req, resp, params| {
//!     resp.set_text(format!("Hello {}", params.get("name").unwrap_or_default()));
//!     Ok(())
//! })
//! .unwrap();
//!
//! let response = TestClient::new(&app).get("https://testserver/hello/Elbek").unwrap();
//! assert_eq!(response.text(), "Hello Elbek");
//! ```

pub mod dispatcher;
pub mod errors;
pub mod exception_slot;
pub mod http_helpers;
pub mod middleware;
mod nimbus_application;
pub mod router;
pub mod templates;
mod test_client;
pub mod traits_helpers;

pub use dispatcher::{Dispatcher, Outcome};
pub use errors::NimbusError;
pub use exception_slot::ExceptionSlot;
pub use http_helpers::{Body, HttpMethod, HttpRequest, HttpResponse};
pub use middleware::{FunctionalMiddleware, LoggerMiddleware, Middleware, MiddlewareChain, Next};
pub use nimbus_application::{App, Settings};
pub use router::{PathError, PathParams, PathTemplate, RouteTable};
pub use templates::{FileTemplates, MemoryTemplates, TemplateRenderer};
pub use test_client::TestClient;
pub use traits_helpers::{
    ExceptionHandler, FunctionHandler, Handler, HandlerResult, MethodTable, Resource,
    ResourceHandler,
};

// Re-export so applications can return handler errors without naming anyhow
pub use anyhow;
