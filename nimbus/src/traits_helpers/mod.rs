mod exception_handler;
mod handler;
mod middleware;
mod resource;

pub use exception_handler::{ExceptionHandler, default_exception_handler};
pub use handler::{FunctionHandler, Handler, HandlerFn, HandlerResult};
pub use middleware::{FunctionalMiddleware, Middleware, MiddlewareResult, Next};
pub use resource::{MethodTable, Resource, ResourceHandler, ResourceMethod};
