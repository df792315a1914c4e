use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock};

use anyhow::anyhow;
use tracing::{error, trace, warn};

use crate::errors::NimbusError;
use crate::exception_slot::ExceptionSlot;
use crate::http_helpers::{HttpMethod, HttpRequest, HttpResponse};
use crate::router::{PathParams, RouteTable};
use crate::traits_helpers::{HandlerFn, HandlerResult, MiddlewareResult, Next};

pub const NOT_FOUND_BODY: &str = "Not Found";
pub const METHOD_NOT_ALLOWED_BODY: &str = "Method Not Allowed";

/// How a request left the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Handled,
    NotFound,
    MethodNotAllowed,
    Recovered,
}

/// Innermost entry point: resolves the route, checks the verb, runs the
/// handler and routes its failure to the exception slot.
pub struct Dispatcher {
    routes: Arc<RwLock<RouteTable>>,
    exception_handler: Arc<ExceptionSlot>,
}

impl Dispatcher {
    pub fn new(routes: Arc<RwLock<RouteTable>>, exception_handler: Arc<ExceptionSlot>) -> Self {
        Self {
            routes,
            exception_handler,
        }
    }

    pub fn handle(&self, req: &HttpRequest) -> Result<HttpResponse, NimbusError> {
        let mut response = HttpResponse::new();
        let outcome = self.dispatch(req, &mut response)?;
        trace!(
            method = %req.method,
            path = %req.path,
            status = response.status,
            ?outcome,
            "dispatched"
        );
        Ok(response)
    }

    fn dispatch(&self, req: &HttpRequest, response: &mut HttpResponse) -> Result<Outcome, NimbusError> {
        // The read guard is dropped here; handlers run without holding it.
        let resolved = self
            .routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .resolve(&req.path);

        let Some(route) = resolved else {
            response.set_status(404).set_text(NOT_FOUND_BODY);
            return Ok(Outcome::NotFound);
        };

        let method = HttpMethod::from_string(&req.method);
        let Some(callable) = route.handler.select(method) else {
            response.set_status(405).set_text(METHOD_NOT_ALLOWED_BODY);
            return Ok(Outcome::MethodNotAllowed);
        };

        match invoke(callable, req, response, &route.params) {
            Ok(()) => Ok(Outcome::Handled),
            Err(err) => {
                warn!(pattern = %route.pattern, error = %err, "handler failed");
                self.exception_handler
                    .invoke(req, response, &err)
                    .map_err(|slot_err| {
                        error!(pattern = %route.pattern, error = %slot_err, "exception handler failed");
                        NimbusError::ExceptionHandlerFailed(slot_err)
                    })?;
                Ok(Outcome::Recovered)
            }
        }
    }
}

impl Next for Dispatcher {
    fn run(&self, req: &mut HttpRequest) -> MiddlewareResult {
        self.handle(req)
    }
}

// A panic inside a handler is a handler failure like any returned error.
fn invoke(
    callable: &HandlerFn,
    req: &HttpRequest,
    response: &mut HttpResponse,
    params: &PathParams,
) -> HandlerResult {
    match panic::catch_unwind(AssertUnwindSafe(|| callable(req, response, params))) {
        Ok(result) => result,
        Err(payload) => Err(anyhow!("{}", panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}
