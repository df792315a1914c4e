use super::HandlerResult;
use crate::http_helpers::{HttpRequest, HttpResponse};

type ExceptionFn =
    Box<dyn Fn(&HttpRequest, &mut HttpResponse, &anyhow::Error) -> HandlerResult + Send + Sync>;

/// The function invoked when a handler fails. It alone shapes the response;
/// an `Err` from it is fatal for the request.
pub struct ExceptionHandler {
    callback: ExceptionFn,
}

impl ExceptionHandler {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&HttpRequest, &mut HttpResponse, &anyhow::Error) -> HandlerResult
            + Send
            + Sync
            + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    pub fn call(
        &self,
        req: &HttpRequest,
        resp: &mut HttpResponse,
        error: &anyhow::Error,
    ) -> HandlerResult {
        (self.callback)(req, resp, error)
    }
}

impl Default for ExceptionHandler {
    fn default() -> Self {
        Self::new(default_exception_handler)
    }
}

/// Installed until an application registers its own: a bare 500.
pub fn default_exception_handler(
    _req: &HttpRequest,
    resp: &mut HttpResponse,
    _error: &anyhow::Error,
) -> HandlerResult {
    resp.set_status(500).set_text("Internal Server Error");
    Ok(())
}
