use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::debug;

use crate::http_helpers::{HttpRequest, HttpResponse};
use crate::traits_helpers::{ExceptionHandler, HandlerResult};

/// Process-wide cell holding the current exception handler.
///
/// `set` swaps in a new handler atomically (last write wins); a request
/// already running keeps the handler it loaded.
pub struct ExceptionSlot {
    current: ArcSwap<ExceptionHandler>,
}

impl Default for ExceptionSlot {
    fn default() -> Self {
        Self {
            current: ArcSwap::from_pointee(ExceptionHandler::default()),
        }
    }
}

impl ExceptionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, handler: ExceptionHandler) {
        self.current.store(Arc::new(handler));
        debug!("exception handler replaced");
    }

    pub fn invoke(
        &self,
        req: &HttpRequest,
        resp: &mut HttpResponse,
        error: &anyhow::Error,
    ) -> HandlerResult {
        let handler = self.current.load_full();
        handler.call(req, resp, error)
    }
}
