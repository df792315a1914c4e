use std::time::Instant;

use tracing::info;

use crate::http_helpers::{HttpRequest, HttpResponse};
use crate::traits_helpers::Middleware;

struct RequestStart(Instant);

/// Logs every request on the way in and its status on the way out.
#[derive(Debug, Default, Clone)]
pub struct LoggerMiddleware {
    pub log_body: bool,
}

impl LoggerMiddleware {
    pub fn new() -> Self {
        Self { log_body: false }
    }

    pub fn with_body_logging(mut self) -> Self {
        self.log_body = true;
        self
    }
}

impl Middleware for LoggerMiddleware {
    fn before(&self, req: &mut HttpRequest) {
        req.extensions.insert(RequestStart(Instant::now()));
        if self.log_body && !req.body.is_empty() {
            info!(method = %req.method, url = %req.url, body = %req.body.as_text(), "request");
        } else {
            info!(method = %req.method, url = %req.url, "request");
        }
    }

    fn after(&self, req: &HttpRequest, resp: &mut HttpResponse) {
        let elapsed = req
            .extensions
            .get::<RequestStart>()
            .map(|start| start.0.elapsed());
        info!(
            method = %req.method,
            url = %req.url,
            status = resp.status,
            elapsed = ?elapsed,
            "response"
        );
    }
}
