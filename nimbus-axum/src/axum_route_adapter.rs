use std::sync::Arc;

use anyhow::{Result, anyhow};
use axum::{
    body::to_bytes,
    http::{
        HeaderMap, HeaderName, HeaderValue, Request, Response, StatusCode, header,
        uri::Authority,
    },
};
use nimbus::{App, Body, HttpRequest, HttpResponse};
use serde_json::Value;
use tracing::{error, warn};

// Request bodies above this size are rejected before reaching the app.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

pub struct AxumRouteAdapter;

impl AxumRouteAdapter {
    pub async fn adapt_request(request: Request<axum::body::Body>) -> Result<HttpRequest> {
        let (parts, body) = request.into_parts();

        let mut adapted = if parts.uri.scheme().is_some() && parts.uri.authority().is_some() {
            HttpRequest::new(parts.method.as_str(), &parts.uri.to_string())?
        } else {
            // Route on the request target only; Host is just for the logged URL.
            let target = parts.uri.path_and_query().map_or("/", |pq| pq.as_str());
            let mut adapted = HttpRequest::new(parts.method.as_str(), target)?;
            if let Some(host) = valid_host(&parts.headers) {
                adapted.url = format!("http://{}{}", host, target);
            }
            adapted
        };
        adapted.headers = parts
            .headers
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_str().unwrap_or("").to_string()))
            .collect();

        let body_bytes = to_bytes(body, MAX_BODY_BYTES).await?;
        adapted.body = if body_bytes.is_empty() {
            Body::Empty
        } else {
            let text = String::from_utf8_lossy(&body_bytes).into_owned();
            let is_json = adapted
                .header("content-type")
                .is_some_and(|ct| ct.starts_with("application/json"));
            match is_json.then(|| serde_json::from_str::<Value>(&text)) {
                Some(Ok(json)) => Body::Json(json),
                _ => Body::Text(text),
            }
        };

        Ok(adapted)
    }

    pub fn adapt_response(response: HttpResponse) -> Result<Response<axum::body::Body>> {
        let status =
            StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut builder = Response::builder().status(status);
        for (k, v) in &response.headers {
            match (HeaderName::from_bytes(k.as_bytes()), HeaderValue::from_str(v)) {
                (Ok(name), Ok(value)) => builder = builder.header(name, value),
                _ => warn!(header = %k, "dropping invalid response header"),
            }
        }

        let body = if response.body.is_empty() {
            axum::body::Body::empty()
        } else {
            axum::body::Body::from(response.body.as_text())
        };

        builder
            .body(body)
            .map_err(|e| anyhow!("Failed to build response: {}", e))
    }

    /// Run one axum request through `app`. Never fails: transport problems
    /// become 400, escaped app failures become a bare 500.
    pub async fn handle_request(
        app: Arc<App>,
        request: Request<axum::body::Body>,
    ) -> Response<axum::body::Body> {
        let adapted = match Self::adapt_request(request).await {
            Ok(adapted) => adapted,
            Err(e) => {
                warn!(error = %e, "rejecting malformed request");
                return plain(StatusCode::BAD_REQUEST, "Bad Request");
            }
        };

        let outcome = tokio::task::spawn_blocking(move || app.handle(adapted)).await;

        let response = match outcome {
            Ok(Ok(response)) => Self::adapt_response(response),
            Ok(Err(e)) => Err(anyhow::Error::new(e)),
            Err(join_err) => Err(anyhow!("request task failed: {}", join_err)),
        };

        response.unwrap_or_else(|e| {
            error!(error = %e, "request failed");
            plain(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        })
    }
}

fn valid_host(headers: &HeaderMap) -> Option<Authority> {
    let host = headers.get(header::HOST)?.to_str().ok()?;
    host.parse::<Authority>()
        .ok()
        .filter(|authority| !authority.as_str().contains('@'))
}

fn plain(status: StatusCode, text: &'static str) -> Response<axum::body::Body> {
    let mut response = Response::new(axum::body::Body::from(text));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain"),
    );
    response
}
