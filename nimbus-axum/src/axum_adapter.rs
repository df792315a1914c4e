use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Router, body::Body, http::Request};
use nimbus::App;
use tokio::net::TcpListener;
use tracing::info;

use crate::AxumRouteAdapter;

/// An axum router that hands every request to `app`.
pub fn router(app: Arc<App>) -> Router {
    Router::new().fallback(move |req: Request<Body>| {
        let app = app.clone();
        async move { AxumRouteAdapter::handle_request(app, req).await }
    })
}

pub async fn serve(app: Arc<App>, hostname: &str, port: u16) -> Result<()> {
    let addr = format!("{}:{}", hostname, port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(%addr, routes = app.route_count(), "listening");

    axum::serve(listener, router(app))
        .await
        .with_context(|| "Axum server encountered an error")?;
    Ok(())
}
