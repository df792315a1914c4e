//! # nimbus-axum
//!
//! Serves a nimbus [`App`](nimbus::App) over HTTP using Axum.
//!
//! Every request lands on a single fallback service; routing, middleware
//! and error handling stay inside the app. Handlers are synchronous and run
//! on tokio's blocking pool.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use nimbus::App;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let app = Arc::new(App::new());
//!     app.route("/home", |_, resp, _| {
//!         resp.set_text("Hello from home");
//!         Ok(())
//!     })?;
//!     nimbus_axum::serve(app, "127.0.0.1", 8000).await
//! }
//! ```

mod axum_adapter;
mod axum_route_adapter;

pub use axum_adapter::{router, serve};
pub use axum_route_adapter::AxumRouteAdapter;
