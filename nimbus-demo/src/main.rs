use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, anyhow};
use nimbus::{
    App, FunctionalMiddleware, HandlerResult, HttpMethod, HttpRequest, HttpResponse,
    LoggerMiddleware, MethodTable, PathParams, Resource, Settings, TemplateRenderer,
};
use nimbus_config::{AppConfig, ConfigModule};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

struct Books;

impl Books {
    fn get(&self, _req: &HttpRequest, resp: &mut HttpResponse, _: &PathParams) -> HandlerResult {
        resp.set_text("Books page");
        Ok(())
    }

    fn post(&self, _req: &HttpRequest, resp: &mut HttpResponse, _: &PathParams) -> HandlerResult {
        resp.set_text("Endpoint to create a book");
        Ok(())
    }
}

impl Resource for Books {
    fn methods(table: &mut MethodTable<Self>) {
        table.get(Self::get).post(Self::post);
    }
}

/// A relative directory missing from the working directory is looked up
/// next to this crate instead, so `cargo run -p nimbus-demo` works from the
/// workspace root.
fn templates_dir(configured: &Path) -> PathBuf {
    if configured.is_relative() && !configured.is_dir() {
        Path::new(env!("CARGO_MANIFEST_DIR")).join(configured)
    } else {
        configured.to_path_buf()
    }
}

fn build_app(config: &AppConfig) -> anyhow::Result<Arc<App>> {
    let app = Arc::new(App::with_settings(Settings {
        templates_dir: templates_dir(&config.templates_dir),
    }));

    app.route("/home", |_, resp, _| {
        resp.set_text("Hello from the Home Page");
        Ok(())
    })?;

    app.route_with_methods("/about", [HttpMethod::PUT], |_, resp, _| {
        resp.set_text("Hello from the About Page");
        Ok(())
    })?;

    app.route("/hello/{name}", |_, resp, params| {
        let name = params.get("name").unwrap_or_default();
        resp.set_text(format!("Hello {}", name));
        Ok(())
    })?;

    app.resource("/books", Books)?;

    app.add_route(
        "/new_handler",
        |_, resp, _| {
            resp.set_text("From new handler");
            Ok(())
        },
        None,
    )?;

    let renderer = app.renderer();
    app.route("/template", move |_, resp, _| {
        let html = renderer.render(
            "test.html",
            &json!({"new_title": "Best Title", "new_body": "Best body"}),
        )?;
        resp.set_html(html);
        Ok(())
    })?;

    app.route("/json", |_, resp, _| {
        resp.set_json(&json!({"name": "some name", "type": "json"}))?;
        Ok(())
    })?;

    app.route("/exception", |_, _, _| Err(anyhow!("This is a test exception")))?;

    app.add_exception_handler(|_, resp, exc| {
        resp.set_text(format!("Error occurred: {}", exc));
        Ok(())
    });

    app.add_middleware(FunctionalMiddleware::new(
        |req| info!(url = %req.url, "request received"),
        |req, _| info!(url = %req.url, "response generated"),
    ));
    app.add_middleware(LoggerMiddleware::new());

    Ok(app)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigModule::<AppConfig>::from_env()
        .context("Failed to load configuration")?
        .get();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let app = build_app(&config)?;
    info!("Starting server at http://{}", config.address());
    nimbus_axum::serve(app, &config.host, config.port).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus::TestClient;

    fn app() -> Arc<App> {
        build_app(&AppConfig::default()).unwrap()
    }

    #[test]
    fn test_templates_dir_falls_back_to_crate_dir() {
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
        assert_eq!(
            templates_dir(Path::new("not-a-templates-dir")),
            manifest.join("not-a-templates-dir")
        );
        assert!(templates_dir(Path::new("templates")).join("test.html").is_file());

        let absolute = std::env::temp_dir();
        assert_eq!(templates_dir(&absolute), absolute);
    }

    #[test]
    fn test_demo_routes() {
        let app = app();
        let client = TestClient::new(&app);

        assert_eq!(client.get("/home").unwrap().text(), "Hello from the Home Page");
        assert_eq!(client.put("/about").unwrap().text(), "Hello from the About Page");
        assert_eq!(client.get("/about").unwrap().status, 405);
        assert_eq!(client.get("/hello/Elbek").unwrap().text(), "Hello Elbek");
        assert_eq!(client.get("/books").unwrap().text(), "Books page");
        assert_eq!(client.post("/books").unwrap().text(), "Endpoint to create a book");
        assert_eq!(client.get("/new_handler").unwrap().text(), "From new handler");
        assert_eq!(
            client.get("/exception").unwrap().text(),
            "Error occurred: This is a test exception"
        );
    }

    #[test]
    fn test_demo_template_and_json() {
        let app = app();
        let client = TestClient::new(&app);

        let page = client.get("/template").unwrap();
        assert_eq!(page.content_type(), Some("text/html"));
        assert!(page.text().contains("<h1>Best Title</h1>"));

        let data = client.get("/json").unwrap();
        assert_eq!(data.content_type(), Some("application/json"));
        assert_eq!(data.json::<serde_json::Value>().unwrap()["type"], "json");
    }
}
