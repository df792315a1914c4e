use std::sync::Arc;

use nimbus::{App, HttpMethod};
use serde_json::{Value, json};
use tokio::net::TcpListener;

async fn spawn(app: App) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = nimbus_axum::router(Arc::new(app));
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn demo_app() -> App {
    let app = App::new();
    app.route("/hello/{name}", |_, resp, params| {
        resp.set_text(format!("Hello {}", params.get("name").unwrap_or_default()));
        Ok(())
    })
    .unwrap();
    app.route_with_methods("/echo", [HttpMethod::POST], |req, resp, _| {
        resp.set_json(&json!({ "received": req.body.as_text() }))?;
        Ok(())
    })
    .unwrap();
    app.route("/exception", |_, _, _| Err(anyhow::anyhow!("boom")))
        .unwrap();
    app
}

#[tokio::test]
async fn test_routes_over_http() {
    let base = spawn(demo_app()).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{}/hello/Elbek", base)).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "Hello Elbek");

    let resp = client.get(format!("{}/missing", base)).send().await.unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(resp.text().await.unwrap(), "Not Found");

    let resp = client.get(format!("{}/echo", base)).send().await.unwrap();
    assert_eq!(resp.status(), 405);
}

#[tokio::test]
async fn test_json_round_trip() {
    let base = spawn(demo_app()).await;

    let resp = reqwest::Client::new()
        .post(format!("{}/echo", base))
        .body("ping")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "received": "ping" }));
}

#[tokio::test]
async fn test_default_exception_handler_over_http() {
    let base = spawn(demo_app()).await;
    let resp = reqwest::get(format!("{}/exception", base)).await.unwrap();
    assert_eq!(resp.status(), 500);
    assert_eq!(resp.text().await.unwrap(), "Internal Server Error");
}

#[tokio::test]
async fn test_failing_exception_handler_becomes_bare_500() {
    let app = demo_app();
    app.add_exception_handler(|_, _, _| Err(anyhow::anyhow!("handler for handlers broke")));
    let base = spawn(app).await;

    let resp = reqwest::get(format!("{}/exception", base)).await.unwrap();
    assert_eq!(resp.status(), 500);
}
