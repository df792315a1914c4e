//! Exception handler slot: replacement, bypass for routing outcomes, and
//! failures that escape it.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use nimbus::{App, HttpMethod, NimbusError, TestClient};

fn failing_app() -> App {
    let app = App::new();
    app.route("/exception", |_, _, _| {
        Err(anyhow::anyhow!("This is a test exception"))
    })
    .unwrap();
    app
}

#[test]
fn test_custom_exception_handler() {
    let app = failing_app();
    app.add_exception_handler(|_, resp, exc| {
        resp.set_text(format!("Error occurred: {}", exc));
        Ok(())
    });

    let response = TestClient::new(&app).get("https://testserver/exception").unwrap();
    assert_eq!(response.text(), "Error occurred: This is a test exception");
}

#[test]
fn test_default_exception_handler() {
    let app = failing_app();
    let response = TestClient::new(&app).get("/exception").unwrap();
    assert_eq!(response.status, 500);
    assert_eq!(response.text(), "Internal Server Error");
}

#[test]
fn test_last_exception_handler_wins() {
    let app = failing_app();
    app.add_exception_handler(|_, resp, _| {
        resp.set_text("first");
        Ok(())
    });
    app.add_exception_handler(|_, resp, _| {
        resp.set_text("second");
        Ok(())
    });

    assert_eq!(TestClient::new(&app).get("/exception").unwrap().text(), "second");
}

#[test]
fn test_handler_panic_is_recovered() {
    let app = App::new();
    app.route("/panic", |_, _, _| panic!("handler blew up")).unwrap();
    app.add_exception_handler(|_, resp, exc| {
        resp.set_status(500).set_text(format!("Error occurred: {}", exc));
        Ok(())
    });

    let response = TestClient::new(&app).get("/panic").unwrap();
    assert_eq!(response.status, 500);
    assert_eq!(response.text(), "Error occurred: handler blew up");
}

#[test]
fn test_routing_outcomes_bypass_exception_handler() {
    let app = App::new();
    app.route_with_methods("/books", [HttpMethod::POST], |_, _, _| Ok(()))
        .unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    app.add_exception_handler(move |_, _, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    let client = TestClient::new(&app);

    assert_eq!(client.get("/missing").unwrap().status, 404);
    assert_eq!(client.get("/books").unwrap().status, 405);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_failing_exception_handler_propagates() {
    let app = failing_app();
    app.add_exception_handler(|_, _, _| Err(anyhow::anyhow!("slot failed too")));

    let err = TestClient::new(&app).get("/exception").unwrap_err();
    assert!(matches!(err, NimbusError::ExceptionHandlerFailed(_)));
    assert!(err.to_string().contains("slot failed too"));
}
