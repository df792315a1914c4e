//! Resource handlers: one object, several verbs, 405 for the rest.

use std::sync::Mutex;

use nimbus::{
    App, Body, HandlerResult, HttpRequest, HttpResponse, MethodTable, PathParams, Resource,
    TestClient,
};
use serde::Deserialize;

struct Books;

impl Books {
    fn get(&self, _: &HttpRequest, resp: &mut HttpResponse, _: &PathParams) -> HandlerResult {
        resp.set_text("Books page");
        Ok(())
    }

    fn post(&self, _: &HttpRequest, resp: &mut HttpResponse, _: &PathParams) -> HandlerResult {
        resp.set_text("Endpoint to create a book");
        Ok(())
    }
}

impl Resource for Books {
    fn methods(table: &mut MethodTable<Self>) {
        table.get(Self::get).post(Self::post);
    }
}

struct WriteOnlyBooks;

impl Resource for WriteOnlyBooks {
    fn methods(table: &mut MethodTable<Self>) {
        table.post(|_, _, resp, _| {
            resp.set_text("Endpoint to create a book");
            Ok(())
        });
    }
}

#[test]
fn test_resource_get_and_post() {
    let app = App::new();
    app.resource("/books", Books).unwrap();
    let client = TestClient::new(&app);

    assert_eq!(client.get("https://testserver/books").unwrap().text(), "Books page");
    assert_eq!(
        client.post("https://testserver/books").unwrap().text(),
        "Endpoint to create a book"
    );
}

#[test]
fn test_resource_method_not_allowed() {
    let app = App::new();
    app.resource("/books", WriteOnlyBooks).unwrap();

    let response = TestClient::new(&app).get("https://testserver/books").unwrap();
    assert_eq!(response.status, 405);
    assert_eq!(response.text(), "Method Not Allowed");
}

#[derive(Deserialize)]
struct NewTitle {
    title: String,
}

/// A resource that keeps state across requests and reads path params.
#[derive(Default)]
struct Shelf {
    titles: Mutex<Vec<String>>,
}

impl Shelf {
    fn list(&self, _: &HttpRequest, resp: &mut HttpResponse, params: &PathParams) -> HandlerResult {
        let titles = self.titles.lock().unwrap();
        resp.set_text(format!("{}: {}", params.get("shelf").unwrap_or_default(), titles.join(", ")));
        Ok(())
    }

    fn add(&self, req: &HttpRequest, resp: &mut HttpResponse, _: &PathParams) -> HandlerResult {
        let Body::Json(value) = &req.body else {
            anyhow::bail!("expected a JSON body");
        };
        let new: NewTitle = serde_json::from_value(value.clone())?;
        self.titles.lock().unwrap().push(new.title);
        resp.set_status(201);
        Ok(())
    }
}

impl Resource for Shelf {
    fn methods(table: &mut MethodTable<Self>) {
        table.get(Self::list).post(Self::add);
    }
}

#[test]
fn test_resource_state_and_params() {
    let app = App::new();
    app.resource("/shelves/{shelf}", Shelf::default()).unwrap();
    let client = TestClient::new(&app);

    let created = client
        .request_with_body(
            "POST",
            "/shelves/sci-fi",
            Body::Json(serde_json::json!({"title": "Dune"})),
        )
        .unwrap();
    assert_eq!(created.status, 201);

    assert_eq!(client.get("/shelves/sci-fi").unwrap().text(), "sci-fi: Dune");
    assert_eq!(client.delete("/shelves/sci-fi").unwrap().status, 405);

    let rejected = client
        .request_with_body("POST", "/shelves/sci-fi", Body::Text("Dune".into()))
        .unwrap();
    assert_eq!(rejected.status, 500);
}
