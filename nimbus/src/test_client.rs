//! In-process client that drives an [`App`] without a socket.

use crate::errors::NimbusError;
use crate::http_helpers::{Body, HttpRequest, HttpResponse};
use crate::nimbus_application::App;

pub struct TestClient<'a> {
    app: &'a App,
}

impl<'a> TestClient<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }

    pub fn send(&self, request: HttpRequest) -> Result<HttpResponse, NimbusError> {
        self.app.handle(request)
    }

    pub fn request(&self, method: &str, url: &str) -> Result<HttpResponse, NimbusError> {
        self.send(HttpRequest::new(method, url)?)
    }

    pub fn request_with_body(
        &self,
        method: &str,
        url: &str,
        body: Body,
    ) -> Result<HttpResponse, NimbusError> {
        self.send(HttpRequest::new(method, url)?.with_body(body))
    }

    pub fn get(&self, url: &str) -> Result<HttpResponse, NimbusError> {
        self.request("GET", url)
    }

    pub fn post(&self, url: &str) -> Result<HttpResponse, NimbusError> {
        self.request("POST", url)
    }

    pub fn put(&self, url: &str) -> Result<HttpResponse, NimbusError> {
        self.request("PUT", url)
    }

    pub fn patch(&self, url: &str) -> Result<HttpResponse, NimbusError> {
        self.request("PATCH", url)
    }

    pub fn delete(&self, url: &str) -> Result<HttpResponse, NimbusError> {
        self.request("DELETE", url)
    }

    pub fn head(&self, url: &str) -> Result<HttpResponse, NimbusError> {
        self.request("HEAD", url)
    }

    pub fn options(&self, url: &str) -> Result<HttpResponse, NimbusError> {
        self.request("OPTIONS", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_can_be_sent_by_test_client() {
        let app = App::new();
        app.route("/home", |_, resp, _| {
            resp.set_text("Hello from home");
            Ok(())
        })
        .unwrap();

        let client = TestClient::new(&app);
        let response = client.get("https://testserver/home").unwrap();
        assert_eq!(response.text(), "Hello from home");
        assert_eq!(client.delete("https://testserver/home").unwrap().status, 405);
    }

    #[test]
    fn test_body_reaches_handler() {
        let app = App::new();
        app.route_with_methods("/echo", [crate::HttpMethod::POST], |req, resp, _| {
            resp.set_text(format!("Echo: {}", req.body.as_text()));
            Ok(())
        })
        .unwrap();

        let response = TestClient::new(&app)
            .request_with_body("POST", "/echo", Body::Text("test message".into()))
            .unwrap();
        assert_eq!(response.text(), "Echo: test message");
    }
}
