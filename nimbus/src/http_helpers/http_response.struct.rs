use serde::{Serialize, de::DeserializeOwned};

use super::Body;
use crate::errors::NimbusError;

pub const CONTENT_TYPE: &str = "Content-Type";

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpResponse {
    pub fn new() -> Self {
        Self {
            status: 200,
            headers: vec![],
            body: Body::Empty,
        }
    }

    pub fn set_status(&mut self, status: u16) -> &mut Self {
        self.status = status;
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.body = Body::Text(text.into());
        self.set_header(CONTENT_TYPE, "text/plain")
    }

    pub fn set_html(&mut self, html: impl Into<String>) -> &mut Self {
        self.body = Body::Html(html.into());
        self.set_header(CONTENT_TYPE, "text/html")
    }

    pub fn set_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<&mut Self, NimbusError> {
        self.body = Body::Json(serde_json::to_value(value)?);
        Ok(self.set_header(CONTENT_TYPE, "application/json"))
    }

    /// Insert a header, replacing any existing value with the same name.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some(existing) => existing.1 = value,
            None => self.headers.push((name.to_string(), value)),
        }
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE)
    }

    pub fn text(&self) -> String {
        self.body.as_text()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, NimbusError> {
        let value = match &self.body {
            Body::Json(value) => serde_json::from_value(value.clone())?,
            other => serde_json::from_str(&other.as_text())?,
        };
        Ok(value)
    }
}
