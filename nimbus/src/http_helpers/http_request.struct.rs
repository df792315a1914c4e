use std::collections::HashMap;

use url::Url;

use super::{Body, Extensions};
use crate::errors::NimbusError;

// Origin-form URLs ("/home?x=1") are resolved against this base.
const DEFAULT_BASE: &str = "http://localhost";

#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// Verb exactly as received; unknown verbs are answered with 405.
    pub method: String,
    /// URL-decoded path, used for route matching.
    ///
    /// Dot segments are resolved first (`/files/..` becomes `/`), so a
    /// `{param}` never captures `.` or `..`.
    pub path: String,
    /// Full request URL, kept for observability.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query_params: HashMap<String, String>,
    pub body: Body,
    pub extensions: Extensions,
}

impl HttpRequest {
    /// Build a request from a verb and either an absolute URL or an
    /// origin-form path.
    pub fn new(method: impl Into<String>, url: &str) -> Result<Self, NimbusError> {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            // Appended rather than joined, so `//a/b` stays a path.
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let separator = if url.starts_with('/') { "" } else { "/" };
                Url::parse(&format!("{}{}{}", DEFAULT_BASE, separator, url))
                    .map_err(|e| NimbusError::InvalidUrl(format!("{}: {}", url, e)))?
            }
            Err(e) => return Err(NimbusError::InvalidUrl(format!("{}: {}", url, e))),
        };

        // Escapes that are not UTF-8 decode lossily, like request bodies.
        let decoded = urlencoding::decode_binary(parsed.path().as_bytes());
        let path = String::from_utf8_lossy(&decoded).into_owned();

        let query_params = parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        Ok(Self {
            method: method.into(),
            path,
            url: parsed.to_string(),
            headers: Vec::new(),
            query_params,
            body: Body::Empty,
            extensions: Extensions::new(),
        })
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Get a reference to the headers
    pub fn headers(&self) -> &Vec<(String, String)> {
        &self.headers
    }

    /// Get a mutable reference to the headers
    pub fn headers_mut(&mut self) -> &mut Vec<(String, String)> {
        &mut self.headers
    }

    /// Get a specific header value by name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }

    pub fn query(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(String::as_str)
    }
}
