use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Body {
    #[default]
    Empty,
    Text(String),
    Html(String),
    Json(Value),
}

impl Body {
    /// Body rendered as the text that goes on the wire.
    pub fn as_text(&self) -> String {
        match self {
            Body::Empty => String::new(),
            Body::Text(text) | Body::Html(text) => text.clone(),
            Body::Json(value) => value.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Body::Empty => true,
            Body::Text(text) | Body::Html(text) => text.is_empty(),
            Body::Json(_) => false,
        }
    }
}
