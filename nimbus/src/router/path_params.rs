use std::fmt;
use std::str::FromStr;

/// Values captured by `{name}` segments, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    entries: Vec<(String, String)>,
}

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: &str, value: &str) {
        self.entries.push((name.to_string(), value.to_string()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Parse a captured value into `T`.
    pub fn parse<T: FromStr>(&self, name: &str) -> Result<T, PathError>
    where
        T::Err: fmt::Display,
    {
        let value = self
            .get(name)
            .ok_or_else(|| PathError::NotFound(name.to_string()))?;

        value
            .parse::<T>()
            .map_err(|e| PathError::ParseError(format!("{}: {}", name, e)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum PathError {
    /// The parameter was not captured by the matched pattern
    NotFound(String),
    /// The captured text could not be parsed
    ParseError(String),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::NotFound(name) => write!(f, "Path parameter '{}' not found", name),
            PathError::ParseError(msg) => write!(f, "Failed to parse path parameter: {}", msg),
        }
    }
}

impl std::error::Error for PathError {}
