use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashSet;

use super::PathParams;
use crate::errors::NimbusError;

/// One `/`-separated piece of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Literal(String),
    Param(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Param(name) => write!(f, "{{{}}}", name),
        }
    }
}

impl FromStr for Segment {
    type Err = String;

    /// A parameter occupies the whole segment: `{name}`. Braces anywhere
    /// else are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("empty segment".to_string());
        }
        if let Some(name) = s.strip_prefix('{').and_then(|rest| rest.strip_suffix('}')) {
            if name.is_empty() {
                return Err("parameter name is empty".to_string());
            }
            if name.contains(['{', '}']) {
                return Err(format!("malformed parameter '{}'", s));
            }
            return Ok(Segment::Param(name.to_string()));
        }
        if s.contains(['{', '}']) {
            return Err(format!("parameter must occupy a whole segment, found '{}'", s));
        }
        Ok(Segment::Literal(s.to_string()))
    }
}

/// A parsed route pattern such as `/hello/{name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    pub fn parse(pattern: &str) -> Result<Self, NimbusError> {
        let mut segments = Vec::new();
        let mut names = FxHashSet::default();

        for piece in split_path(pattern) {
            let segment = Segment::from_str(piece)
                .map_err(|reason| NimbusError::invalid_pattern(pattern, reason))?;
            if let Segment::Param(name) = &segment {
                if !names.insert(name.clone()) {
                    return Err(NimbusError::invalid_pattern(
                        pattern,
                        format!("parameter '{}' appears more than once", name),
                    ));
                }
            }
            segments.push(segment);
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match a concrete path in full. Literals compare case-sensitively; a
    /// parameter captures exactly one non-empty path segment.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let pieces: Vec<&str> = split_path(path).collect();
        if pieces.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::new();
        for (segment, piece) in self.segments.iter().zip(pieces) {
            match segment {
                Segment::Literal(text) if text == piece => {}
                Segment::Param(name) if !piece.is_empty() => params.push(name, piece),
                _ => return None,
            }
        }
        Some(params)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// Leading and trailing slashes are dropped; interior empty pieces are kept.
fn split_path(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.trim_matches('/');
    trimmed.split('/').filter(move |_| !trimmed.is_empty())
}
