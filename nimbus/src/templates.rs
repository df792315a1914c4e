//! Template rendering seam.
//!
//! The core only needs `render(name, context) -> html`. Two renderers ship
//! with it: [`FileTemplates`] reads templates from a directory and
//! [`MemoryTemplates`] keeps them in memory. Both substitute `{{ key }}`
//! placeholders from the top level of a JSON object context.

use std::io;
use std::path::{Component, Path, PathBuf};

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::errors::NimbusError;

pub trait TemplateRenderer: Send + Sync {
    fn render(&self, name: &str, context: &Value) -> Result<String, NimbusError>;
}

#[derive(Debug, Clone)]
pub struct FileTemplates {
    dir: PathBuf,
}

impl FileTemplates {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, NimbusError> {
        let relative = Path::new(name);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if name.is_empty() || escapes {
            return Err(NimbusError::Template(format!(
                "template name '{}' must stay inside the templates directory",
                name
            )));
        }
        Ok(self.dir.join(relative))
    }
}

impl TemplateRenderer for FileTemplates {
    fn render(&self, name: &str, context: &Value) -> Result<String, NimbusError> {
        let path = self.path_for(name)?;
        let source = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => NimbusError::TemplateNotFound(name.to_string()),
            _ => NimbusError::Io(e),
        })?;
        substitute(name, &source, context)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTemplates {
    sources: FxHashMap<String, String>,
}

impl MemoryTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.sources.insert(name.into(), source.into());
        self
    }
}

impl TemplateRenderer for MemoryTemplates {
    fn render(&self, name: &str, context: &Value) -> Result<String, NimbusError> {
        let source = self
            .sources
            .get(name)
            .ok_or_else(|| NimbusError::TemplateNotFound(name.to_string()))?;
        substitute(name, source, context)
    }
}

/// Replace each `{{ key }}` with the context entry of that name. Strings go
/// in verbatim, other values as JSON text, missing keys as nothing.
fn substitute(name: &str, source: &str, context: &Value) -> Result<String, NimbusError> {
    let mut output = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(open) = rest.find("{{") {
        output.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        let close = after_open.find("}}").ok_or_else(|| {
            NimbusError::Template(format!("unterminated placeholder in '{}'", name))
        })?;

        let key = after_open[..close].trim();
        match context.get(key) {
            Some(Value::String(text)) => output.push_str(text),
            Some(Value::Null) | None => {}
            Some(other) => output.push_str(&other.to_string()),
        }
        rest = &after_open[close + 2..];
    }
    output.push_str(rest);
    Ok(output)
}
