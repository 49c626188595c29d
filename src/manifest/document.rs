use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::ManagerError;
use crate::runtime::Runtime;

const DEPENDENCIES_KEY: &str = "dependencies";

/// A loaded project manifest.
///
/// The whole document is held as a raw JSON object so that members
/// unrelated to `dependencies` round-trip unchanged through a
/// read-modify-write cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    root: Map<String, Value>,
}

impl Manifest {
    /// Parses manifest content.
    ///
    /// Fails with [`ManagerError::ManifestParse`] when the content is not
    /// valid JSON or the top level is not an object.
    pub fn parse(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| ManagerError::ManifestParse(e.to_string()))?;

        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(ManagerError::ManifestParse(format!(
                "expected a JSON object at the top level, found {}",
                json_kind(&other)
            ))
            .into()),
        }
    }

    #[tracing::instrument(skip(runtime, path))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime.read_to_string(path)?;
        Self::parse(&content)
    }

    /// Serializes the manifest back to disk, overwriting the file.
    #[tracing::instrument(skip(self, runtime, path))]
    pub fn save<R: Runtime>(&self, runtime: &R, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(&Value::Object(self.root.clone()))?;
        runtime
            .write(path, content.as_bytes())
            .with_context(|| format!("Failed to save manifest to {:?}", path))
    }

    /// Returns the declared version for a package id, if any.
    ///
    /// Expanded dependency values (objects) report no version string.
    pub fn dependency_version(&self, id: &str) -> Option<&str> {
        self.dependencies_object()?.get(id).map(dependency_value)
    }

    /// True when the id appears in the dependencies section.
    pub fn has_dependency(&self, id: &str) -> bool {
        self.dependencies_object()
            .is_some_and(|deps| deps.contains_key(id))
    }

    /// Records `dependencies[id] = version`, creating the section when
    /// missing and overwriting any previous value.
    ///
    /// Fails with [`ManagerError::ManifestParse`] when the manifest carries
    /// a `dependencies` member that is not an object.
    pub fn set_dependency(&mut self, id: &str, version: &str) -> Result<()> {
        let deps = match self
            .root
            .entry(DEPENDENCIES_KEY.to_string())
            .or_insert_with(|| Value::Object(Map::new()))
        {
            Value::Object(deps) => deps,
            other => {
                return Err(ManagerError::ManifestParse(format!(
                    "'{}' must be a JSON object, found {}",
                    DEPENDENCIES_KEY,
                    json_kind(other)
                ))
                .into());
            }
        };

        deps.insert(id.to_string(), Value::String(version.to_string()));
        Ok(())
    }

    /// Deletes `dependencies[id]`. Returns whether the key existed.
    pub fn remove_dependency(&mut self, id: &str) -> bool {
        match self.root.get_mut(DEPENDENCIES_KEY) {
            Some(Value::Object(deps)) => deps.remove(id).is_some(),
            _ => false,
        }
    }

    /// Lists the declared dependencies as (id, version) pairs, in document
    /// order.
    pub fn dependencies(&self) -> Vec<(String, String)> {
        match self.dependencies_object() {
            Some(deps) => deps
                .iter()
                .map(|(id, value)| (id.clone(), dependency_value(value).to_string()))
                .collect(),
            None => Vec::new(),
        }
    }

    fn dependencies_object(&self) -> Option<&Map<String, Value>> {
        self.root.get(DEPENDENCIES_KEY)?.as_object()
    }
}

/// Version string of a dependency value; expanded (non-string) forms are
/// opaque and render empty.
fn dependency_value(value: &Value) -> &str {
    value.as_str().unwrap_or_default()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
