//! Javadoc side-channel.
//!
//! Documentation harvested while validating a task type is stored per type, then read
//! back during generation even when the declaring type is no longer available.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DescriptorError, Result};

/// Location of stored documentation under a resource root.
pub const META_INF_FOLDER: &str = "META-INF/plugin-javadoc";
pub const META_INF_EXTENSION: &str = ".json";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypeJavadoc {
    #[serde(default)]
    pub javadoc: Option<String>,
    /// Keyed by property name, or `name()` for methods.
    #[serde(default)]
    pub elements: BTreeMap<String, String>,
}

impl TypeJavadoc {
    pub fn is_empty(&self) -> bool {
        self.javadoc.is_none() && self.elements.is_empty()
    }

    pub fn element(&self, key: &str) -> Option<&str> {
        self.elements.get(key).map(String::as_str)
    }

    pub fn method(&self, name: &str) -> Option<&str> {
        self.element(&format!("{name}()"))
    }
}

pub trait JavadocStore {
    /// Missing entries read as empty documentation.
    fn read(&self, type_name: &str) -> Result<TypeJavadoc>;
    fn write(&mut self, type_name: &str, javadoc: &TypeJavadoc) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryJavadocStore {
    entries: HashMap<String, TypeJavadoc>,
}

impl MemoryJavadocStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }
}

impl JavadocStore for MemoryJavadocStore {
    fn read(&self, type_name: &str) -> Result<TypeJavadoc> {
        Ok(self.entries.get(type_name).cloned().unwrap_or_default())
    }

    fn write(&mut self, type_name: &str, javadoc: &TypeJavadoc) -> Result<()> {
        self.entries.insert(type_name.to_string(), javadoc.clone());
        Ok(())
    }
}

/// Stores one JSON file per type at `<root>/META-INF/plugin-javadoc/<type>.json`.
#[derive(Debug, Clone)]
pub struct DirJavadocStore {
    root: PathBuf,
}

impl DirJavadocStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, type_name: &str) -> PathBuf {
        self.root
            .join(META_INF_FOLDER)
            .join(format!("{type_name}{META_INF_EXTENSION}"))
    }
}

impl JavadocStore for DirJavadocStore {
    fn read(&self, type_name: &str) -> Result<TypeJavadoc> {
        let path = self.path_for(type_name);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(TypeJavadoc::default())
            }
            Err(source) => return Err(DescriptorError::Io { path, source }),
        };
        serde_json::from_slice(&bytes).map_err(|source| DescriptorError::Json {
            path: Some(path),
            source,
        })
    }

    fn write(&mut self, type_name: &str, javadoc: &TypeJavadoc) -> Result<()> {
        let path = self.path_for(type_name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| DescriptorError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let bytes = serde_json::to_vec_pretty(javadoc).map_err(|source| DescriptorError::Json {
            path: Some(path.clone()),
            source,
        })?;
        std::fs::write(&path, bytes).map_err(|source| DescriptorError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(type_name, path = %path.display(), "wrote javadoc metadata");
        Ok(())
    }
}
