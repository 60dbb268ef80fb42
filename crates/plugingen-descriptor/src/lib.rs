//! Descriptor metadata consumed by the plugin generator.
//!
//! The generator never inspects source types directly. It goes through
//! [`DescriptorProvider`], which answers "what is this type" and "what does it
//! contain". [`MemoryDescriptors`] is the provider used by tests and by the CLI, fed
//! from a JSON manifest.

mod annotations;
mod class;
mod error;
pub mod javadoc;
mod types;

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

pub use annotations::{
    GenerateGradlePlugin, GenerateGradleTask, GenerateMavenMojo, GradleArtifactKind,
    PathSensitivity, PluginTaskParameter,
};
pub use class::{
    ClassDescriptor, ClassKind, ConstructorData, FieldData, MethodData, ParameterData,
    PropertyData, Visibility,
};
pub use error::{DescriptorError, Result};
pub use javadoc::{DirJavadocStore, JavadocStore, MemoryJavadocStore, TypeJavadoc};
pub use types::{CollectionKind, JavaType, ParseTypeError, TypeClass};

/// Packages whose types are never copied into the generated model.
pub const EXCLUDED_PACKAGES: [&str; 3] = ["java.lang", "java.util", "java.io"];

pub trait DescriptorProvider {
    fn load(&self, name: &str) -> Option<&ClassDescriptor>;

    fn classify(&self, ty: &JavaType) -> TypeClass {
        if ty.is_void() {
            return TypeClass::Void;
        }
        if ty.is_array() || ty.is_wildcard() {
            return TypeClass::Passthrough;
        }
        if let Some(primitive) = ty.primitive() {
            return TypeClass::Primitive(primitive);
        }
        if let Some(kind) = CollectionKind::of(&ty.name) {
            return match ty.args.as_slice() {
                [element] => TypeClass::Collection {
                    kind,
                    element: element.clone(),
                },
                _ => TypeClass::Passthrough,
            };
        }
        if ty.is_map() {
            return TypeClass::Map;
        }
        match self.load(&ty.name) {
            Some(class) if class.is_enum() => TypeClass::Enum,
            Some(_) if !EXCLUDED_PACKAGES.contains(&ty.package_name()) => TypeClass::Pojo,
            _ => TypeClass::Passthrough,
        }
    }

    fn is_model(&self, ty: &JavaType) -> bool {
        self.classify(ty).is_model()
    }

    fn properties(&self, name: &str) -> &[PropertyData] {
        self.load(name)
            .map(|class| class.properties.as_slice())
            .unwrap_or_default()
    }

    fn methods(&self, name: &str) -> &[MethodData] {
        self.load(name)
            .map(|class| class.methods.as_slice())
            .unwrap_or_default()
    }
}

/// In-memory provider for tests and manifest-driven runs.
#[derive(Debug, Default)]
pub struct MemoryDescriptors {
    classes: HashMap<String, ClassDescriptor>,
}

#[derive(Deserialize)]
struct Manifest {
    types: Vec<ClassDescriptor>,
}

impl MemoryDescriptors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a descriptor.
    pub fn add(&mut self, class: ClassDescriptor) {
        self.classes.insert(class.name.clone(), class);
    }

    pub fn with(mut self, class: ClassDescriptor) -> Self {
        self.add(class);
        self
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// All descriptors, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &ClassDescriptor> {
        let mut classes: Vec<_> = self.classes.values().collect();
        classes.sort_by(|a, b| a.name.cmp(&b.name));
        classes.into_iter()
    }

    /// Parses a `{ "types": [...] }` manifest.
    pub fn from_manifest_str(json: &str) -> Result<Self> {
        let manifest: Manifest =
            serde_json::from_str(json).map_err(|source| DescriptorError::Json { path: None, source })?;
        Self::from_types(manifest.types)
    }

    pub fn from_manifest_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| DescriptorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest: Manifest =
            serde_json::from_str(&text).map_err(|source| DescriptorError::Json {
                path: Some(path.to_path_buf()),
                source,
            })?;
        let descriptors = Self::from_types(manifest.types)?;
        tracing::debug!(path = %path.display(), types = descriptors.len(), "loaded descriptor manifest");
        Ok(descriptors)
    }

    fn from_types(types: Vec<ClassDescriptor>) -> Result<Self> {
        let mut descriptors = Self::new();
        for class in types {
            if descriptors.classes.contains_key(&class.name) {
                return Err(DescriptorError::DuplicateType { name: class.name });
            }
            descriptors.add(class);
        }
        Ok(descriptors)
    }
}

impl DescriptorProvider for MemoryDescriptors {
    fn load(&self, name: &str) -> Option<&ClassDescriptor> {
        self.classes.get(name)
    }
}
