use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::annotations::{GenerateGradlePlugin, GenerateMavenMojo, PluginTaskParameter};
use crate::javadoc::TypeJavadoc;
use crate::types::JavaType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    #[default]
    Class,
    Record,
    Enum,
    Interface,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    PackagePrivate,
    Private,
}

impl Visibility {
    fn private() -> Self {
        Visibility::Private
    }

    /// Reachable from generated code placed in another package of the same build.
    pub fn is_accessible(self) -> bool {
        matches!(self, Visibility::Public | Visibility::PackagePrivate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterData {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: JavaType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldData {
    pub name: String,
    #[serde(default = "Visibility::private")]
    pub visibility: Visibility,
}

/// A readable bean property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyData {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: JavaType,
    /// Name of the write method, when there is one.
    #[serde(default)]
    pub setter: Option<String>,
    #[serde(default)]
    pub field: Option<FieldData>,
    #[serde(default)]
    pub parameter: Option<PluginTaskParameter>,
}

impl PropertyData {
    pub fn new(name: impl Into<String>, ty: JavaType) -> Self {
        Self {
            name: name.into(),
            ty,
            setter: None,
            field: None,
            parameter: None,
        }
    }

    pub fn with_setter(mut self) -> Self {
        self.setter = Some(plugingen_model::naming::setter_name(&self.name));
        self
    }

    pub fn with_field(mut self, visibility: Visibility) -> Self {
        self.field = Some(FieldData {
            name: self.name.clone(),
            visibility,
        });
        self
    }

    pub fn with_parameter(mut self, parameter: PluginTaskParameter) -> Self {
        self.parameter = Some(parameter);
        self
    }

    /// Backing field when generated code may assign it directly.
    pub fn accessible_field(&self) -> Option<&FieldData> {
        self.field.as_ref().filter(|f| f.visibility.is_accessible())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodData {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterData>,
    #[serde(default = "JavaType::void", rename = "returns")]
    pub return_type: JavaType,
    /// Carries the task executable marker.
    #[serde(default)]
    pub executable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorData {
    #[serde(default)]
    pub parameters: Vec<ParameterData>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub primary: bool,
}

/// Introspected shape of one source type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDescriptor {
    pub name: String,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default)]
    pub javadoc: TypeJavadoc,
    #[serde(default)]
    pub enum_constants: Vec<String>,
    #[serde(default)]
    pub properties: Vec<PropertyData>,
    #[serde(default)]
    pub methods: Vec<MethodData>,
    #[serde(default)]
    pub constructors: Vec<ConstructorData>,
    /// Carries the plugin task marker.
    #[serde(default)]
    pub plugin_task: bool,
    #[serde(default)]
    pub gradle_plugin: Option<GenerateGradlePlugin>,
    #[serde(default)]
    pub maven_mojos: Vec<GenerateMavenMojo>,
}

impl ClassDescriptor {
    pub fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            javadoc: TypeJavadoc::default(),
            enum_constants: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            plugin_task: false,
            gradle_plugin: None,
            maven_mojos: Vec::new(),
        }
    }

    pub fn simple_name(&self) -> &str {
        plugingen_model::simple_name(&self.name)
    }

    pub fn package_name(&self) -> &str {
        plugingen_model::package_name(&self.name)
    }

    pub fn is_record(&self) -> bool {
        self.kind == ClassKind::Record
    }

    pub fn is_enum(&self) -> bool {
        self.kind == ClassKind::Enum
    }

    pub fn java_type(&self) -> JavaType {
        JavaType::new(self.name.clone())
    }

    pub fn property(&self, name: &str) -> Option<&PropertyData> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn executable_methods(&self) -> impl Iterator<Item = &MethodData> {
        self.methods.iter().filter(|m| m.executable)
    }

    /// The constructor generated code should call.
    ///
    /// Records use their canonical constructor. Classes use the one marked primary, else
    /// the only non-private one, else a non-private no-argument one. A type without
    /// declared constructors has an implicit public no-argument (or canonical) one.
    pub fn primary_constructor(&self) -> Option<Cow<'_, ConstructorData>> {
        if self.constructors.is_empty() {
            let parameters = if self.is_record() {
                self.properties
                    .iter()
                    .map(|p| ParameterData {
                        name: p.name.clone(),
                        ty: p.ty.clone(),
                    })
                    .collect()
            } else {
                Vec::new()
            };
            return Some(Cow::Owned(ConstructorData {
                parameters,
                visibility: Visibility::Public,
                primary: true,
            }));
        }

        let candidates: Vec<&ConstructorData> = self
            .constructors
            .iter()
            .filter(|c| c.visibility != Visibility::Private)
            .collect();
        if let Some(primary) = candidates.iter().find(|c| c.primary) {
            return Some(Cow::Borrowed(*primary));
        }
        if self.is_record() {
            let canonical = candidates.iter().find(|c| {
                c.parameters.len() == self.properties.len()
                    && c.parameters
                        .iter()
                        .zip(&self.properties)
                        .all(|(param, prop)| param.name == prop.name)
            });
            return canonical.map(|c| Cow::Borrowed(*c));
        }
        if let [only] = candidates.as_slice() {
            return Some(Cow::Borrowed(*only));
        }
        candidates
            .into_iter()
            .find(|c| c.parameters.is_empty())
            .map(Cow::Borrowed)
    }
}
