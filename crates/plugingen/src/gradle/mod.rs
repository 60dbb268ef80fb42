//! Gradle plugin source builders.
//!
//! Each builder turns a [`GradlePluginConfig`] into the object definitions of one
//! [`GradleArtifactKind`]. The session picks builders by kind.

mod extension;
mod plugin;
mod specification;
mod task;

use plugingen_descriptor::{CollectionKind, GradleArtifactKind};
use plugingen_model::{Expr, Literal, ObjectDef, Primitive, TypeRef};

pub use extension::GradleExtensionBuilder;
pub use plugin::GradlePluginBuilder;
pub use specification::GradleSpecificationBuilder;
pub use task::GradleTaskBuilder;

use crate::config::GradlePluginConfig;
use crate::error::{GenerateError, Result};
use crate::parameter::ParameterConfig;

pub const TASK_SUFFIX: &str = "Task";
pub const EXTENSION_SUFFIX: &str = "Extension";
pub const SPECIFICATION_SUFFIX: &str = "Specification";
pub const PLUGIN_SUFFIX: &str = "Plugin";

pub(crate) const ACTION: &str = "org.gradle.api.Action";
pub(crate) const CONFIGURATION: &str = "org.gradle.api.artifacts.Configuration";
pub(crate) const CONFIGURABLE_FILE_COLLECTION: &str = "org.gradle.api.file.ConfigurableFileCollection";
pub(crate) const PROJECT: &str = "org.gradle.api.Project";

pub trait GradleTypeBuilder {
    fn kind(&self) -> GradleArtifactKind;

    fn build(&self, plugin: &GradlePluginConfig) -> Result<Vec<ObjectDef>>;
}

/// One builder per supported artifact kind.
pub fn default_builders() -> Vec<Box<dyn GradleTypeBuilder>> {
    vec![
        Box::new(GradleTaskBuilder),
        Box::new(GradleExtensionBuilder),
        Box::new(GradleSpecificationBuilder),
        Box::new(GradlePluginBuilder),
    ]
}

pub(crate) fn task_type(package: &str, prefix: &str) -> TypeRef {
    TypeRef::class(format!("{package}.{prefix}{TASK_SUFFIX}"))
}

pub(crate) fn specification_type(package: &str, prefix: &str) -> TypeRef {
    TypeRef::class(format!("{package}.{prefix}{SPECIFICATION_SUFFIX}"))
}

pub(crate) fn extension_type_name(plugin: &GradlePluginConfig) -> String {
    format!("{}.{}{EXTENSION_SUFFIX}", plugin.package_name, plugin.name_prefix)
}

pub(crate) fn default_extension_type_name(plugin: &GradlePluginConfig) -> String {
    format!(
        "{}.Default{}{EXTENSION_SUFFIX}",
        plugin.package_name, plugin.name_prefix
    )
}

/// Lazy Gradle property type holding a parameter's value.
pub fn gradle_property(parameter: &ParameterConfig) -> TypeRef {
    let source = parameter.source_type();
    if source.is_file() {
        return if parameter.directory {
            TypeRef::class("org.gradle.api.file.DirectoryProperty")
        } else {
            TypeRef::class("org.gradle.api.file.RegularFileProperty")
        };
    }
    let args = parameter.ty.type_args();
    if source.is_map() && args.len() == 2 {
        return TypeRef::parameterized("org.gradle.api.provider.MapProperty", args.to_vec());
    }
    if let (Some(kind), [element]) = (source.collection_kind(), args) {
        let raw = match kind {
            CollectionKind::List => "org.gradle.api.provider.ListProperty",
            CollectionKind::Set => "org.gradle.api.provider.SetProperty",
        };
        return TypeRef::parameterized(raw, vec![element.clone()]);
    }
    TypeRef::parameterized("org.gradle.api.provider.Property", vec![boxed(&parameter.ty)])
}

fn boxed(ty: &TypeRef) -> TypeRef {
    match ty {
        TypeRef::Primitive(primitive) => TypeRef::class(primitive.boxed_name()),
        other => other.clone(),
    }
}

/// Expression for a parameter's declared default value.
///
/// Strings, primitives and their wrappers become typed constants, model enums a
/// reference to the constant. Anything else cannot carry a default.
pub fn create_default(owner: &str, parameter: &ParameterConfig) -> Result<Expr> {
    let value = parameter.default_value.as_deref().unwrap_or_default();
    let unsupported = || GenerateError::UnsupportedDefaultValue {
        type_name: owner.to_string(),
        parameter: parameter.name().to_string(),
        ty: parameter.ty.to_string(),
    };
    match &parameter.ty {
        TypeRef::Primitive(primitive) => parse_constant(owner, parameter, *primitive, value),
        TypeRef::Class(name) if name == "java.lang.String" => Ok(Expr::string(value)),
        TypeRef::Class(name) => match Primitive::unboxed(name) {
            Some(primitive) => parse_constant(owner, parameter, primitive, value),
            None => Err(unsupported()),
        },
        // Constants were checked against the source enum when the task was resolved.
        ty if ty.is_generated_enum() => Ok(ty.static_field(value.trim(), ty.clone())),
        _ => Err(unsupported()),
    }
}

fn parse_constant(
    owner: &str,
    parameter: &ParameterConfig,
    primitive: Primitive,
    value: &str,
) -> Result<Expr> {
    let trimmed = value.trim();
    let literal = match primitive {
        Primitive::Boolean => trimmed.parse().ok().map(Literal::Boolean),
        Primitive::Byte => trimmed.parse().ok().map(Literal::Byte),
        Primitive::Short => trimmed.parse().ok().map(Literal::Short),
        Primitive::Char => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Some(Literal::Char(ch)),
                _ => None,
            }
        }
        Primitive::Int => trimmed.parse().ok().map(Literal::Int),
        Primitive::Long => trimmed.parse().ok().map(Literal::Long),
        Primitive::Float => trimmed.parse().ok().map(Literal::Float),
        Primitive::Double => trimmed.parse().ok().map(Literal::Double),
    };
    literal.map(Expr::Literal).ok_or_else(|| GenerateError::InvalidDefaultValue {
        type_name: owner.to_string(),
        parameter: parameter.name().to_string(),
        value: value.to_string(),
        ty: primitive.keyword().to_string(),
    })
}
