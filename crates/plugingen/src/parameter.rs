use plugingen_descriptor::{JavaType, PathSensitivity, PropertyData, TypeJavadoc};
use plugingen_model::TypeRef;

use crate::mirror::{Conversion, MirroredRef};

/// Normalized configuration of one task parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterConfig {
    pub property: PropertyData,
    pub required: bool,
    pub default_value: Option<String>,
    pub internal: bool,
    pub directory: bool,
    pub output: bool,
    pub global_property: Option<String>,
    pub javadoc: String,
    /// Type used by generated code: the model copy when the source type was mirrored.
    pub ty: TypeRef,
    pub conversion: Conversion,
    pub path_sensitivity: PathSensitivity,
}

impl ParameterConfig {
    pub fn name(&self) -> &str {
        &self.property.name
    }

    pub fn source_type(&self) -> &JavaType {
        &self.property.ty
    }
}

/// Builds the parameter configuration of `property`.
///
/// `mirrored` is the Type Mirror's result for the property type, if any. Default values
/// are not checked against the type here; builders reject unsupported ones when they
/// synthesize the default expression.
pub fn resolve(
    javadoc: &TypeJavadoc,
    property: &PropertyData,
    mirrored: Option<MirroredRef>,
) -> ParameterConfig {
    let doc = javadoc
        .element(&property.name)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Configurable {} parameter.", property.name));
    let MirroredRef { ty, conversion } =
        mirrored.unwrap_or_else(|| MirroredRef::passthrough(&property.ty));

    let Some(annotation) = &property.parameter else {
        return ParameterConfig {
            property: property.clone(),
            required: false,
            default_value: None,
            internal: false,
            directory: false,
            output: false,
            global_property: None,
            javadoc: doc,
            ty,
            conversion,
            path_sensitivity: PathSensitivity::Absolute,
        };
    };

    let mut required = annotation.required;
    if required && annotation.default_value.is_some() {
        tracing::warn!(
            parameter = %property.name,
            "parameter is required but has a default value, treating it as optional"
        );
        required = false;
    }

    ParameterConfig {
        property: property.clone(),
        required,
        default_value: annotation.default_value.clone(),
        internal: annotation.internal,
        directory: annotation.directory,
        output: annotation.output,
        global_property: annotation.global_property.clone(),
        javadoc: doc,
        ty,
        conversion,
        path_sensitivity: annotation.path_sensitivity,
    }
}
