//! Maven mojo sources.

use std::collections::HashMap;

use plugingen_model::naming::getter_name;
use plugingen_model::{
    AnnotationDef, ClassDef, Expr, FieldDef, MethodDef, Modifier, ObjectDef, Stmt, TypeRef,
};

use crate::config::{MavenPluginConfig, MavenTaskConfig};
use crate::error::{GenerateError, Result};
use crate::instantiate::execute_task_method;
use crate::mirror::convert_if_required;
use crate::parameter::ParameterConfig;

pub const MOJO_SUFFIX: &str = "Mojo";

const MICRONAUT_MOJO: &str = "io.micronaut.maven.AbstractMicronautMojo";
const PLAIN_MOJO: &str = "org.apache.maven.plugin.AbstractMojo";
const PARAMETER_ANNOTATION: &str = "org.apache.maven.plugins.annotations.Parameter";

/// Builds one abstract mojo per configured task.
///
/// Plain parameters become annotated protected fields. Internal and output parameters
/// are left to the concrete subclass through abstract getters, as is `isEnabled()`.
#[derive(Debug, Default)]
pub struct MavenMojoBuilder;

impl MavenMojoBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build_all(&self, plugin: &MavenPluginConfig) -> Result<Vec<ObjectDef>> {
        plugin.mojos.iter().map(|mojo| self.build(mojo)).collect()
    }

    pub fn build(&self, mojo: &MavenTaskConfig) -> Result<ObjectDef> {
        let mut class = ClassDef::new(format!(
            "{}.{}{MOJO_SUFFIX}",
            mojo.package_name, mojo.task.name_prefix
        ))
        .with_modifiers(&[Modifier::Public, Modifier::Abstract])
        .with_superclass(TypeRef::class(if mojo.micronaut_plugin {
            MICRONAUT_MOJO
        } else {
            PLAIN_MOJO
        }))
        .with_javadoc(mojo.task_javadoc.clone());

        for parameter in &mojo.task.parameters {
            class = if is_abstract(parameter) {
                class.with_method(
                    MethodDef::new(getter_name(parameter.name()))
                        .with_modifiers(&[Modifier::Protected, Modifier::Abstract])
                        .returns(parameter.ty.clone())
                        .with_javadoc(parameter.javadoc.clone()),
                )
            } else {
                class.with_field(parameter_field(mojo, parameter))
            };
        }

        let class = class
            .with_method(
                MethodDef::new("isEnabled")
                    .with_modifiers(&[Modifier::Protected, Modifier::Abstract])
                    .returns(TypeRef::boolean())
                    .with_javadoc(
                        "Determines if this mojo must be executed.\n@return true if the mojo is enabled",
                    ),
            )
            .with_methods(mojo.task.converters())
            .with_method(execute_method(mojo)?);
        Ok(class.into())
    }
}

fn is_abstract(parameter: &ParameterConfig) -> bool {
    parameter.internal || parameter.output
}

fn parameter_field(mojo: &MavenTaskConfig, parameter: &ParameterConfig) -> FieldDef {
    let mut annotation = AnnotationDef::new(PARAMETER_ANNOTATION);
    if let Some(default) = &parameter.default_value {
        annotation = annotation.with_member("defaultValue", Expr::string(default.clone()));
    }
    if parameter.required {
        annotation = annotation.with_member("required", true);
    }
    if let Some(global) = &parameter.global_property {
        annotation = annotation.with_member("property", Expr::string(mojo.property_key(global)));
    }
    FieldDef::new(parameter.name(), parameter.ty.clone())
        .with_modifiers(&[Modifier::Protected])
        .with_annotation(annotation)
        .with_javadoc(parameter.javadoc.clone())
}

fn execute_method(mojo: &MavenTaskConfig) -> Result<MethodDef> {
    MethodDef::new("execute")
        .with_modifiers(&[Modifier::Public])
        .overriding()
        .with_javadoc(mojo.method_javadoc.clone())
        .try_build(|_| {
            let disabled = Expr::This
                .invoke(
                    "getLog",
                    TypeRef::class("org.apache.maven.plugin.logging.Log"),
                    Vec::new(),
                )
                .invoke(
                    "debug",
                    TypeRef::Void,
                    vec![Expr::string(format!(
                        "{}{MOJO_SUFFIX} is disabled",
                        mojo.task.name_prefix
                    ))],
                );
            Ok::<_, GenerateError>(Stmt::if_else(
                Expr::This
                    .invoke("isEnabled", TypeRef::boolean(), Vec::new())
                    .not(),
                disabled.into(),
                run_task(mojo)?,
            ))
        })
}

fn run_task(mojo: &MavenTaskConfig) -> Result<Stmt> {
    let mut statements = Vec::new();
    let mut arguments = HashMap::new();
    for parameter in &mojo.task.parameters {
        let value = if is_abstract(parameter) {
            Expr::This.invoke(getter_name(parameter.name()), parameter.ty.clone(), Vec::new())
        } else {
            Expr::This.field(parameter.name(), parameter.ty.clone())
        };
        let converted = convert_if_required(
            &parameter.conversion,
            &format!("{}Param", parameter.name()),
            &mut statements,
            value,
        );
        arguments.insert(parameter.name().to_string(), converted);
    }
    statements.push(execute_task_method(
        &mojo.task.source,
        &mojo.task.method_name,
        &arguments,
    )?);
    Ok(Stmt::block(statements))
}
