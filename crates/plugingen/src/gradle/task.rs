use std::collections::HashMap;

use plugingen_descriptor::GradleArtifactKind;
use plugingen_model::naming::getter_name;
use plugingen_model::{
    AnnotationDef, ClassDef, Expr, FieldDef, InterfaceDef, MethodDef, Modifier, ObjectDef, Stmt,
    TypeRef,
};

use super::{create_default, gradle_property, task_type, GradleTypeBuilder, ACTION, CONFIGURABLE_FILE_COLLECTION};
use crate::config::{GradlePluginConfig, GradleTaskConfig};
use crate::error::{GenerateError, Result};
use crate::instantiate::execute_task_method;
use crate::mirror::convert_if_required;
use crate::parameter::ParameterConfig;

pub const WORK_ACTION_SUFFIX: &str = "WorkAction";
pub const WORK_ACTION_PARAMETERS_SUFFIX: &str = "WorkActionParameters";
const PARAMETER_CONFIGURATOR_SUFFIX: &str = "WorkActionParameterConfigurator";
const CLASSPATH_CONFIGURATOR_SUFFIX: &str = "ClasspathConfigurator";
const GET_CLASSPATH: &str = "getClasspath";
const EXECUTE: &str = "execute";
const WORKER_EXECUTOR: &str = "org.gradle.workers.WorkerExecutor";

/// Abstract task types delegating their work to an isolated work action.
pub struct GradleTaskBuilder;

impl GradleTypeBuilder for GradleTaskBuilder {
    fn kind(&self) -> GradleArtifactKind {
        GradleArtifactKind::GradleTask
    }

    fn build(&self, plugin: &GradlePluginConfig) -> Result<Vec<ObjectDef>> {
        plugin
            .tasks
            .iter()
            .map(|task| build_task(&plugin.package_name, task))
            .collect()
    }
}

fn build_task(package: &str, config: &GradleTaskConfig) -> Result<ObjectDef> {
    let prefix = &config.task.name_prefix;
    let task = task_type(package, prefix);
    let name = task.name().unwrap_or_default().to_string();

    let mut class = ClassDef::new(name)
        .with_modifiers(&[Modifier::Public, Modifier::Abstract])
        .with_superclass(TypeRef::class("org.gradle.api.DefaultTask"))
        .with_javadoc(config.task_javadoc.clone());
    if config.cacheable {
        class = class.with_annotation(AnnotationDef::new("org.gradle.api.tasks.CacheableTask"));
    }
    class = class
        .with_inner(work_action(config)?)
        .with_inner(work_action_parameters(config))
        .with_inner(parameter_configurator(&task, config)?)
        .with_inner(classpath_configurator(&task, config));
    for parameter in &config.task.parameters {
        class = class.with_method(parameter_getter(parameter));
    }

    let worker_executor = TypeRef::class(WORKER_EXECUTOR);
    let class = class
        .with_method(
            MethodDef::new(GET_CLASSPATH)
                .with_modifiers(&[Modifier::Public, Modifier::Abstract])
                .returns(TypeRef::class(CONFIGURABLE_FILE_COLLECTION))
                .with_annotation(AnnotationDef::new("org.gradle.api.tasks.Classpath")),
        )
        .with_method(
            MethodDef::new("getWorkerExecutor")
                .with_modifiers(&[Modifier::Public, Modifier::Abstract])
                .returns(worker_executor.clone())
                .with_annotation(AnnotationDef::new("javax.inject.Inject")),
        )
        .with_method(task_action(config, worker_executor));
    Ok(class.into())
}

fn parameter_getter(parameter: &ParameterConfig) -> MethodDef {
    let mut getter = MethodDef::new(getter_name(parameter.name()))
        .with_modifiers(&[Modifier::Public, Modifier::Abstract])
        .with_javadoc(parameter.javadoc.clone())
        .returns(gradle_property(parameter));
    let is_file = parameter.source_type().is_file();

    if parameter.output {
        if is_file {
            getter = getter.with_annotation(AnnotationDef::new(if parameter.directory {
                "org.gradle.api.tasks.OutputDirectory"
            } else {
                "org.gradle.api.tasks.OutputFile"
            }));
        }
    } else {
        getter = getter.with_annotation(AnnotationDef::new("org.gradle.api.tasks.Input"));
        if is_file {
            let sensitivity = TypeRef::class("org.gradle.api.tasks.PathSensitivity");
            getter = getter
                .with_annotation(AnnotationDef::new(if parameter.directory {
                    "org.gradle.api.tasks.InputDirectory"
                } else {
                    "org.gradle.api.tasks.InputFile"
                }))
                .with_annotation(
                    AnnotationDef::new("org.gradle.api.tasks.PathSensitive").with_member(
                        "value",
                        sensitivity
                            .static_field(parameter.path_sensitivity.constant(), sensitivity.clone()),
                    ),
                );
        }
    }
    if !parameter.required {
        getter = getter.with_annotation(AnnotationDef::new("org.gradle.api.tasks.Optional"));
    }
    getter
}

/// `@TaskAction execute()`: submits the work action in an isolated class loader.
fn task_action(config: &GradleTaskConfig, worker_executor: TypeRef) -> MethodDef {
    let prefix = &config.task.name_prefix;
    MethodDef::new(EXECUTE)
        .with_modifiers(&[Modifier::Public])
        .with_annotation(AnnotationDef::new("org.gradle.api.tasks.TaskAction"))
        .with_javadoc(config.method_javadoc.clone())
        .build(|_| {
            Expr::This
                .invoke("getWorkerExecutor", worker_executor.clone(), Vec::new())
                .invoke(
                    "classLoaderIsolation",
                    TypeRef::class("org.gradle.workers.WorkQueue"),
                    vec![TypeRef::class(format!("{prefix}{CLASSPATH_CONFIGURATOR_SUFFIX}"))
                        .instantiate(vec![Expr::This])],
                )
                .invoke(
                    "submit",
                    TypeRef::Void,
                    vec![
                        TypeRef::class(format!("{prefix}{WORK_ACTION_SUFFIX}")).class_ref(),
                        TypeRef::class(format!("{prefix}{PARAMETER_CONFIGURATOR_SUFFIX}"))
                            .instantiate(vec![Expr::This]),
                    ],
                )
                .into()
        })
}

fn work_action(config: &GradleTaskConfig) -> Result<ClassDef> {
    let prefix = &config.task.name_prefix;
    let parameters_type = TypeRef::class(format!("{prefix}{WORK_ACTION_PARAMETERS_SUFFIX}"));

    let execute = MethodDef::new(EXECUTE)
        .with_modifiers(&[Modifier::Public])
        .overriding()
        .try_build(|_| {
            let mut statements = Vec::new();
            let (parameters, define) = Expr::This
                .invoke("getParameters", parameters_type.clone(), Vec::new())
                .new_local("parameters", parameters_type.clone());
            statements.push(define);

            let mut arguments = HashMap::new();
            for parameter in &config.task.parameters {
                let property = parameters.invoke(
                    getter_name(parameter.name()),
                    gradle_property(parameter),
                    Vec::new(),
                );
                let is_file = parameter.source_type().is_file();
                let value_type = if is_file {
                    TypeRef::class("org.gradle.api.file.FileSystemLocation")
                } else {
                    parameter.ty.clone()
                };
                let mut value = if !parameter.required && parameter.default_value.is_none() {
                    property.invoke("getOrNull", value_type, Vec::new())
                } else {
                    property.invoke("get", value_type, Vec::new())
                };
                if is_file {
                    value = value.invoke("getAsFile", TypeRef::file(), Vec::new());
                }
                let converted = convert_if_required(
                    &parameter.conversion,
                    &format!("{}Param", parameter.name()),
                    &mut statements,
                    value,
                );
                arguments.insert(parameter.name().to_string(), converted);
            }
            statements.push(execute_task_method(
                &config.task.source,
                &config.task.method_name,
                &arguments,
            )?);
            Ok::<_, GenerateError>(Stmt::block(statements))
        })?;

    Ok(ClassDef::new(format!("{prefix}{WORK_ACTION_SUFFIX}"))
        .with_modifiers(&[Modifier::Public, Modifier::Abstract, Modifier::Static])
        .with_superinterface(TypeRef::parameterized(
            "org.gradle.workers.WorkAction",
            vec![parameters_type],
        ))
        .with_methods(config.task.converters())
        .with_method(execute))
}

fn work_action_parameters(config: &GradleTaskConfig) -> InterfaceDef {
    let prefix = &config.task.name_prefix;
    let mut def = InterfaceDef::new(format!("{prefix}{WORK_ACTION_PARAMETERS_SUFFIX}"))
        .with_modifiers(&[Modifier::Public])
        .with_superinterface(TypeRef::class("org.gradle.workers.WorkParameters"));
    for parameter in &config.task.parameters {
        def = def.with_method(
            MethodDef::new(getter_name(parameter.name()))
                .with_modifiers(&[Modifier::Public, Modifier::Abstract])
                .returns(gradle_property(parameter)),
        );
    }
    def
}

/// Copies task property values into the work parameters, applying defaults.
fn parameter_configurator(task: &TypeRef, config: &GradleTaskConfig) -> Result<ClassDef> {
    let prefix = &config.task.name_prefix;
    let parameters_type = TypeRef::class(format!("{prefix}{WORK_ACTION_PARAMETERS_SUFFIX}"));
    let owner = &config.task.source.name;

    let execute = MethodDef::new(EXECUTE)
        .with_modifiers(&[Modifier::Public])
        .overriding()
        .with_parameter("params", parameters_type.clone())
        .try_build(|params| {
            let mut statements = Vec::new();
            for parameter in &config.task.parameters {
                let getter = getter_name(parameter.name());
                let property_type = gradle_property(parameter);
                let mut value = Expr::This.field("task", task.clone()).invoke(
                    getter.clone(),
                    property_type.clone(),
                    Vec::new(),
                );
                if !parameter.required {
                    value = if parameter.default_value.is_some() {
                        value.invoke(
                            "orElse",
                            parameter.ty.clone(),
                            vec![create_default(owner, parameter)?],
                        )
                    } else {
                        value.invoke("getOrNull", parameter.ty.clone(), Vec::new())
                    };
                }
                statements.push(
                    params[0]
                        .clone()
                        .invoke(getter, property_type, Vec::new())
                        .invoke("set", TypeRef::Void, vec![value])
                        .into(),
                );
            }
            Ok::<_, GenerateError>(Stmt::block(statements))
        })?;

    Ok(ClassDef::new(format!("{prefix}{PARAMETER_CONFIGURATOR_SUFFIX}"))
        .with_modifiers(&[Modifier::Public, Modifier::Static])
        .with_superinterface(TypeRef::parameterized(ACTION, vec![parameters_type]))
        .with_field(FieldDef::new("task", task.clone()))
        .with_all_fields_constructor(&[Modifier::Public])
        .with_method(execute))
}

fn classpath_configurator(task: &TypeRef, config: &GradleTaskConfig) -> ClassDef {
    let prefix = &config.task.name_prefix;
    let spec = TypeRef::class("org.gradle.workers.ClassLoaderWorkerSpec");
    let classpath = TypeRef::class(CONFIGURABLE_FILE_COLLECTION);

    let execute = MethodDef::new(EXECUTE)
        .with_modifiers(&[Modifier::Public])
        .overriding()
        .with_parameter("spec", spec.clone())
        .build(|params| {
            params[0]
                .clone()
                .invoke(GET_CLASSPATH, classpath.clone(), Vec::new())
                .invoke(
                    "from",
                    TypeRef::Void,
                    vec![Expr::This.field("task", task.clone()).invoke(
                        GET_CLASSPATH,
                        classpath.clone(),
                        Vec::new(),
                    )],
                )
                .into()
        });

    ClassDef::new(format!("{prefix}{CLASSPATH_CONFIGURATOR_SUFFIX}"))
        .with_modifiers(&[Modifier::Public, Modifier::Static])
        .with_superinterface(TypeRef::parameterized(ACTION, vec![spec]))
        .with_field(FieldDef::new("task", task.clone()))
        .with_all_fields_constructor(&[Modifier::Public])
        .with_method(execute)
}
