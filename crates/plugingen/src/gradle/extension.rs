use plugingen_descriptor::GradleArtifactKind;
use plugingen_model::naming::getter_name;
use plugingen_model::{
    AnnotationDef, ClassDef, Expr, FieldDef, InterfaceDef, MethodDef, Modifier, ObjectDef, Stmt,
    TypeRef,
};

use super::{
    create_default, default_extension_type_name, extension_type_name, gradle_property,
    specification_type, task_type, GradleTypeBuilder, ACTION, CONFIGURABLE_FILE_COLLECTION,
    CONFIGURATION, PROJECT,
};
use crate::config::{GradlePluginConfig, GradleTaskConfig};
use crate::error::{GenerateError, Result};

pub const TASK_CONFIGURATOR_SUFFIX: &str = "TaskConfigurator";

const NAMES: &str = "names";
const PROJECT_FIELD: &str = "project";
const CLASSPATH_FIELD: &str = "classpath";
const CONFIGURE_SPEC: &str = "configureSpec";
const TASK_PROVIDER: &str = "org.gradle.api.tasks.TaskProvider";

/// The user-facing extension interface and its default implementation.
///
/// Every task gets one extension method taking a unique name and an action configuring
/// the task's specification. The default implementation registers a lazily configured
/// task per call.
pub struct GradleExtensionBuilder;

impl GradleTypeBuilder for GradleExtensionBuilder {
    fn kind(&self) -> GradleArtifactKind {
        GradleArtifactKind::GradleExtension
    }

    fn build(&self, plugin: &GradlePluginConfig) -> Result<Vec<ObjectDef>> {
        Ok(vec![
            extension_interface(plugin).into(),
            default_extension(plugin)?.into(),
        ])
    }
}

fn spec_action(spec: &TypeRef) -> TypeRef {
    TypeRef::parameterized(ACTION, vec![TypeRef::wildcard_super(spec.clone())])
}

fn task_provider(task: &TypeRef) -> TypeRef {
    TypeRef::parameterized(TASK_PROVIDER, vec![TypeRef::wildcard_extends(task.clone())])
}

fn create_task_method_name(config: &GradleTaskConfig) -> String {
    format!("create{}Task", config.task.name_prefix)
}

fn extension_interface(plugin: &GradlePluginConfig) -> InterfaceDef {
    let mut def = InterfaceDef::new(extension_type_name(plugin))
        .with_modifiers(&[Modifier::Public])
        .with_javadoc(format!("Configures the {} execution.", plugin.name_prefix));
    for task in &plugin.tasks {
        let spec = specification_type(&plugin.package_name, &task.task.name_prefix);
        def = def.with_method(
            MethodDef::new(task.extension_method_name.clone())
                .with_modifiers(&[Modifier::Public, Modifier::Abstract])
                .with_parameter("name", TypeRef::string())
                .with_parameter("action", spec_action(&spec))
                .with_javadoc(format!(
                    "Create a task for {}.\n{}\n@param name   The unique identifier used to derive task names\n@param action The action to apply on the task specification",
                    task.extension_method_name, task.method_javadoc
                )),
        );
    }
    def
}

fn default_extension(plugin: &GradlePluginConfig) -> Result<ClassDef> {
    let interface = extension_type_name(plugin);
    let project = TypeRef::class(PROJECT);
    let configuration = TypeRef::class(CONFIGURATION);

    let constructor = MethodDef::constructor()
        .with_modifiers(&[Modifier::Public])
        .with_annotation(AnnotationDef::new("javax.inject.Inject"))
        .with_parameter(PROJECT_FIELD, project.clone())
        .with_parameter(CLASSPATH_FIELD, configuration.clone())
        .build(|params| {
            Stmt::block([
                Stmt::assign_field(Expr::This, PROJECT_FIELD, project.clone(), params[0].clone()),
                Stmt::assign_field(
                    Expr::This,
                    CLASSPATH_FIELD,
                    configuration.clone(),
                    params[1].clone(),
                ),
            ])
        });

    let mut class = ClassDef::new(default_extension_type_name(plugin))
        .with_modifiers(&[Modifier::Public, Modifier::Abstract])
        .with_javadoc(format!("Default implementation of the {{@link {interface}}}."))
        .with_superinterface(TypeRef::class(interface))
        .with_field(
            FieldDef::new(NAMES, names_type())
                .with_modifiers(&[Modifier::Protected, Modifier::Final])
                .with_initializer(TypeRef::class("java.util.HashSet").instantiate(Vec::new())),
        )
        .with_field(
            FieldDef::new(PROJECT_FIELD, project)
                .with_modifiers(&[Modifier::Protected, Modifier::Final]),
        )
        .with_field(
            FieldDef::new(CLASSPATH_FIELD, configuration)
                .with_modifiers(&[Modifier::Protected, Modifier::Final]),
        )
        .with_method(constructor);

    for task in &plugin.tasks {
        class = class
            .with_method(extension_method(plugin, task))
            .with_method(create_task_method(plugin, task))
            .with_method(configure_spec_method(plugin, task)?)
            .with_inner(task_configurator(plugin, task));
    }
    Ok(class)
}

fn names_type() -> TypeRef {
    TypeRef::parameterized("java.util.Set", vec![TypeRef::string()])
}

/// Rejects duplicate names, builds the specification and registers the task.
fn extension_method(plugin: &GradlePluginConfig, config: &GradleTaskConfig) -> MethodDef {
    let spec_type = specification_type(&plugin.package_name, &config.task.name_prefix);
    let task = task_type(&plugin.package_name, &config.task.name_prefix);
    let provider = task_provider(&task);
    let extension_method = &config.extension_method_name;

    MethodDef::new(extension_method.clone())
        .with_modifiers(&[Modifier::Public])
        .overriding()
        .with_parameter("name", TypeRef::string())
        .with_parameter("action", spec_action(&spec_type))
        .build(|params| {
            let (name, action) = (&params[0], &params[1]);
            let duplicate = Stmt::if_then(
                Expr::This
                    .field(NAMES, names_type())
                    .invoke("add", TypeRef::boolean(), vec![name.clone()])
                    .not(),
                Stmt::Throw(TypeRef::class("org.gradle.api.GradleException").instantiate(vec![
                    TypeRef::string().invoke_static(
                        "format",
                        TypeRef::string(),
                        vec![
                            Expr::string(format!(
                                "An {extension_method} definition with name '%s' was already created"
                            )),
                            name.clone(),
                        ],
                    ),
                ])),
            );
            let (spec, define_spec) = Expr::This
                .field(PROJECT_FIELD, TypeRef::class(PROJECT))
                .invoke(
                    "getObjects",
                    TypeRef::class("org.gradle.api.model.ObjectFactory"),
                    Vec::new(),
                )
                .invoke("newInstance", spec_type.clone(), vec![spec_type.class_ref()])
                .new_local("spec", spec_type.clone());
            let configurator = TypeRef::class(format!(
                "{}{TASK_CONFIGURATOR_SUFFIX}",
                config.task.name_prefix
            ))
            .instantiate(vec![
                spec.expr(),
                Expr::This.field(CLASSPATH_FIELD, TypeRef::class(CONFIGURATION)),
            ]);
            let (_, define_task) = Expr::This
                .invoke(
                    create_task_method_name(config),
                    provider.clone(),
                    vec![name.clone(), configurator],
                )
                .new_local("task", provider.clone());

            Stmt::block([
                duplicate,
                define_spec,
                Expr::This
                    .invoke(CONFIGURE_SPEC, TypeRef::Void, vec![spec.expr()])
                    .into(),
                action
                    .clone()
                    .invoke("execute", TypeRef::Void, vec![spec.expr()])
                    .into(),
                define_task,
            ])
        })
}

fn create_task_method(plugin: &GradlePluginConfig, config: &GradleTaskConfig) -> MethodDef {
    let task = task_type(&plugin.package_name, &config.task.name_prefix);
    let provider = task_provider(&task);

    MethodDef::new(create_task_method_name(config))
        .returns(provider.clone())
        .with_parameter("name", TypeRef::string())
        .with_parameter("configurator", TypeRef::parameterized(ACTION, vec![task.clone()]))
        .build(|params| {
            Expr::This
                .field(PROJECT_FIELD, TypeRef::class(PROJECT))
                .invoke(
                    "getTasks",
                    TypeRef::class("org.gradle.api.tasks.TaskContainer"),
                    Vec::new(),
                )
                .invoke(
                    "register",
                    provider,
                    vec![params[0].clone(), task.class_ref(), params[1].clone()],
                )
                .returning()
        })
}

/// Applies declared default values as conventions on a fresh specification.
fn configure_spec_method(
    plugin: &GradlePluginConfig,
    config: &GradleTaskConfig,
) -> Result<MethodDef> {
    let spec_type = specification_type(&plugin.package_name, &config.task.name_prefix);
    let owner = &config.task.source.name;

    MethodDef::new(CONFIGURE_SPEC)
        .with_modifiers(&[Modifier::Protected])
        .with_parameter("spec", spec_type)
        .try_build(|params| {
            let mut statements = Vec::new();
            for parameter in &config.task.parameters {
                if parameter.internal || parameter.default_value.is_none() {
                    continue;
                }
                let property = gradle_property(parameter);
                statements.push(
                    params[0]
                        .clone()
                        .invoke(getter_name(parameter.name()), property.clone(), Vec::new())
                        .invoke("convention", property, vec![create_default(owner, parameter)?])
                        .into(),
                );
            }
            Ok::<_, GenerateError>(Stmt::block(statements))
        })
}

/// Wires a registered task to its specification.
fn task_configurator(plugin: &GradlePluginConfig, config: &GradleTaskConfig) -> ClassDef {
    let spec_type = specification_type(&plugin.package_name, &config.task.name_prefix);
    let task = task_type(&plugin.package_name, &config.task.name_prefix);

    let execute = MethodDef::new("execute")
        .with_modifiers(&[Modifier::Public])
        .overriding()
        .with_parameter("task", task.clone())
        .with_javadoc(format!("The configurator for {} task.", plugin.name_prefix))
        .build(|params| {
            let target = &params[0];
            let mut statements: Vec<Stmt> = Vec::new();
            if let Some(group) = &plugin.task_group {
                statements.push(
                    target
                        .clone()
                        .invoke("setGroup", TypeRef::Void, vec![Expr::string(group.clone())])
                        .into(),
                );
            }
            statements.push(
                target
                    .clone()
                    .invoke("getClasspath", TypeRef::class(CONFIGURABLE_FILE_COLLECTION), Vec::new())
                    .invoke(
                        "from",
                        TypeRef::Void,
                        vec![Expr::This.field(CLASSPATH_FIELD, TypeRef::class(CONFIGURATION))],
                    )
                    .into(),
            );
            statements.push(
                target
                    .clone()
                    .invoke(
                        "setDescription",
                        TypeRef::Void,
                        vec![Expr::string(format!(
                            "Configure the {}",
                            config.extension_method_name
                        ))],
                    )
                    .into(),
            );
            for parameter in config.task.parameters.iter().filter(|p| !p.internal) {
                let getter = getter_name(parameter.name());
                let property = gradle_property(parameter);
                statements.push(
                    target
                        .clone()
                        .invoke(getter.clone(), property.clone(), Vec::new())
                        .invoke(
                            "convention",
                            property.clone(),
                            vec![Expr::This
                                .field("spec", spec_type.clone())
                                .invoke(getter, property, Vec::new())],
                        )
                        .into(),
                );
            }
            Stmt::block(statements)
        });

    ClassDef::new(format!("{}{TASK_CONFIGURATOR_SUFFIX}", config.task.name_prefix))
        .with_modifiers(&[Modifier::Protected, Modifier::Static])
        .with_superinterface(TypeRef::parameterized(ACTION, vec![task]))
        .with_field(FieldDef::new("spec", spec_type))
        .with_field(FieldDef::new(CLASSPATH_FIELD, TypeRef::class(CONFIGURATION)))
        .with_all_fields_constructor(&[Modifier::Public])
        .with_method(execute)
}
