//! Per-trigger configuration assembled from descriptor annotations.

use plugingen_descriptor::{ClassDescriptor, GradleArtifactKind, TypeJavadoc};
use plugingen_model::naming::{strip_enclosing, to_dot_separated};
use plugingen_model::MethodDef;

use crate::context::GenerationContext;
use crate::error::{GenerateError, Result};
use crate::mirror::{MirroredType, ModelRegistry, TypeMirror};
use crate::parameter::{resolve, ParameterConfig};
use crate::validate::task_executable;

/// Sub-package receiving model copies.
pub const MODEL_PACKAGE: &str = "model";

pub const GRADLE_PLUGIN_ANNOTATION: &str = "GenerateGradlePlugin";
pub const MAVEN_MOJO_ANNOTATION: &str = "GenerateMavenMojo";

/// Build-system independent configuration of one task.
#[derive(Debug, Clone)]
pub struct TaskConfig {
    pub source: ClassDescriptor,
    pub parameters: Vec<ParameterConfig>,
    pub method_name: String,
    pub name_prefix: String,
    pub javadoc: TypeJavadoc,
    /// Models this task's parameters use, directly or transitively.
    pub models: Vec<MirroredType>,
}

impl TaskConfig {
    pub fn resolve(
        cx: GenerationContext<'_>,
        trigger: &str,
        source: &str,
        package: &str,
        name_prefix: Option<&str>,
        registry: &mut ModelRegistry,
    ) -> Result<Self> {
        let class = cx
            .provider()
            .load(source)
            .ok_or_else(|| GenerateError::UnresolvedSource {
                trigger: trigger.to_string(),
                reference: source.to_string(),
            })?;
        let method_name = task_executable(class)?.name.clone();
        let javadoc = cx.javadoc(&class.name)?;

        let mut mirror = TypeMirror::new(cx, format!("{package}.{MODEL_PACKAGE}"), registry);
        let mut parameters = Vec::with_capacity(class.properties.len());
        for property in &class.properties {
            let mirrored = mirror.mirror(&property.ty)?;
            let mirrored = mirrored.is_mirrored().then_some(mirrored);
            let parameter = resolve(&javadoc, property, mirrored);
            check_enum_default(cx, &class.name, &parameter)?;
            parameters.push(parameter);
        }
        let models = mirror.finish();

        Ok(Self {
            source: class.clone(),
            parameters,
            method_name,
            name_prefix: name_prefix
                .filter(|prefix| !prefix.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| strip_enclosing(class.simple_name()).to_string()),
            javadoc,
            models,
        })
    }

    pub fn method_javadoc(&self) -> Option<&str> {
        self.javadoc.method(&self.method_name)
    }

    /// Conversion methods for every model the task uses.
    pub fn converters(&self) -> impl Iterator<Item = MethodDef> + '_ {
        self.models.iter().map(|model| model.conversion.clone())
    }
}

/// An enum default has to name one of the enum's constants.
fn check_enum_default(
    cx: GenerationContext<'_>,
    owner: &str,
    parameter: &ParameterConfig,
) -> Result<()> {
    let Some(value) = parameter.default_value.as_deref() else {
        return Ok(());
    };
    let ty = parameter.source_type();
    match cx.provider().load(&ty.name) {
        Some(class)
            if class.is_enum() && !class.enum_constants.iter().any(|c| c == value.trim()) =>
        {
            Err(GenerateError::InvalidDefaultValue {
                type_name: owner.to_string(),
                parameter: parameter.name().to_string(),
                value: value.to_string(),
                ty: ty.name.clone(),
            })
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Clone)]
pub struct GradleTaskConfig {
    pub task: TaskConfig,
    pub extension_method_name: String,
    pub task_javadoc: String,
    pub method_javadoc: String,
    pub cacheable: bool,
}

#[derive(Debug, Clone)]
pub struct GradlePluginConfig {
    pub tasks: Vec<GradleTaskConfig>,
    pub package_name: String,
    pub name_prefix: String,
    pub task_group: Option<String>,
    pub micronaut_plugin: bool,
    pub dependency: Option<String>,
    pub kinds: Vec<GradleArtifactKind>,
    /// Every model copied for the plugin's tasks.
    pub models: Vec<MirroredType>,
}

impl GradlePluginConfig {
    pub fn from_trigger(cx: GenerationContext<'_>, trigger: &ClassDescriptor) -> Result<Self> {
        let annotation =
            trigger
                .gradle_plugin
                .as_ref()
                .ok_or_else(|| GenerateError::MissingTrigger {
                    type_name: trigger.name.clone(),
                    annotation: GRADLE_PLUGIN_ANNOTATION,
                })?;
        let package = trigger.package_name();
        let mut registry = ModelRegistry::new();

        let mut tasks = Vec::with_capacity(annotation.tasks.len());
        for task in &annotation.tasks {
            let config = TaskConfig::resolve(
                cx,
                &trigger.name,
                &task.source,
                package,
                task.name_prefix.as_deref(),
                &mut registry,
            )?;
            let prefix = config.name_prefix.clone();
            tasks.push(GradleTaskConfig {
                extension_method_name: task
                    .extension_method_name
                    .clone()
                    .unwrap_or_else(|| config.method_name.clone()),
                task_javadoc: config
                    .javadoc
                    .javadoc
                    .clone()
                    .unwrap_or_else(|| format!("{prefix} Gradle task.")),
                method_javadoc: config
                    .method_javadoc()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Main execution of {prefix} task.")),
                cacheable: task.cacheable,
                task: config,
            });
        }

        Ok(Self {
            tasks,
            package_name: package.to_string(),
            name_prefix: annotation
                .name_prefix
                .clone()
                .filter(|prefix| !prefix.is_empty())
                .unwrap_or_else(|| strip_enclosing(trigger.simple_name()).to_string()),
            task_group: annotation.task_group.clone(),
            micronaut_plugin: annotation.micronaut_plugin,
            dependency: annotation.dependency.clone(),
            kinds: annotation.types.clone(),
            models: registry.models().cloned().collect(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct MavenTaskConfig {
    pub task: TaskConfig,
    pub package_name: String,
    pub micronaut_plugin: bool,
    pub property_prefix: String,
    pub task_javadoc: String,
    pub method_javadoc: String,
}

impl MavenTaskConfig {
    /// Maven property key for a parameter's global property.
    pub fn property_key(&self, global_property: &str) -> String {
        let dotted = to_dot_separated(global_property);
        if self.property_prefix.is_empty() {
            dotted
        } else {
            format!("{}.{dotted}", self.property_prefix)
        }
    }
}

/// All mojos requested by one trigger type.
#[derive(Debug, Clone)]
pub struct MavenPluginConfig {
    pub mojos: Vec<MavenTaskConfig>,
    pub models: Vec<MirroredType>,
}

impl MavenPluginConfig {
    pub fn from_trigger(cx: GenerationContext<'_>, trigger: &ClassDescriptor) -> Result<Self> {
        if trigger.maven_mojos.is_empty() {
            return Err(GenerateError::MissingTrigger {
                type_name: trigger.name.clone(),
                annotation: MAVEN_MOJO_ANNOTATION,
            });
        }
        let package = trigger.package_name();
        let mut registry = ModelRegistry::new();

        let mut mojos = Vec::with_capacity(trigger.maven_mojos.len());
        for mojo in &trigger.maven_mojos {
            let config = TaskConfig::resolve(
                cx,
                &trigger.name,
                &mojo.source,
                package,
                mojo.name_prefix.as_deref(),
                &mut registry,
            )?;
            let prefix = config.name_prefix.clone();
            mojos.push(MavenTaskConfig {
                package_name: package.to_string(),
                micronaut_plugin: mojo.micronaut_plugin,
                property_prefix: mojo.maven_property_prefix.clone(),
                task_javadoc: config
                    .javadoc
                    .javadoc
                    .clone()
                    .unwrap_or_else(|| format!("{prefix} Maven mojo.")),
                method_javadoc: config
                    .method_javadoc()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Main execution of {prefix} mojo.")),
                task: config,
            });
        }

        Ok(Self {
            mojos,
            models: registry.models().cloned().collect(),
        })
    }
}
