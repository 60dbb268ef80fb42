//! Declarative annotation data attached to descriptors.
//!
//! Every optional member carries the same default as the annotation it models, so a
//! manifest only spells out what differs.

use serde::{Deserialize, Serialize};

/// Which part of a file path counts when a Gradle file input is compared for caching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PathSensitivity {
    None,
    NameOnly,
    Relative,
    #[default]
    Absolute,
}

impl PathSensitivity {
    /// Constant name on `org.gradle.api.tasks.PathSensitivity`.
    pub fn constant(self) -> &'static str {
        match self {
            PathSensitivity::None => "NONE",
            PathSensitivity::NameOnly => "NAME_ONLY",
            PathSensitivity::Relative => "RELATIVE",
            PathSensitivity::Absolute => "ABSOLUTE",
        }
    }
}

/// Per-property task parameter metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginTaskParameter {
    pub required: bool,
    /// Only valid for primitives, boxed primitives, strings and enums.
    pub default_value: Option<String>,
    /// Internal parameters are set by plugin code and are not part of the public API.
    pub internal: bool,
    /// Maven property key. Unused by Gradle.
    pub global_property: Option<String>,
    /// Only meaningful for `java.io.File` parameters.
    pub directory: bool,
    pub output: bool,
    /// Unused by Maven.
    pub path_sensitivity: PathSensitivity,
}

/// Kinds of Gradle sources a plugin trigger can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GradleArtifactKind {
    GradleTask,
    GradleExtension,
    GradleSpecification,
    GradlePlugin,
}

impl GradleArtifactKind {
    pub const ALL: [GradleArtifactKind; 4] = [
        GradleArtifactKind::GradleTask,
        GradleArtifactKind::GradleExtension,
        GradleArtifactKind::GradleSpecification,
        GradleArtifactKind::GradlePlugin,
    ];
}

impl std::fmt::Display for GradleArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            GradleArtifactKind::GradleTask => "GRADLE_TASK",
            GradleArtifactKind::GradleExtension => "GRADLE_EXTENSION",
            GradleArtifactKind::GradleSpecification => "GRADLE_SPECIFICATION",
            GradleArtifactKind::GradlePlugin => "GRADLE_PLUGIN",
        })
    }
}

fn all_gradle_kinds() -> Vec<GradleArtifactKind> {
    GradleArtifactKind::ALL.to_vec()
}

fn yes() -> bool {
    true
}

/// Trigger for Gradle plugin generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateGradlePlugin {
    /// Defaults to the simple name of the annotated type.
    #[serde(default)]
    pub name_prefix: Option<String>,
    #[serde(default)]
    pub tasks: Vec<GenerateGradleTask>,
    #[serde(default = "yes")]
    pub micronaut_plugin: bool,
    #[serde(default)]
    pub task_group: Option<String>,
    /// Dependency notation added to the plugin's classpath configuration.
    #[serde(default)]
    pub dependency: Option<String>,
    #[serde(default = "all_gradle_kinds")]
    pub types: Vec<GradleArtifactKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateGradleTask {
    /// Defaults to the simple name of the source type.
    #[serde(default)]
    pub name_prefix: Option<String>,
    /// Qualified name of the `@PluginTask` type.
    pub source: String,
    /// Defaults to the task's executable method name.
    #[serde(default)]
    pub extension_method_name: Option<String>,
    #[serde(default = "yes")]
    pub cacheable: bool,
}

/// Trigger for one Maven mojo. Repeatable on a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMavenMojo {
    #[serde(default)]
    pub name_prefix: Option<String>,
    pub source: String,
    #[serde(default = "yes")]
    pub micronaut_plugin: bool,
    #[serde(default)]
    pub maven_property_prefix: String,
}
