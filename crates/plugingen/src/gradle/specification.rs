use plugingen_descriptor::GradleArtifactKind;
use plugingen_model::naming::getter_name;
use plugingen_model::{InterfaceDef, MethodDef, Modifier, ObjectDef};

use super::{gradle_property, specification_type, GradleTypeBuilder};
use crate::config::GradlePluginConfig;
use crate::error::Result;

/// Per-task specification interfaces configured through the extension.
pub struct GradleSpecificationBuilder;

impl GradleTypeBuilder for GradleSpecificationBuilder {
    fn kind(&self) -> GradleArtifactKind {
        GradleArtifactKind::GradleSpecification
    }

    fn build(&self, plugin: &GradlePluginConfig) -> Result<Vec<ObjectDef>> {
        let mut out = Vec::with_capacity(plugin.tasks.len());
        for task in &plugin.tasks {
            let ty = specification_type(&plugin.package_name, &task.task.name_prefix);
            let mut def = InterfaceDef::new(ty.name().unwrap_or_default())
                .with_modifiers(&[Modifier::Public])
                .with_javadoc(format!(
                    "Specification that is used for configuring {} task.\n{}",
                    task.task.name_prefix, task.task_javadoc
                ));
            // Internal parameters are only set by the plugin itself.
            for parameter in task.task.parameters.iter().filter(|p| !p.internal) {
                def = def.with_method(
                    MethodDef::new(getter_name(parameter.name()))
                        .with_modifiers(&[Modifier::Public, Modifier::Abstract])
                        .with_javadoc(parameter.javadoc.clone())
                        .returns(gradle_property(parameter)),
                );
            }
            out.push(def.into());
        }
        Ok(out)
    }
}
