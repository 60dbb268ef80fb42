use plugingen_descriptor::GradleArtifactKind;
use plugingen_model::naming::decapitalize;
use plugingen_model::{ClassDef, Expr, MethodDef, Modifier, ObjectDef, Stmt, TypeRef};

use super::{
    default_extension_type_name, extension_type_name, GradleTypeBuilder, CONFIGURATION, PLUGIN_SUFFIX,
    PROJECT,
};
use crate::config::GradlePluginConfig;
use crate::error::Result;

/// The plugin entry point registering the classpath configuration and the extension.
pub struct GradlePluginBuilder;

impl GradleTypeBuilder for GradlePluginBuilder {
    fn kind(&self) -> GradleArtifactKind {
        GradleArtifactKind::GradlePlugin
    }

    fn build(&self, plugin: &GradlePluginConfig) -> Result<Vec<ObjectDef>> {
        let project = TypeRef::class(PROJECT);
        let configuration = TypeRef::class(CONFIGURATION);
        let extension_name = decapitalize(&plugin.name_prefix);

        let apply = MethodDef::new("apply")
            .with_modifiers(&[Modifier::Public])
            .overriding()
            .with_parameter("project", project.clone())
            .build(|params| {
                let project = &params[0];
                let mut statements = Vec::new();
                let (classpath, define) = project
                    .clone()
                    .invoke(
                        "getConfigurations",
                        TypeRef::class("org.gradle.api.artifacts.ConfigurationContainer"),
                        Vec::new(),
                    )
                    .invoke(
                        "create",
                        configuration.clone(),
                        vec![Expr::string(format!("{extension_name}Classpath"))],
                    )
                    .new_local("classpath", configuration.clone());
                statements.push(define);

                if let Some(dependency) = &plugin.dependency {
                    statements.push(
                        classpath
                            .invoke(
                                "getDependencies",
                                TypeRef::class("org.gradle.api.artifacts.DependencySet"),
                                Vec::new(),
                            )
                            .invoke(
                                "add",
                                TypeRef::boolean(),
                                vec![project
                                    .clone()
                                    .invoke(
                                        "getDependencies",
                                        TypeRef::class(
                                            "org.gradle.api.artifacts.dsl.DependencyHandler",
                                        ),
                                        Vec::new(),
                                    )
                                    .invoke(
                                        "create",
                                        TypeRef::class("org.gradle.api.artifacts.Dependency"),
                                        vec![Expr::string(dependency.clone())],
                                    )],
                            )
                            .into(),
                    );
                }

                statements.push(
                    project
                        .clone()
                        .invoke(
                            "getExtensions",
                            TypeRef::class("org.gradle.api.plugins.ExtensionContainer"),
                            Vec::new(),
                        )
                        .invoke(
                            "create",
                            TypeRef::object(),
                            vec![
                                TypeRef::class(extension_type_name(plugin)).class_ref(),
                                Expr::string(extension_name.clone()),
                                TypeRef::class(default_extension_type_name(plugin)).class_ref(),
                                project.clone(),
                                classpath.expr(),
                            ],
                        )
                        .into(),
                );
                Stmt::block(statements)
            });

        let class = ClassDef::new(format!(
            "{}.{}{PLUGIN_SUFFIX}",
            plugin.package_name, plugin.name_prefix
        ))
        .with_modifiers(&[Modifier::Public])
        .with_javadoc(format!("The {} Gradle plugin.", plugin.name_prefix))
        .with_superinterface(TypeRef::parameterized(
            "org.gradle.api.Plugin",
            vec![project],
        ))
        .with_method(apply);
        Ok(vec![class.into()])
    }
}
