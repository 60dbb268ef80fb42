//! The emission driver.

use std::collections::HashSet;

use plugingen_model::ObjectDef;

use crate::config::{
    GradlePluginConfig, MavenPluginConfig, GRADLE_PLUGIN_ANNOTATION, MAVEN_MOJO_ANNOTATION,
};
use crate::context::GenerationContext;
use crate::emit::SourceEmitter;
use crate::error::{GenerateError, Result};
use crate::gradle::{default_builders, GradleTypeBuilder};
use crate::maven::MavenMojoBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Target {
    Gradle,
    Maven,
}

impl Target {
    fn annotation(self) -> &'static str {
        match self {
            Target::Gradle => GRADLE_PLUGIN_ANNOTATION,
            Target::Maven => MAVEN_MOJO_ANNOTATION,
        }
    }
}

/// Generation state kept across passes of one host process.
///
/// Remembers which trigger types were already processed and which object names were
/// already emitted, so repeated triggers from an incremental build write nothing twice.
/// A trigger whose generation fails is forgotten again and can be retried. Emitted
/// names outlive [`start`](Self::start): a type is written at most once per session.
pub struct GenerationSession {
    builders: Vec<Box<dyn GradleTypeBuilder>>,
    maven: MavenMojoBuilder,
    state: DedupState,
}

#[derive(Debug, Default)]
struct DedupState {
    generated: HashSet<String>,
    processed: HashSet<(Target, String)>,
}

impl Default for GenerationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::with_builders(default_builders())
    }

    /// A session restricted to the given Gradle builders.
    pub fn with_builders(builders: Vec<Box<dyn GradleTypeBuilder>>) -> Self {
        Self {
            builders,
            maven: MavenMojoBuilder::new(),
            state: DedupState::default(),
        }
    }

    /// Begins a new pass: every trigger may be processed again.
    pub fn start(&mut self) {
        self.state.processed.clear();
    }

    pub fn is_generated(&self, name: &str) -> bool {
        self.state.generated.contains(name)
    }

    pub fn generated_count(&self) -> usize {
        self.state.generated.len()
    }

    /// Generates the Gradle plugin sources requested by `trigger`.
    ///
    /// Returns how many objects were handed to the emitter.
    pub fn generate_gradle(
        &mut self,
        cx: GenerationContext<'_>,
        trigger: &str,
        emitter: &mut dyn SourceEmitter,
    ) -> Result<usize> {
        let builders = &self.builders;
        self.state.run(Target::Gradle, trigger, emitter, |owner| {
            let class = cx.load(owner)?;
            let plugin = GradlePluginConfig::from_trigger(cx, class)?;
            let mut defs: Vec<ObjectDef> =
                plugin.models.iter().map(|model| model.model.clone()).collect();
            for kind in &plugin.kinds {
                let builder = builders
                    .iter()
                    .find(|builder| builder.kind() == *kind)
                    .ok_or_else(|| GenerateError::UnsupportedArtifactKind {
                        trigger: owner.to_string(),
                        kind: *kind,
                    })?;
                defs.extend(builder.build(&plugin)?);
            }
            Ok(defs)
        })
    }

    /// Generates one abstract mojo per `GenerateMavenMojo` on `trigger`.
    pub fn generate_maven(
        &mut self,
        cx: GenerationContext<'_>,
        trigger: &str,
        emitter: &mut dyn SourceEmitter,
    ) -> Result<usize> {
        let maven = &self.maven;
        self.state.run(Target::Maven, trigger, emitter, |owner| {
            let class = cx.load(owner)?;
            let plugin = MavenPluginConfig::from_trigger(cx, class)?;
            let mut defs: Vec<ObjectDef> =
                plugin.models.iter().map(|model| model.model.clone()).collect();
            defs.extend(maven.build_all(&plugin)?);
            Ok(defs)
        })
    }
}

impl DedupState {
    fn run(
        &mut self,
        target: Target,
        trigger: &str,
        emitter: &mut dyn SourceEmitter,
        build: impl FnOnce(&str) -> Result<Vec<ObjectDef>>,
    ) -> Result<usize> {
        let key = (target, trigger.to_string());
        if self.processed.contains(&key) {
            tracing::debug!(trigger, "trigger already processed, skipping");
            return Ok(0);
        }
        self.processed.insert(key.clone());

        let result = build(trigger).and_then(|defs| {
            let mut written = 0;
            for def in &defs {
                let name = def.name();
                if self.generated.contains(name) {
                    tracing::debug!(name, trigger, "type already generated, skipping");
                    continue;
                }
                emitter.write(def, trigger)?;
                self.generated.insert(name.to_string());
                written += 1;
            }
            Ok(written)
        });

        result.map_err(|err| {
            self.processed.remove(&key);
            if err.is_validation() {
                err
            } else {
                GenerateError::fatal(trigger, target.annotation(), err)
            }
        })
    }
}
