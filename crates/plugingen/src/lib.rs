//! Build-plugin source generation.
//!
//! Given descriptors of plugin tasks (a type with annotated properties and a single
//! executable method), this crate builds the object model of the Gradle and Maven
//! sources that adapt each task to its host build system:
//!
//! - [`mirror`] copies enums and POJOs used by task parameters into a standalone
//!   `model` package, together with methods converting them back;
//! - [`parameter`] normalizes each property into a [`ParameterConfig`];
//! - [`instantiate`] synthesizes the statements constructing the task and calling it;
//! - [`gradle`] and [`maven`] turn the resolved configuration into object definitions;
//! - [`GenerationSession`] drives a pass and hands every definition, once, to a
//!   [`SourceEmitter`].

pub mod config;
mod context;
pub mod emit;
mod error;
pub mod gradle;
pub mod instantiate;
pub mod maven;
pub mod mirror;
pub mod parameter;
mod session;
mod validate;

pub use config::{GradlePluginConfig, GradleTaskConfig, MavenPluginConfig, MavenTaskConfig, TaskConfig};
pub use context::GenerationContext;
pub use emit::{JsonDirEmitter, RecordingEmitter, SourceEmitter};
pub use error::{EmitError, GenerateError, Result};
pub use maven::MavenMojoBuilder;
pub use mirror::{Conversion, MirroredRef, MirroredType, ModelRegistry, TypeMirror};
pub use parameter::ParameterConfig;
pub use session::GenerationSession;
pub use validate::{task_executable, TaskValidator};
