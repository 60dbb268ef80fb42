use std::path::PathBuf;

use plugingen_descriptor::{DescriptorError, GradleArtifactKind};

pub type Result<T> = std::result::Result<T, GenerateError>;

/// Errors raised while building plugin sources.
///
/// Every variant names the type it concerns.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("expected exactly one task executable method on {type_name} but found {found}")]
    ExecutableCount { type_name: String, found: usize },

    #[error("task executable {type_name}.{method}() must not have parameters")]
    ExecutableHasParameters { type_name: String, method: String },

    #[error("task executable {type_name}.{method}() must return void")]
    ExecutableNotVoid { type_name: String, method: String },

    #[error("could not load type {type_name}")]
    UnknownType { type_name: String },

    #[error("could not load source type {reference} referenced by {trigger}")]
    UnresolvedSource { trigger: String, reference: String },

    #[error("{type_name} has no {annotation} annotation")]
    MissingTrigger {
        type_name: String,
        annotation: &'static str,
    },

    #[error("building plugin sources of kind {kind} is not supported (requested by {trigger})")]
    UnsupportedArtifactKind {
        trigger: String,
        kind: GradleArtifactKind,
    },

    #[error("no constructor found for {type_name}")]
    NoConstructor { type_name: String },

    #[error("no argument for record component {property} of {type_name}")]
    MissingArgument { type_name: String, property: String },

    #[error("cannot create a default value of type {ty} for {type_name}.{parameter}")]
    UnsupportedDefaultValue {
        type_name: String,
        parameter: String,
        ty: String,
    },

    #[error("default value `{value}` of {type_name}.{parameter} is not a valid {ty}")]
    InvalidDefaultValue {
        type_name: String,
        parameter: String,
        value: String,
        ty: String,
    },

    #[error("failed to access javadoc metadata of {type_name}")]
    Javadoc {
        type_name: String,
        #[source]
        source: DescriptorError,
    },

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error("failed to generate {annotation} sources for {owner}")]
    Fatal {
        owner: String,
        annotation: &'static str,
        #[source]
        source: Box<GenerateError>,
    },
}

impl GenerateError {
    /// Configuration problems that need a source change before a retry can succeed.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GenerateError::ExecutableCount { .. }
                | GenerateError::ExecutableHasParameters { .. }
                | GenerateError::ExecutableNotVoid { .. }
                | GenerateError::UnknownType { .. }
                | GenerateError::UnresolvedSource { .. }
                | GenerateError::MissingTrigger { .. }
                | GenerateError::UnsupportedArtifactKind { .. }
                | GenerateError::NoConstructor { .. }
                | GenerateError::UnsupportedDefaultValue { .. }
                | GenerateError::InvalidDefaultValue { .. }
        )
    }

    pub(crate) fn fatal(owner: &str, annotation: &'static str, source: GenerateError) -> Self {
        GenerateError::Fatal {
            owner: owner.to_string(),
            annotation,
            source: Box::new(source),
        }
    }
}

/// Failures of the emitter collaborator.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("failed to write {name} to {path}")]
    Io {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {name}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}
