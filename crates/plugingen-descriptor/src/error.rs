use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, DescriptorError>;

/// Errors produced while loading descriptors or javadoc metadata.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}", json_message(.path))]
    Json {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },

    #[error("type {name} is declared more than once")]
    DuplicateType { name: String },
}

fn json_message(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!("invalid json in {}", path.display()),
        None => "invalid json".to_string(),
    }
}
