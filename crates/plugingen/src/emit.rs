//! Sinks for generated object definitions.

use std::fs;
use std::path::{Path, PathBuf};

use plugingen_model::ObjectDef;

use crate::error::EmitError;

/// Receives every generated type, attributed to the trigger type it came from.
pub trait SourceEmitter {
    fn write(&mut self, def: &ObjectDef, owner: &str) -> Result<(), EmitError>;
}

/// Keeps emitted definitions in memory, in write order.
#[derive(Debug, Default)]
pub struct RecordingEmitter {
    written: Vec<(String, ObjectDef)>,
}

impl RecordingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.written.len()
    }

    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.written.iter().map(|(_, def)| def.name())
    }

    pub fn get(&self, name: &str) -> Option<&ObjectDef> {
        self.written
            .iter()
            .find(|(_, def)| def.name() == name)
            .map(|(_, def)| def)
    }

    /// Trigger type a definition was written for.
    pub fn owner_of(&self, name: &str) -> Option<&str> {
        self.written
            .iter()
            .find(|(_, def)| def.name() == name)
            .map(|(owner, _)| owner.as_str())
    }

    pub fn into_defs(self) -> Vec<ObjectDef> {
        self.written.into_iter().map(|(_, def)| def).collect()
    }
}

impl SourceEmitter for RecordingEmitter {
    fn write(&mut self, def: &ObjectDef, owner: &str) -> Result<(), EmitError> {
        self.written.push((owner.to_string(), def.clone()));
        Ok(())
    }
}

/// Writes each definition as pretty JSON to `<root>/<qualified name>.json`.
#[derive(Debug, Clone)]
pub struct JsonDirEmitter {
    root: PathBuf,
    written: usize,
}

impl JsonDirEmitter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: 0,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }

    /// Number of files written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl SourceEmitter for JsonDirEmitter {
    fn write(&mut self, def: &ObjectDef, owner: &str) -> Result<(), EmitError> {
        let name = def.name();
        let path = self.path_for(name);
        let io_err = |source| EmitError::Io {
            name: name.to_string(),
            path: path.clone(),
            source,
        };

        let json = serde_json::to_string_pretty(def).map_err(|source| EmitError::Serialize {
            name: name.to_string(),
            source,
        })?;
        fs::create_dir_all(&self.root).map_err(io_err)?;
        fs::write(&path, json).map_err(io_err)?;
        self.written += 1;

        tracing::debug!(name, owner, path = %path.display(), "wrote generated type");
        Ok(())
    }
}
