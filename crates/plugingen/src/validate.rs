use std::collections::HashSet;

use plugingen_descriptor::{ClassDescriptor, DescriptorProvider, JavadocStore, MethodData};

use crate::error::{GenerateError, Result};

/// The single task executable method: marked, no parameters, returning void.
pub fn task_executable(class: &ClassDescriptor) -> Result<&MethodData> {
    let executables: Vec<&MethodData> = class.executable_methods().collect();
    let [method] = executables.as_slice() else {
        return Err(GenerateError::ExecutableCount {
            type_name: class.name.clone(),
            found: executables.len(),
        });
    };
    if !method.parameters.is_empty() {
        return Err(GenerateError::ExecutableHasParameters {
            type_name: class.name.clone(),
            method: method.name.clone(),
        });
    }
    if !method.return_type.is_void() {
        return Err(GenerateError::ExecutableNotVoid {
            type_name: class.name.clone(),
            method: method.name.clone(),
        });
    }
    Ok(*method)
}

/// Checks plugin task types and records their javadoc for later generation passes.
#[derive(Debug, Default)]
pub struct TaskValidator {
    processed: HashSet<String>,
}

impl TaskValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets which types were already written.
    pub fn start(&mut self) {
        self.processed.clear();
    }

    /// Validates `type_name` and writes javadoc metadata for it and, recursively, for
    /// every model type its properties use.
    pub fn validate(
        &mut self,
        provider: &dyn DescriptorProvider,
        store: &mut dyn JavadocStore,
        type_name: &str,
    ) -> Result<()> {
        if self.processed.contains(type_name) {
            return Ok(());
        }
        let class = provider
            .load(type_name)
            .ok_or_else(|| GenerateError::UnknownType {
                type_name: type_name.to_string(),
            })?;
        task_executable(class)?;
        self.processed.insert(type_name.to_string());
        self.write_javadoc(provider, store, class)
    }

    fn write_javadoc(
        &mut self,
        provider: &dyn DescriptorProvider,
        store: &mut dyn JavadocStore,
        class: &ClassDescriptor,
    ) -> Result<()> {
        tracing::debug!(type_name = %class.name, "writing javadoc metadata");
        store
            .write(&class.name, &class.javadoc)
            .map_err(|source| GenerateError::Javadoc {
                type_name: class.name.clone(),
                source,
            })?;

        for property in &class.properties {
            let name = &property.ty.name;
            if self.processed.contains(name) || !provider.is_model(&property.ty) {
                continue;
            }
            self.processed.insert(name.clone());
            if let Some(model) = provider.load(name) {
                self.write_javadoc(provider, store, model)?;
            }
        }
        Ok(())
    }
}
