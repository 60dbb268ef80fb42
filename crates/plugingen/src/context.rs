use plugingen_descriptor::{ClassDescriptor, DescriptorProvider, JavadocStore, TypeJavadoc};

use crate::error::{GenerateError, Result};

/// Read-only collaborators shared by every stage of one generation pass.
#[derive(Clone, Copy)]
pub struct GenerationContext<'a> {
    provider: &'a dyn DescriptorProvider,
    javadoc: &'a dyn JavadocStore,
}

impl<'a> GenerationContext<'a> {
    pub fn new(provider: &'a dyn DescriptorProvider, javadoc: &'a dyn JavadocStore) -> Self {
        Self { provider, javadoc }
    }

    pub fn provider(&self) -> &'a dyn DescriptorProvider {
        self.provider
    }

    pub fn load(&self, name: &str) -> Result<&'a ClassDescriptor> {
        self.provider
            .load(name)
            .ok_or_else(|| GenerateError::UnknownType {
                type_name: name.to_string(),
            })
    }

    /// Stored javadoc for `name`, falling back to what the descriptor itself carries.
    pub fn javadoc(&self, name: &str) -> Result<TypeJavadoc> {
        let stored = self
            .javadoc
            .read(name)
            .map_err(|source| GenerateError::Javadoc {
                type_name: name.to_string(),
                source,
            })?;
        if !stored.is_empty() {
            return Ok(stored);
        }
        Ok(self
            .provider
            .load(name)
            .map(|class| class.javadoc.clone())
            .unwrap_or_default())
    }
}
