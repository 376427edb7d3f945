//! Reference assembly: named links built from optional row fields.

use populator_client::input::ReferenceInput;

/// Collects `(name, value, description)` candidates, keeping only those with
/// a non-empty value, in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct ReferenceAssembler {
    references: Vec<ReferenceInput>,
}

impl ReferenceAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate. Dropped silently when `value` is empty; any other
    /// value is kept verbatim.
    pub fn add(
        mut self,
        name: impl Into<String>,
        value: &str,
        description: impl Into<String>,
    ) -> Self {
        if !value.is_empty() {
            self.references.push(ReferenceInput {
                name: name.into(),
                uri: value.to_owned(),
                description: description.into(),
            });
        }
        self
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn build(self) -> Vec<ReferenceInput> {
        self.references
    }
}
