use serde_yaml::{Mapping, Value};

use crate::labels::Labels;

#[derive(Debug)]
pub struct MetadataViewMut<'a>(&'a mut Mapping);

impl<'a> MetadataViewMut<'a> {
    pub(super) fn new(metadata: &'a mut Mapping) -> Self {
        Self(metadata)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.0
            .insert(Value::from("name"), Value::String(name.into()));
    }

    pub fn set_namespace(&mut self, namespace: impl Into<String>) {
        self.0
            .insert(Value::from("namespace"), Value::String(namespace.into()));
    }

    /// Merges `labels` into a non-empty `labels` mapping, overwriting on conflict.
    /// Anything else (absent, empty, not a mapping) is replaced by `labels` wholesale.
    pub fn merge_or_replace_labels(&mut self, labels: &Labels) {
        if let Some(Value::Mapping(existing)) = self.0.get_mut("labels") {
            if !existing.is_empty() {
                for (key, value) in labels.iter() {
                    existing.insert(Value::from(key.as_str()), Value::from(value.as_str()));
                }
                return;
            }
        }

        self.0
            .insert(Value::from("labels"), Value::Mapping(labels.to_mapping()));
    }
}
