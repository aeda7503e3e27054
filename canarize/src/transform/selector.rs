use anyhow::Context as _;
use serde_yaml::{Mapping, Value};

use crate::{config::Suffix, document::Document, fieldpath::FieldPath};

use super::Transformer;

/// Appends the suffix to every value (never the keys) of the label mapping at `path`.
pub struct SelectorTransformer<'a> {
    path: FieldPath<'a>,
    suffix: &'a Suffix,
    required: bool,
}

impl<'a> SelectorTransformer<'a> {
    /// The mapping must exist, its absence is an error.
    pub fn required(path: FieldPath<'a>, suffix: &'a Suffix) -> Self {
        Self {
            path,
            suffix,
            required: true,
        }
    }

    /// A missing mapping is skipped.
    pub fn optional(path: FieldPath<'a>, suffix: &'a Suffix) -> Self {
        Self {
            path,
            suffix,
            required: false,
        }
    }
}

impl Transformer for SelectorTransformer<'_> {
    fn transform(&self, document: &mut Document) -> anyhow::Result<()> {
        let labels = if self.required {
            document.get_required_as_mut::<Mapping>(self.path)?
        } else {
            match document.get_optional_as_mut::<Mapping>(self.path)? {
                Some(labels) => labels,
                None => return Ok(()),
            }
        };

        for (key, value) in labels.iter_mut() {
            let suffixed = suffixed(value, self.suffix).with_context(|| {
                let key = key.as_str().unwrap_or("<non-string key>");
                format!("suffixing label `{key}` at `{}`", self.path)
            })?;
            *value = Value::String(suffixed);
        }

        Ok(())
    }
}

fn suffixed(value: &Value, suffix: &Suffix) -> anyhow::Result<String> {
    match value {
        Value::String(s) => Ok(suffix.apply(s)),
        Value::Bool(b) => Ok(suffix.apply(&b.to_string())),
        Value::Number(n) => Ok(suffix.apply(&n.to_string())),
        _ => anyhow::bail!("expected a scalar label value"),
    }
}
