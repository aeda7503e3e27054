use crate::{document::Document, fieldpath};

use super::Transformer;

/// Rewrites `metadata.name` with `f(original_name)`.
pub struct NameTransformer<F> {
    f: F,
}

impl<F: Fn(&str) -> String> NameTransformer<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F: Fn(&str) -> String> Transformer for NameTransformer<F> {
    fn transform(&self, document: &mut Document) -> anyhow::Result<()> {
        let name = document.get_required_as_mut::<String>(fieldpath::NAME)?;
        *name = (self.f)(name);
        Ok(())
    }
}
