use crate::document::Document;

use super::Transformer;

/// Sets (or overwrites) `metadata.namespace`.
pub struct NamespaceTransformer<'a>(pub &'a str);

impl Transformer for NamespaceTransformer<'_> {
    fn transform(&self, document: &mut Document) -> anyhow::Result<()> {
        document.metadata_mut()?.set_namespace(self.0);
        Ok(())
    }
}
