use crate::{document::Document, labels::Labels};

use super::Transformer;

/// Stamps extra labels onto `metadata.labels`.
///
/// A non-empty existing mapping is merged into (overwriting on conflict), anything else is replaced
/// by the extra labels. Empty extra labels leave the document untouched.
pub struct LabelTransformer<'a>(pub &'a Labels);

impl Transformer for LabelTransformer<'_> {
    fn transform(&self, document: &mut Document) -> anyhow::Result<()> {
        if self.0.is_empty() {
            return Ok(());
        }

        document.metadata_mut()?.merge_or_replace_labels(self.0);
        Ok(())
    }
}
