use anyhow::Context as _;
use serde_yaml::Sequence;

use crate::{document::Document, fieldpath, image};

use super::Transformer;

/// Replaces the image of every pod template container whose repository matches the configured
/// image's repository. The whole reference is replaced, tag included.
pub struct ImageTransformer<'a> {
    image: &'a str,
}

impl<'a> ImageTransformer<'a> {
    pub fn new(image: &'a str) -> Self {
        Self { image }
    }
}

impl Transformer for ImageTransformer<'_> {
    #[tracing::instrument(skip_all, level = "debug", fields(image = %self.image))]
    fn transform(&self, document: &mut Document) -> anyhow::Result<()> {
        let containers = document.get_required_as_mut::<Sequence>(fieldpath::CONTAINERS)?;

        for (i, container) in containers.iter_mut().enumerate() {
            let Some(current) = container.get_mut("image") else {
                continue;
            };

            let current = current
                .as_str()
                .map(str::to_owned)
                .with_context(|| format!("image of container {i} is not a string"))?;

            if image::same_repository(&current, self.image) {
                tracing::info!("Replacing Deployment image {}", self.image);
                tracing::debug!(
                    container = i,
                    from = image::image_tag(&current),
                    to = image::image_tag(self.image),
                    "retagging container image"
                );
                container["image"] = self.image.into();
            }
        }

        Ok(())
    }
}
