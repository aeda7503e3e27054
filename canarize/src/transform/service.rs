use anyhow::Context as _;

use crate::{
    config::CanaryConfig, document::Document, fieldpath, generator::MappingGenerator,
    labels::Labels,
};

use super::{
    CanaryRule, LabelTransformer, NameTransformer, NamespaceTransformer, SelectorTransformer,
    Transformer,
};

/// Creates a canary for an existing Service, optionally followed by a Mapping routing to it.
pub struct ServiceCanary<'a> {
    config: &'a CanaryConfig,
    labels: &'a Labels,
}

impl<'a> ServiceCanary<'a> {
    pub fn new(config: &'a CanaryConfig) -> Self {
        Self {
            config,
            labels: &config.labels,
        }
    }

    pub fn with_labels(mut self, labels: &'a Labels) -> Self {
        self.labels = labels;
        self
    }

    fn apply(&self, canary: &mut Document) -> anyhow::Result<Option<Document>> {
        let suffix = &self.config.suffix;

        NameTransformer::new(|name| suffix.apply(name)).transform(canary)?;
        let name = canary.name()?.to_owned();
        tracing::info!("Creating canary Service {name}");

        SelectorTransformer::required(fieldpath::SERVICE_SELECTOR, suffix).transform(canary)?;

        if let Some(namespace) = &self.config.namespace {
            NamespaceTransformer(namespace).transform(canary)?;
        }

        let mapping = if self.config.generate_mapping {
            let weight = self.config.canary_weight;
            match weight {
                Some(weight) => {
                    tracing::info!("Creating Mapping for Service {name} (weight: {weight})")
                }
                None => tracing::info!("Creating Mapping for Service {name} (weight: None)"),
            }

            Some(
                MappingGenerator::new(self.config, &name)
                    .weight(weight)
                    .labels(self.labels)
                    .generate()?,
            )
        } else {
            None
        };

        // Only the Service gets its labels merged, the Mapping carries them as given.
        LabelTransformer(self.labels).transform(canary)?;

        Ok(mapping)
    }
}

impl CanaryRule for ServiceCanary<'_> {
    #[tracing::instrument(skip_all, level = "debug")]
    fn canarize(&self, document: &Document) -> anyhow::Result<Vec<Document>> {
        let mut canary = document.clone();
        let mapping = self.apply(&mut canary).with_context(|| {
            format!(
                "creating canary for Service `{}`",
                document.name().unwrap_or("<unnamed>")
            )
        })?;

        let mut out = Vec::with_capacity(2);
        out.push(canary);
        out.extend(mapping);
        Ok(out)
    }
}
