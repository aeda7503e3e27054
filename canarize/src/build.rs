use std::io::Write;

use anyhow::Context;

use crate::{Source, config::CanaryConfig, document::Document, transform, yaml};

/// Accumulates the canary documents of every source, in input order.
#[derive(Debug)]
pub struct Builder<'a> {
    config: &'a CanaryConfig,
    output: Vec<Document>,
}

impl<'a> Builder<'a> {
    pub fn new(config: &'a CanaryConfig) -> Self {
        Self {
            config,
            output: Vec::new(),
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.output
    }

    /// Canarizes every document of `source`.
    ///
    /// A segment that fails to parse is reported and skipped. A document missing a field its rule
    /// requires aborts the build.
    #[tracing::instrument(skip_all, level = "debug", fields(source = %source.name))]
    pub fn add(&mut self, source: &Source) -> anyhow::Result<()> {
        for (i, segment) in yaml::split_documents(&source.text).into_iter().enumerate() {
            let value = match yaml::from_str::<serde_yaml::Value>(segment) {
                Ok(value) => value,
                Err(err) => {
                    tracing::error!("Error parsing manifest {}:\n{err}", source.name);
                    continue;
                }
            };

            if !value.is_mapping() {
                tracing::debug!(index = i, "skipping document that is not a mapping");
                continue;
            }

            let document = Document::try_from(value)?;
            let canaries = transform::canarize(self.config, &document)
                .with_context(|| format!("processing document {i} of {}", source.name))?;
            self.output.extend(canaries);
        }

        Ok(())
    }

    #[tracing::instrument(skip_all)]
    pub fn build<'s>(
        mut self,
        sources: impl IntoIterator<Item = &'s Source>,
        out: &mut dyn Write,
    ) -> anyhow::Result<()> {
        for source in sources {
            self.add(source)?;
        }

        let stream = yaml::to_stream(&self.output)?;
        out.write_all(stream.as_bytes())
            .context("writing canary manifests")?;
        Ok(())
    }
}
