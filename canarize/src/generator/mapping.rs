use serde::Serialize;

use crate::{
    config::CanaryConfig,
    document::Document,
    labels::Labels,
    manifest::{Str, TypeMeta, apiversion, kind},
};

/// Generates an Ambassador `Mapping` routing the configured prefix to a service.
#[derive(Debug)]
pub struct MappingGenerator<'a> {
    config: &'a CanaryConfig,
    service: &'a str,
    weight: Option<i64>,
    labels: Option<&'a Labels>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Mapping<'a> {
    #[serde(flatten)]
    type_meta: TypeMeta<apiversion::AmbassadorV1, kind::Mapping>,
    metadata: Metadata<'a>,
    spec: MappingSpec<'a>,
}

#[derive(Debug, Serialize)]
struct Metadata<'a> {
    name: Str,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    labels: Option<&'a Labels>,
}

#[derive(Debug, Serialize)]
struct MappingSpec<'a> {
    prefix: &'a str,
    service: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<i64>,
}

impl<'a> MappingGenerator<'a> {
    pub fn new(config: &'a CanaryConfig, service: &'a str) -> Self {
        Self {
            config,
            service,
            weight: None,
            labels: None,
        }
    }

    pub fn weight(mut self, weight: Option<i64>) -> Self {
        self.weight = weight;
        self
    }

    pub fn labels(mut self, labels: &'a Labels) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn generate(&self) -> anyhow::Result<Document> {
        let mapping = Mapping {
            type_meta: TypeMeta::default(),
            metadata: Metadata {
                name: compact_str::format_compact!("mapping-for-{}", self.service),
                namespace: self.config.namespace.as_deref(),
                labels: self.labels.filter(|labels| !labels.is_empty()),
            },
            spec: MappingSpec {
                prefix: &self.config.prefix,
                service: self.service,
                weight: self.weight.filter(|&weight| weight != 0),
            },
        };

        Document::try_from(serde_yaml::to_value(&mapping)?)
    }
}
