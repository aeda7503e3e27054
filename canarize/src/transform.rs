mod deployment;
mod image;
mod label;
mod name;
mod namespace;
mod selector;
mod service;

pub use self::deployment::DeploymentCanary;
pub use self::image::ImageTransformer;
pub use self::label::LabelTransformer;
pub use self::name::NameTransformer;
pub use self::namespace::NamespaceTransformer;
pub use self::selector::SelectorTransformer;
pub use self::service::ServiceCanary;

use crate::{
    config::CanaryConfig,
    document::Document,
    manifest::{Symbol, kind},
};

/// An in-place rewrite of a single field (or group of fields) of a document.
pub trait Transformer {
    fn transform(&self, document: &mut Document) -> anyhow::Result<()>;
}

/// Derives the canary documents for one input document.
pub trait CanaryRule {
    fn canarize(&self, document: &Document) -> anyhow::Result<Vec<Document>>;
}

/// Derives the canary documents for `document` based on its `kind`.
/// Kinds other than `Deployment` and `Service` yield nothing.
pub fn canarize(config: &CanaryConfig, document: &Document) -> anyhow::Result<Vec<Document>> {
    match document.kind() {
        Some(k) if k == kind::Deployment::VALUE => DeploymentCanary::new(config).canarize(document),
        Some(k) if k == kind::Service::VALUE => ServiceCanary::new(config).canarize(document),
        other => {
            tracing::debug!(kind = ?other, "skipping unsupported kind");
            Ok(vec![])
        }
    }
}
