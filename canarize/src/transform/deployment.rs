use anyhow::Context as _;

use crate::{config::CanaryConfig, document::Document, fieldpath, labels::Labels};

use super::{
    CanaryRule, ImageTransformer, LabelTransformer, NameTransformer, NamespaceTransformer,
    SelectorTransformer, Transformer,
};

/// Creates a canary for an existing Deployment.
///
/// The name and every label value of the selector and the pod template get the suffix appended,
/// so the canary selects its own pods only.
pub struct DeploymentCanary<'a> {
    config: &'a CanaryConfig,
    labels: &'a Labels,
}

impl<'a> DeploymentCanary<'a> {
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

    fn apply(&self, canary: &mut Document) -> anyhow::Result<()> {
        let suffix = &self.config.suffix;

        NameTransformer::new(|name| suffix.apply(name)).transform(canary)?;
        tracing::info!("Creating canary Deployment {}", canary.name()?);

        // `matchLabels` is optional, the pod template labels are not.
        SelectorTransformer::optional(fieldpath::MATCH_LABELS, suffix).transform(canary)?;
        SelectorTransformer::required(fieldpath::TEMPLATE_LABELS, suffix).transform(canary)?;

        if let Some(image) = &self.config.image {
            ImageTransformer::new(image).transform(canary)?;
        }

        if let Some(namespace) = &self.config.namespace {
            NamespaceTransformer(namespace).transform(canary)?;
        }

        LabelTransformer(self.labels).transform(canary)
    }
}

impl CanaryRule for DeploymentCanary<'_> {
    #[tracing::instrument(skip_all, level = "debug")]
    fn canarize(&self, document: &Document) -> anyhow::Result<Vec<Document>> {
        let mut canary = document.clone();
        self.apply(&mut canary).with_context(|| {
            format!(
                "creating canary for Deployment `{}`",
                document.name().unwrap_or("<unnamed>")
            )
        })?;

        Ok(vec![canary])
    }
}

#[cfg(test)]
mod tests {
    use serde_yaml::Value;

    use super::*;
    use crate::{config::Suffix, fieldpath::FieldPath};

    const API: &str = r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: api
  labels:
    team: y
    env: prod
spec:
  replicas: 3
  selector:
    matchLabels:
      app: api
  template:
    metadata:
      labels:
        app: api
        tier: web
    spec:
      containers:
      - name: api
        image: registry/app:v1
      - name: proxy
        image: registry/other:v1
"#;

    fn doc(s: &str) -> Document {
        serde_yaml::from_str(s).unwrap()
    }

    fn value(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    fn canarize(config: &CanaryConfig, input: &str) -> Document {
        let mut out = DeploymentCanary::new(config).canarize(&doc(input)).unwrap();
        assert_eq!(out.len(), 1);
        out.remove(0)
    }

    #[test]
    fn default_config_suffixes_name_and_labels() {
        let out = canarize(&CanaryConfig::default(), API);
        assert_eq!(out.name().unwrap(), "api-canary");
        assert_eq!(
            out.get_required(fieldpath::MATCH_LABELS).unwrap(),
            &value("app: api-canary")
        );
        assert_eq!(
            out.get_required(fieldpath::TEMPLATE_LABELS).unwrap(),
            &value("app: api-canary\ntier: web-canary")
        );
        // Untouched fields survive as is.
        assert_eq!(
            out.get_required(FieldPath::new(&["spec", "replicas"])).unwrap(),
            &value("3")
        );
        assert_eq!(
            out.get_required(FieldPath::new(&["metadata", "labels"])).unwrap(),
            &value("team: y\nenv: prod")
        );
        assert_eq!(
            out.get_required(fieldpath::CONTAINERS).unwrap(),
            doc(API).get_required(fieldpath::CONTAINERS).unwrap()
        );
    }

    #[test]
    fn input_is_not_modified() {
        let input = doc(API);
        let _ = DeploymentCanary::new(&CanaryConfig::default())
            .canarize(&input)
            .unwrap();
        assert_eq!(input, doc(API));
    }

    #[test]
    fn custom_suffix() {
        let config = CanaryConfig {
            suffix: Suffix::new("next"),
            ..Default::default()
        };
        let out = canarize(&config, API);
        assert_eq!(out.name().unwrap(), "api-next");
        assert_eq!(
            out.get_required(fieldpath::MATCH_LABELS).unwrap(),
            &value("app: api-next")
        );
    }

    #[test]
    fn missing_match_labels_is_tolerated() {
        let out = canarize(
            &CanaryConfig::default(),
            "kind: Deployment\nmetadata:\n  name: api\nspec:\n  template:\n    metadata:\n      labels:\n        app: api\n",
        );
        assert_eq!(out.name().unwrap(), "api-canary");
        assert!(out.get_optional(fieldpath::MATCH_LABELS).is_none());
    }

    #[test]
    fn missing_template_labels_is_fatal() {
        let err = DeploymentCanary::new(&CanaryConfig::default())
            .canarize(&doc(
                "kind: Deployment\nmetadata:\n  name: api\nspec:\n  selector:\n    matchLabels:\n      app: api\n",
            ))
            .unwrap_err();
        assert_eq!(
            format!("{err:#}"),
            "creating canary for Deployment `api`: missing required field `spec/template/metadata/labels`"
        );
    }

    #[test]
    fn replaces_matching_image() {
        let config = CanaryConfig {
            image: Some("registry/app:v2".into()),
            ..Default::default()
        };
        let out = canarize(&config, API);
        let containers = out.get_required(fieldpath::CONTAINERS).unwrap();
        assert_eq!(containers[0]["image"], value("registry/app:v2"));
        assert_eq!(containers[1]["image"], value("registry/other:v1"));
    }

    #[test]
    fn sets_namespace() {
        let config = CanaryConfig {
            namespace: Some("canaries".into()),
            ..Default::default()
        };
        let out = canarize(&config, API);
        assert_eq!(
            out.get_required(FieldPath::new(&["metadata", "namespace"]))
                .unwrap(),
            &value("canaries")
        );
    }

    #[test]
    fn merges_labels_into_existing() {
        let config = CanaryConfig {
            labels: "team=x".parse().unwrap(),
            ..Default::default()
        };
        let out = canarize(&config, API);
        assert_eq!(
            out.get_required(FieldPath::new(&["metadata", "labels"])).unwrap(),
            &value("team: x\nenv: prod")
        );
    }

    #[test]
    fn replaces_absent_or_empty_labels() {
        let config = CanaryConfig {
            labels: "team=x".parse().unwrap(),
            ..Default::default()
        };
        for input in [
            "kind: Deployment\nmetadata:\n  name: api\nspec:\n  template:\n    metadata:\n      labels:\n        app: api\n",
            "kind: Deployment\nmetadata:\n  name: api\n  labels: {}\nspec:\n  template:\n    metadata:\n      labels:\n        app: api\n",
        ] {
            let out = canarize(&config, input);
            assert_eq!(
                out.get_required(FieldPath::new(&["metadata", "labels"])).unwrap(),
                &value("team: x")
            );
        }
    }

    #[test]
    fn explicit_labels_override_config_labels() {
        let config = CanaryConfig {
            labels: "team=x".parse().unwrap(),
            ..Default::default()
        };
        let labels: Labels = "owner=z".parse().unwrap();
        let out = DeploymentCanary::new(&config)
            .with_labels(&labels)
            .canarize(&doc(API))
            .unwrap();
        assert_eq!(
            out[0]
                .get_required(FieldPath::new(&["metadata", "labels"]))
                .unwrap(),
            &value("team: y\nenv: prod\nowner: z")
        );
    }

    #[test]
    fn suffix_is_applied_again_to_a_canary() {
        let config = CanaryConfig::default();
        let once = canarize(&config, API);
        let twice = DeploymentCanary::new(&config).canarize(&once).unwrap();
        assert_eq!(twice[0].name().unwrap(), "api-canary-canary");
    }
}
