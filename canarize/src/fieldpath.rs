use core::fmt;

use serde_yaml::{Mapping, Sequence, Value};

/// A slash separated path of mapping keys into a document, e.g. `spec/selector/matchLabels`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldPath<'a> {
    segments: &'a [&'a str],
}

impl<'a> FieldPath<'a> {
    pub const fn new(segments: &'a [&'a str]) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &'a [&'a str] {
        self.segments
    }

    pub fn split_last(&self) -> Option<(FieldPath<'a>, &'a str)> {
        let (last, parent) = self.segments.split_last()?;
        Some((FieldPath::new(parent), last))
    }
}

impl fmt::Debug for FieldPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, r#""{self}""#)
    }
}

impl fmt::Display for FieldPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

pub const KIND: FieldPath<'static> = FieldPath::new(&["kind"]);
pub const METADATA: FieldPath<'static> = FieldPath::new(&["metadata"]);
pub const NAME: FieldPath<'static> = FieldPath::new(&["metadata", "name"]);
pub const SERVICE_SELECTOR: FieldPath<'static> = FieldPath::new(&["spec", "selector"]);
pub const MATCH_LABELS: FieldPath<'static> = FieldPath::new(&["spec", "selector", "matchLabels"]);
pub const TEMPLATE_LABELS: FieldPath<'static> =
    FieldPath::new(&["spec", "template", "metadata", "labels"]);
pub const CONTAINERS: FieldPath<'static> =
    FieldPath::new(&["spec", "template", "spec", "containers"]);

/// A required path was absent (or null) in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingField {
    pub path: String,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing required field `{}`", self.path)
    }
}

impl std::error::Error for MissingField {}

impl From<FieldPath<'_>> for MissingField {
    fn from(path: FieldPath<'_>) -> Self {
        MissingField {
            path: path.to_string(),
        }
    }
}

pub(crate) fn lookup<'v>(root: &'v Mapping, path: FieldPath<'_>) -> Option<&'v Value> {
    let (first, rest) = path.segments.split_first()?;
    let mut curr = root.get(*first)?;
    for segment in rest {
        curr = curr.get(*segment)?;
    }

    if curr.is_null() { None } else { Some(curr) }
}

pub(crate) fn lookup_mut<'v>(root: &'v mut Mapping, path: FieldPath<'_>) -> Option<&'v mut Value> {
    let (first, rest) = path.segments.split_first()?;
    let mut curr = root.get_mut(*first)?;
    for segment in rest {
        curr = curr.get_mut(*segment)?;
    }

    if curr.is_null() { None } else { Some(curr) }
}

/// Typed access to a node found at a [`FieldPath`].
pub trait FieldValue {
    fn try_as(value: &Value) -> anyhow::Result<&Self>;

    fn try_as_mut(value: &mut Value) -> anyhow::Result<&mut Self>;
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

impl FieldValue for Value {
    fn try_as(value: &Value) -> anyhow::Result<&Self> {
        Ok(value)
    }

    fn try_as_mut(value: &mut Value) -> anyhow::Result<&mut Self> {
        Ok(value)
    }
}

impl FieldValue for Mapping {
    fn try_as(value: &Value) -> anyhow::Result<&Self> {
        value
            .as_mapping()
            .ok_or_else(|| anyhow::anyhow!("expected a mapping but found {}", describe(value)))
    }

    fn try_as_mut(value: &mut Value) -> anyhow::Result<&mut Self> {
        match value {
            Value::Mapping(map) => Ok(map),
            _ => anyhow::bail!("expected a mapping but found {}", describe(value)),
        }
    }
}

impl FieldValue for Sequence {
    fn try_as(value: &Value) -> anyhow::Result<&Self> {
        value
            .as_sequence()
            .ok_or_else(|| anyhow::anyhow!("expected a sequence but found {}", describe(value)))
    }

    fn try_as_mut(value: &mut Value) -> anyhow::Result<&mut Self> {
        match value {
            Value::Sequence(seq) => Ok(seq),
            _ => anyhow::bail!("expected a sequence but found {}", describe(value)),
        }
    }
}

impl FieldValue for String {
    fn try_as(value: &Value) -> anyhow::Result<&Self> {
        match value {
            Value::String(s) => Ok(s),
            _ => anyhow::bail!("expected a string but found {}", describe(value)),
        }
    }

    fn try_as_mut(value: &mut Value) -> anyhow::Result<&mut Self> {
        match value {
            Value::String(s) => Ok(s),
            _ => anyhow::bail!("expected a string but found {}", describe(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_segments() {
        assert_eq!(TEMPLATE_LABELS.to_string(), "spec/template/metadata/labels");
        assert_eq!(format!("{MATCH_LABELS:?}"), r#""spec/selector/matchLabels""#);
    }

    #[test]
    fn split_last_returns_parent() {
        let (parent, last) = NAME.split_last().unwrap();
        assert_eq!(parent, METADATA);
        assert_eq!(last, "name");
        assert!(FieldPath::new(&[]).split_last().is_none());
    }

    #[test]
    fn lookup_treats_null_as_absent() {
        let root: Mapping = serde_yaml::from_str("spec:\n  selector:\n").unwrap();
        assert!(lookup(&root, SERVICE_SELECTOR).is_none());
        assert!(lookup(&root, MATCH_LABELS).is_none());
        assert!(lookup(&root, FieldPath::new(&["spec"])).is_some());
    }

    #[test]
    fn lookup_through_scalar_is_absent() {
        let root: Mapping = serde_yaml::from_str("spec: 3\n").unwrap();
        assert!(lookup(&root, SERVICE_SELECTOR).is_none());
    }

    #[test]
    fn typed_access_reports_found_type() {
        let value = Value::String("x".into());
        let err = Mapping::try_as(&value).unwrap_err();
        assert_eq!(err.to_string(), "expected a mapping but found a string");
    }
}
