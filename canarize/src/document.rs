mod view;

pub use self::view::MetadataViewMut;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::fieldpath::{self, FieldPath, FieldValue, MissingField};

/// A single parsed manifest, an ordered mapping of keys to arbitrary yaml values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    root: Mapping,
}

impl From<Mapping> for Document {
    fn from(root: Mapping) -> Self {
        Self { root }
    }
}

impl TryFrom<Value> for Document {
    type Error = anyhow::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Mapping(root) => Ok(Self { root }),
            other => Err(anyhow::anyhow!(
                "expected a manifest to be a mapping, found `{}`",
                crate::yaml::to_string(&other)?.trim_end()
            )),
        }
    }
}

impl Document {
    pub fn root(&self) -> &Mapping {
        &self.root
    }

    pub fn into_root(self) -> Mapping {
        self.root
    }

    /// The `kind` of the resource, `None` when it is missing or not a string.
    pub fn kind(&self) -> Option<&str> {
        self.get_optional(fieldpath::KIND).and_then(Value::as_str)
    }

    pub fn name(&self) -> anyhow::Result<&str> {
        self.get_required_as::<String>(fieldpath::NAME)
            .map(String::as_str)
    }

    /// Looks up `path`, absence (or an explicit null) is not an error.
    pub fn get_optional(&self, path: FieldPath<'_>) -> Option<&Value> {
        fieldpath::lookup(&self.root, path)
    }

    /// Looks up `path`, failing with [`MissingField`] when it is absent.
    pub fn get_required(&self, path: FieldPath<'_>) -> Result<&Value, MissingField> {
        self.get_optional(path).ok_or_else(|| path.into())
    }

    pub fn get_optional_mut(&mut self, path: FieldPath<'_>) -> Option<&mut Value> {
        fieldpath::lookup_mut(&mut self.root, path)
    }

    pub fn get_required_mut(&mut self, path: FieldPath<'_>) -> Result<&mut Value, MissingField> {
        self.get_optional_mut(path).ok_or_else(|| path.into())
    }

    pub fn get_optional_as<T: FieldValue + ?Sized>(
        &self,
        path: FieldPath<'_>,
    ) -> anyhow::Result<Option<&T>> {
        self.get_optional(path)
            .map(|value| T::try_as(value).with_context(|| format!("at `{path}`")))
            .transpose()
    }

    pub fn get_required_as<T: FieldValue + ?Sized>(&self, path: FieldPath<'_>) -> anyhow::Result<&T> {
        let value = self.get_required(path)?;
        T::try_as(value).with_context(|| format!("at `{path}`"))
    }

    pub fn get_optional_as_mut<T: FieldValue + ?Sized>(
        &mut self,
        path: FieldPath<'_>,
    ) -> anyhow::Result<Option<&mut T>> {
        self.get_optional_mut(path)
            .map(|value| T::try_as_mut(value).with_context(|| format!("at `{path}`")))
            .transpose()
    }

    pub fn get_required_as_mut<T: FieldValue + ?Sized>(
        &mut self,
        path: FieldPath<'_>,
    ) -> anyhow::Result<&mut T> {
        let value = self.get_required_mut(path)?;
        T::try_as_mut(value).with_context(|| format!("at `{path}`"))
    }

    pub fn metadata_mut(&mut self) -> anyhow::Result<MetadataViewMut<'_>> {
        self.get_required_as_mut::<Mapping>(fieldpath::METADATA)
            .map(MetadataViewMut::new)
    }
}
