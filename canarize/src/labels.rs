use std::{convert::Infallible, fmt, ops::Deref, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::manifest::Str;

/// Extra labels stamped onto generated resources, in the order they were given.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(IndexMap<Str, Str>);

impl Labels {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_mapping(&self) -> Mapping {
        self.0
            .iter()
            .map(|(k, v)| (Value::from(k.as_str()), Value::from(v.as_str())))
            .collect()
    }
}

impl Deref for Labels {
    type Target = IndexMap<Str, Str>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<(Str, Str)> for Labels {
    fn from_iter<I: IntoIterator<Item = (Str, Str)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// Parses `KEY1=VAL1,KEY2=VAL2`. A pair without `=` is kept as a key with an empty value.
impl FromStr for Labels {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.split(',')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (key.into(), value.into()),
                None => (pair.into(), Str::default()),
            })
            .collect())
    }
}

impl fmt::Display for Labels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}
