use std::{convert::Infallible, fmt, ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{labels::Labels, manifest::Str};

pub const DEFAULT_CANARY_SUFFIX: &str = "-canary";

pub const DEFAULT_MAPPING_PREFIX: &str = "/";

/// Suffix appended to resource names and selector values, always starting with `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Suffix(Str);

impl Suffix {
    pub fn new(suffix: &str) -> Self {
        if suffix.starts_with('-') {
            Self(suffix.into())
        } else {
            let mut normalized = Str::with_capacity(suffix.len() + 1);
            normalized.push('-');
            normalized.push_str(suffix);
            Self(normalized)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Naive concatenation, an already suffixed value gets suffixed again.
    pub fn apply(&self, value: &str) -> String {
        format!("{value}{}", self.0)
    }
}

impl Default for Suffix {
    fn default() -> Self {
        Self(DEFAULT_CANARY_SUFFIX.into())
    }
}

impl Deref for Suffix {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for Suffix {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Options for a single canarize invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CanaryConfig {
    #[serde(default, with = "crate::serde_ex::string")]
    pub suffix: Suffix,
    #[serde(default = "default_prefix")]
    pub prefix: Str,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub generate_mapping: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<Str>,
    /// `repository[:tag]` replacing the image of matching containers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Str>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canary_weight: Option<i64>,
    #[serde(default, skip_serializing_if = "Labels::is_empty")]
    pub labels: Labels,
}

fn default_prefix() -> Str {
    DEFAULT_MAPPING_PREFIX.into()
}

impl Default for CanaryConfig {
    fn default() -> Self {
        Self {
            suffix: Suffix::default(),
            prefix: default_prefix(),
            generate_mapping: false,
            namespace: None,
            image: None,
            canary_weight: None,
            labels: Labels::default(),
        }
    }
}
