use core::fmt;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

pub type Str = CompactString;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMeta<V, K> {
    pub api_version: V,
    pub kind: K,
}

impl<V, K> Default for TypeMeta<V, K>
where
    V: Default,
    K: Default,
{
    fn default() -> Self {
        Self {
            api_version: V::default(),
            kind: K::default(),
        }
    }
}

pub mod kind {
    use super::define_symbol;

    define_symbol!(Deployment = "Deployment");
    define_symbol!(Service = "Service");
    define_symbol!(Mapping = "Mapping");
}

pub mod apiversion {
    use super::define_symbol;

    define_symbol!(AmbassadorV1 = "getambassador.io/v1");
}

macro_rules! define_symbol {
    ($name:ident = $value:literal) => {
        #[derive(Clone, PartialEq, Eq, Hash, Default)]
        #[allow(non_camel_case_types)]
        pub struct $name;

        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", $value)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", $value)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str($value)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value: $crate::manifest::Str = ::serde::Deserialize::deserialize(deserializer)?;
                if value == $value {
                    Ok($name)
                } else {
                    Err(serde::de::Error::custom(format!(
                        "expected `{}`, found `{value}`",
                        $value
                    )))
                }
            }
        }

        impl $crate::manifest::Symbol for $name {
            const VALUE: &'static str = $value;
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                other == $value
            }
        }
    };
}

use define_symbol;

pub trait Symbol: fmt::Debug + Send + Sync {
    const VALUE: &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip_through_yaml() {
        let meta: TypeMeta<apiversion::AmbassadorV1, kind::Mapping> =
            serde_yaml::from_str("apiVersion: getambassador.io/v1\nkind: Mapping\n").unwrap();
        assert_eq!(meta, TypeMeta::default());
        assert!(kind::Mapping == *"Mapping");
    }

    #[test]
    fn symbol_rejects_other_values() {
        let err = serde_yaml::from_str::<kind::Service>("Deployment").unwrap_err();
        assert!(
            err.to_string().contains("expected `Service`, found `Deployment`"),
            "{err}"
        );
    }
}
