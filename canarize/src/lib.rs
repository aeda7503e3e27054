use std::{
    io::{Read, Write},
    path::Path,
};

use anyhow::Context;

use self::{build::Builder, config::CanaryConfig, manifest::Str};

pub mod build;
pub mod config;
pub mod document;
pub mod fieldpath;
pub mod generator;
pub mod image;
pub mod labels;
pub mod logging;
pub mod manifest;
mod serde_ex;
pub mod transform;
pub mod yaml;

pub use self::transform::canarize;

/// The text of one input along with a name to report it by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: Str,
    pub text: String,
}

impl Source {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading manifest {}", path.display()))?;
        Ok(Source {
            name: path.display().to_string().into(),
            text,
        })
    }

    pub fn stdin() -> anyhow::Result<Self> {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading manifests from stdin")?;
        Ok(Source {
            name: "<stdin>".into(),
            text,
        })
    }
}

/// Canarizes every source in order and writes the resulting stream to `out`.
pub fn build(config: &CanaryConfig, sources: &[Source], out: &mut dyn Write) -> anyhow::Result<()> {
    Builder::new(config).build(sources, out)
}
