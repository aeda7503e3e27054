use std::{io::Write, path::PathBuf};

use anyhow::Context;
use canarize::{
    Source,
    config::{CanaryConfig, DEFAULT_CANARY_SUFFIX, DEFAULT_MAPPING_PREFIX, Suffix},
    labels::Labels,
    manifest::Str,
};
use clap::Parser;

/// Canarize a set of files.
#[derive(Parser)]
#[command(name = "canarize", version)]
struct Args {
    /// suffix for the resources names
    #[arg(short, long, default_value = DEFAULT_CANARY_SUFFIX, allow_hyphen_values = true, env = "CANARIZE_SUFFIX")]
    suffix: Suffix,

    /// prefix for all the Mappings
    #[arg(short = 'P', long, default_value = DEFAULT_MAPPING_PREFIX, env = "CANARIZE_PREFIX")]
    prefix: Str,

    /// generate a Mapping only for the canary
    #[arg(short = 'm', long, env = "CANARIZE_GEN_MAPPING")]
    gen_mapping: bool,

    /// enable some debugging
    #[arg(long, env = "CANARIZE_DEBUG")]
    debug: bool,

    /// namespace
    #[arg(short, long, env = "CANARIZE_NAMESPACE")]
    namespace: Option<Str>,

    /// image to use in the deployment
    #[arg(short = 'I', long, env = "CANARIZE_IMAGE")]
    image: Option<Str>,

    /// weight for the service
    #[arg(short = 'w', long, allow_negative_numbers = true, env = "CANARIZE_CANARY_WEIGHT")]
    canary_weight: Option<i64>,

    /// output file
    #[arg(short, long, value_name = "FILE", env = "CANARIZE_OUTPUT")]
    output: Option<PathBuf>,

    /// extra labels for generated resources
    #[arg(short, long, value_name = "KEY1=VAL1,KEY2=VAL2...", env = "CANARIZE_LABELS")]
    labels: Option<Labels>,

    /// manifests to process, standard input when none are given
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

impl Args {
    fn config(&self) -> CanaryConfig {
        CanaryConfig {
            suffix: self.suffix.clone(),
            prefix: self.prefix.clone(),
            generate_mapping: self.gen_mapping,
            namespace: self.namespace.clone(),
            image: self.image.clone(),
            canary_weight: self.canary_weight,
            labels: self.labels.clone().unwrap_or_default(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    canarize::logging::init(args.debug)?;

    let config = args.config();
    tracing::debug!(?config, "resolved options");

    let sources = if args.files.is_empty() {
        vec![Source::stdin()?]
    } else {
        args.files
            .iter()
            .map(Source::load)
            .collect::<anyhow::Result<Vec<_>>>()?
    };

    let mut out = Vec::new();
    canarize::build(&config, &sources, &mut out).context("canarizing manifests")?;

    match &args.output {
        Some(path) => {
            tracing::info!("Writing to {}", path.display());
            std::fs::write(path, &out).with_context(|| format!("writing {}", path.display()))?;
            if args.debug {
                tracing::info!("File contents:\n{}", String::from_utf8_lossy(&out));
            }
        }
        None => {
            tracing::info!("Writing to <stdout>");
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&out).context("writing to stdout")?;
            stdout.flush()?;
        }
    }

    Ok(())
}
