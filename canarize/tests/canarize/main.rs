use std::path::Path;

use anyhow::Context;
use canarize::{Source, config::CanaryConfig};

datatest_stable::harness! {
    { test = test, root = "tests/canarize/testdata", pattern = r"input\.yaml$" },
}

fn test(path: &Path) -> datatest_stable::Result<()> {
    let dir = path.parent().unwrap();

    let options = dir.join("options.yaml");
    let config = if options.exists() {
        let text = std::fs::read_to_string(&options).context("reading options")?;
        serde_yaml::from_str::<CanaryConfig>(&text).context("parsing options")?
    } else {
        CanaryConfig::default()
    };

    let source = Source::load(path)?;
    let mut out = std::io::Cursor::new(Vec::new());
    canarize::build(&config, &[source], &mut out)
        .with_context(|| format!("canarizing {}", path.display()))?;

    let actual = String::from_utf8(out.into_inner())?;
    snapshot(&dir.join("expected.yaml"), &actual)
}

fn snapshot(path: &Path, actual: &str) -> datatest_stable::Result<()> {
    if !path.exists() || std::env::var("UPDATE_SNAPSHOTS").is_ok() {
        std::fs::write(path, actual).context("writing snapshot")?;
        return Ok(());
    }

    let expected = std::fs::read_to_string(path).context("reading snapshot")?;
    if expected == actual {
        return Ok(());
    }

    let chunks = dissimilar::diff(&expected, actual);
    eprintln!(
        "Snapshot mismatch for {}:\n{}",
        path.display(),
        format_chunks(chunks)
    );

    Err(format!("Snapshot mismatch for {}", path.display()).into())
}

fn format_chunks(chunks: Vec<dissimilar::Chunk>) -> String {
    let mut buf = String::new();
    for chunk in chunks {
        let formatted = match chunk {
            dissimilar::Chunk::Equal(text) => text.into(),
            dissimilar::Chunk::Delete(text) => format!("\x1b[4m\x1b[31m{}\x1b[0m", text),
            dissimilar::Chunk::Insert(text) => format!("\x1b[4m\x1b[32m{}\x1b[0m", text),
        };
        buf.push_str(&formatted);
    }
    buf
}
