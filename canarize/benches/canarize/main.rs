use canarize::{Source, config::CanaryConfig};

const MANIFESTS: &str = include_str!("../../tests/canarize/testdata/mixed-stream/input.yaml");

fn main() {
    divan::main();
}

fn source(copies: usize) -> Source {
    Source {
        name: "bench.yaml".into(),
        text: vec![MANIFESTS; copies].join("---\n"),
    }
}

#[divan::bench(args = [1, 16, 256])]
fn canarize_stream(bencher: divan::Bencher, copies: usize) {
    let config = CanaryConfig {
        generate_mapping: true,
        canary_weight: Some(10),
        labels: "team=platform".parse().unwrap(),
        ..Default::default()
    };
    let sources = [source(copies)];

    bencher.bench_local(|| {
        let mut out = Vec::new();
        canarize::build(&config, &sources, &mut out).unwrap();
        out
    });
}
