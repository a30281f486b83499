use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tyson_core::normalizer::normalize;
use tyson_core::{TysonCompiler, TysonOptions};

// ============================================================================
// Test Data: Varying Complexity and Size
// ============================================================================

const TINY_TYSON: &str = r#"{ value: 42 }"#;

const SMALL_TYSON: &str = r#"{
    name: "test", // app name
    version: 1.0,
    enabled: true,
    tags: ["a", "b", "c"],
}"#;

const MEDIUM_TYSON: &str = r#"import { Deployment } from './deployment.interface';

{: Deployment
    // fleet configuration
    service_name: "My App",
    replicas: 3,
    tls: true,

    servers: [
        { host: "server1.com", port: 8080, active: true, },
        { host: "server2.com", port: 8081, active: true, }, // canary
        { host: "server3.com", port: 8082, active: false, },
    ],

    limits: {
        cpu: 2.5,
        memory_mb: 4096,
        // burst is best-effort
        burst: null,
    },
}"#;

fn large_tyson() -> String {
    let mut doc = String::from("{\n  entries: [\n");
    for i in 0..500 {
        doc.push_str(&format!(
            "    {{ id: {i}, name: \"entry-{i}\", weight: {}.5, live: {}, }}, // row {i}\n",
            i % 97,
            i % 2 == 0
        ));
    }
    doc.push_str("  ],\n}\n");
    doc
}

fn bench_normalize(c: &mut Criterion) {
    let large = large_tyson();
    let mut group = c.benchmark_group("normalize");
    for (name, source) in [
        ("tiny", TINY_TYSON),
        ("small", SMALL_TYSON),
        ("medium", MEDIUM_TYSON),
        ("large", large.as_str()),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, source| {
            b.iter(|| normalize(black_box(source)));
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let large = large_tyson();
    let mut group = c.benchmark_group("parse");
    for (name, source) in [
        ("tiny", TINY_TYSON),
        ("small", SMALL_TYSON),
        ("medium", MEDIUM_TYSON),
        ("large", large.as_str()),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, source| {
            let mut compiler = TysonCompiler::new(TysonOptions::default());
            b.iter(|| compiler.parse_str(black_box(source), "bench.tyson").unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_normalize, bench_parse);
criterion_main!(benches);
