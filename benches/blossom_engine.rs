use criterion::{Criterion, black_box, criterion_group, criterion_main};
use edmatch::{
    BlossomEngine, GraphSampler, MatcherConfig, MaximumMatching, SampleConfig, ShrinkPolicy,
};

fn bench_blossom_engine(c: &mut Criterion) {
    let sparse = GraphSampler::sample(&SampleConfig {
        nodes: 256,
        edge_probability: 0.02,
        seed: Some(42),
    })
    .expect("sparse graph");
    let dense = GraphSampler::sample(&SampleConfig {
        nodes: 128,
        edge_probability: 0.3,
        seed: Some(7),
    })
    .expect("dense graph");

    let mut group = c.benchmark_group("blossom_engine");

    group.bench_function("restart_sparse_256", |b| {
        b.iter(|| {
            let mut engine = BlossomEngine::new(&sparse, ShrinkPolicy::RestartScan);
            engine.run().expect("search");
            black_box(engine.state().matching_size());
        });
    });

    group.bench_function("resume_sparse_256", |b| {
        b.iter(|| {
            let mut engine = BlossomEngine::new(&sparse, ShrinkPolicy::Resume);
            engine.run().expect("search");
            black_box(engine.state().matching_size());
        });
    });

    group.bench_function("compute_dense_128", |b| {
        let matcher = MaximumMatching::new(MatcherConfig::default());
        b.iter(|| {
            let summary = matcher.compute(&dense).expect("matching");
            black_box(summary.size());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_blossom_engine);
criterion_main!(benches);
