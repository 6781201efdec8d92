use criterion::{Criterion, black_box, criterion_group, criterion_main};
use simcohort::{
    BinaryCountVectorizer, CohortPipeline, ProjectionConfig, ProjectionSimHash, SpaceTokenizer,
    TextSimHashConfig, VectorizerConfig, text_cohort, text_cohorts,
};

const WORDS: [&str; 16] = [
    "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india", "juliet",
    "kilo", "lima", "mike", "november", "oscar", "papa",
];

fn corpus(documents: usize, words_per_doc: usize) -> Vec<String> {
    (0..documents)
        .map(|d| {
            (0..words_per_doc)
                .map(|w| WORDS[(d * 7 + w * 3 + d / 5) % WORDS.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn text_cohort_bench(c: &mut Criterion) {
    let docs = corpus(1, 200);
    let cfg = TextSimHashConfig::new().with_n_bits(64).with_bits_to_keep(16);

    c.bench_function("text_cohort_200_tokens", |b| {
        b.iter(|| {
            let fp = text_cohort(black_box(&docs[0]), &cfg).unwrap();
            black_box(fp);
        });
    });
}

fn text_cohorts_bench(c: &mut Criterion) {
    let docs = corpus(1_000, 50);
    let sequential = TextSimHashConfig::new().with_n_bits(64);
    let parallel = sequential.clone().with_parallel(true);

    let mut group = c.benchmark_group("text_cohorts_1000_docs");
    group.bench_function("sequential", |b| {
        b.iter(|| black_box(text_cohorts(black_box(&docs), &sequential, SpaceTokenizer).unwrap()));
    });
    group.bench_function("parallel", |b| {
        b.iter(|| black_box(text_cohorts(black_box(&docs), &parallel, SpaceTokenizer).unwrap()));
    });
    group.finish();
}

fn projection_pipeline_bench(c: &mut Criterion) {
    let docs = corpus(1_000, 30);

    c.bench_function("cohort_pipeline_fit_transform_1000_docs", |b| {
        b.iter(|| {
            let mut pipeline = CohortPipeline::new(
                BinaryCountVectorizer::new(VectorizerConfig::default()),
                ProjectionSimHash::from_config(
                    ProjectionConfig::new()
                        .with_n_bits(32)
                        .with_seed(7)
                        .with_parallel(true),
                )
                .unwrap(),
            );
            black_box(pipeline.fit_transform(black_box(&docs)).unwrap());
        });
    });
}

criterion_group!(
    benches,
    text_cohort_bench,
    text_cohorts_bench,
    projection_pipeline_bench
);
criterion_main!(benches);
