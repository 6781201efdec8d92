use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use ndarray::Array2;
use projection::{CsrMatrix, ProjectionConfig, ProjectionSimHash};

fn sample(rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(i, j)| {
        if (i + j) % 7 == 0 {
            ((i * 31 + j * 17) % 13) as f64 - 6.0
        } else {
            0.0
        }
    })
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection_transform");

    for (rows, cols) in [(256usize, 64usize), (1024, 512)] {
        let dense = sample(rows, cols);
        let sparse = CsrMatrix::from_dense(&dense);
        group.throughput(Throughput::Elements(rows as u64));

        for parallel in [false, true] {
            let cfg = ProjectionConfig::new()
                .with_n_bits(64)
                .with_seed(1)
                .with_parallel(parallel);
            let mut hasher = ProjectionSimHash::from_config(cfg).expect("valid config");
            hasher.fit(&dense).expect("fit");

            group.bench_function(format!("dense_{rows}x{cols}_par_{parallel}"), |b| {
                b.iter(|| hasher.transform_int(black_box(&dense)).expect("transform"))
            });
            group.bench_function(format!("sparse_{rows}x{cols}_par_{parallel}"), |b| {
                b.iter(|| hasher.transform_int(black_box(&sparse)).expect("transform"))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_transform);
criterion_main!(benches);
