use canonical::{EnPreprocessor, Preprocessor};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn bench_preprocess(c: &mut Criterion) {
    let places = EnPreprocessor::places();
    let mut group = c.benchmark_group("preprocess");

    for size in [64, 512, 4096].iter() {
        let text = "21 King St. N ".repeat(*size / 14);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("places_bytes_{size}"), |b| {
            b.iter(|| places.preprocess(black_box(&text)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_preprocess);
criterion_main!(benches);
