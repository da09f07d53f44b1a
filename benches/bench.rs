//! Criterion benchmarks for the Saffron engine.
//!
//! Covers text normalization, query expansion, index training, search,
//! related-product lookup and category recommendation over a synthetic
//! catalog.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use saffron::analysis::TextNormalizer;
use saffron::classify::TrainingSample;
use saffron::engine::Engine;
use saffron::expansion::{BilingualExpander, QueryExpander};
use saffron::index::Document;

const DISHES: &[&str] = &[
    "phở", "bún", "cơm", "bánh mì", "gỏi cuốn", "lẩu", "mì", "cháo", "xôi", "bánh xèo",
];
const PROTEINS: &[&str] = &[
    "bò", "gà", "heo", "tôm", "cá hồi", "mực", "vịt", "đậu phụ", "sườn", "cua",
];
const STYLES: &[&str] = &[
    "nướng", "chiên giòn", "hấp", "xào tỏi", "kho tộ", "sốt cay", "rán", "luộc",
];

/// Generate a synthetic catalog by combining dish, protein and style.
fn generate_catalog(count: usize) -> Vec<Document> {
    (0..count)
        .map(|i| {
            let dish = DISHES[i % DISHES.len()];
            let protein = PROTEINS[(i / DISHES.len()) % PROTEINS.len()];
            let style = STYLES[(i / 7) % STYLES.len()];
            Document::new(i as i64 + 1)
                .with_name(format!("{dish} {protein} {style}"))
                .with_description(format!("Món {dish} với {protein}, chế biến kiểu {style}"))
                .with_details(format!("Mã món {i}. Giá 45.000đ"))
        })
        .collect()
}

fn generate_samples(count: usize) -> Vec<TrainingSample> {
    (0..count)
        .map(|i| {
            let dish = DISHES[i % DISHES.len()];
            let protein = PROTEINS[(i * 3) % PROTEINS.len()];
            TrainingSample::new(format!("{dish} {protein}"), (i % DISHES.len()) as i64)
        })
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let normalizer = TextNormalizer::vietnamese().unwrap();
    let text = "Món Phở Bò tái lăn này RẤT NGON!!! Giá chỉ 50.000đ. <b>Xem thêm</b> tại http://example.com";

    let mut group = c.benchmark_group("analysis");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("normalize", |b| b.iter(|| normalizer.normalize(black_box(text))));

    let expander = BilingualExpander::default();
    group.bench_function("expand", |b| {
        b.iter(|| expander.expand(black_box("cá hồi nướng với kem dâu")))
    });
    group.finish();
}

fn bench_train_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("train_search");
    group.sample_size(10);
    for size in [100, 1000] {
        let catalog = generate_catalog(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &catalog, |b, catalog| {
            let engine = Engine::in_memory().unwrap();
            b.iter(|| engine.train_search(black_box(catalog)))
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let engine = Engine::in_memory().unwrap();
    engine.train_search(&generate_catalog(2000));
    engine.train_recommend(&generate_samples(500));

    let mut group = c.benchmark_group("queries");
    group.bench_function("search", |b| {
        b.iter(|| engine.search(black_box("phở bò nướng"), Some(10)))
    });
    group.bench_function("related", |b| {
        b.iter(|| engine.related(black_box(42), Some(5)).unwrap())
    });
    group.bench_function("recommend", |b| {
        b.iter(|| engine.recommend(black_box("bún tôm cơm gà lẩu cua"), Some(5)))
    });
    group.finish();
}

criterion_group!(benches, bench_normalize, bench_train_search, bench_queries);
criterion_main!(benches);
