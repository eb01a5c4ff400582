// Performance benchmarks for catalog search, kNN lookup and next-course planning
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use foodans::prelude::*;
use foodans::{ItemRecord, SimilarityIndex};
use rand::prelude::*;
use std::sync::Arc;

const AREAS: [&str; 4] = ["Anna Nagar", "Simmakkal", "KK Nagar", "Tallakulam"];
const CATEGORIES: [&str; 5] = ["Tiffin", "Tea", "Lunch", "Fast Food", "Café"];

fn generate_catalog(size: usize) -> Catalog {
    let mut rng = StdRng::seed_from_u64(7);
    let records = (0..size)
        .map(|i| ItemRecord {
            vendor_name: format!("vendor {}", i % 200),
            item_name: format!("item {}", i % 500),
            area: AREAS[rng.random_range(0..AREAS.len())].to_string(),
            category: CATEGORIES[rng.random_range(0..CATEGORIES.len())].to_string(),
            food_type: if rng.random_bool(0.6) {
                FoodType::Veg
            } else {
                FoodType::NonVeg
            },
            price: rng.random_range(10.0..400.0),
            avg_rating: rng.random_range(1.0..5.0),
            total_order: rng.random_range(0..5000),
        })
        .collect();
    Catalog::from_records(records)
}

fn benchmark_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");

    for size in [1000, 10000].iter() {
        let engine = Engine::new(generate_catalog(*size), EngineConfig::default());
        let query = Query::new()
            .with_area("Anna Nagar")
            .with_category("Tiffin")
            .with_diet(DietPreference::Veg)
            .with_price(PriceBand::From51To100.range());

        group.bench_with_input(BenchmarkId::new("area_category", size), size, |b, _| {
            b.iter(|| black_box(engine.find(black_box(&query))));
        });
    }

    group.finish();
}

fn benchmark_knn(c: &mut Criterion) {
    let mut group = c.benchmark_group("knn");

    for size in [1000, 10000].iter() {
        let catalog = generate_catalog(*size);
        let index = SimilarityIndex::build(&catalog);
        let anchor = &catalog.items()[size / 2];

        group.bench_with_input(BenchmarkId::new("exact", size), size, |b, _| {
            b.iter(|| black_box(index.query(black_box(anchor)).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_what_next(c: &mut Criterion) {
    let mut group = c.benchmark_group("what_next");

    let plain = Engine::new(generate_catalog(10000), EngineConfig::default());
    let cached = Engine::new(
        generate_catalog(10000),
        EngineConfig {
            neighbor_cache: true,
            ..EngineConfig::default()
        },
    );

    group.bench_function("direct", |b| {
        b.iter(|| {
            black_box(
                plain
                    .what_next("Tiffin", "Anna Nagar", DietPreference::Both)
                    .unwrap(),
            )
        });
    });
    group.bench_function("similar_uncached", |b| {
        b.iter(|| {
            black_box(
                plain
                    .similar_in_category("Lunch", DietPreference::NonVeg, 3)
                    .unwrap(),
            )
        });
    });
    group.bench_function("similar_cached", |b| {
        b.iter(|| {
            black_box(
                cached
                    .similar_in_category("Lunch", DietPreference::NonVeg, 3)
                    .unwrap(),
            )
        });
    });

    group.finish();
}

fn benchmark_concurrent_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_reads");

    let engine = Arc::new(Engine::new(generate_catalog(1000), EngineConfig::default()));
    let query = Query::new().with_category("Tea");

    group.bench_function("search", |b| {
        b.iter(|| {
            use std::thread;
            let handles: Vec<_> = (0..10)
                .map(|_| {
                    let engine = engine.clone();
                    let q = query.clone();
                    thread::spawn(move || engine.find(&q).len())
                })
                .collect();

            for handle in handles {
                black_box(handle.join().unwrap());
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_find,
    benchmark_knn,
    benchmark_what_next,
    benchmark_concurrent_reads
);
criterion_main!(benches);
