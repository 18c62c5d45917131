use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mast_report::config::{DateRange, LeaseFilter, RentOrder, TenantTable};
use mast_report::dataset::Dataset;
use mast_report::engine;
use std::path::PathBuf;

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("load_masts_basic", |b| {
        b.iter(|| Dataset::try_from(black_box(PathBuf::from("data/masts_basic.csv"))))
    });

    let dataset = match Dataset::try_from(PathBuf::from("data/masts_basic.csv")) {
        Ok(dataset) => dataset,
        Err(err) => panic!("failed to load benchmark data: {}", err),
    };
    let records = dataset.records();

    c.bench_function("current_rent_ascending", |b| {
        b.iter(|| engine::current_rent_ascending(black_box(records), &RentOrder::default()))
    });

    c.bench_function("lease_years_total_rent", |b| {
        b.iter(|| {
            engine::lease_years(black_box(records), &LeaseFilter::default())
                .and_then(|matched| engine::total_rent(&matched, "Current Rent"))
        })
    });

    c.bench_function("tenant_mast_count", |b| {
        b.iter(|| engine::tenant_mast_count(black_box(records), &TenantTable::default()))
    });

    c.bench_function("lease_start_date_range", |b| {
        b.iter(|| engine::lease_start_date_range(black_box(records), &DateRange::default()))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
