//! Performance benchmarks for the tax engine.
//!
//! The engine is recomputed on every input change, so a single tax or salary
//! computation should stay in the low microseconds:
//! - Single tax computation: < 20μs mean
//! - Single salary breakdown: < 30μs mean
//! - Batch of 1000 incomes: < 20ms mean
//! - POST /tax round trip: < 200μs mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use tax_engine::api::{AppState, create_router};
use tax_engine::calculation::SlabTaxCalculator;
use tax_engine::config::{ConfigLoader, TaxRegimeConfig};
use tax_engine::export::{tax_export_rows, to_csv_string};
use tax_engine::{compute_salary_breakdown, compute_tax};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/regimes").expect("Failed to load config");
    AppState::new(config)
}

/// Benchmark: one tax computation above the relief band.
fn bench_single_tax(c: &mut Criterion) {
    let config = TaxRegimeConfig::fy2025_26();
    let income = Decimal::from(1_500_000);

    c.bench_function("single_tax", |b| {
        b.iter(|| black_box(compute_tax(&config, black_box(income))))
    });
}

/// Benchmark: one salary breakdown, which includes a tax computation.
fn bench_single_salary(c: &mut Criterion) {
    let config = TaxRegimeConfig::fy2025_26();
    let ctc = Decimal::from(1_200_000);

    c.bench_function("single_salary", |b| {
        b.iter(|| black_box(compute_salary_breakdown(&config, black_box(ctc))))
    });
}

/// Benchmark: 1000 incomes spread across every slab.
fn bench_batch_1000(c: &mut Criterion) {
    let config = TaxRegimeConfig::fy2025_26();
    let incomes: Vec<Decimal> = (1..=1000u64).map(|i| Decimal::from(i * 3_500)).collect();

    let mut group = c.benchmark_group("batch");
    group.throughput(Throughput::Elements(incomes.len() as u64));
    group.bench_function("tax_1000", |b| {
        let calculator = SlabTaxCalculator::new(&config);
        b.iter(|| {
            for income in &incomes {
                black_box(calculator.compute(*income));
            }
        })
    });
    group.finish();
}

/// Benchmark: cost as more slabs are visited.
fn bench_slab_depth(c: &mut Criterion) {
    let config = TaxRegimeConfig::fy2025_26();
    let mut group = c.benchmark_group("slab_depth");

    for income in [300_000u64, 1_000_000, 1_500_000, 2_200_000, 5_000_000] {
        let income_dec = Decimal::from(income);
        group.bench_with_input(BenchmarkId::new("income", income), &income_dec, |b, i| {
            b.iter(|| black_box(compute_tax(&config, *i)))
        });
    }

    group.finish();
}

/// Benchmark: building and writing the tax CSV.
fn bench_tax_export(c: &mut Criterion) {
    let config = TaxRegimeConfig::fy2025_26();
    let result = compute_tax(&config, Decimal::from(5_000_000)).expect("valid income");

    c.bench_function("tax_export_csv", |b| {
        b.iter(|| black_box(to_csv_string(tax_export_rows(&result))))
    });
}

/// Benchmark: POST /tax through the router.
fn bench_http_tax(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = serde_json::json!({ "amount": "1500000", "regime": "FY2025-26" }).to_string();

    c.bench_function("http_tax", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/tax")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_single_tax,
    bench_single_salary,
    bench_batch_1000,
    bench_slab_depth,
    bench_tax_export,
    bench_http_tax,
);
criterion_main!(benches);
