//! Performance benchmarks for the Care Allowance Engine.
//!
//! Covers the pure engine on its own and the `/calculate` endpoint end to
//! end, for households of increasing size.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use care_allowance_engine::api::{AppState, CalculationRequest, create_router};
use care_allowance_engine::calculation::{calculate, calculate_with_trace};
use care_allowance_engine::config::{ConfigLoader, RateTable};
use care_allowance_engine::models::{AgeBracket, CarerContext, DependentProfile, WeekInterval};

use axum::{body::Body, http::Request};
use rust_decimal::Decimal;
use tower::ServiceExt;

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

/// Builds a household whose dependents cycle through brackets and care patterns.
fn create_dependents(count: usize) -> Vec<DependentProfile> {
    (0..count)
        .map(|i| {
            let intervals = match i % 3 {
                0 => vec![WeekInterval::full_year()],
                1 => vec![WeekInterval::new(1, 13), WeekInterval::new(27, 39)],
                _ => vec![WeekInterval::new(20, 45)],
            };
            DependentProfile {
                id: format!("child_{:03}", i + 1),
                age_bracket: AgeBracket::ALL[i % AgeBracket::ALL.len()],
                is_special_care: i % 2 == 0,
                intervals,
            }
        })
        .collect()
}

fn stacked_table() -> RateTable {
    RateTable {
        special_care_addend: Decimal::from(45),
        experienced_carer_modifier: Decimal::from(20),
        ..RateTable::default()
    }
}

fn request_body(dependent_count: usize) -> String {
    let request = CalculationRequest {
        carer: CarerContext::experienced(),
        dependents: create_dependents(dependent_count),
        rate_table: Some(stacked_table()),
    };
    serde_json::to_string(&request).unwrap()
}

/// Benchmark: the engine alone for a single full-year dependent.
fn bench_engine_single_dependent(c: &mut Criterion) {
    let dependents = create_dependents(1);
    let table = stacked_table();
    let carer = CarerContext::experienced();

    c.bench_function("engine_single_dependent", |b| {
        b.iter(|| black_box(calculate(black_box(&dependents), &carer, Some(&table)).unwrap()))
    });
}

/// Benchmark: the engine with audit trace over growing households.
fn bench_engine_scaling(c: &mut Criterion) {
    let table = stacked_table();
    let carer = CarerContext::experienced();
    let mut group = c.benchmark_group("engine_scaling");

    for count in [1usize, 4, 16, 64] {
        let dependents = create_dependents(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("dependents", count), &count, |b, _| {
            b.iter(|| {
                black_box(calculate_with_trace(black_box(&dependents), &carer, Some(&table)).unwrap())
            })
        });
    }

    group.finish();
}

/// Benchmark: one `/calculate` request through the router.
fn bench_http_single_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = request_body(3);

    c.bench_function("http_single_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/calculate")
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

/// Benchmark: a batch of 100 requests with varying household sizes.
fn bench_http_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();
    let requests: Vec<String> = (0..100).map(|i| request_body(1 + i % 6)).collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(100);
            for body in &requests {
                let router = create_router(state.clone());
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/calculate")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_engine_single_dependent,
    bench_engine_scaling,
    bench_http_single_request,
    bench_http_batch_100,
);
criterion_main!(benches);
