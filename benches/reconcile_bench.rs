use std::cell::Cell;
use std::hint::black_box;
use std::sync::Arc;

use chart_kit::api::{ChartComponent, ChartProps};
use chart_kit::core::{Column, Row};
use chart_kit::extensions::{StrategyContext, StrategyLoader, StrategyRegistry};
use chart_kit::interaction::RecordingObserver;
use chart_kit::render::{RecordingBackend, RenderBackend, SurfaceHandle, Theme};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

fn sample(rows: usize) -> (Vec<Column>, Vec<Row>) {
    let columns = vec![
        Column::new("day"),
        Column::new("orders"),
        Column::new("refunds"),
    ];
    let rows = (0..rows)
        .map(|i| {
            let t = i as f64;
            Row::new()
                .with("day", format!("D{i}"))
                .with("orders", 10_000.0 + t * 37.0)
                .with("refunds", t * 0.5)
        })
        .collect();
    (columns, rows)
}

fn bench_builtin_reset_option_1k(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    let loader = StrategyLoader::new(Arc::new(StrategyRegistry::new()));
    let (columns, rows) = sample(1_000);
    let props = ChartProps::new("bar").with_layout(1.0, 0.0, 7.0);

    let mut backend = RecordingBackend::new(1920.0);
    let instance = backend
        .init(
            &SurfaceHandle::new("bench"),
            &Theme::default(),
            &props.init_options(),
        )
        .expect("init");
    let reinit = Cell::new(false);

    for id in ["bar", "line", "multi-line-bar-x"] {
        let strategy = runtime.block_on(loader.resolve(id)).expect("built-in");
        let props = props.clone().with_type(id);
        c.bench_function(&format!("reset_option_{id}_1k"), |b| {
            b.iter(|| {
                let ctx = StrategyContext::new(&props, instance.as_ref(), &reinit);
                black_box(strategy.reset_option(black_box(&columns), black_box(&rows), &ctx))
            })
        });
    }
}

fn bench_cached_strategy_resolve(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    let loader = StrategyLoader::new(Arc::new(StrategyRegistry::new()));
    runtime.block_on(loader.resolve("pie")).expect("warm cache");

    c.bench_function("resolve_cached_pie", |b| {
        b.iter(|| {
            let strategy = runtime
                .block_on(loader.resolve(black_box("pie")))
                .expect("cached");
            black_box(strategy)
        })
    });
}

fn bench_full_reconcile_bar_1k(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    let registry = Arc::new(StrategyRegistry::new());
    let (columns, rows) = sample(1_000);

    c.bench_function("reconcile_bar_1k", |b| {
        b.iter_batched(
            || {
                let (mut component, _handle) = ChartComponent::with_registry(
                    RecordingBackend::new(1920.0),
                    RecordingObserver::new(),
                    Arc::clone(&registry),
                    ChartProps::new("bar"),
                )
                .expect("component");
                runtime
                    .block_on(component.attach_surface(SurfaceHandle::new("bench")))
                    .expect("attach surface");
                runtime
                    .block_on(component.set_data(columns.clone(), rows.clone()))
                    .expect("seed data");
                runtime.block_on(component.mount()).expect("mount");
                component
            },
            |mut component| {
                black_box(runtime.block_on(component.reconcile()).expect("reconcile"))
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_builtin_reset_option_1k,
    bench_cached_strategy_resolve,
    bench_full_reconcile_bar_1k
);
criterion_main!(benches);
