use std::sync::Arc;

use chart_kit::ChartError;
use chart_kit::api::{
    ChartProps, LifecycleManager, MountOutcome, ReconcileOutcome, Reconciler, SkipReason,
};
use chart_kit::core::{Column, RenderConfig, Row};
use chart_kit::extensions::{StrategyLoader, StrategyRegistry, define_strategy};
use chart_kit::interaction::RecordingObserver;
use chart_kit::render::{BackendError, RecordingBackend, RecordingJournal, SurfaceHandle};
use serde_json::json;
use tokio::sync::mpsc::unbounded_channel;

type Lifecycle = LifecycleManager<RecordingBackend, RecordingObserver>;

fn lifecycle(width: f64) -> (Lifecycle, RecordingJournal) {
    let backend = RecordingBackend::new(width);
    let journal = backend.journal();
    let (events, _) = unbounded_channel();
    let (clicks, _) = unbounded_channel();
    let props = ChartProps::default();
    let lifecycle = LifecycleManager::new(
        backend,
        RecordingObserver::new(),
        props.theme.clone(),
        props.init_options(),
        events,
        clicks,
    );
    (lifecycle, journal)
}

fn mounted(width: f64) -> (Lifecycle, RecordingJournal) {
    let (mut lifecycle, journal) = lifecycle(width);
    lifecycle
        .attach_surface(SurfaceHandle::new("chart"))
        .expect("attach surface");
    assert_eq!(lifecycle.mount().expect("mount"), MountOutcome::Ready);
    (lifecycle, journal)
}

fn reconciler(registry: &Arc<StrategyRegistry>) -> Reconciler {
    Reconciler::new(StrategyLoader::new(Arc::clone(registry)))
}

fn sample() -> (Vec<Column>, Vec<Row>) {
    (
        vec![Column::new("cat"), Column::new("val")],
        vec![
            Row::new().with("cat", "A").with("val", 10),
            Row::new().with("cat", "B").with("val", 20),
        ],
    )
}

#[tokio::test]
async fn reconcile_without_backend_instance_is_a_noop() {
    let registry = Arc::new(StrategyRegistry::new());
    let (mut lifecycle, journal) = lifecycle(640.0);
    let (columns, rows) = sample();

    let outcome = reconciler(&registry)
        .reconcile(&mut lifecycle, &columns, &rows, &ChartProps::new("pie"))
        .await
        .expect("no-op");

    assert_eq!(outcome, ReconcileOutcome::Skipped(SkipReason::NoBackend));
    assert!(journal.applies().is_empty());
    assert_eq!(journal.init_count(), 0);
    assert!(!registry.has("pie"));
}

#[tokio::test]
async fn empty_chart_type_skips_before_touching_the_backend() {
    let registry = Arc::new(StrategyRegistry::new());
    let (mut lifecycle, journal) = mounted(640.0);
    let (columns, rows) = sample();

    let outcome = reconciler(&registry)
        .reconcile(&mut lifecycle, &columns, &rows, &ChartProps::new(""))
        .await
        .expect("no-op");

    assert_eq!(outcome, ReconcileOutcome::Skipped(SkipReason::NoChartType));
    assert!(journal.applies().is_empty());
}

#[tokio::test]
async fn every_apply_fully_replaces_the_previous_config() {
    let registry = Arc::new(StrategyRegistry::new());
    registry.register_strategy(define_strategy("a", |_, _, _| {
        Some(RenderConfig::from_value(json!({
            "legend": { "show": true },
            "series": [{ "type": "line", "data": [1, 2, 3] }],
        })))
    }));
    registry.register_strategy(define_strategy("b", |_, _, _| {
        Some(RenderConfig::from_value(json!({ "title": { "text": "B" } })))
    }));
    let reconciler = reconciler(&registry);
    let (mut lifecycle, journal) = mounted(640.0);
    let (columns, rows) = sample();

    reconciler
        .reconcile(&mut lifecycle, &columns, &rows, &ChartProps::new("a"))
        .await
        .expect("apply a");
    let outcome = reconciler
        .reconcile(&mut lifecycle, &columns, &rows, &ChartProps::new("b"))
        .await
        .expect("apply b");

    assert_eq!(outcome, ReconcileOutcome::Applied { retried: false });
    assert_eq!(
        journal.current_option(),
        Some(json!({ "title": { "text": "B" } }))
    );

    let modes: Vec<(bool, bool)> = journal
        .applies()
        .iter()
        .map(|applied| (applied.config.is_empty(), applied.not_merge))
        .collect();
    assert_eq!(
        modes,
        vec![(true, false), (false, true), (true, false), (false, true)]
    );
}

#[tokio::test]
async fn strategy_without_option_leaves_only_the_baseline_reset() {
    let registry = Arc::new(StrategyRegistry::new());
    registry.register_strategy(define_strategy("blank", |_, _, _| None));
    let (mut lifecycle, journal) = mounted(640.0);
    let (columns, rows) = sample();

    let outcome = reconciler(&registry)
        .reconcile(&mut lifecycle, &columns, &rows, &ChartProps::new("blank"))
        .await
        .expect("no option");

    assert_eq!(outcome, ReconcileOutcome::Skipped(SkipReason::NoOption));
    let applies = journal.applies();
    assert_eq!(applies.len(), 1);
    assert!(applies[0].config.is_empty());
    assert!(!applies[0].not_merge);
}

#[tokio::test]
async fn transient_failure_recreates_once_and_retries() {
    let registry = Arc::new(StrategyRegistry::new());
    let (mut lifecycle, journal) = mounted(640.0);
    let (columns, rows) = sample();
    journal.fail_next_apply(BackendError::Transient(
        "`setOption` should not be called during main process".to_owned(),
    ));

    let outcome = reconciler(&registry)
        .reconcile(&mut lifecycle, &columns, &rows, &ChartProps::new("pie"))
        .await
        .expect("retry succeeds");

    assert_eq!(outcome, ReconcileOutcome::Applied { retried: true });
    assert_eq!(journal.dispose_count(), 1);
    assert_eq!(journal.init_count(), 2);
    assert_eq!(lifecycle.generation(), 2);
    let applied = journal.last_full_apply().expect("applied");
    assert_eq!(Some(applied.generation), journal.latest_generation());
    assert_eq!(applied.config.series_data_len(0), Some(2));
}

#[tokio::test]
async fn second_transient_failure_escalates() {
    let registry = Arc::new(StrategyRegistry::new());
    let (mut lifecycle, journal) = mounted(640.0);
    let (columns, rows) = sample();
    journal.fail_next_apply(BackendError::Transient("first".to_owned()));
    journal.fail_next_apply(BackendError::Transient("second".to_owned()));

    let err = reconciler(&registry)
        .reconcile(&mut lifecycle, &columns, &rows, &ChartProps::new("pie"))
        .await
        .expect_err("retry fails");

    assert!(matches!(err, ChartError::BackendTransientState(_)));
    assert!(err.to_string().contains("second"));
    assert_eq!(journal.dispose_count(), 1);
    assert_eq!(journal.init_count(), 2);
}

#[tokio::test]
async fn other_apply_failures_surface_unmodified_without_retry() {
    let registry = Arc::new(StrategyRegistry::new());
    let (mut lifecycle, journal) = mounted(640.0);
    let (columns, rows) = sample();
    journal.fail_next_apply(BackendError::Failed("unknown series type `pye`".to_owned()));

    let err = reconciler(&registry)
        .reconcile(&mut lifecycle, &columns, &rows, &ChartProps::new("pie"))
        .await
        .expect_err("fatal");

    match err {
        ChartError::ConfigurationApply(BackendError::Failed(message)) => {
            assert_eq!(message, "unknown series type `pye`");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(journal.dispose_count(), 0);
    assert_eq!(journal.init_count(), 1);
}

#[tokio::test]
async fn instance_disposed_behind_the_owner_is_replaced() {
    let registry = Arc::new(StrategyRegistry::new());
    let (mut lifecycle, journal) = mounted(640.0);
    let (columns, rows) = sample();
    journal.dispose_externally();

    let outcome = reconciler(&registry)
        .reconcile(&mut lifecycle, &columns, &rows, &ChartProps::new("pie"))
        .await
        .expect("recovered");

    assert_eq!(outcome, ReconcileOutcome::Applied { retried: true });
    assert_eq!(journal.init_count(), 2);
    assert!(
        journal
            .applies()
            .iter()
            .all(|applied| Some(applied.generation) == journal.latest_generation())
    );
}

#[tokio::test]
async fn unknown_chart_type_fails_before_any_apply() {
    let registry = Arc::new(StrategyRegistry::new());
    let (mut lifecycle, journal) = mounted(640.0);
    let (columns, rows) = sample();

    let err = reconciler(&registry)
        .reconcile(&mut lifecycle, &columns, &rows, &ChartProps::new("gantt"))
        .await
        .expect_err("unknown type");

    assert!(err.is_strategy_not_found());
    assert!(journal.applies().is_empty());
}

#[tokio::test]
async fn strategy_reads_the_live_instance_and_can_request_reinit() {
    let registry = Arc::new(StrategyRegistry::new());
    registry.register_strategy(define_strategy("sized", |_, rows, ctx| {
        if rows.is_empty() {
            ctx.request_reinit();
        }
        Some(RenderConfig::from_value(json!({ "width": ctx.chart_width() })))
    }));
    let reconciler = reconciler(&registry);
    let (mut lifecycle, journal) = mounted(480.0);
    let (columns, rows) = sample();

    reconciler
        .reconcile(&mut lifecycle, &columns, &rows, &ChartProps::new("sized"))
        .await
        .expect("sized");
    assert_eq!(journal.current_option(), Some(json!({ "width": 480.0 })));
    assert_eq!(journal.init_count(), 1);

    let outcome = reconciler
        .reconcile(&mut lifecycle, &columns, &[], &ChartProps::new("sized"))
        .await
        .expect("reinit");
    assert_eq!(outcome, ReconcileOutcome::Applied { retried: false });
    assert_eq!(journal.init_count(), 2);
    assert_eq!(journal.dispose_count(), 1);
    assert_eq!(
        journal.last_full_apply().map(|applied| applied.generation),
        journal.latest_generation()
    );
}
