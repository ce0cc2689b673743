mod component;
mod json_contract;
mod lifecycle;
mod props;
mod reconcile;

pub use component::ChartComponent;
pub use json_contract::{CHART_PROPS_JSON_SCHEMA_V1, ChartPropsJsonContractV1};
pub use lifecycle::{BackendState, LifecycleManager, MountOutcome};
pub use props::ChartProps;
pub use reconcile::{ReconcileOutcome, Reconciler, SkipReason};
