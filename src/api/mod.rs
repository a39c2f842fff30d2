mod chart_config;
mod chart_core;
mod chart_handle;
mod chart_snapshot;

pub use chart_config::{ChartConfig, ChartKind, ChartStyle, Margins};
pub use chart_core::ChartCore;
pub use chart_handle::{ChartHandle, HandleCapabilities};
pub use chart_snapshot::{
    CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshot, ChartSnapshotJsonContractV1,
};
