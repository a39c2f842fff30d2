use serde::{Deserialize, Serialize};

use crate::core::{ClockTime, Domain, ScalingMode};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{ChartCore, ChartKind};

pub const CHART_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable copy of a chart's observable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub dimension: usize,
    pub kind: ChartKind,
    pub scaling_mode: ScalingMode,
    pub series: Vec<Vec<f64>>,
    pub max_values: Vec<f64>,
    pub domains: Vec<Domain>,
    pub total_ingested: u64,
    #[serde(default)]
    pub time_anchor: Option<ClockTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ChartSnapshot,
}

impl<R: Renderer> ChartCore<R> {
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        let frame = self.frame();
        ChartSnapshot {
            dimension: self.dimension().get(),
            kind: self.kind(),
            scaling_mode: frame.scaling_mode,
            series: frame.series,
            max_values: self.buffer().max_values().to_vec(),
            domains: frame.domains,
            total_ingested: frame.total_ingested,
            time_anchor: frame.time_anchor,
        }
    }
}

impl ChartSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartSnapshotJsonContractV1 {
            schema_version: CHART_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::Serialization(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    ///
    /// A top-level `schema_version` selects the contract form; its version is
    /// checked before the nested snapshot is decoded.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            ChartError::Serialization(format!("failed to parse snapshot json payload: {e}"))
        })?;

        if value.get("schema_version").is_none() {
            return serde_json::from_value(value).map_err(|e| {
                ChartError::Serialization(format!("failed to parse bare snapshot: {e}"))
            });
        }

        let payload: ChartSnapshotJsonContractV1 = serde_json::from_value(value).map_err(|e| {
            ChartError::Serialization(format!("failed to parse snapshot contract: {e}"))
        })?;
        if payload.schema_version != CHART_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::Serialization(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
