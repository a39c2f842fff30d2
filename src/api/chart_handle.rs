use std::collections::VecDeque;

use serde_json::Value;
use tracing::debug;

use crate::core::{ClockTime, DataPoint, Domain, ScalingMode};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{ChartCore, ChartSnapshot};

/// What the holder of a [`ChartHandle`] may do beyond feeding and reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandleCapabilities {
    pub allow_destroy: bool,
}

impl HandleCapabilities {
    #[must_use]
    pub fn with_destroy() -> Self {
        Self {
            allow_destroy: true,
        }
    }
}

/// Owned consumer-facing view of a chart.
///
/// Exposes ingestion, clearing and read access only; tearing the chart down
/// requires the `allow_destroy` capability granted at creation.
pub struct ChartHandle<R: Renderer> {
    core: ChartCore<R>,
    capabilities: HandleCapabilities,
}

impl<R: Renderer> ChartHandle<R> {
    #[must_use]
    pub fn new(core: ChartCore<R>, capabilities: HandleCapabilities) -> Self {
        Self { core, capabilities }
    }

    #[must_use]
    pub fn capabilities(&self) -> HandleCapabilities {
        self.capabilities
    }

    pub fn append_data(&mut self, raw_batch: &Value) -> ChartResult<()> {
        self.core.append_data(raw_batch)
    }

    pub fn append_points(&mut self, points: Vec<DataPoint>) -> ChartResult<()> {
        self.core.append_points(points)
    }

    pub fn clear_data(&mut self, count: Option<usize>) -> ChartResult<usize> {
        self.core.clear_data(count)
    }

    pub fn set_scaling_mode(&mut self, mode: ScalingMode) {
        self.core.set_scaling_mode(mode);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.core.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    pub fn series(&self, index: usize) -> ChartResult<&VecDeque<f64>> {
        self.core.series(index)
    }

    pub fn domain(&self, index: usize) -> ChartResult<Domain> {
        self.core.domain(index)
    }

    #[must_use]
    pub fn total_ingested(&self) -> u64 {
        self.core.total_ingested()
    }

    #[must_use]
    pub fn time_anchor(&self) -> Option<ClockTime> {
        self.core.time_anchor()
    }

    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        self.core.snapshot()
    }

    /// Tears the chart down, releasing every series at once and returning the
    /// renderer. Without the destroy capability the handle is handed back
    /// untouched together with a `PermissionDenied` error.
    pub fn destroy(self) -> Result<R, (Self, ChartError)> {
        if !self.capabilities.allow_destroy {
            return Err((
                self,
                ChartError::PermissionDenied("handle was not granted destroy".to_owned()),
            ));
        }
        debug!(len = self.core.len(), "chart destroyed");
        Ok(self.core.into_renderer())
    }
}
