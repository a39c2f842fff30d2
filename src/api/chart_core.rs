use std::collections::VecDeque;

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::core::{
    CapacityPolicy, ClockTime, DataPoint, Dimension, Domain, ScalingEngine, ScalingMode,
    SeriesBuffer, WheelLabel, WheelLayout,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{ChartFrame, Renderer};

use super::{ChartConfig, ChartKind};

/// Orchestrates admission, mutation and rescaling for one chart.
///
/// Every mutator runs to completion: validate the input, let the capacity
/// policy decide what enters, mutate the buffer, then hand a fresh
/// [`ChartFrame`] to the renderer. Structural errors are returned before any
/// state changes; malformed individual points are dropped.
pub struct ChartCore<R: Renderer> {
    renderer: R,
    config: ChartConfig,
    policy: CapacityPolicy,
    buffer: SeriesBuffer,
    scaling_mode: ScalingMode,
    time_anchor: Option<ClockTime>,
}

impl<R: Renderer> ChartCore<R> {
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let policy = config.kind.policy();
        debug!(
            dimension = config.dimension.get(),
            ?policy,
            scaling_mode = ?config.scaling_mode,
            "chart created"
        );
        Ok(Self {
            renderer,
            buffer: SeriesBuffer::new(config.dimension),
            policy,
            scaling_mode: config.scaling_mode,
            time_anchor: config.kind.start_time(),
            config,
        })
    }

    /// Ingests an untrusted batch.
    ///
    /// `raw_batch` must be a JSON array; each element must be an array of
    /// exactly `D` non-negative numbers, or a bare number when `D = 1`.
    /// Elements of any other shape are dropped without affecting siblings.
    pub fn append_data(&mut self, raw_batch: &Value) -> ChartResult<()> {
        let Value::Array(elements) = raw_batch else {
            return Err(ChartError::InvalidArgument(format!(
                "append_data expects an array, got {raw_batch}"
            )));
        };

        let dimension = self.buffer.dimension();
        let mut points = Vec::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            match DataPoint::from_json(element, dimension) {
                Ok(point) => points.push(point),
                Err(err) => warn!(index, error = %err, "dropping malformed data point"),
            }
        }
        self.ingest(points)
    }

    /// Ingests typed points; points whose arity differs from `D` are dropped.
    pub fn append_points(&mut self, points: Vec<DataPoint>) -> ChartResult<()> {
        let dimension = self.buffer.dimension();
        let candidates = points.len();
        let points: Vec<DataPoint> = points
            .into_iter()
            .filter(|point| point.matches(dimension))
            .collect();
        if points.len() < candidates {
            warn!(
                dropped = candidates - points.len(),
                dimension = dimension.get(),
                "dropping points with wrong arity"
            );
        }
        self.ingest(points)
    }

    /// Removes the `count` oldest points (all of them when `None`).
    ///
    /// On a time wheel the anchor moves forward by one minute per removed
    /// point. Returns the number of points removed.
    pub fn clear_data(&mut self, count: Option<usize>) -> ChartResult<usize> {
        let removed = self.evict(count)?;
        debug!(removed, len = self.buffer.len(), "chart data cleared");
        self.emit_frame();
        Ok(removed)
    }

    /// Drops all data, resets `total_ingested` and restores the configured
    /// start time.
    pub fn reset(&mut self) {
        self.buffer.reset();
        self.time_anchor = self.config.kind.start_time();
        debug!("chart reset");
        self.emit_frame();
    }

    pub fn set_scaling_mode(&mut self, mode: ScalingMode) {
        if self.scaling_mode == mode {
            return;
        }
        debug!(from = ?self.scaling_mode, to = ?mode, "scaling mode switched");
        self.scaling_mode = mode;
        self.emit_frame();
    }

    /// Re-renders the current state, returning renderer failures.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.frame();
        self.renderer.render(&frame)
    }

    fn ingest(&mut self, points: Vec<DataPoint>) -> ChartResult<()> {
        let candidates = points.len();
        let admission = self.policy.admit(self.buffer.len(), points);
        trace!(
            candidates,
            evict = admission.evict,
            accepted = admission.accepted.len(),
            dropped = admission.dropped,
            "admission decided"
        );
        if admission.evict == 0 && admission.accepted.is_empty() {
            return Ok(());
        }

        if admission.evict > 0 {
            self.evict(Some(admission.evict))?;
        }
        self.buffer.append(&admission.accepted)?;
        self.emit_frame();
        Ok(())
    }

    fn evict(&mut self, count: Option<usize>) -> ChartResult<usize> {
        let removed = self.buffer.clear_data(count)?;
        if let Some(anchor) = self.time_anchor.as_mut() {
            // Same wrap-around arithmetic as `add_minutes(anchor, removed)`.
            *anchor = anchor.plus_minutes(removed as u64);
        }
        Ok(removed)
    }

    fn emit_frame(&mut self) {
        let frame = self.frame();
        if let Err(err) = self.renderer.render(&frame) {
            warn!(error = %err, "renderer rejected frame");
        }
    }

    #[must_use]
    pub fn frame(&self) -> ChartFrame {
        ChartFrame {
            series: (0..self.dimension().get())
                .map(|index| self.buffer.series_values(index).unwrap_or_default())
                .collect(),
            domains: self.domains(),
            scaling_mode: self.scaling_mode,
            total_ingested: self.buffer.total_ingested(),
            slot_count: self.capacity().unwrap_or_else(|| self.buffer.len()),
            bar_gap_ratio: self.config.style.bar_gap_ratio,
            time_anchor: self.time_anchor,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.config.kind
    }

    #[must_use]
    pub fn policy(&self) -> CapacityPolicy {
        self.policy
    }

    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.policy.capacity()
    }

    #[must_use]
    pub fn dimension(&self) -> Dimension {
        self.buffer.dimension()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[must_use]
    pub fn total_ingested(&self) -> u64 {
        self.buffer.total_ingested()
    }

    #[must_use]
    pub fn buffer(&self) -> &SeriesBuffer {
        &self.buffer
    }

    pub fn series(&self, index: usize) -> ChartResult<&VecDeque<f64>> {
        self.buffer.series(index)
    }

    pub fn max_value(&self, index: usize) -> ChartResult<f64> {
        self.buffer.max_value(index)
    }

    #[must_use]
    pub fn scaling_mode(&self) -> ScalingMode {
        self.scaling_mode
    }

    pub fn domain(&self, index: usize) -> ChartResult<Domain> {
        ScalingEngine::domain(&self.buffer, self.scaling_mode, index)
    }

    #[must_use]
    pub fn domains(&self) -> Vec<Domain> {
        ScalingEngine::domains(&self.buffer, self.scaling_mode)
    }

    /// Clock time of the oldest retained point on a time wheel.
    #[must_use]
    pub fn time_anchor(&self) -> Option<ClockTime> {
        self.time_anchor
    }

    #[must_use]
    pub fn wheel_layout(&self) -> Option<WheelLayout> {
        match self.config.kind {
            ChartKind::TimeWheel { capacity, .. } => WheelLayout::new(capacity).ok(),
            _ => None,
        }
    }

    /// Reference labels every `every` slots of a time wheel.
    pub fn wheel_labels(&self, every: usize) -> ChartResult<Vec<WheelLabel>> {
        let (Some(layout), Some(anchor)) = (self.wheel_layout(), self.time_anchor) else {
            return Err(ChartError::InvalidArgument(
                "wheel labels require a time wheel chart".to_owned(),
            ));
        };
        layout.labels(anchor, every)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
