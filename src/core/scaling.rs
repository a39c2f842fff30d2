use serde::{Deserialize, Serialize};

use crate::core::series_buffer::SeriesBuffer;
use crate::error::ChartResult;

/// How series share a value axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScalingMode {
    /// Each series is scaled against its own maximum.
    #[default]
    Local,
    /// Every series is scaled against the largest maximum of all series.
    Global,
}

/// Closed value domain `[0, upper]` used for value-to-pixel mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub lower: f64,
    pub upper: f64,
}

impl Domain {
    #[must_use]
    pub fn from_upper(upper: f64) -> Self {
        Self { lower: 0.0, upper }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.upper - self.lower
    }

    /// Maps `value` into `0.0..=1.0`; a zero-span domain maps everything to `0.0`.
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 || !span.is_finite() {
            return 0.0;
        }
        ((value - self.lower) / span).clamp(0.0, 1.0)
    }
}

/// Stateless domain computation over a [`SeriesBuffer`].
///
/// Nothing is cached: every call reads the buffer's current maxima, so a mode
/// switch is visible on the next call without re-ingesting data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalingEngine;

impl ScalingEngine {
    /// Domain for series `index`.
    pub fn domain(buffer: &SeriesBuffer, mode: ScalingMode, index: usize) -> ChartResult<Domain> {
        let local = buffer.max_value(index)?;
        let upper = match mode {
            ScalingMode::Local => local,
            ScalingMode::Global => Self::global_upper(buffer),
        };
        Ok(Domain::from_upper(upper))
    }

    /// Domains for every series, in dimension order.
    #[must_use]
    pub fn domains(buffer: &SeriesBuffer, mode: ScalingMode) -> Vec<Domain> {
        let global = Self::global_upper(buffer);
        buffer
            .max_values()
            .iter()
            .map(|local| match mode {
                ScalingMode::Local => Domain::from_upper(*local),
                ScalingMode::Global => Domain::from_upper(global),
            })
            .collect()
    }

    fn global_upper(buffer: &SeriesBuffer) -> f64 {
        buffer.max_values().iter().copied().fold(0.0, f64::max)
    }
}
