use serde::{Deserialize, Serialize};

use crate::core::{ClockTime, Domain, ScalingMode};
use crate::error::{ChartError, ChartResult};

/// Everything a renderer needs after one `append_data`/`clear_data` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    /// One oldest-first value sequence per dimension.
    pub series: Vec<Vec<f64>>,
    pub domains: Vec<Domain>,
    pub scaling_mode: ScalingMode,
    pub total_ingested: u64,
    /// Horizontal slots to lay bars into: the capacity for bounded charts,
    /// otherwise the current length.
    pub slot_count: usize,
    /// Share of every slot left empty between bar groups.
    pub bar_gap_ratio: f64,
    pub time_anchor: Option<ClockTime>,
}

impl ChartFrame {
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.series.len() != self.domains.len() {
            return Err(ChartError::InvalidDataFormat(format!(
                "frame has {} series but {} domains",
                self.series.len(),
                self.domains.len()
            )));
        }
        let len = self.len();
        if self.series.iter().any(|series| series.len() != len) {
            return Err(ChartError::InvalidDataFormat(
                "frame series lengths differ".to_owned(),
            ));
        }
        if len > self.slot_count {
            return Err(ChartError::InvalidDataFormat(format!(
                "frame holds {len} points but only {} slots",
                self.slot_count
            )));
        }
        if self
            .domains
            .iter()
            .any(|domain| !domain.upper.is_finite() || domain.upper < domain.lower)
        {
            return Err(ChartError::InvalidDataFormat(
                "frame domain must be finite with upper >= lower".to_owned(),
            ));
        }
        Ok(())
    }
}
