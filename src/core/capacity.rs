use serde::{Deserialize, Serialize};

use crate::core::types::DataPoint;
use crate::error::{ChartError, ChartResult};

/// Decides how a candidate batch enters a bounded [`SeriesBuffer`].
///
/// [`SeriesBuffer`]: crate::core::SeriesBuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum CapacityPolicy {
    /// No limit, every candidate is admitted.
    Unbounded,
    /// Admits only up to the remaining room; once full, appends are no-ops.
    RejectWhenFull { capacity: usize },
    /// On overflow evicts `evict_count` oldest points at a time until the
    /// batch fits or the buffer is drained.
    ShiftOnFull { capacity: usize, evict_count: usize },
    /// Keeps the most recent `capacity` points, evicting exactly as many as
    /// the incoming batch needs.
    SlidingWindow { capacity: usize },
}

/// Outcome of [`CapacityPolicy::admit`]: evict `evict` oldest points, then
/// append `accepted`.
#[derive(Debug, Clone, PartialEq)]
pub struct Admission {
    pub evict: usize,
    pub accepted: Vec<DataPoint>,
    /// Candidates discarded by the policy (not by validation).
    pub dropped: usize,
}

impl CapacityPolicy {
    pub fn reject_when_full(capacity: usize) -> ChartResult<Self> {
        let policy = Self::RejectWhenFull { capacity };
        policy.validate()?;
        Ok(policy)
    }

    pub fn shift_on_full(capacity: usize, evict_count: usize) -> ChartResult<Self> {
        let policy = Self::ShiftOnFull {
            capacity,
            evict_count,
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn sliding_window(capacity: usize) -> ChartResult<Self> {
        let policy = Self::SlidingWindow { capacity };
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(self) -> ChartResult<()> {
        match self {
            Self::Unbounded => Ok(()),
            Self::RejectWhenFull { capacity } | Self::SlidingWindow { capacity } => {
                validate_capacity(capacity)
            }
            Self::ShiftOnFull {
                capacity,
                evict_count,
            } => {
                validate_capacity(capacity)?;
                if evict_count == 0 {
                    return Err(ChartError::InvalidArgument(
                        "evict count must be > 0".to_owned(),
                    ));
                }
                Ok(())
            }
        }
    }

    #[must_use]
    pub fn capacity(self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::RejectWhenFull { capacity }
            | Self::ShiftOnFull { capacity, .. }
            | Self::SlidingWindow { capacity } => Some(capacity),
        }
    }

    /// Decides which part of `batch` enters a buffer currently holding
    /// `current_len` points, and how many oldest points go first.
    ///
    /// Room is counted strictly as `capacity - current_len`.
    #[must_use]
    pub fn admit(self, current_len: usize, mut batch: Vec<DataPoint>) -> Admission {
        let candidates = batch.len();
        let evict = match self {
            Self::Unbounded => 0,
            Self::RejectWhenFull { capacity } => {
                batch.truncate(capacity.saturating_sub(current_len));
                0
            }
            Self::ShiftOnFull {
                capacity,
                evict_count,
            } => {
                let mut remaining = current_len;
                let mut evict = 0;
                while batch.len() > capacity.saturating_sub(remaining) && remaining > 0 {
                    let step = evict_count.min(remaining);
                    evict += step;
                    remaining -= step;
                }
                batch.truncate(capacity.saturating_sub(remaining));
                evict
            }
            Self::SlidingWindow { capacity } => {
                if batch.len() > capacity {
                    batch.drain(..batch.len() - capacity);
                }
                let room = capacity.saturating_sub(current_len);
                batch.len().saturating_sub(room).min(current_len)
            }
        };

        Admission {
            evict,
            dropped: candidates - batch.len(),
            accepted: batch,
        }
    }
}

fn validate_capacity(capacity: usize) -> ChartResult<()> {
    if capacity == 0 {
        return Err(ChartError::InvalidArgument(
            "capacity must be > 0".to_owned(),
        ));
    }
    Ok(())
}
