use std::collections::VecDeque;

use ordered_float::OrderedFloat;
use tracing::trace;

use crate::core::types::{DataPoint, Dimension};
use crate::error::{ChartError, ChartResult};

/// `D` parallel value sequences kept in lock-step, with cached per-series
/// maxima and a running count of every point ever accepted.
///
/// Invariants:
/// - every series has the same length
/// - `max_values[i]` equals the maximum of series `i`, or `0.0` when empty
/// - `total_ingested >= len()`
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesBuffer {
    dimension: Dimension,
    series: Vec<VecDeque<f64>>,
    max_values: Vec<f64>,
    total_ingested: u64,
}

impl SeriesBuffer {
    #[must_use]
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            series: vec![VecDeque::new(); dimension.get()],
            max_values: vec![0.0; dimension.get()],
            total_ingested: 0,
        }
    }

    #[must_use]
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Number of retained points (shared by every series).
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.first().map_or(0, VecDeque::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn total_ingested(&self) -> u64 {
        self.total_ingested
    }

    pub fn series(&self, index: usize) -> ChartResult<&VecDeque<f64>> {
        self.dimension.check_index(index)?;
        Ok(&self.series[index])
    }

    /// Copies series `index` oldest-first.
    pub fn series_values(&self, index: usize) -> ChartResult<Vec<f64>> {
        Ok(self.series(index)?.iter().copied().collect())
    }

    pub fn max_value(&self, index: usize) -> ChartResult<f64> {
        self.dimension.check_index(index)?;
        Ok(self.max_values[index])
    }

    #[must_use]
    pub fn max_values(&self) -> &[f64] {
        &self.max_values
    }

    /// Returns the point at `position` (0 = oldest) reassembled across series.
    #[must_use]
    pub fn point(&self, position: usize) -> Option<Vec<f64>> {
        self.series
            .iter()
            .map(|series| series.get(position).copied())
            .collect()
    }

    /// Pushes already-admitted points.
    ///
    /// All points are checked against the buffer dimension before any of them
    /// is stored, so a mismatch leaves the buffer untouched.
    pub fn append(&mut self, points: &[DataPoint]) -> ChartResult<()> {
        if let Some(bad) = points.iter().find(|point| !point.matches(self.dimension)) {
            return Err(ChartError::InvalidDataFormat(format!(
                "point has {} values, buffer dimension is {}",
                bad.len(),
                self.dimension.get()
            )));
        }

        for point in points {
            for ((series, max), value) in self
                .series
                .iter_mut()
                .zip(self.max_values.iter_mut())
                .zip(point.values())
            {
                series.push_back(*value);
                // Growing the max is safe incrementally; shrinking needs a rescan.
                if *value > *max {
                    *max = *value;
                }
            }
            self.total_ingested += 1;
        }
        trace!(
            appended = points.len(),
            len = self.len(),
            total_ingested = self.total_ingested,
            "series buffer append"
        );
        Ok(())
    }

    /// Removes the `count` oldest points from every series (all of them when
    /// `None`) and rescans every maximum.
    ///
    /// Returns the number of points removed. The count must lie in
    /// `1..=len()`, so clearing an empty buffer is an error either way.
    pub fn clear_data(&mut self, count: Option<usize>) -> ChartResult<usize> {
        let len = self.len();
        let count = count.unwrap_or(len);
        if !(1..=len).contains(&count) {
            return Err(ChartError::InvalidArgument(format!(
                "clear count must be in 1..={len}, got {count}"
            )));
        }

        for series in &mut self.series {
            series.drain(..count);
        }
        self.rescan_max_values();
        trace!(evicted = count, len = self.len(), "series buffer clear");
        Ok(count)
    }

    /// Drops all points and resets `total_ingested`.
    pub fn reset(&mut self) {
        for series in &mut self.series {
            series.clear();
        }
        self.max_values.fill(0.0);
        self.total_ingested = 0;
    }

    fn rescan_max_values(&mut self) {
        for (series, max) in self.series.iter().zip(self.max_values.iter_mut()) {
            *max = series
                .iter()
                .copied()
                .map(OrderedFloat)
                .max()
                .map_or(0.0, OrderedFloat::into_inner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with(dimension: usize, rows: &[&[f64]]) -> SeriesBuffer {
        let mut buffer = SeriesBuffer::new(Dimension::new(dimension).expect("dimension"));
        let points: Vec<DataPoint> = rows
            .iter()
            .map(|row| DataPoint::new(row.iter().copied()).expect("point"))
            .collect();
        buffer.append(&points).expect("append");
        buffer
    }

    #[test]
    fn rescan_covers_every_dimension() {
        let mut buffer = buffer_with(2, &[&[9.0, 1.0], &[2.0, 7.0], &[3.0, 4.0]]);
        assert_eq!(buffer.max_values(), &[9.0, 7.0]);

        buffer.clear_data(Some(2)).expect("clear");
        assert_eq!(buffer.max_values(), &[3.0, 4.0]);
    }

    #[test]
    fn mismatched_point_leaves_buffer_untouched() {
        let mut buffer = buffer_with(2, &[&[1.0, 1.0]]);
        let points = vec![
            DataPoint::new([5.0, 5.0]).expect("point"),
            DataPoint::scalar(3.0).expect("point"),
        ];

        assert!(buffer.append(&points).is_err());
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.total_ingested(), 1);
    }
}
