//! Reducers a driver applies to the raw samples gathered during one tick
//! before handing the result to `append_data`.

use serde_json::Value;

use crate::core::types::DataPoint;
use crate::error::{ChartError, ChartResult};

/// Sums numeric samples. Any non-numeric sample fails the whole reduction
/// instead of being coerced.
pub fn sum_samples(samples: &[Value]) -> ChartResult<f64> {
    samples.iter().try_fold(0.0, |acc, sample| {
        sample
            .as_f64()
            .map(|value| acc + value)
            .ok_or_else(|| ChartError::InvalidDataFormat(format!("non-numeric sample: {sample}")))
    })
}

/// Component-wise sum of the points collected during one tick.
pub fn sum_tick(points: &[DataPoint]) -> ChartResult<DataPoint> {
    let Some(first) = points.first() else {
        return Err(ChartError::InvalidDataFormat(
            "cannot reduce an empty tick".to_owned(),
        ));
    };

    let mut totals = first.values().to_vec();
    for point in &points[1..] {
        if point.len() != totals.len() {
            return Err(ChartError::InvalidDataFormat(format!(
                "tick mixes {}- and {}-component points",
                totals.len(),
                point.len()
            )));
        }
        for (total, value) in totals.iter_mut().zip(point.values()) {
            *total += value;
        }
    }
    DataPoint::new(totals)
}
