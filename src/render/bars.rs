use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::ChartFrame;

/// One bar rectangle in pixel coordinates, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub series: usize,
    pub position: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Projects a frame into grouped bars: each buffer position owns one slot of
/// `viewport.width / slot_count` pixels, split between the series of that
/// position. `frame.bar_gap_ratio` of every slot is left empty.
pub fn project_bars(frame: &ChartFrame, viewport: Viewport) -> ChartResult<Vec<BarGeometry>> {
    let gap_ratio = frame.bar_gap_ratio;
    if !viewport.is_valid() {
        return Err(ChartError::InvalidArgument(format!(
            "invalid viewport size: width={}, height={}",
            viewport.width, viewport.height
        )));
    }
    if !gap_ratio.is_finite() || !(0.0..1.0).contains(&gap_ratio) {
        return Err(ChartError::InvalidArgument(
            "bar gap ratio must be finite and in [0, 1)".to_owned(),
        ));
    }
    frame.validate()?;
    if frame.is_empty() {
        return Ok(Vec::new());
    }

    let height = f64::from(viewport.height);
    let slot_width = f64::from(viewport.width) / frame.slot_count as f64;
    let bar_width = slot_width * (1.0 - gap_ratio) / frame.series.len() as f64;
    let inset = slot_width * gap_ratio * 0.5;

    let mut projected = Vec::with_capacity(frame.len() * frame.series.len());
    for position in 0..frame.len() {
        let slot_x = position as f64 * slot_width + inset;
        for (series_index, (series, domain)) in
            frame.series.iter().zip(&frame.domains).enumerate()
        {
            let bar_height = domain.normalize(series[position]) * height;
            projected.push(BarGeometry {
                series: series_index,
                position,
                x: slot_x + series_index as f64 * bar_width,
                y: height - bar_height,
                width: bar_width,
                height: bar_height,
            });
        }
    }
    Ok(projected)
}
