use serde::{Deserialize, Serialize};

use crate::core::{CapacityPolicy, ClockTime, Dimension, ScalingMode};
use crate::error::{ChartError, ChartResult};

/// The four chart variants, each wiring one capacity policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "chart", rename_all = "snake_case")]
pub enum ChartKind {
    /// Grows without limit.
    Basic,
    /// Fixed number of bar slots; appends past capacity are ignored.
    FixedWidth { capacity: usize },
    /// Fixed number of bar slots showing the most recent points.
    Sliding { capacity: usize },
    /// One slot per minute around a wheel starting at `start_time`; overflow
    /// rotates out `evict_count` oldest minutes at a time.
    TimeWheel {
        capacity: usize,
        #[serde(default = "default_evict_count")]
        evict_count: usize,
        start_time: ClockTime,
    },
}

impl ChartKind {
    /// Time wheel anchored at a `H[H]:M[M]` start time, rotating one slot at a time.
    pub fn time_wheel(capacity: usize, start_time: &str) -> ChartResult<Self> {
        Ok(Self::TimeWheel {
            capacity,
            evict_count: default_evict_count(),
            start_time: start_time.parse()?,
        })
    }

    #[must_use]
    pub fn policy(self) -> CapacityPolicy {
        match self {
            Self::Basic => CapacityPolicy::Unbounded,
            Self::FixedWidth { capacity } => CapacityPolicy::RejectWhenFull { capacity },
            Self::Sliding { capacity } => CapacityPolicy::SlidingWindow { capacity },
            Self::TimeWheel {
                capacity,
                evict_count,
                ..
            } => CapacityPolicy::ShiftOnFull {
                capacity,
                evict_count,
            },
        }
    }

    #[must_use]
    pub fn start_time(self) -> Option<ClockTime> {
        match self {
            Self::TimeWheel { start_time, .. } => Some(start_time),
            _ => None,
        }
    }
}

/// Margins around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 30.0,
            left: 40.0,
        }
    }
}

/// Presentation defaults resolved once at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    /// Per-series fill colors, cycled when there are more series than colors.
    #[serde(default = "default_fill_colors")]
    pub fill_colors: Vec<String>,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default = "default_label_font_size_px")]
    pub label_font_size_px: f64,
    #[serde(default = "default_bar_gap_ratio")]
    pub bar_gap_ratio: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            fill_colors: default_fill_colors(),
            margins: Margins::default(),
            label_font_size_px: default_label_font_size_px(),
            bar_gap_ratio: default_bar_gap_ratio(),
        }
    }
}

impl ChartStyle {
    /// Fill color of series `index`.
    #[must_use]
    pub fn fill_color(&self, index: usize) -> Option<&str> {
        if self.fill_colors.is_empty() {
            return None;
        }
        Some(&self.fill_colors[index % self.fill_colors.len()])
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.fill_colors.is_empty() {
            return Err(ChartError::InvalidArgument(
                "at least one fill color is required".to_owned(),
            ));
        }
        let Margins {
            top,
            right,
            bottom,
            left,
        } = self.margins;
        if [top, right, bottom, left]
            .iter()
            .any(|margin| !margin.is_finite() || *margin < 0.0)
        {
            return Err(ChartError::InvalidArgument(
                "margins must be finite and >= 0".to_owned(),
            ));
        }
        if !self.label_font_size_px.is_finite() || self.label_font_size_px <= 0.0 {
            return Err(ChartError::InvalidArgument(
                "label font size must be finite and > 0".to_owned(),
            ));
        }
        if !self.bar_gap_ratio.is_finite() || !(0.0..1.0).contains(&self.bar_gap_ratio) {
            return Err(ChartError::InvalidArgument(
                "bar gap ratio must be finite and in [0, 1)".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Construction-time chart configuration.
///
/// Serializable so hosts can persist chart setup; validated once by
/// [`ChartCore::new`](super::ChartCore::new).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub dimension: Dimension,
    pub kind: ChartKind,
    #[serde(default)]
    pub scaling_mode: ScalingMode,
    #[serde(default)]
    pub style: ChartStyle,
}

impl ChartConfig {
    #[must_use]
    pub fn new(dimension: Dimension, kind: ChartKind) -> Self {
        Self {
            dimension,
            kind,
            scaling_mode: ScalingMode::default(),
            style: ChartStyle::default(),
        }
    }

    #[must_use]
    pub fn with_scaling_mode(mut self, mode: ScalingMode) -> Self {
        self.scaling_mode = mode;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        Dimension::new(self.dimension.get())?;
        self.kind.policy().validate()?;
        self.style.validate()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::Serialization(format!("failed to parse chart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_evict_count() -> usize {
    1
}

fn default_fill_colors() -> Vec<String> {
    ["#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

fn default_label_font_size_px() -> f64 {
    12.0
}

fn default_bar_gap_ratio() -> f64 {
    0.1
}
