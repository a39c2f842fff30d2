use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// Number of scalar components per logical data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Dimension(usize);

impl Dimension {
    pub const MIN: usize = 1;
    pub const MAX: usize = 10;

    pub fn new(value: usize) -> ChartResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ChartError::InvalidArgument(format!(
                "dimension must be in {}..={}, got {value}",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }

    /// Checks a per-dimension index, e.g. for domain or color lookups.
    pub fn check_index(self, index: usize) -> ChartResult<()> {
        if index >= self.0 {
            return Err(ChartError::InvalidArgument(format!(
                "dimension index {index} out of range for dimension {}",
                self.0
            )));
        }
        Ok(())
    }
}

impl TryFrom<usize> for Dimension {
    type Error = ChartError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Dimension> for usize {
    fn from(value: Dimension) -> Self {
        value.0
    }
}

/// Inline storage covers the common 1-4 component charts without allocating.
pub type PointValues = SmallVec<[f64; 4]>;

/// One logical sample: one non-negative finite value per dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct DataPoint {
    values: PointValues,
}

impl DataPoint {
    /// Builds a point, rejecting empty, non-finite or negative components.
    pub fn new(values: impl IntoIterator<Item = f64>) -> ChartResult<Self> {
        let values: PointValues = values.into_iter().collect();
        if values.is_empty() {
            return Err(ChartError::InvalidDataFormat(
                "data point must have at least one value".to_owned(),
            ));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(ChartError::InvalidDataFormat(format!(
                "data point values must be finite and >= 0, got {bad}"
            )));
        }
        Ok(Self { values })
    }

    /// Single-component point for `D = 1` charts.
    pub fn scalar(value: f64) -> ChartResult<Self> {
        Self::new([value])
    }

    /// Decodes one untrusted JSON element against `dimension`.
    ///
    /// Accepts an array of exactly `D` numbers, or a bare number when `D = 1`.
    pub fn from_json(value: &serde_json::Value, dimension: Dimension) -> ChartResult<Self> {
        match value {
            serde_json::Value::Number(number) if dimension.get() == 1 => {
                Self::scalar(json_number(number)?)
            }
            serde_json::Value::Array(items) => {
                if items.len() != dimension.get() {
                    return Err(ChartError::InvalidDataFormat(format!(
                        "expected {} values, got {}",
                        dimension.get(),
                        items.len()
                    )));
                }
                let values = items
                    .iter()
                    .map(|item| match item {
                        serde_json::Value::Number(number) => json_number(number),
                        other => Err(ChartError::InvalidDataFormat(format!(
                            "expected numeric component, got {other}"
                        ))),
                    })
                    .collect::<ChartResult<PointValues>>()?;
                Self::new(values)
            }
            other => Err(ChartError::InvalidDataFormat(format!(
                "expected {}-tuple, got {other}",
                dimension.get()
            ))),
        }
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn matches(&self, dimension: Dimension) -> bool {
        self.values.len() == dimension.get()
    }
}

impl TryFrom<Vec<f64>> for DataPoint {
    type Error = ChartError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<DataPoint> for Vec<f64> {
    fn from(point: DataPoint) -> Self {
        point.values.into_vec()
    }
}

fn json_number(number: &serde_json::Number) -> ChartResult<f64> {
    number
        .as_f64()
        .ok_or_else(|| ChartError::InvalidDataFormat(format!("{number} is not representable as f64")))
}

/// Pixel size of the drawing surface a renderer projects into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}
