pub mod aggregate;
pub mod capacity;
pub mod scaling;
pub mod series_buffer;
pub mod types;
pub mod value_format;
pub mod wheel;

pub use capacity::{Admission, CapacityPolicy};
pub use scaling::{Domain, ScalingEngine, ScalingMode};
pub use series_buffer::SeriesBuffer;
pub use types::{DataPoint, Dimension, PointValues, Viewport};
pub use value_format::{
    ABBREVIATION_SUFFIXES, ClockTime, abbreviate, add_minutes, add_times, format_time,
    validate_time,
};
pub use wheel::{SlotAngles, WheelLabel, WheelLayout};
