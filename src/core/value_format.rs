//! Clock-time arithmetic and large-number abbreviation.
//!
//! Everything here is stateless and shared by every chart instance.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, TimeDelta, Timelike};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

const MINUTES_PER_HOUR: i64 = 60;
const HOURS_PER_DAY: i64 = 24;
const MINUTES_PER_DAY: u64 = 24 * 60;

/// Metric-style suffixes used by [`abbreviate`], smallest first.
pub const ABBREVIATION_SUFFIXES: [&str; 7] = ["", "K", "M", "G", "T", "P", "E"];

/// Validated time of day with minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u32,
    minute: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> ChartResult<Self> {
        if i64::from(hour) >= HOURS_PER_DAY || i64::from(minute) >= MINUTES_PER_HOUR {
            return Err(ChartError::InvalidArgument(format!(
                "time out of range: hour={hour}, minute={minute}"
            )));
        }
        Ok(Self { hour, minute })
    }

    #[must_use]
    pub fn hour(self) -> u32 {
        self.hour
    }

    #[must_use]
    pub fn minute(self) -> u32 {
        self.minute
    }

    /// Advances the clock by `minutes`, wrapping past midnight.
    #[must_use]
    pub fn plus_minutes(self, minutes: u64) -> Self {
        let wrapped = i64::try_from(minutes % MINUTES_PER_DAY).unwrap_or(0);
        let (advanced, _) = self
            .to_naive()
            .overflowing_add_signed(TimeDelta::minutes(wrapped));
        Self {
            hour: advanced.hour(),
            minute: advanced.minute(),
        }
    }

    fn to_naive(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = ChartError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        validate_time(text)
            .ok_or_else(|| ChartError::InvalidArgument(format!("invalid time string: {text:?}")))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

/// Parses `H[H]:M[M]`. Returns `None` for any other shape, for hour >= 24 or
/// for minute >= 60. Out-of-range input is rejected, never clamped.
#[must_use]
pub fn validate_time(text: &str) -> Option<ClockTime> {
    let (hour, minute) = text.split_once(':')?;
    let hour = parse_clock_field(hour)?;
    let minute = parse_clock_field(minute)?;
    ClockTime::new(hour, minute).ok()
}

fn parse_clock_field(field: &str) -> Option<u32> {
    if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Formats a possibly out-of-range hour/minute pair as `HH:MM`, carrying
/// whole hours out of `minute` and wrapping the hour into `0..24`.
///
/// `format_time(23, 60) == "00:00"`.
#[must_use]
pub fn format_time(hour: i64, minute: i64) -> String {
    let carried = hour.saturating_add(minute.div_euclid(MINUTES_PER_HOUR));
    let hour = carried.rem_euclid(HOURS_PER_DAY);
    let minute = minute.rem_euclid(MINUTES_PER_HOUR);
    format!("{hour:02}:{minute:02}")
}

/// Adds two clock strings component-wise and formats the wrapped result.
pub fn add_times(first: &str, second: &str) -> ChartResult<String> {
    let first = parse_time_argument(first)?;
    let second = parse_time_argument(second)?;
    Ok(format_time(
        i64::from(first.hour) + i64::from(second.hour),
        i64::from(first.minute) + i64::from(second.minute),
    ))
}

/// Adds `minutes` to a clock string and formats the wrapped result.
pub fn add_minutes(time: &str, minutes: i64) -> ChartResult<String> {
    let time = parse_time_argument(time)?;
    let minutes = u64::try_from(minutes).map_err(|_| {
        ChartError::InvalidArgument(format!("minutes must be >= 0, got {minutes}"))
    })?;
    Ok(time.plus_minutes(minutes).to_string())
}

fn parse_time_argument(text: &str) -> ChartResult<ClockTime> {
    text.parse()
}

/// Renders a magnitude compactly.
///
/// - `0` renders as `"0"`.
/// - Sub-unit magnitudes are scaled up by powers of ten and rendered as
///   `"<mantissa>e-<exponent>"` with two decimals.
/// - Larger magnitudes are divided by 1000 per suffix step, keeping one
///   decimal, and suffixed with `K`, `M`, `G`, `T`, `P` or `E`. Values below
///   1000 keep two decimals and no suffix.
///
/// Past `E` the value saturates: it keeps the `E` suffix and is not scaled
/// further, so `1e24` renders as `"1000000E"`.
#[must_use]
pub fn abbreviate(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    if value.abs() < 1.0 {
        let mut mantissa = value;
        let mut exponent = 0_u32;
        while mantissa.abs() < 1.0 {
            mantissa *= 10.0;
            exponent += 1;
        }
        return format!("{}e-{exponent}", round_to_places(mantissa, 2));
    }

    let mut scaled = value;
    let mut suffix_index = 0;
    while scaled.abs() >= 1000.0 && suffix_index + 1 < ABBREVIATION_SUFFIXES.len() {
        scaled = (scaled / 100.0).round() / 10.0;
        suffix_index += 1;
    }

    let number = if suffix_index == 0 {
        round_to_places(scaled, 2)
    } else {
        scaled.to_string()
    };
    format!("{number}{}", ABBREVIATION_SUFFIXES[suffix_index])
}

/// Decimal rounding (half away from zero) without binary float artifacts.
fn round_to_places(value: f64, places: u32) -> String {
    match Decimal::from_f64(value) {
        Some(decimal) => decimal
            .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
            .to_string(),
        None => {
            let factor = 10_f64.powi(places as i32);
            ((value * factor).round() / factor).to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_places_strips_trailing_zeros() {
        assert_eq!(round_to_places(5.000_000_000_000_001, 2), "5");
        assert_eq!(round_to_places(123.456, 2), "123.46");
        assert_eq!(round_to_places(-2.5, 0), "-3");
    }

    #[test]
    fn clock_field_rejects_signs_and_padding() {
        assert_eq!(parse_clock_field("+5"), None);
        assert_eq!(parse_clock_field(" 5"), None);
        assert_eq!(parse_clock_field("007"), None);
        assert_eq!(parse_clock_field("07"), Some(7));
    }
}
