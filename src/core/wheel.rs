use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::core::value_format::ClockTime;
use crate::error::{ChartError, ChartResult};

/// Angular span of one slot on a time wheel, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotAngles {
    pub start: f64,
    pub end: f64,
}

/// A labelled reference slot: `label` is the clock time of the point in `slot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelLabel {
    pub slot: usize,
    pub label: String,
}

/// Polar reading of a bounded buffer: position `i` (0 = oldest) sits in slot
/// `i` of `slots` equal sectors, one minute apart starting at the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelLayout {
    slots: usize,
}

impl WheelLayout {
    pub fn new(slots: usize) -> ChartResult<Self> {
        if slots == 0 {
            return Err(ChartError::InvalidArgument(
                "wheel slot count must be > 0".to_owned(),
            ));
        }
        Ok(Self { slots })
    }

    #[must_use]
    pub fn slots(self) -> usize {
        self.slots
    }

    pub fn slot_angles(self, slot: usize) -> ChartResult<SlotAngles> {
        if slot >= self.slots {
            return Err(ChartError::InvalidArgument(format!(
                "slot {slot} out of range for {} slots",
                self.slots
            )));
        }
        let step = TAU / self.slots as f64;
        Ok(SlotAngles {
            start: slot as f64 * step,
            end: (slot + 1) as f64 * step,
        })
    }

    /// Clock time of the point in `slot` given the anchor of slot 0.
    pub fn slot_time(self, anchor: ClockTime, slot: usize) -> ChartResult<ClockTime> {
        self.slot_angles(slot)?;
        Ok(anchor.plus_minutes(slot as u64))
    }

    /// Reference labels every `every` slots, starting at slot 0.
    pub fn labels(self, anchor: ClockTime, every: usize) -> ChartResult<Vec<WheelLabel>> {
        if every == 0 {
            return Err(ChartError::InvalidArgument(
                "label interval must be > 0".to_owned(),
            ));
        }
        (0..self.slots)
            .step_by(every)
            .map(|slot| {
                Ok(WheelLabel {
                    slot,
                    label: self.slot_time(anchor, slot)?.to_string(),
                })
            })
            .collect()
    }
}
