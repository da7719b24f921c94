//! Fire behaviour advisory output types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fire type classification from crown fraction burned
///
/// | CFB        | Fire type               | Abbrev. |
/// |------------|-------------------------|---------|
/// | < 10%      | Surface fire            | S       |
/// | 10% - 89%  | Intermittent crown fire | IC      |
/// | >= 90%     | Continuous crown fire   | CC      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FireType {
    /// Surface fire
    #[serde(rename = "S")]
    Surface,
    /// Intermittent crown fire
    #[serde(rename = "IC")]
    IntermittentCrown,
    /// Continuous crown fire
    #[serde(rename = "CC")]
    ContinuousCrown,
}

impl FireType {
    pub fn abbreviation(self) -> &'static str {
        match self {
            FireType::Surface => "S",
            FireType::IntermittentCrown => "IC",
            FireType::ContinuousCrown => "CC",
        }
    }
}

impl fmt::Display for FireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Window of the day during which HFI meets or exceeds a threshold.
///
/// Hours are on a 24-hour clock; `end` is smaller than `start` when the window
/// runs past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriticalHours {
    pub start: f64,
    pub end: f64,
}

impl CriticalHours {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// True when the window wraps past midnight
    pub fn spans_midnight(&self) -> bool {
        self.end < self.start
    }
}

fn write_clock_time(f: &mut fmt::Formatter<'_>, hour: f64) -> fmt::Result {
    let total_minutes = (hour.rem_euclid(24.0) * 60.0).round() as u32;
    write!(f, "{:02}:{:02}", (total_minutes / 60) % 24, total_minutes % 60)
}

impl fmt::Display for CriticalHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_clock_time(f, self.start)?;
        f.write_str(" - ")?;
        write_clock_time(f, self.end)
    }
}

/// Result of the fire behaviour advisory calculation for one station.
///
/// `None` marks a value that cannot be computed from the inputs (crown-capable
/// fuel type without a crown base height), not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireBehaviourAdvisory {
    /// Head fire intensity (kW/m)
    pub hfi: Option<f64>,
    /// Rate of spread (m/min)
    pub ros: f64,
    pub fire_type: Option<FireType>,
    /// Crown fraction burned (0-1)
    pub cfb: Option<f64>,
    /// Approximate flame length (m)
    pub flame_length: Option<f64>,
    /// Fire size after 60 minutes (ha)
    pub sixty_minute_fire_size: f64,
    /// Fire size after 30 minutes (ha)
    pub thirty_minute_fire_size: f64,
    pub critical_hours_hfi_4000: Option<CriticalHours>,
    pub critical_hours_hfi_10000: Option<CriticalHours>,
    /// HFI intensity class 1-5
    pub intensity_group: Option<u8>,
}
