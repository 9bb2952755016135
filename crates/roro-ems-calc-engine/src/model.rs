//! ---
//! ems_section: "08-energy-models-optimization"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Propulsion power, fuel and power-split calculation routines."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};

use crate::errors::{CalcEngineError, Result};

pub const MIN_SEA_STATE: u8 = 1;
pub const MAX_SEA_STATE: u8 = 7;

/// Snapshot of the conditions the vessel is operating in for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingConditions {
    /// Speed through water in knots.
    pub speed_knots: f64,
    /// Douglas sea state category, 1 (calm) to 7 (high).
    pub sea_state: u8,
    /// Cargo load as a percentage of capacity.
    pub cargo_percent: f64,
    /// Lateral wind speed in m/s.
    pub wind_ms: f64,
    /// Significant wave height in metres.
    pub wave_height_m: f64,
    /// Battery state of charge in percent.
    pub battery_soc_percent: f64,
}

impl OperatingConditions {
    pub fn new(
        speed_knots: f64,
        sea_state: u8,
        cargo_percent: f64,
        wind_ms: f64,
        wave_height_m: f64,
        battery_soc_percent: f64,
    ) -> Self {
        Self {
            speed_knots,
            sea_state,
            cargo_percent,
            wind_ms,
            wave_height_m,
            battery_soc_percent,
        }
    }

    /// Rejects snapshots outside the physically meaningful domain, naming the first
    /// offending field.
    pub fn validate(&self) -> Result<()> {
        if !self.speed_knots.is_finite() || self.speed_knots <= 0.0 {
            return Err(CalcEngineError::domain(
                "speed_knots",
                self.speed_knots,
                "speed must be a finite value greater than zero",
            ));
        }
        if !(MIN_SEA_STATE..=MAX_SEA_STATE).contains(&self.sea_state) {
            return Err(CalcEngineError::domain(
                "sea_state",
                f64::from(self.sea_state),
                "sea state must be between 1 and 7",
            ));
        }
        check_percent("cargo_percent", self.cargo_percent)?;
        check_non_negative("wind_ms", self.wind_ms)?;
        check_non_negative("wave_height_m", self.wave_height_m)?;
        check_percent("battery_soc_percent", self.battery_soc_percent)?;
        Ok(())
    }

    /// Copy of the snapshot with a different battery state of charge.
    pub fn with_battery_soc(mut self, battery_soc_percent: f64) -> Self {
        self.battery_soc_percent = battery_soc_percent;
        self
    }
}

/// Descriptive label of a Douglas sea state category.
pub fn sea_state_description(sea_state: u8) -> Option<&'static str> {
    match sea_state {
        1 => Some("Calm"),
        2 => Some("Light"),
        3 => Some("Slight"),
        4 => Some("Moderate"),
        5 => Some("Rough"),
        6 => Some("Very Rough"),
        7 => Some("High"),
        _ => None,
    }
}

/// Rounds half-way cases towards positive infinity, matching how the advisor has
/// always presented rounded figures.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Rounds to a fixed number of decimal places using [`round_half_up`].
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    round_half_up(value * scale) / scale
}

fn check_percent(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(CalcEngineError::domain(
            field,
            value,
            "percentage must be between 0 and 100",
        ));
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcEngineError::domain(
            field,
            value,
            "value must be finite and not negative",
        ));
    }
    Ok(())
}
