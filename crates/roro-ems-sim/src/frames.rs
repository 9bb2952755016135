//! ---
//! ems_section: "11-simulation-test-harness"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Voyage simulation runtime and baseline comparison."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use chrono::{DateTime, Utc};
use roro_ems_calc_engine::{DriveMode, OperatingConditions};
use serde::{Deserialize, Serialize};

use crate::battery::BatteryAction;

/// Tons of CO2 emitted per ton of marine diesel burned.
pub const DEFAULT_CO2_TONS_PER_FUEL_TON: f64 = 3.17;

/// State after one simulated hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationFrame {
    pub hour: u32,
    pub conditions: OperatingConditions,
    pub mode: DriveMode,
    pub diesel_power_kw: f64,
    pub electric_power_kw: f64,
    pub fuel_tons: f64,
    pub battery_action: BatteryAction,
    /// State of charge at the end of the hour.
    pub battery_soc_percent: f64,
    pub cumulative_fuel_tons: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub total_fuel_tons: f64,
    pub average_battery_soc_percent: f64,
    /// CO2 attributable to the fuel burned over the day, in kg.
    pub co2_reduction_kg: f64,
}

impl SimulationSummary {
    pub fn from_frames(frames: &[SimulationFrame], co2_tons_per_fuel_ton: f64) -> Self {
        let total_fuel_tons = frames
            .last()
            .map(|frame| frame.cumulative_fuel_tons)
            .unwrap_or(0.0);
        let average_battery_soc_percent = if frames.is_empty() {
            0.0
        } else {
            frames.iter().map(|f| f.battery_soc_percent).sum::<f64>() / frames.len() as f64
        };
        Self {
            total_fuel_tons,
            average_battery_soc_percent,
            co2_reduction_kg: total_fuel_tons * co2_tons_per_fuel_ton * 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub generated_at: DateTime<Utc>,
    pub frames: Vec<SimulationFrame>,
    pub summary: SimulationSummary,
}
