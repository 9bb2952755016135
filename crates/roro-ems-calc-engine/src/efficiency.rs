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

use crate::{
    errors::{CalcEngineError, Result},
    model::round_half_up,
};

static DIESEL_THERMAL_EFFICIENCY: f64 = 0.42;
static ELECTRIC_MOTOR_EFFICIENCY: f64 = 0.95;
static BATTERY_ROUND_TRIP_EFFICIENCY: f64 = 0.90;
// t/kWh, the 175 g/kWh burn an all-diesel plant is scored against
static REFERENCE_FUEL_RATE: f64 = 0.000175;

pub const NOMINAL_BATTERY_POWER_KW: f64 = 4_000.0;

/// Scores of a power split, each a rounded percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EfficiencyResult {
    pub overall_efficiency_percent: i64,
    pub fuel_savings_percent: i64,
    pub battery_utilization_percent: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyModel {
    battery_power_kw: f64,
}

impl Default for EfficiencyModel {
    fn default() -> Self {
        Self {
            battery_power_kw: NOMINAL_BATTERY_POWER_KW,
        }
    }
}

impl EfficiencyModel {
    pub fn new(battery_power_kw: f64) -> Result<Self> {
        if !battery_power_kw.is_finite() || battery_power_kw <= 0.0 {
            return Err(CalcEngineError::domain(
                "battery_power_kw",
                battery_power_kw,
                "battery system power must be greater than zero",
            ));
        }
        Ok(Self { battery_power_kw })
    }

    pub fn compute(
        &self,
        diesel_power_kw: f64,
        electric_power_kw: f64,
        total_power_kw: f64,
    ) -> Result<EfficiencyResult> {
        if !total_power_kw.is_finite() || total_power_kw <= 0.0 {
            return Err(CalcEngineError::domain(
                "total_power_kw",
                total_power_kw,
                "required power must be greater than zero",
            ));
        }

        let diesel_contribution = diesel_power_kw / total_power_kw * DIESEL_THERMAL_EFFICIENCY;
        let electric_contribution = electric_power_kw / total_power_kw
            * ELECTRIC_MOTOR_EFFICIENCY
            * BATTERY_ROUND_TRIP_EFFICIENCY;
        let overall = (diesel_contribution + electric_contribution) * 100.0;

        let diesel_only_fuel = total_power_kw * REFERENCE_FUEL_RATE;
        let hybrid_fuel = diesel_power_kw * REFERENCE_FUEL_RATE;
        let fuel_savings = (diesel_only_fuel - hybrid_fuel) / diesel_only_fuel * 100.0;

        let utilization = electric_power_kw / self.battery_power_kw * 100.0;

        Ok(EfficiencyResult {
            overall_efficiency_percent: round_half_up(overall) as i64,
            fuel_savings_percent: round_half_up(fuel_savings) as i64,
            battery_utilization_percent: round_half_up(utilization) as i64,
        })
    }
}

pub fn compute_efficiency(
    diesel_power_kw: f64,
    electric_power_kw: f64,
    total_power_kw: f64,
) -> Result<EfficiencyResult> {
    EfficiencyModel::default().compute(diesel_power_kw, electric_power_kw, total_power_kw)
}
