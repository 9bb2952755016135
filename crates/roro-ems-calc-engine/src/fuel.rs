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

pub const DEFAULT_RATED_POWER_KW: f64 = 12_600.0;

/// Specific fuel oil consumption by engine load: `(load_upper_bound_percent, g/kWh)`,
/// checked in order. Consumption rises again above 75% load, as measured on the
/// main engine.
pub const SFOC_CURVE: [(f64, f64); 4] = [(25.0, 195.0), (50.0, 180.0), (75.0, 170.0), (90.0, 172.0)];
pub const SFOC_FULL_LOAD: f64 = 178.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelResult {
    pub fuel_tons_per_hour: f64,
    pub sfoc_g_per_kwh: f64,
    pub engine_load_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelModel {
    rated_power_kw: f64,
}

impl Default for FuelModel {
    fn default() -> Self {
        Self {
            rated_power_kw: DEFAULT_RATED_POWER_KW,
        }
    }
}

impl FuelModel {
    pub fn new(rated_power_kw: f64) -> Result<Self> {
        if !rated_power_kw.is_finite() || rated_power_kw <= 0.0 {
            return Err(CalcEngineError::domain(
                "rated_power_kw",
                rated_power_kw,
                "engine rating must be greater than zero",
            ));
        }
        Ok(Self { rated_power_kw })
    }

    pub fn rated_power_kw(&self) -> f64 {
        self.rated_power_kw
    }

    pub fn compute(&self, diesel_power_kw: f64) -> Result<FuelResult> {
        if !diesel_power_kw.is_finite() || diesel_power_kw < 0.0 {
            return Err(CalcEngineError::domain(
                "diesel_power_kw",
                diesel_power_kw,
                "diesel power must be finite and not negative",
            ));
        }
        let engine_load_percent = diesel_power_kw / self.rated_power_kw * 100.0;
        let sfoc_g_per_kwh = sfoc_for_load(engine_load_percent);
        Ok(FuelResult {
            fuel_tons_per_hour: diesel_power_kw * sfoc_g_per_kwh / 1_000_000.0,
            sfoc_g_per_kwh,
            engine_load_percent,
        })
    }
}

pub fn sfoc_for_load(load_percent: f64) -> f64 {
    SFOC_CURVE
        .iter()
        .find(|(upper, _)| load_percent < *upper)
        .map(|(_, sfoc)| *sfoc)
        .unwrap_or(SFOC_FULL_LOAD)
}

/// Fuel burn for the default main engine.
pub fn compute_fuel(diesel_power_kw: f64) -> Result<FuelResult> {
    FuelModel::default().compute(diesel_power_kw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sfoc_band_boundaries() {
        let loads = [24.9, 25.0, 49.9, 74.9, 89.9, 90.0];
        let expected = [195.0, 180.0, 180.0, 170.0, 172.0, 178.0];
        for (load, sfoc) in loads.iter().zip(expected) {
            assert_eq!(sfoc_for_load(*load), sfoc, "load {load}");
        }
        assert_eq!(sfoc_for_load(0.0), 195.0);
        assert_eq!(sfoc_for_load(120.0), 178.0);
    }

    #[test]
    fn half_of_cruise_power_burns_about_a_ton_per_hour() {
        let fuel = compute_fuel(5_567.0).unwrap();
        assert_eq!(fuel.sfoc_g_per_kwh, 180.0);
        assert!((fuel.engine_load_percent - 44.1825).abs() < 1e-3);
        assert!((fuel.fuel_tons_per_hour - 1.00206).abs() < 1e-9);
    }

    #[test]
    fn idle_engine_burns_nothing() {
        let fuel = compute_fuel(0.0).unwrap();
        assert_eq!(fuel.fuel_tons_per_hour, 0.0);
        assert_eq!(fuel.engine_load_percent, 0.0);
    }

    #[test]
    fn rejects_negative_power_and_bad_rating() {
        assert_eq!(
            compute_fuel(-1.0).unwrap_err().field(),
            "diesel_power_kw"
        );
        assert_eq!(
            FuelModel::new(0.0).unwrap_err().field(),
            "rated_power_kw"
        );
    }

    #[test]
    fn load_scales_with_rating() {
        let small = FuelModel::new(6_300.0).unwrap();
        let fuel = small.compute(6_300.0).unwrap();
        assert!((fuel.engine_load_percent - 100.0).abs() < 1e-12);
        assert_eq!(fuel.sfoc_g_per_kwh, SFOC_FULL_LOAD);
    }
}
