//! ---
//! ems_section: "11-simulation-test-harness"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Voyage simulation runtime and baseline comparison."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};
use tracing::debug;

use crate::{
    errors::{Result, SimulationError},
    frames::{SimulationSummary, DEFAULT_CO2_TONS_PER_FUEL_TON},
};

/// Diesel-only baseline burn relative to the optimised voyage.
pub const DIESEL_ONLY_FUEL_FACTOR: f64 = 1.068;
/// Electric-priority baseline burn relative to the optimised voyage.
pub const ELECTRIC_PRIORITY_FUEL_FACTOR: f64 = 1.025;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
pub enum ScenarioKind {
    #[strum(serialize = "Diesel Only")]
    DieselOnly,
    #[strum(serialize = "AI Optimized")]
    AiOptimized,
    #[strum(serialize = "Electric Priority")]
    ElectricPriority,
}

impl ScenarioKind {
    /// Descriptive efficiency figure shown with each baseline. Not recomputed.
    pub fn nominal_efficiency_percent(self) -> u8 {
        match self {
            Self::DieselOnly => 42,
            Self::AiOptimized => 68,
            Self::ElectricPriority => 55,
        }
    }

    pub fn fuel_factor(self) -> f64 {
        match self {
            Self::DieselOnly => DIESEL_ONLY_FUEL_FACTOR,
            Self::AiOptimized => 1.0,
            Self::ElectricPriority => ELECTRIC_PRIORITY_FUEL_FACTOR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Economics {
    pub fuel_price_usd_per_ton: f64,
    pub voyage_days_per_year: f64,
    pub co2_tons_per_fuel_ton: f64,
}

impl Default for Economics {
    fn default() -> Self {
        Self {
            fuel_price_usd_per_ton: 700.0,
            voyage_days_per_year: 48.0,
            co2_tons_per_fuel_ton: DEFAULT_CO2_TONS_PER_FUEL_TON,
        }
    }
}

impl Economics {
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("fuel_price_usd_per_ton", self.fuel_price_usd_per_ton),
            ("voyage_days_per_year", self.voyage_days_per_year),
            ("co2_tons_per_fuel_ton", self.co2_tons_per_fuel_ton),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::invalid(
                    field,
                    value,
                    "economic factors must be finite and not negative",
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonScenario {
    pub kind: ScenarioKind,
    pub fuel_tons: f64,
    pub co2_tons: f64,
    pub cost_usd: f64,
    pub efficiency_percent: u8,
}

/// Optimised voyage against the diesel-only baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsSummary {
    pub daily_fuel_tons: f64,
    pub daily_fuel_percent: f64,
    pub annual_fuel_tons: f64,
    pub annual_co2_tons: f64,
    pub annual_cost_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub scenarios: Vec<ComparisonScenario>,
    pub savings: SavingsSummary,
}

impl ComparisonReport {
    pub fn scenario(&self, kind: ScenarioKind) -> Option<&ComparisonScenario> {
        self.scenarios.iter().find(|s| s.kind == kind)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComparisonEngine {
    economics: Economics,
}

impl ComparisonEngine {
    pub fn new(economics: Economics) -> Result<Self> {
        economics.validate()?;
        Ok(Self { economics })
    }

    pub fn economics(&self) -> &Economics {
        &self.economics
    }

    pub fn compare(&self, summary: &SimulationSummary) -> ComparisonReport {
        self.compare_fuel(summary.total_fuel_tons)
    }

    /// Baselines are fixed multiples of `ai_fuel_tons`, not separate simulations.
    pub fn compare_fuel(&self, ai_fuel_tons: f64) -> ComparisonReport {
        let economics = &self.economics;
        let scenario = |kind: ScenarioKind| {
            let fuel_tons = ai_fuel_tons * kind.fuel_factor();
            ComparisonScenario {
                kind,
                fuel_tons,
                co2_tons: fuel_tons * economics.co2_tons_per_fuel_ton,
                cost_usd: fuel_tons * economics.fuel_price_usd_per_ton,
                efficiency_percent: kind.nominal_efficiency_percent(),
            }
        };
        let diesel_only = scenario(ScenarioKind::DieselOnly);
        let ai_optimized = scenario(ScenarioKind::AiOptimized);
        let electric_priority = scenario(ScenarioKind::ElectricPriority);

        let daily_fuel_tons = diesel_only.fuel_tons - ai_optimized.fuel_tons;
        let daily_fuel_percent = if diesel_only.fuel_tons > 0.0 {
            daily_fuel_tons / diesel_only.fuel_tons * 100.0
        } else {
            0.0
        };
        let annual_fuel_tons = daily_fuel_tons * economics.voyage_days_per_year;
        let savings = SavingsSummary {
            daily_fuel_tons,
            daily_fuel_percent,
            annual_fuel_tons,
            annual_co2_tons: annual_fuel_tons * economics.co2_tons_per_fuel_ton,
            annual_cost_usd: annual_fuel_tons * economics.fuel_price_usd_per_ton,
        };
        debug!(
            ai_fuel_tons,
            annual_fuel_tons, "baseline comparison computed"
        );

        ComparisonReport {
            scenarios: vec![diesel_only, ai_optimized, electric_priority],
            savings,
        }
    }
}

/// Comparison with the default fuel price, voyage days and emission factor.
pub fn compare(summary: &SimulationSummary) -> ComparisonReport {
    ComparisonEngine::default().compare(summary)
}
