//! ---
//! ems_section: "08-energy-models-optimization"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Propulsion power, fuel and power-split calculation routines."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
//! Rule-based selection of the diesel/electric power split.
//!
//! [`DECISION_RULES`] is evaluated top to bottom and the first rule whose predicate
//! holds decides the mode. When none holds the balanced hybrid split applies. The
//! order is part of the contract: a slow ship with a healthy battery runs on electric
//! power even in heavy weather, and a depleted battery forces diesel before any
//! weather rule is considered.
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};
use tracing::debug;

use crate::{
    efficiency::EfficiencyModel,
    errors::Result,
    fuel::FuelModel,
    model::{round_half_up, round_to, OperatingConditions},
    resistance::ResistanceModel,
};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    IntoStaticStr,
)]
pub enum DriveMode {
    #[serde(rename = "Electric Only")]
    #[strum(serialize = "Electric Only")]
    ElectricOnly,
    #[serde(rename = "Diesel Only")]
    #[strum(serialize = "Diesel Only")]
    DieselOnly,
    #[serde(rename = "Hybrid 75-25")]
    #[strum(serialize = "Hybrid 75-25")]
    DieselHeavyHybrid,
    #[serde(rename = "Hybrid 50-50")]
    #[strum(serialize = "Hybrid 50-50")]
    BalancedHybrid,
    #[serde(rename = "Hybrid 25-75")]
    #[strum(serialize = "Hybrid 25-75")]
    ElectricHeavyHybrid,
}

impl DriveMode {
    pub fn label(&self) -> &'static str {
        self.into()
    }

    /// Arabic rendering shown next to the English label on the bridge display.
    pub fn label_ar(&self) -> &'static str {
        match self {
            DriveMode::ElectricOnly => "كهرباء فقط",
            DriveMode::DieselOnly => "ديزل فقط",
            DriveMode::DieselHeavyHybrid => "هجين 75-25",
            DriveMode::BalancedHybrid => "هجين 50-50",
            DriveMode::ElectricHeavyHybrid => "هجين 25-75",
        }
    }

    pub fn split(&self) -> PowerSplit {
        match self {
            DriveMode::ElectricOnly => PowerSplit::new(0.0),
            DriveMode::DieselOnly => PowerSplit::new(1.0),
            DriveMode::DieselHeavyHybrid => PowerSplit::new(0.75),
            DriveMode::BalancedHybrid => PowerSplit::new(0.5),
            DriveMode::ElectricHeavyHybrid => PowerSplit::new(0.25),
        }
    }
}

/// Fractions of the required power assigned to each source. Always sums to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerSplit {
    pub diesel_ratio: f64,
    pub electric_ratio: f64,
}

impl PowerSplit {
    fn new(diesel_ratio: f64) -> Self {
        Self {
            diesel_ratio,
            electric_ratio: 1.0 - diesel_ratio,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DecisionRule {
    pub name: &'static str,
    pub applies: fn(&OperatingConditions) -> bool,
    pub mode: DriveMode,
}

pub const DECISION_RULES: [DecisionRule; 5] = [
    DecisionRule {
        name: "slow-with-charge",
        applies: slow_with_charge,
        mode: DriveMode::ElectricOnly,
    },
    DecisionRule {
        name: "fast-or-depleted",
        applies: fast_or_depleted,
        mode: DriveMode::DieselOnly,
    },
    DecisionRule {
        name: "heavy-weather",
        applies: heavy_weather,
        mode: DriveMode::DieselHeavyHybrid,
    },
    DecisionRule {
        name: "laden-transit",
        applies: laden_transit,
        mode: DriveMode::BalancedHybrid,
    },
    DecisionRule {
        name: "charged-calm-water",
        applies: charged_calm_water,
        mode: DriveMode::ElectricHeavyHybrid,
    },
];

pub const FALLBACK_RULE: &str = "default";
pub const FALLBACK_MODE: DriveMode = DriveMode::BalancedHybrid;

fn slow_with_charge(c: &OperatingConditions) -> bool {
    c.speed_knots < 12.0 && c.battery_soc_percent > 40.0
}

fn fast_or_depleted(c: &OperatingConditions) -> bool {
    c.speed_knots > 18.0 || c.battery_soc_percent < 30.0
}

fn heavy_weather(c: &OperatingConditions) -> bool {
    c.sea_state >= 5 || c.wave_height_m > 3.0
}

fn laden_transit(c: &OperatingConditions) -> bool {
    c.cargo_percent >= 75.0 && c.speed_knots >= 15.0
}

fn charged_calm_water(c: &OperatingConditions) -> bool {
    c.battery_soc_percent > 60.0 && c.sea_state <= 3
}

/// Name of the first matching rule and the mode it selects.
pub fn select_mode(conditions: &OperatingConditions) -> (&'static str, DriveMode) {
    DECISION_RULES
        .iter()
        .find(|rule| (rule.applies)(conditions))
        .map(|rule| (rule.name, rule.mode))
        .unwrap_or((FALLBACK_RULE, FALLBACK_MODE))
}

/// Advice for one snapshot. Power figures are in kW; the diesel and electric shares
/// are rounded to whole kilowatts and the fuel rate to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub mode: DriveMode,
    pub rule: String,
    /// Exact required power, not rounded; round it for display.
    pub total_power_kw: f64,
    pub diesel_power_kw: f64,
    pub electric_power_kw: f64,
    pub diesel_ratio: f64,
    pub electric_ratio: f64,
    pub fuel_tons_per_hour: f64,
    pub sfoc_g_per_kwh: f64,
    pub engine_load_percent: i64,
    pub fuel_efficiency_percent: i64,
    pub battery_utilization_percent: i64,
    pub system_efficiency_percent: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DecisionEngine {
    resistance: ResistanceModel,
    fuel: FuelModel,
    efficiency: EfficiencyModel,
}

impl DecisionEngine {
    pub fn new(resistance: ResistanceModel, fuel: FuelModel, efficiency: EfficiencyModel) -> Self {
        Self {
            resistance,
            fuel,
            efficiency,
        }
    }

    pub fn resistance(&self) -> &ResistanceModel {
        &self.resistance
    }

    pub fn recommend(&self, conditions: &OperatingConditions) -> Result<Recommendation> {
        let total_power_kw = self.resistance.required_power_kw(conditions)?;
        let (rule, mode) = select_mode(conditions);
        let split = mode.split();

        let diesel_power_kw = round_half_up(total_power_kw * split.diesel_ratio);
        let electric_power_kw = round_half_up(total_power_kw * split.electric_ratio);

        let fuel = self.fuel.compute(diesel_power_kw)?;
        let efficiency =
            self.efficiency
                .compute(diesel_power_kw, electric_power_kw, total_power_kw)?;

        debug!(
            rule,
            mode = %mode,
            total_power_kw,
            diesel_power_kw,
            electric_power_kw,
            "power split selected"
        );

        Ok(Recommendation {
            mode,
            rule: rule.to_owned(),
            total_power_kw,
            diesel_power_kw,
            electric_power_kw,
            diesel_ratio: split.diesel_ratio,
            electric_ratio: split.electric_ratio,
            fuel_tons_per_hour: round_to(fuel.fuel_tons_per_hour, 2),
            sfoc_g_per_kwh: fuel.sfoc_g_per_kwh,
            engine_load_percent: round_half_up(fuel.engine_load_percent) as i64,
            fuel_efficiency_percent: efficiency.fuel_savings_percent,
            battery_utilization_percent: efficiency.battery_utilization_percent,
            system_efficiency_percent: efficiency.overall_efficiency_percent,
        })
    }
}

/// Recommendation for the default vessel and machinery.
pub fn recommend(conditions: &OperatingConditions) -> Result<Recommendation> {
    DecisionEngine::default().recommend(conditions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn snapshot(speed: f64, sea_state: u8, cargo: f64, wave: f64, battery: f64) -> OperatingConditions {
        OperatingConditions::new(speed, sea_state, cargo, 5.0, wave, battery)
    }

    #[test]
    fn splits_sum_to_one() {
        for mode in DriveMode::iter() {
            let split = mode.split();
            assert_eq!(split.diesel_ratio + split.electric_ratio, 1.0, "{mode}");
        }
    }

    #[test]
    fn rule_order_is_fixed() {
        let names: Vec<_> = DECISION_RULES.iter().map(|rule| rule.name).collect();
        assert_eq!(
            names,
            [
                "slow-with-charge",
                "fast-or-depleted",
                "heavy-weather",
                "laden-transit",
                "charged-calm-water"
            ]
        );
    }

    #[test]
    fn slow_ship_with_charge_beats_heavy_weather() {
        let (rule, mode) = select_mode(&snapshot(10.0, 7, 100.0, 5.0, 50.0));
        assert_eq!(rule, "slow-with-charge");
        assert_eq!(mode, DriveMode::ElectricOnly);
    }

    #[test]
    fn depleted_battery_beats_heavy_weather() {
        let (_, mode) = select_mode(&snapshot(14.0, 6, 50.0, 4.0, 25.0));
        assert_eq!(mode, DriveMode::DieselOnly);
    }

    #[test]
    fn slow_ship_with_low_battery_runs_diesel() {
        // 12 kn is not "slow" and 40% is not "charged"
        let (_, mode) = select_mode(&snapshot(12.0, 2, 50.0, 0.5, 40.0));
        assert_ne!(mode, DriveMode::ElectricOnly);
        let (_, mode) = select_mode(&snapshot(10.0, 2, 50.0, 0.5, 29.0));
        assert_eq!(mode, DriveMode::DieselOnly);
    }

    #[test]
    fn falls_back_to_balanced_hybrid() {
        let (rule, mode) = select_mode(&snapshot(16.0, 4, 50.0, 1.0, 50.0));
        assert_eq!(rule, FALLBACK_RULE);
        assert_eq!(mode, FALLBACK_MODE);
    }

    #[test]
    fn electric_only_has_no_fuel_burn() {
        let rec = recommend(&snapshot(10.0, 2, 50.0, 0.5, 70.0)).unwrap();
        assert_eq!(rec.mode, DriveMode::ElectricOnly);
        assert_eq!(rec.diesel_power_kw, 0.0);
        assert_eq!(rec.fuel_tons_per_hour, 0.0);
        assert_eq!(rec.sfoc_g_per_kwh, 195.0);
        assert_eq!(rec.fuel_efficiency_percent, 100);
    }

    #[test]
    fn total_power_is_exact_while_shares_are_whole_kilowatts() {
        let rec = recommend(&snapshot(17.0, 3, 75.0, 1.5, 50.0)).unwrap();
        assert_ne!(rec.total_power_kw.fract(), 0.0);
        assert_eq!(rec.diesel_power_kw.fract(), 0.0);
        assert_eq!(rec.electric_power_kw.fract(), 0.0);
        assert!((rec.diesel_power_kw + rec.electric_power_kw - rec.total_power_kw).abs() <= 1.0);
    }

    #[test]
    fn labels_render_in_both_languages() {
        assert_eq!(DriveMode::DieselHeavyHybrid.label(), "Hybrid 75-25");
        assert_eq!(DriveMode::DieselHeavyHybrid.to_string(), "Hybrid 75-25");
        assert_eq!(DriveMode::DieselOnly.label_ar(), "ديزل فقط");
    }

    #[test]
    fn mode_serializes_as_label() {
        let json = serde_json::to_string(&DriveMode::ElectricHeavyHybrid).unwrap();
        assert_eq!(json, "\"Hybrid 25-75\"");
    }

    #[test]
    fn invalid_snapshot_is_rejected_before_deciding() {
        let err = recommend(&snapshot(-3.0, 3, 50.0, 1.0, 50.0)).unwrap_err();
        assert_eq!(err.field(), "speed_knots");
    }
}
