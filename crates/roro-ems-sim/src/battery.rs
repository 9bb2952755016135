//! ---
//! ems_section: "11-simulation-test-harness"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Voyage simulation runtime and baseline comparison."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use roro_ems_calc_engine::{efficiency::NOMINAL_BATTERY_POWER_KW, Recommendation};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SimulationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryAction {
    Discharge,
    Charge,
    Hold,
}

/// Hourly state-of-charge bookkeeping. Drawing the nominal battery power for an hour
/// costs `discharge_points` of charge; the floor and ceiling are operating limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryPolicy {
    pub nominal_power_kw: f64,
    pub discharge_points: f64,
    pub charge_points: f64,
    pub min_soc_percent: f64,
    pub max_soc_percent: f64,
    /// Diesel output above `total * ratio` is treated as surplus that charges the pack.
    pub surplus_diesel_ratio: f64,
}

impl Default for BatteryPolicy {
    fn default() -> Self {
        Self {
            nominal_power_kw: NOMINAL_BATTERY_POWER_KW,
            discharge_points: 10.0,
            charge_points: 5.0,
            min_soc_percent: 20.0,
            max_soc_percent: 90.0,
            surplus_diesel_ratio: 1.1,
        }
    }
}

impl BatteryPolicy {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("nominal_power_kw", self.nominal_power_kw),
            ("discharge_points", self.discharge_points),
            ("charge_points", self.charge_points),
            ("min_soc_percent", self.min_soc_percent),
            ("max_soc_percent", self.max_soc_percent),
            ("surplus_diesel_ratio", self.surplus_diesel_ratio),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(SimulationError::invalid(
                    field,
                    value,
                    "battery settings must be finite",
                ));
            }
        }
        if self.nominal_power_kw <= 0.0 {
            return Err(SimulationError::invalid(
                "nominal_power_kw",
                self.nominal_power_kw,
                "battery power must be greater than zero",
            ));
        }
        if self.discharge_points < 0.0 {
            return Err(SimulationError::invalid(
                "discharge_points",
                self.discharge_points,
                "charge steps must not be negative",
            ));
        }
        if self.charge_points < 0.0 {
            return Err(SimulationError::invalid(
                "charge_points",
                self.charge_points,
                "charge steps must not be negative",
            ));
        }
        if self.surplus_diesel_ratio < 1.0 {
            return Err(SimulationError::invalid(
                "surplus_diesel_ratio",
                self.surplus_diesel_ratio,
                "surplus threshold must be at least the required power",
            ));
        }
        if !(0.0..=100.0).contains(&self.min_soc_percent)
            || !(0.0..=100.0).contains(&self.max_soc_percent)
            || self.min_soc_percent > self.max_soc_percent
        {
            return Err(SimulationError::invalid(
                "min_soc_percent",
                self.min_soc_percent,
                "state of charge limits must satisfy 0 <= min <= max <= 100",
            ));
        }
        Ok(())
    }

    /// State of charge after running one hour on `recommendation`.
    ///
    /// The charge branch needs diesel output above the required power, which a
    /// ratio split never produces, so under the current rule table the pack only
    /// discharges or holds.
    pub fn apply(&self, soc_percent: f64, recommendation: &Recommendation) -> (f64, BatteryAction) {
        if recommendation.electric_power_kw > 0.0 {
            let drawn =
                recommendation.electric_power_kw / self.nominal_power_kw * self.discharge_points;
            ((soc_percent - drawn).max(self.min_soc_percent), BatteryAction::Discharge)
        } else if recommendation.diesel_power_kw
            > recommendation.total_power_kw * self.surplus_diesel_ratio
        {
            (
                (soc_percent + self.charge_points).min(self.max_soc_percent),
                BatteryAction::Charge,
            )
        } else {
            (soc_percent, BatteryAction::Hold)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roro_ems_calc_engine::{recommend, OperatingConditions};

    fn cruise(battery: f64) -> Recommendation {
        recommend(&OperatingConditions::new(17.0, 3, 75.0, 8.0, 1.5, battery)).unwrap()
    }

    #[test]
    fn balanced_cruise_draws_down_the_pack() {
        let policy = BatteryPolicy::default();
        let (soc, action) = policy.apply(50.0, &cruise(50.0));
        assert_eq!(action, BatteryAction::Discharge);
        // 5,567 kW for an hour is 13.9 points
        assert!((soc - (50.0 - 13.9175)).abs() < 1e-9);
    }

    #[test]
    fn discharge_stops_at_the_floor() {
        let policy = BatteryPolicy::default();
        let (soc, _) = policy.apply(22.0, &cruise(50.0));
        assert_eq!(soc, 20.0);
    }

    #[test]
    fn diesel_only_holds_charge() {
        let policy = BatteryPolicy::default();
        let rec = cruise(25.0);
        assert_eq!(rec.electric_power_kw, 0.0);
        assert_eq!(policy.apply(25.0, &rec), (25.0, BatteryAction::Hold));
    }

    #[test]
    fn surplus_diesel_charges_up_to_the_ceiling() {
        let policy = BatteryPolicy::default();
        let mut rec = cruise(25.0);
        rec.diesel_power_kw = rec.total_power_kw * 1.2;
        assert_eq!(policy.apply(40.0, &rec), (45.0, BatteryAction::Charge));
        assert_eq!(policy.apply(88.0, &rec), (90.0, BatteryAction::Charge));
    }

    #[test]
    fn rejects_inverted_limits() {
        let policy = BatteryPolicy {
            min_soc_percent: 95.0,
            ..BatteryPolicy::default()
        };
        assert!(policy.validate().is_err());
        assert!(BatteryPolicy::default().validate().is_ok());
    }

    fn rejected_field(policy: BatteryPolicy) -> &'static str {
        match policy.validate().unwrap_err() {
            SimulationError::InvalidSetting { field, .. } => field,
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn rejects_non_finite_settings() {
        let defaults = BatteryPolicy::default();
        let cases = [
            (BatteryPolicy { nominal_power_kw: f64::INFINITY, ..defaults }, "nominal_power_kw"),
            (BatteryPolicy { discharge_points: f64::NAN, ..defaults }, "discharge_points"),
            (BatteryPolicy { charge_points: f64::NAN, ..defaults }, "charge_points"),
            (BatteryPolicy { min_soc_percent: f64::NAN, ..defaults }, "min_soc_percent"),
            (BatteryPolicy { max_soc_percent: f64::NAN, ..defaults }, "max_soc_percent"),
            (BatteryPolicy { surplus_diesel_ratio: f64::NAN, ..defaults }, "surplus_diesel_ratio"),
        ];
        for (policy, field) in cases {
            assert_eq!(rejected_field(policy), field);
        }
    }

    #[test]
    fn rejects_surplus_ratio_below_demand() {
        for ratio in [-1.0, 0.0, 0.99] {
            let policy = BatteryPolicy {
                surplus_diesel_ratio: ratio,
                ..BatteryPolicy::default()
            };
            assert_eq!(rejected_field(policy), "surplus_diesel_ratio");
        }
        let exact = BatteryPolicy {
            surplus_diesel_ratio: 1.0,
            ..BatteryPolicy::default()
        };
        assert!(exact.validate().is_ok());
    }

    #[test]
    fn rejects_negative_charge_step() {
        let policy = BatteryPolicy {
            charge_points: -5.0,
            ..BatteryPolicy::default()
        };
        assert_eq!(rejected_field(policy), "charge_points");
    }
}
