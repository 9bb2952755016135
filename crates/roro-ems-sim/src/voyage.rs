//! ---
//! ems_section: "11-simulation-test-harness"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Voyage simulation runtime and baseline comparison."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use std::f64::consts::PI;

use rand::Rng;
use roro_ems_calc_engine::{model::MAX_SEA_STATE, model::MIN_SEA_STATE, OperatingConditions};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SimulationError};

pub const HOURS_PER_VOYAGE: u32 = 24;

/// Synthetic weather and speed pattern for a day at sea. Speed follows one sine
/// period over the day, wind and waves two periods, and the sea state jitters above
/// its base by a random whole step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoyageProfile {
    pub base_speed_knots: f64,
    pub speed_amplitude_knots: f64,
    pub base_sea_state: u8,
    /// Largest random increment added to the base sea state (inclusive).
    pub sea_state_jitter: u8,
    pub cargo_percent: f64,
    pub base_wind_ms: f64,
    pub wind_amplitude_ms: f64,
    pub base_wave_height_m: f64,
    pub wave_amplitude_m: f64,
}

impl Default for VoyageProfile {
    fn default() -> Self {
        Self {
            base_speed_knots: 17.0,
            speed_amplitude_knots: 0.5,
            base_sea_state: 3,
            sea_state_jitter: 1,
            cargo_percent: 75.0,
            base_wind_ms: 8.0,
            wind_amplitude_ms: 2.0,
            base_wave_height_m: 1.5,
            wave_amplitude_m: 0.5,
        }
    }
}

impl VoyageProfile {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("base_speed_knots", self.base_speed_knots),
            ("speed_amplitude_knots", self.speed_amplitude_knots),
            ("cargo_percent", self.cargo_percent),
            ("base_wind_ms", self.base_wind_ms),
            ("wind_amplitude_ms", self.wind_amplitude_ms),
            ("base_wave_height_m", self.base_wave_height_m),
            ("wave_amplitude_m", self.wave_amplitude_m),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(SimulationError::invalid(
                    field,
                    value,
                    "voyage profile values must be finite",
                ));
            }
        }
        if self.base_speed_knots - self.speed_amplitude_knots.abs() <= 0.0 {
            return Err(SimulationError::invalid(
                "base_speed_knots",
                self.base_speed_knots,
                "speed must stay above zero over the whole voyage",
            ));
        }
        if self.base_sea_state < MIN_SEA_STATE
            || self.base_sea_state.saturating_add(self.sea_state_jitter) > MAX_SEA_STATE
        {
            return Err(SimulationError::invalid(
                "base_sea_state",
                f64::from(self.base_sea_state),
                "sea state plus jitter must stay between 1 and 7",
            ));
        }
        if !(0.0..=100.0).contains(&self.cargo_percent) {
            return Err(SimulationError::invalid(
                "cargo_percent",
                self.cargo_percent,
                "cargo must be between 0 and 100 percent",
            ));
        }
        if self.base_wind_ms - self.wind_amplitude_ms.abs() < 0.0 {
            return Err(SimulationError::invalid(
                "base_wind_ms",
                self.base_wind_ms,
                "wind must not swing below zero",
            ));
        }
        if self.base_wave_height_m - self.wave_amplitude_m.abs() < 0.0 {
            return Err(SimulationError::invalid(
                "base_wave_height_m",
                self.base_wave_height_m,
                "wave height must not swing below zero",
            ));
        }
        Ok(())
    }

    /// Conditions for `hour` with the carried-forward battery state of charge.
    pub fn conditions_at<R: Rng + ?Sized>(
        &self,
        hour: u32,
        battery_soc_percent: f64,
        rng: &mut R,
    ) -> OperatingConditions {
        let hour = f64::from(hour);
        let sea_state = self.base_sea_state + rng.gen_range(0..=self.sea_state_jitter);

        OperatingConditions {
            speed_knots: self.base_speed_knots
                + (hour / 24.0 * 2.0 * PI).sin() * self.speed_amplitude_knots,
            sea_state,
            cargo_percent: self.cargo_percent,
            wind_ms: self.base_wind_ms + (hour / 12.0 * PI).sin() * self.wind_amplitude_ms,
            wave_height_m: self.base_wave_height_m
                + (hour / 12.0 * PI).cos() * self.wave_amplitude_m,
            battery_soc_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn default_profile_matches_reference_day() {
        let profile = VoyageProfile::default();
        let mut rng = StdRng::seed_from_u64(7);

        let midnight = profile.conditions_at(0, 50.0, &mut rng);
        assert!((midnight.speed_knots - 17.0).abs() < 1e-12);
        assert!((midnight.wind_ms - 8.0).abs() < 1e-12);
        assert!((midnight.wave_height_m - 2.0).abs() < 1e-12);
        assert_eq!(midnight.cargo_percent, 75.0);
        assert_eq!(midnight.battery_soc_percent, 50.0);

        let six = profile.conditions_at(6, 42.0, &mut rng);
        assert!((six.speed_knots - 17.5).abs() < 1e-12);
        assert!((six.wind_ms - 10.0).abs() < 1e-12);
        assert!((six.wave_height_m - 1.5).abs() < 1e-12);
        assert_eq!(six.battery_soc_percent, 42.0);
    }

    #[test]
    fn sea_state_jitters_within_one_step() {
        let profile = VoyageProfile::default();
        let mut rng = StdRng::seed_from_u64(99);
        let mut seen = [false; 2];
        for hour in 0..200 {
            let conditions = profile.conditions_at(hour % HOURS_PER_VOYAGE, 50.0, &mut rng);
            assert!((3..=4).contains(&conditions.sea_state));
            seen[usize::from(conditions.sea_state - 3)] = true;
        }
        assert!(seen.iter().all(|s| *s), "both sea states should occur");
    }

    #[test]
    fn every_generated_snapshot_is_valid() {
        let profile = VoyageProfile::default();
        let mut rng = StdRng::seed_from_u64(1);
        for hour in 0..HOURS_PER_VOYAGE {
            profile
                .conditions_at(hour, 50.0, &mut rng)
                .validate()
                .expect("generated snapshot in domain");
        }
    }

    #[test]
    fn rejects_profiles_leaving_the_domain() {
        let profile = VoyageProfile {
            base_sea_state: 7,
            ..VoyageProfile::default()
        };
        assert!(profile.validate().is_err());

        let profile = VoyageProfile {
            base_speed_knots: 0.4,
            ..VoyageProfile::default()
        };
        assert!(profile.validate().is_err());

        let profile = VoyageProfile {
            base_wave_height_m: 0.2,
            ..VoyageProfile::default()
        };
        assert!(profile.validate().is_err());

        assert!(VoyageProfile::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_finite_profile_values() {
        let defaults = VoyageProfile::default();
        let cases = [
            (VoyageProfile { base_speed_knots: f64::NAN, ..defaults }, "base_speed_knots"),
            (VoyageProfile { speed_amplitude_knots: f64::NAN, ..defaults }, "speed_amplitude_knots"),
            (VoyageProfile { cargo_percent: f64::NAN, ..defaults }, "cargo_percent"),
            (VoyageProfile { base_wind_ms: f64::INFINITY, ..defaults }, "base_wind_ms"),
            (VoyageProfile { wind_amplitude_ms: f64::NAN, ..defaults }, "wind_amplitude_ms"),
            (VoyageProfile { base_wave_height_m: f64::INFINITY, ..defaults }, "base_wave_height_m"),
            (VoyageProfile { wave_amplitude_m: f64::NAN, ..defaults }, "wave_amplitude_m"),
        ];
        for (profile, expected) in cases {
            match profile.validate().unwrap_err() {
                SimulationError::InvalidSetting { field, .. } => assert_eq!(field, expected),
                other => panic!("unexpected error {other:?}"),
            }
        }
    }
}
