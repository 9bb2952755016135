//! ---
//! ems_section: "08-energy-models-optimization"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Propulsion power, fuel and power-split calculation routines."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
//! Calm-water plus added resistance estimate for the hull, converted to the shaft power
//! the propulsion plant has to deliver.
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    errors::{CalcEngineError, Result},
    model::OperatingConditions,
};

pub const KNOTS_TO_METERS_PER_SECOND: f64 = 0.514444;

static SEAWATER_DENSITY: f64 = 1028.0;
static KINEMATIC_VISCOSITY: f64 = 1.19e-6;
static GRAVITY: f64 = 9.81;
static AIR_DENSITY: f64 = 1.225;
static AIR_DRAG_COEFFICIENT: f64 = 0.8;
// Cw = WAVE_COEFFICIENT_SCALE * Fn^4
static WAVE_COEFFICIENT_SCALE: f64 = 0.095;

static SEA_STATE_INCREMENT: f64 = 0.05;
static WAVE_HEIGHT_REFERENCE_M: f64 = 2.0;
static WAVE_HEIGHT_EXPONENT: f64 = 1.5;
static WAVE_HEIGHT_SCALE: f64 = 0.1;
static CARGO_LOAD_SCALE: f64 = 0.12;

static HULL_EFFICIENCY: f64 = 0.98;
static PROPELLER_EFFICIENCY: f64 = 0.65;
static RELATIVE_ROTATIVE_EFFICIENCY: f64 = 0.98;
static TRANSMISSION_LOSS_FACTOR: f64 = 1.03;

/// Main dimensions of the hull. The default is the 15,000 DWT Ro-Ro the advisor was
/// calibrated for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VesselParticulars {
    pub length_m: f64,
    pub beam_m: f64,
    pub draft_m: f64,
    pub displacement_t: f64,
    /// Height of the above-water profile used for the wind-facing frontal area.
    pub superstructure_height_m: f64,
}

impl Default for VesselParticulars {
    fn default() -> Self {
        Self {
            length_m: 180.0,
            beam_m: 26.0,
            draft_m: 8.5,
            displacement_t: 22_000.0,
            superstructure_height_m: 15.0,
        }
    }
}

impl VesselParticulars {
    pub fn validate(&self) -> Result<()> {
        let dimensions = [
            ("length_m", self.length_m),
            ("beam_m", self.beam_m),
            ("draft_m", self.draft_m),
            ("displacement_t", self.displacement_t),
            ("superstructure_height_m", self.superstructure_height_m),
        ];
        for (field, value) in dimensions {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcEngineError::domain(
                    field,
                    value,
                    "vessel dimensions must be greater than zero",
                ));
            }
        }
        Ok(())
    }

    pub fn wetted_surface_m2(&self) -> f64 {
        self.length_m
            * (2.0 * self.draft_m + self.beam_m)
            * ((self.beam_m + self.draft_m) / self.beam_m).sqrt()
    }

    pub fn frontal_area_m2(&self) -> f64 {
        self.beam_m * self.superstructure_height_m
    }
}

/// Intermediate values of one resistance evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerBreakdown {
    pub speed_ms: f64,
    pub wetted_surface_m2: f64,
    pub reynolds_number: f64,
    pub frictional_coefficient: f64,
    pub frictional_resistance_n: f64,
    pub froude_number: f64,
    pub wave_coefficient: f64,
    pub wave_resistance_n: f64,
    pub air_resistance_n: f64,
    pub added_resistance_factor: f64,
    pub load_factor: f64,
    pub total_resistance_n: f64,
    pub effective_power_w: f64,
    pub delivered_power_w: f64,
    pub shaft_power_w: f64,
    pub total_power_kw: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResistanceModel {
    vessel: VesselParticulars,
}

impl ResistanceModel {
    pub fn new(vessel: VesselParticulars) -> Self {
        Self { vessel }
    }

    pub fn vessel(&self) -> &VesselParticulars {
        &self.vessel
    }

    /// Total shaft power in kW required to hold the snapshot's speed.
    pub fn required_power_kw(&self, conditions: &OperatingConditions) -> Result<f64> {
        Ok(self.breakdown(conditions)?.total_power_kw)
    }

    pub fn breakdown(&self, conditions: &OperatingConditions) -> Result<PowerBreakdown> {
        conditions.validate()?;

        let vessel = &self.vessel;
        let speed_ms = conditions.speed_knots * KNOTS_TO_METERS_PER_SECOND;
        let dynamic_pressure = 0.5 * SEAWATER_DENSITY * speed_ms.powi(2);
        let wetted_surface_m2 = vessel.wetted_surface_m2();

        // ITTC-1957 correlation line
        let reynolds_number = speed_ms * vessel.length_m / KINEMATIC_VISCOSITY;
        let frictional_coefficient = 0.075 / (reynolds_number.log10() - 2.0).powi(2);
        let frictional_resistance_n = dynamic_pressure * wetted_surface_m2 * frictional_coefficient;

        let froude_number = speed_ms / (GRAVITY * vessel.length_m).sqrt();
        let wave_coefficient = WAVE_COEFFICIENT_SCALE * froude_number.powi(4);
        let wave_resistance_n = dynamic_pressure * wetted_surface_m2 * wave_coefficient;

        let relative_wind_sq = speed_ms.powi(2) + conditions.wind_ms.powi(2);
        let air_resistance_n =
            0.5 * AIR_DENSITY * vessel.frontal_area_m2() * AIR_DRAG_COEFFICIENT * relative_wind_sq;

        let added_resistance_factor = added_resistance_factor(conditions);
        let load_factor = 1.0 + (conditions.cargo_percent / 100.0) * CARGO_LOAD_SCALE;

        let total_resistance_n = (frictional_resistance_n + wave_resistance_n + air_resistance_n)
            * added_resistance_factor
            * load_factor;
        let effective_power_w = total_resistance_n * speed_ms;
        let delivered_power_w = effective_power_w
            / (HULL_EFFICIENCY * PROPELLER_EFFICIENCY * RELATIVE_ROTATIVE_EFFICIENCY);
        let shaft_power_w = delivered_power_w * TRANSMISSION_LOSS_FACTOR;
        let total_power_kw = shaft_power_w / 1000.0;
        if !total_power_kw.is_finite() || total_power_kw <= 0.0 {
            return Err(CalcEngineError::domain(
                "speed_knots",
                conditions.speed_knots,
                "speed too small to yield a finite, positive power demand",
            ));
        }

        debug!(
            speed_ms,
            frictional_resistance_n,
            wave_resistance_n,
            air_resistance_n,
            added_resistance_factor,
            load_factor,
            total_power_kw,
            "resistance evaluated"
        );

        Ok(PowerBreakdown {
            speed_ms,
            wetted_surface_m2,
            reynolds_number,
            frictional_coefficient,
            frictional_resistance_n,
            froude_number,
            wave_coefficient,
            wave_resistance_n,
            air_resistance_n,
            added_resistance_factor,
            load_factor,
            total_resistance_n,
            effective_power_w,
            delivered_power_w,
            shaft_power_w,
            total_power_kw,
        })
    }
}

/// Shaft power in kW for the default vessel.
pub fn compute_required_power(conditions: &OperatingConditions) -> Result<f64> {
    ResistanceModel::default().required_power_kw(conditions)
}

fn added_resistance_factor(conditions: &OperatingConditions) -> f64 {
    1.0 + f64::from(conditions.sea_state.saturating_sub(1)) * SEA_STATE_INCREMENT
        + (conditions.wave_height_m / WAVE_HEIGHT_REFERENCE_M).powf(WAVE_HEIGHT_EXPONENT)
            * WAVE_HEIGHT_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions(speed_knots: f64) -> OperatingConditions {
        OperatingConditions::new(speed_knots, 3, 75.0, 8.0, 1.5, 50.0)
    }

    #[test]
    fn cruise_power_matches_reference_figure() {
        let power = compute_required_power(&conditions(17.0)).unwrap();
        assert!((power - 11_134.12).abs() < 0.5, "got {power}");
    }

    #[test]
    fn port_manoeuvring_power_matches_reference_figure() {
        let port = OperatingConditions::new(10.0, 2, 50.0, 5.0, 0.5, 70.0);
        let power = compute_required_power(&port).unwrap();
        assert!((power - 1_949.97).abs() < 0.5, "got {power}");
    }

    #[test]
    fn power_grows_with_speed() {
        let mut previous = 0.0;
        for tenth in 1..=300 {
            let speed = f64::from(tenth) / 10.0;
            let power = compute_required_power(&conditions(speed)).unwrap();
            assert!(power > 0.0);
            assert!(power > previous, "power not increasing at {speed} kn");
            previous = power;
        }
    }

    #[test]
    fn added_resistance_grows_with_sea_state_and_waves() {
        let model = ResistanceModel::default();
        let calm = model.breakdown(&conditions(16.0)).unwrap();

        let mut rough = conditions(16.0);
        rough.sea_state = 6;
        let rough = model.breakdown(&rough).unwrap();
        assert!(rough.added_resistance_factor > calm.added_resistance_factor);
        assert!(rough.total_power_kw > calm.total_power_kw);

        let mut swell = conditions(16.0);
        swell.wave_height_m = 4.0;
        let swell = model.breakdown(&swell).unwrap();
        assert!(swell.added_resistance_factor > calm.added_resistance_factor);
    }

    #[test]
    fn breakdown_components_are_consistent() {
        let b = ResistanceModel::default()
            .breakdown(&conditions(17.0))
            .unwrap();
        let expected = (b.frictional_resistance_n + b.wave_resistance_n + b.air_resistance_n)
            * b.added_resistance_factor
            * b.load_factor;
        assert!((b.total_resistance_n - expected).abs() < 1e-6);
        assert!((b.load_factor - 1.09).abs() < 1e-12);
        assert!(b.reynolds_number > 1e9);
        assert!(b.froude_number > 0.2 && b.froude_number < 0.22);
    }

    #[test]
    fn rejects_stationary_vessel() {
        let err = compute_required_power(&conditions(0.0)).unwrap_err();
        assert_eq!(err.field(), "speed_knots");
    }

    #[test]
    fn rejects_speed_that_underflows_to_zero_power() {
        let mut still_air = conditions(1e-300);
        still_air.wind_ms = 0.0;
        let err = compute_required_power(&still_air).unwrap_err();
        assert_eq!(err.field(), "speed_knots");
    }

    #[test]
    fn rejects_degenerate_vessel() {
        let vessel = VesselParticulars {
            beam_m: 0.0,
            ..VesselParticulars::default()
        };
        assert_eq!(vessel.validate().unwrap_err().field(), "beam_m");
        assert!(VesselParticulars::default().validate().is_ok());
    }
}
