//! ---
//! ems_section: "08-energy-models-optimization"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Propulsion power, fuel and power-split calculation routines."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use roro_ems_calc_engine::{
    compute_required_power, recommend, resistance::VesselParticulars, DecisionEngine, DriveMode,
    EfficiencyModel, FuelModel, OperatingConditions, ResistanceModel,
};

fn conditions(
    speed: f64,
    sea_state: u8,
    cargo: f64,
    wind: f64,
    wave: f64,
    battery: f64,
) -> OperatingConditions {
    OperatingConditions::new(speed, sea_state, cargo, wind, wave, battery)
}

#[test]
fn cascade_selects_documented_modes() {
    let cases = [
        (conditions(10.0, 3, 50.0, 5.0, 1.0, 50.0), DriveMode::ElectricOnly),
        (conditions(20.0, 3, 50.0, 5.0, 1.0, 50.0), DriveMode::DieselOnly),
        (conditions(16.0, 6, 50.0, 5.0, 1.0, 50.0), DriveMode::DieselHeavyHybrid),
        (conditions(16.0, 3, 80.0, 5.0, 1.0, 50.0), DriveMode::BalancedHybrid),
        (conditions(16.0, 2, 50.0, 5.0, 1.0, 70.0), DriveMode::ElectricHeavyHybrid),
    ];
    for (snapshot, expected) in cases {
        let rec = recommend(&snapshot).expect("valid snapshot");
        assert_eq!(rec.mode, expected, "{snapshot:?}");
    }
}

#[test]
fn every_recommendation_splits_the_whole_load() {
    for speed in [4.0, 9.5, 12.0, 15.0, 17.0, 18.5, 24.0] {
        for sea_state in 1..=7 {
            for battery in [10.0, 35.0, 55.0, 80.0] {
                let rec = recommend(&conditions(speed, sea_state, 75.0, 8.0, 2.0, battery))
                    .expect("valid snapshot");
                assert_eq!(rec.diesel_ratio + rec.electric_ratio, 1.0);
                assert!(rec.fuel_tons_per_hour >= 0.0);
                assert!(
                    (rec.diesel_power_kw + rec.electric_power_kw - rec.total_power_kw).abs() <= 1.0
                );
            }
        }
    }
}

#[test]
fn cruise_snapshot_runs_balanced_hybrid() {
    let rec = recommend(&conditions(17.0, 3, 75.0, 8.0, 1.5, 50.0)).unwrap();

    assert_eq!(rec.mode, DriveMode::BalancedHybrid);
    assert_eq!(rec.diesel_ratio, 0.5);
    assert_eq!(rec.electric_ratio, 0.5);
    assert_eq!(rec.diesel_power_kw, 5_567.0);
    assert_eq!(rec.electric_power_kw, 5_567.0);
    assert_eq!(rec.fuel_tons_per_hour, 1.0);
    assert_eq!(rec.sfoc_g_per_kwh, 180.0);
    assert_eq!(rec.engine_load_percent, 44);
    assert_eq!(rec.fuel_efficiency_percent, 50);
    assert_eq!(rec.battery_utilization_percent, 139);
    assert_eq!(rec.system_efficiency_percent, 64);
}

#[test]
fn rough_weather_snapshot_is_diesel_heavy() {
    let rec = recommend(&conditions(14.0, 6, 100.0, 18.0, 4.0, 40.0)).unwrap();
    assert_eq!(rec.mode, DriveMode::DieselHeavyHybrid);
    assert_eq!(rec.rule, "heavy-weather");
    assert!(rec.diesel_power_kw > rec.electric_power_kw);
}

#[test]
fn charging_snapshot_runs_on_diesel() {
    let rec = recommend(&conditions(16.0, 3, 50.0, 6.0, 1.0, 25.0)).unwrap();
    assert_eq!(rec.mode, DriveMode::DieselOnly);
    assert_eq!(rec.electric_power_kw, 0.0);
    assert_eq!(rec.battery_utilization_percent, 0);
}

#[test]
fn larger_hull_needs_more_power() {
    let snapshot = conditions(16.0, 3, 50.0, 6.0, 1.0, 50.0);
    let baseline = compute_required_power(&snapshot).unwrap();
    let longer = ResistanceModel::new(VesselParticulars {
        length_m: 200.0,
        beam_m: 30.0,
        ..VesselParticulars::default()
    });
    assert!(longer.required_power_kw(&snapshot).unwrap() > baseline);
}

#[test]
fn custom_engine_rating_changes_load_band() {
    let engine = DecisionEngine::new(
        ResistanceModel::default(),
        FuelModel::new(8_000.0).unwrap(),
        EfficiencyModel::default(),
    );
    let rec = engine
        .recommend(&conditions(17.0, 3, 75.0, 8.0, 1.5, 50.0))
        .unwrap();
    // 5,567 kW on an 8,000 kW engine is ~70% load
    assert_eq!(rec.sfoc_g_per_kwh, 170.0);
    assert_eq!(rec.engine_load_percent, 70);
}

#[test]
fn recommendation_serializes_for_display() {
    let rec = recommend(&conditions(17.0, 3, 75.0, 8.0, 1.5, 50.0)).unwrap();
    let json = serde_json::to_value(&rec).unwrap();
    assert_eq!(json["mode"], "Hybrid 50-50");
    assert_eq!(json["rule"], "laden-transit");
    assert_eq!(json["sfoc_g_per_kwh"], 180.0);
}
