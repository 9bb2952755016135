//! ---
//! ems_section: "05-networking-external-interfaces"
//! ems_subsection: "binary"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Operator CLI for the hybrid propulsion advisor."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use std::io::Write;

use anyhow::Result;
use indexmap::IndexMap;
use roro_ems_calc_engine::{
    model::sea_state_description, DriveMode, OperatingConditions, Recommendation,
};
use roro_ems_sim::{
    BatteryAction, ComparisonReport, SimulationFrame, SimulationReport, SimulationSummary,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Advice<'a> {
    pub conditions: &'a OperatingConditions,
    pub sea_state_description: &'a str,
    pub mode_label_ar: &'a str,
    pub recommendation: &'a Recommendation,
}

#[derive(Debug, Serialize)]
pub struct Comparison<'a> {
    pub simulation: &'a SimulationSummary,
    pub comparison: &'a ComparisonReport,
}

/// Flat trace row; csv cannot serialize the nested conditions.
#[derive(Debug, Serialize)]
struct TraceRow {
    hour: u32,
    speed_knots: f64,
    sea_state: u8,
    cargo_percent: f64,
    wind_ms: f64,
    wave_height_m: f64,
    mode: DriveMode,
    diesel_power_kw: f64,
    electric_power_kw: f64,
    fuel_tons: f64,
    battery_action: BatteryAction,
    battery_soc_percent: f64,
    cumulative_fuel_tons: f64,
}

impl From<&SimulationFrame> for TraceRow {
    fn from(frame: &SimulationFrame) -> Self {
        Self {
            hour: frame.hour,
            speed_knots: frame.conditions.speed_knots,
            sea_state: frame.conditions.sea_state,
            cargo_percent: frame.conditions.cargo_percent,
            wind_ms: frame.conditions.wind_ms,
            wave_height_m: frame.conditions.wave_height_m,
            mode: frame.mode,
            diesel_power_kw: frame.diesel_power_kw,
            electric_power_kw: frame.electric_power_kw,
            fuel_tons: frame.fuel_tons,
            battery_action: frame.battery_action,
            battery_soc_percent: frame.battery_soc_percent,
            cumulative_fuel_tons: frame.cumulative_fuel_tons,
        }
    }
}

pub fn sea_state_label(sea_state: u8) -> &'static str {
    sea_state_description(sea_state).unwrap_or("Unknown")
}

pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    out.write_all(b"\n")?;
    Ok(())
}

pub fn write_advice_text<W: Write>(
    out: &mut W,
    conditions: &OperatingConditions,
    rec: &Recommendation,
) -> Result<()> {
    writeln!(out, "Operating conditions")?;
    writeln!(out, "  speed           {:>8.1} kn", conditions.speed_knots)?;
    writeln!(
        out,
        "  sea state       {:>8} ({})",
        conditions.sea_state,
        sea_state_label(conditions.sea_state)
    )?;
    writeln!(out, "  cargo           {:>8.0} %", conditions.cargo_percent)?;
    writeln!(out, "  wind            {:>8.1} m/s", conditions.wind_ms)?;
    writeln!(out, "  wave height     {:>8.1} m", conditions.wave_height_m)?;
    writeln!(out, "  battery         {:>8.0} %", conditions.battery_soc_percent)?;
    writeln!(out)?;
    writeln!(
        out,
        "Recommended mode  {} ({}) [rule: {}]",
        rec.mode,
        rec.mode.label_ar(),
        rec.rule
    )?;
    writeln!(out, "  total power     {:>8.0} kW", rec.total_power_kw)?;
    writeln!(
        out,
        "  diesel power    {:>8.0} kW ({:.0} %)",
        rec.diesel_power_kw,
        rec.diesel_ratio * 100.0
    )?;
    writeln!(
        out,
        "  electric power  {:>8.0} kW ({:.0} %)",
        rec.electric_power_kw,
        rec.electric_ratio * 100.0
    )?;
    writeln!(
        out,
        "  fuel            {:>8.2} t/h (SFOC {} g/kWh, engine load {} %)",
        rec.fuel_tons_per_hour, rec.sfoc_g_per_kwh, rec.engine_load_percent
    )?;
    writeln!(out, "  fuel savings    {:>8} %", rec.fuel_efficiency_percent)?;
    writeln!(out, "  battery use     {:>8} %", rec.battery_utilization_percent)?;
    writeln!(out, "  system eff.     {:>8} %", rec.system_efficiency_percent)?;
    Ok(())
}

fn write_summary_text<W: Write>(out: &mut W, summary: &SimulationSummary) -> Result<()> {
    writeln!(out, "  total fuel      {:>10.2} t", summary.total_fuel_tons)?;
    writeln!(
        out,
        "  mean battery    {:>10.1} %",
        summary.average_battery_soc_percent
    )?;
    writeln!(out, "  CO2             {:>10.0} kg", summary.co2_reduction_kg)?;
    Ok(())
}

pub fn write_trace_text<W: Write>(out: &mut W, report: &SimulationReport) -> Result<()> {
    writeln!(
        out,
        "24-hour voyage, generated {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(
        out,
        "{:>4} {:>6} {:>3} {:<14} {:>7} {:>7} {:>6} {:<9} {:>6} {:>7}",
        "hour", "speed", "ss", "mode", "diesel", "elec", "fuel", "battery", "soc", "cum"
    )?;
    for frame in &report.frames {
        let action: &str = match frame.battery_action {
            BatteryAction::Discharge => "discharge",
            BatteryAction::Charge => "charge",
            BatteryAction::Hold => "hold",
        };
        writeln!(
            out,
            "{:>4} {:>6.2} {:>3} {:<14} {:>7.0} {:>7.0} {:>6.2} {:<9} {:>6.1} {:>7.2}",
            frame.hour,
            frame.conditions.speed_knots,
            frame.conditions.sea_state,
            frame.mode.label(),
            frame.diesel_power_kw,
            frame.electric_power_kw,
            frame.fuel_tons,
            action,
            frame.battery_soc_percent,
            frame.cumulative_fuel_tons
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Summary")?;
    write_summary_text(out, &report.summary)
}

pub fn write_trace_csv<W: Write>(out: &mut W, report: &SimulationReport) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for frame in &report.frames {
        writer.serialize(TraceRow::from(frame))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_comparison_text<W: Write>(
    out: &mut W,
    summary: &SimulationSummary,
    comparison: &ComparisonReport,
) -> Result<()> {
    writeln!(out, "Simulated day")?;
    write_summary_text(out, summary)?;
    writeln!(out)?;
    writeln!(
        out,
        "{:<18} {:>10} {:>10} {:>12} {:>6}",
        "scenario", "fuel t", "CO2 t", "cost USD", "eff %"
    )?;
    for scenario in &comparison.scenarios {
        writeln!(
            out,
            "{:<18} {:>10.2} {:>10.2} {:>12.0} {:>6}",
            scenario.kind.to_string(),
            scenario.fuel_tons,
            scenario.co2_tons,
            scenario.cost_usd,
            scenario.efficiency_percent
        )?;
    }
    let savings = &comparison.savings;
    writeln!(out)?;
    writeln!(out, "Savings against diesel only")?;
    writeln!(
        out,
        "  daily fuel      {:.2} t ({:.1} %)",
        savings.daily_fuel_tons, savings.daily_fuel_percent
    )?;
    writeln!(out, "  annual fuel     {:.1} t/year", savings.annual_fuel_tons)?;
    writeln!(out, "  annual CO2      {:.1} t/year", savings.annual_co2_tons)?;
    writeln!(out, "  annual cost     {:.0} USD/year", savings.annual_cost_usd)?;
    Ok(())
}

pub fn write_scenarios<W: Write>(
    out: &mut W,
    scenarios: &IndexMap<String, OperatingConditions>,
) -> Result<()> {
    writeln!(
        out,
        "{:<12} {:>6} {:<14} {:>6} {:>6} {:>6} {:>8}",
        "name", "speed", "sea state", "cargo", "wind", "wave", "battery"
    )?;
    for (name, c) in scenarios {
        writeln!(
            out,
            "{:<12} {:>6.1} {:<14} {:>6.0} {:>6.1} {:>6.1} {:>8.0}",
            name,
            c.speed_knots,
            format!("{} {}", c.sea_state, sea_state_label(c.sea_state)),
            c.cargo_percent,
            c.wind_ms,
            c.wave_height_m,
            c.battery_soc_percent
        )?;
    }
    Ok(())
}
