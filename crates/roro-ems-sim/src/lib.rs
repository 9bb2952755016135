//! ---
//! ems_section: "11-simulation-test-harness"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Voyage simulation runtime and baseline comparison."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
//! Voyage simulation and baseline comparison for the RoRo-EMS advisor.
//!
//! A simulation evaluates the decision engine once per hour over a synthetic day at
//! sea, carrying the battery state of charge forward; the comparison projects that
//! day's fuel against fixed diesel-only and electric-priority baselines.

pub mod battery;
pub mod comparison;
pub mod engine;
pub mod errors;
pub mod frames;
pub mod voyage;

pub use battery::{BatteryAction, BatteryPolicy};
pub use comparison::{
    compare, ComparisonEngine, ComparisonReport, ComparisonScenario, Economics, SavingsSummary,
    ScenarioKind,
};
pub use engine::{run_seeded_simulation, run_simulation, SimulationEngine, SimulationSettings};
pub use errors::{Result, SimulationError};
pub use frames::{SimulationFrame, SimulationReport, SimulationSummary};
pub use voyage::{VoyageProfile, HOURS_PER_VOYAGE};
