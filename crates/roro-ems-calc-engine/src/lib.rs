//! ---
//! ems_section: "08-energy-models-optimization"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Propulsion power, fuel and power-split calculation routines."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
//! Calculation engine for the hybrid Ro-Ro propulsion advisor.
//!
//! Operating conditions flow one way through the models: hull resistance gives the
//! required shaft power, the decision rules split it between diesel and battery, and
//! the fuel and efficiency models score the split.
pub mod decision;
pub mod efficiency;
pub mod errors;
pub mod fuel;
pub mod model;
pub mod resistance;

pub use decision::{recommend, DecisionEngine, DriveMode, PowerSplit, Recommendation};
pub use efficiency::{compute_efficiency, EfficiencyModel, EfficiencyResult};
pub use errors::{CalcEngineError, Result};
pub use fuel::{compute_fuel, FuelModel, FuelResult};
pub use model::OperatingConditions;
pub use resistance::{compute_required_power, PowerBreakdown, ResistanceModel, VesselParticulars};
