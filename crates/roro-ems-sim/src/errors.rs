//! ---
//! ems_section: "11-simulation-test-harness"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Voyage simulation runtime and baseline comparison."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use roro_ems_calc_engine::CalcEngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimulationError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("invalid simulation setting {field} = {value}: {reason}")]
    InvalidSetting {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("hour {hour}: {source}")]
    Step {
        hour: u32,
        #[source]
        source: CalcEngineError,
    },
    #[error(transparent)]
    Calc(#[from] CalcEngineError),
}

impl SimulationError {
    pub fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidSetting {
            field,
            value,
            reason,
        }
    }
}
