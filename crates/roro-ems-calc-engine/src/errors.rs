//! ---
//! ems_section: "08-energy-models-optimization"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Propulsion power, fuel and power-split calculation routines."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CalcEngineError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalcEngineError {
    #[error("{field} = {value} is outside the valid domain: {reason}")]
    Domain {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl CalcEngineError {
    pub fn domain(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::Domain {
            field,
            value,
            reason,
        }
    }

    /// Name of the input field that was rejected.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Domain { field, .. } => field,
        }
    }
}
