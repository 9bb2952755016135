//! ---
//! ems_section: "01-core-functionality"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Shared configuration and logging for the advisor binaries."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
//! Shared runtime plumbing for the RoRo-EMS binaries: TOML configuration that maps
//! onto the calculation and simulation types, and tracing setup.

pub mod config;
pub mod logging;

pub use config::{
    baseline_conditions, AppConfig, EngineConfig, LoadedAppConfig, LoggingConfig, VoyageConfig,
};
pub use logging::{init_tracing, LogFormat, LoggingGuard};
