//! ---
//! ems_section: "01-core-functionality"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Shared configuration and logging for the advisor binaries."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use roro_ems_calc_engine::{
    fuel::DEFAULT_RATED_POWER_KW, DecisionEngine, EfficiencyModel, FuelModel,
    OperatingConditions, ResistanceModel, VesselParticulars,
};
use roro_ems_sim::{
    BatteryPolicy, ComparisonEngine, Economics, SimulationSettings, VoyageProfile,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::logging::LogFormat;

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_rated_power_kw() -> f64 {
    DEFAULT_RATED_POWER_KW
}

fn default_initial_soc() -> f64 {
    50.0
}

fn default_scenarios() -> IndexMap<String, OperatingConditions> {
    let mut scenarios = IndexMap::new();
    scenarios.insert(
        "port".to_owned(),
        OperatingConditions::new(10.0, 2, 50.0, 5.0, 0.5, 70.0),
    );
    scenarios.insert(
        "cruise".to_owned(),
        OperatingConditions::new(17.0, 3, 75.0, 8.0, 1.5, 50.0),
    );
    scenarios.insert(
        "rough".to_owned(),
        OperatingConditions::new(14.0, 6, 100.0, 18.0, 4.0, 40.0),
    );
    scenarios.insert(
        "charging".to_owned(),
        OperatingConditions::new(16.0, 3, 50.0, 6.0, 1.0, 25.0),
    );
    scenarios
}

/// Snapshot used by `advise` when neither a preset nor explicit values are given.
pub fn baseline_conditions() -> OperatingConditions {
    OperatingConditions::new(17.0, 4, 75.0, 8.0, 1.5, 50.0)
}

/// Primary configuration object for the advisor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub vessel: VesselParticulars,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub battery: BatteryPolicy,
    #[serde(default)]
    pub voyage: VoyageConfig,
    #[serde(default)]
    pub economics: Economics,
    #[serde(default = "default_scenarios")]
    pub scenarios: IndexMap<String, OperatingConditions>,
}

/// Metadata describing where an [`AppConfig`] was loaded from. `source` is `None`
/// when the built-in defaults are in effect.
#[derive(Debug, Clone)]
pub struct LoadedAppConfig {
    pub config: AppConfig,
    pub source: Option<PathBuf>,
}

impl AppConfig {
    pub const ENV_CONFIG_PATH: &str = "RORO_EMS_CONFIG";

    /// Load configuration, respecting the `RORO_EMS_CONFIG` override.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        Ok(Self::load_with_source(candidates)?.config)
    }

    /// Load configuration together with the effective source path. The environment
    /// override wins over the candidates; with neither present the defaults apply.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedAppConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_path(&path)?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        for candidate in candidates {
            if candidate.as_ref().exists() {
                let path = candidate.as_ref().to_path_buf();
                let config = Self::from_path(&path)?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        debug!("no configuration file found, using built-in defaults");
        Ok(LoadedAppConfig {
            config: Self::default(),
            source: None,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<AppConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn scenario(&self, name: &str) -> Option<&OperatingConditions> {
        self.scenarios.get(name)
    }

    pub fn decision_engine(&self) -> Result<DecisionEngine> {
        self.vessel.validate()?;
        Ok(DecisionEngine::new(
            ResistanceModel::new(self.vessel),
            FuelModel::new(self.engine.rated_power_kw)?,
            EfficiencyModel::new(self.battery.nominal_power_kw)?,
        ))
    }

    pub fn simulation_settings(&self) -> SimulationSettings {
        SimulationSettings {
            initial_battery_soc_percent: self.voyage.initial_battery_soc_percent,
            co2_tons_per_fuel_ton: self.economics.co2_tons_per_fuel_ton,
            voyage: self.voyage.profile,
            battery: self.battery,
        }
    }

    pub fn comparison_engine(&self) -> Result<ComparisonEngine> {
        Ok(ComparisonEngine::new(self.economics)?)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        self.decision_engine()?;
        self.simulation_settings().validate()?;
        self.economics.validate()?;
        for (name, conditions) in &self.scenarios {
            conditions
                .validate()
                .with_context(|| format!("scenario '{}' is out of range", name))?;
        }
        if self.logging.directory.is_none() && self.logging.file_prefix.is_some() {
            return Err(anyhow!(
                "logging.file_prefix requires logging.directory to be set"
            ));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            vessel: VesselParticulars::default(),
            engine: EngineConfig::default(),
            battery: BatteryPolicy::default(),
            voyage: VoyageConfig::default(),
            economics: Economics::default(),
            scenarios: default_scenarios(),
        }
    }
}

impl std::str::FromStr for AppConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: AppConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    /// Filter used when neither `RORO_EMS_LOG` nor `RUST_LOG` is set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enables a daily rolling JSON log file in this directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            level: default_log_level(),
            directory: None,
            file_prefix: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_rated_power_kw")]
    pub rated_power_kw: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rated_power_kw: default_rated_power_kw(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VoyageConfig {
    #[serde(default = "default_initial_soc")]
    pub initial_battery_soc_percent: f64,
    /// Fixed seed for the sea-state jitter; unseeded runs differ each time.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub profile: VoyageProfile,
}

impl Default for VoyageConfig {
    fn default() -> Self {
        Self {
            initial_battery_soc_percent: default_initial_soc(),
            seed: None,
            profile: VoyageProfile::default(),
        }
    }
}
