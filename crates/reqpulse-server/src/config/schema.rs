use std::net::SocketAddr;

use serde::Deserialize;

use reqpulse_core::error::{ReqPulseError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub workload: WorkloadSection,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ReqPulseError::BadConfig(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        self.server.validate()?;
        self.workload.validate()?;
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            workload: WorkloadSection::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen.parse::<SocketAddr>().map_err(|e| {
            ReqPulseError::BadConfig(format!(
                "server.listen must be a valid socket address: {e}"
            ))
        })?;
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

/// Knobs for the simulated workload behind `/work`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkloadSection {
    #[serde(default = "default_sleep_min_ms")]
    pub sleep_min_ms: u64,

    #[serde(default = "default_sleep_max_ms")]
    pub sleep_max_ms: u64,

    #[serde(default = "default_failure_ratio")]
    pub failure_ratio: f64,
}

impl Default for WorkloadSection {
    fn default() -> Self {
        Self {
            sleep_min_ms: default_sleep_min_ms(),
            sleep_max_ms: default_sleep_max_ms(),
            failure_ratio: default_failure_ratio(),
        }
    }
}

impl WorkloadSection {
    pub fn validate(&self) -> Result<()> {
        if self.sleep_min_ms > self.sleep_max_ms {
            return Err(ReqPulseError::BadConfig(
                "workload.sleep_min_ms must not exceed workload.sleep_max_ms".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.failure_ratio) {
            return Err(ReqPulseError::BadConfig(
                "workload.failure_ratio must be between 0.0 and 1.0".into(),
            ));
        }
        Ok(())
    }
}

fn default_sleep_min_ms() -> u64 {
    50
}
fn default_sleep_max_ms() -> u64 {
    250
}
fn default_failure_ratio() -> f64 {
    0.1
}
