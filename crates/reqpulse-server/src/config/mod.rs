//! Server config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use reqpulse_core::error::{ReqPulseError, Result};

pub use schema::{ServerConfig, ServerSection, WorkloadSection};

pub fn load_from_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ReqPulseError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| ReqPulseError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load from `path`, falling back to built-in defaults when the file does not
/// exist. Any other read or parse failure is still an error.
pub fn load_or_default(path: &str) -> Result<ServerConfig> {
    match fs::read_to_string(path) {
        Ok(s) => load_from_str(&s),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(%path, "config file not found, using defaults");
            Ok(ServerConfig::default())
        }
        Err(e) => Err(ReqPulseError::Internal(format!("read config failed: {e}"))),
    }
}
